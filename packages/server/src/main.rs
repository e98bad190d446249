use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::seed;
use server::state::AppState;
use server::utils::mail::Mailer;
use server::utils::recovery::RecoveryCodes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    seed::ensure_indexes(&db).await?;
    seed::seed_super_admin(&db, &config).await?;

    let mailer = Mailer::from_config(&config.mail)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        db,
        config: Arc::new(config),
        mailer,
        recovery_codes: Arc::new(RecoveryCodes::default()),
    };

    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
