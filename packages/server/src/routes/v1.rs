use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/events", event_routes())
        .nest("/workshops", workshop_routes())
        .nest("/supervisors", supervisor_routes())
        .nest("/participants", participant_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
        .routes(routes!(handlers::auth::start_recovery))
        .routes(routes!(handlers::auth::confirm_recovery))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::user::create_event_admin))
        .routes(routes!(handlers::user::update_me))
        .routes(routes!(handlers::user::get_user))
}

fn event_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::event::create_event,
            handlers::event::list_events
        ))
        .routes(routes!(
            handlers::event::get_event,
            handlers::event::update_event,
            handlers::event::delete_event
        ))
        .routes(routes!(handlers::event::add_event_supervisor))
        .routes(routes!(handlers::event::link_workshop))
        .routes(routes!(handlers::event::list_event_participants))
        .routes(routes!(handlers::event::enroll_in_event))
        .routes(routes!(handlers::event::cancel_event_enrollment))
        .routes(routes!(handlers::event::mark_event_attendance))
        .routes(routes!(handlers::event::mark_participant_attendance))
        .routes(routes!(handlers::event::lookup_event_folio))
}

fn workshop_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::workshop::create_workshop,
            handlers::workshop::list_workshops
        ))
        .routes(routes!(
            handlers::workshop::get_workshop,
            handlers::workshop::update_workshop,
            handlers::workshop::delete_workshop
        ))
        .routes(routes!(handlers::workshop::add_workshop_supervisor))
        .routes(routes!(handlers::workshop::remove_workshop_supervisor))
        .routes(routes!(handlers::workshop::enroll_in_workshop))
        .routes(routes!(handlers::workshop::cancel_workshop_enrollment))
        .routes(routes!(handlers::workshop::mark_workshop_attendance))
}

fn supervisor_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::supervisor::create_supervisor,
            handlers::supervisor::list_supervisors
        ))
        .routes(routes!(
            handlers::supervisor::get_supervisor,
            handlers::supervisor::update_supervisor,
            handlers::supervisor::delete_supervisor
        ))
}

fn participant_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::participant::get_my_qr_ledger))
        .routes(routes!(handlers::participant::search_my_folio))
        .routes(routes!(handlers::participant::find_participant_by_email))
}
