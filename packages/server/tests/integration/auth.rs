use serde_json::json;

use crate::common::{TestApp, routes};

fn valid_register_body(email: &str) -> serde_json::Value {
    json!({
        "name": "Ana",
        "last_name": "Lopez",
        "email": email,
        "password": "s3cure_Pass!",
    })
}

mod registration {
    use super::*;

    #[tokio::test]
    async fn registers_a_participant() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::REGISTER, &valid_register_body("ana@example.com"))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["email"], "ana@example.com");
        assert_eq!(res.body["role"], "participant");
        assert!(res.body.get("password").is_none(), "password must not leak");
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let app = TestApp::spawn().await;
        let body = valid_register_body("dup@example.com");

        let first = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(first.status, 201);

        let second = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(second.status, 409);
        assert_eq!(second.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn email_uniqueness_spans_account_types() {
        let app = TestApp::spawn().await;
        // Claim the email as a super admin first.
        app.create_super_admin("shared@example.com", "rootpass123")
            .await;

        let res = app
            .post_without_token(routes::REGISTER, &valid_register_body("shared@example.com"))
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let app = TestApp::spawn().await;
        let mut body = valid_register_body("short@example.com");
        body["password"] = json!("short");

        let res = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn logs_in_and_reads_own_profile() {
        let app = TestApp::spawn().await;
        let token = app.create_participant("login@example.com", "s3cure_Pass!").await;

        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.status, 200, "{}", me.text);
        assert_eq!(me.body["email"], "login@example.com");
        assert_eq!(me.body["role"], "participant");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let app = TestApp::spawn().await;
        app.create_participant("wrongpw@example.com", "s3cure_Pass!")
            .await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({ "email": "wrongpw@example.com", "password": "not-the-password" }),
            )
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn rejects_unknown_email() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({ "email": "ghost@example.com", "password": "whatever123" }),
            )
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn me_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod recovery {
    use super::*;

    #[tokio::test]
    async fn recovery_start_never_reveals_account_existence() {
        let app = TestApp::spawn().await;
        app.create_participant("known@example.com", "s3cure_Pass!")
            .await;

        let known = app
            .post_without_token(
                "/api/v1/auth/recovery",
                &json!({ "email": "known@example.com" }),
            )
            .await;
        let unknown = app
            .post_without_token(
                "/api/v1/auth/recovery",
                &json!({ "email": "ghost@example.com" }),
            )
            .await;

        assert_eq!(known.status, 204);
        assert_eq!(unknown.status, 204);
    }

    #[tokio::test]
    async fn rejects_a_bad_recovery_code() {
        let app = TestApp::spawn().await;
        app.create_participant("recover@example.com", "s3cure_Pass!")
            .await;

        let res = app
            .post_without_token(
                "/api/v1/auth/recovery/confirm",
                &json!({
                    "email": "recover@example.com",
                    "code": "000000",
                    "new_password": "brand_new_pass",
                }),
            )
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }
}

mod event_admin_accounts {
    use super::*;

    #[tokio::test]
    async fn super_admin_creates_an_event_admin() {
        let app = TestApp::spawn().await;
        let root = app.create_super_admin("root@example.com", "rootpass123").await;

        let res = app
            .post_with_token(
                routes::EVENT_ADMINS,
                &json!({
                    "name": "Eva",
                    "last_name": "Organizer",
                    "email": "eva@example.com",
                    "password": "organizer_pw1",
                    "phone": "555-0100",
                    "company": "Eventra",
                }),
                &root,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["role"], "event_admin");

        // The new admin can log in.
        app.login("eva@example.com", "organizer_pw1").await;
    }

    #[tokio::test]
    async fn participant_cannot_create_event_admins() {
        let app = TestApp::spawn().await;
        let token = app.create_participant("pleb@example.com", "s3cure_Pass!").await;

        let res = app
            .post_with_token(
                routes::EVENT_ADMINS,
                &json!({
                    "name": "Eva",
                    "last_name": "Organizer",
                    "email": "eva2@example.com",
                    "password": "organizer_pw1",
                    "phone": "",
                    "company": "",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}
