use serde_json::json;

use crate::common::{TestApp, routes, valid_event_body};

mod event_creation {
    use super::*;

    #[tokio::test]
    async fn event_admin_creates_an_event() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let res = app
            .post_with_token(routes::EVENTS, &valid_event_body("Tech Summit"), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Tech Summit");
        assert_eq!(res.body["banner_images"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn participant_cannot_create_events() {
        let app = TestApp::spawn().await;
        let token = app.create_participant("ana@example.com", "s3cure_Pass!").await;

        let res = app
            .post_with_token(routes::EVENTS, &valid_event_body("Nope"), &token)
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn rejects_fewer_than_three_banners() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let mut body = valid_event_body("Thin Banners");
        body["banner_images"] = json!(["only.png", "two.png"]);
        let res = app.post_with_token(routes::EVENTS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_end_before_start() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let mut body = valid_event_body("Backwards");
        body["start_at"] = json!("03-09-2026");
        body["end_at"] = json!("01-09-2026");
        let res = app.post_with_token(routes::EVENTS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_zero_length_schedule() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let mut body = valid_event_body("Instantaneous");
        body["start_at"] = json!("01-09-2026T08:00");
        body["end_at"] = json!("01-09-2026T08:00");
        let res = app.post_with_token(routes::EVENTS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_duplicate_name() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        app.create_event(&token, "Same Name").await;
        let res = app
            .post_with_token(routes::EVENTS, &valid_event_body("Same Name"), &token)
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn accepts_day_first_and_rfc3339_dates() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let mut body = valid_event_body("Mixed Dates");
        body["start_at"] = json!("2026-09-01T08:00:00Z");
        body["end_at"] = json!("03-09-2026T20:00");
        let res = app.post_with_token(routes::EVENTS, &body, &token).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["start_at"], "2026-09-01T08:00:00Z");
    }
}

mod event_listing {
    use super::*;

    #[tokio::test]
    async fn lists_are_public_and_filter_by_name() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        app.create_event(&token, "Rust Conference").await;
        app.create_event(&token, "Cooking Camp").await;

        let all = app.get_without_token(routes::EVENTS).await;
        assert_eq!(all.status, 200);
        assert_eq!(all.body["data"].as_array().unwrap().len(), 2);

        let filtered = app
            .get_without_token(&format!("{}?name=rust", routes::EVENTS))
            .await;
        assert_eq!(filtered.status, 200);
        let data = filtered.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["name"], "Rust Conference");
    }

    #[tokio::test]
    async fn get_returns_404_for_missing_event() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::event(uuid::Uuid::new_v4()))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod event_update {
    use super::*;

    #[tokio::test]
    async fn patches_selected_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Original").await;

        let res = app
            .patch_with_token(
                &routes::event(event_id),
                &json!({ "location": "New Venue" }),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["location"], "New Venue");
        assert_eq!(res.body["name"], "Original");
    }

    #[tokio::test]
    async fn cross_field_date_check_uses_existing_values() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Dated").await;

        // Move the start past the stored end.
        let res = app
            .patch_with_token(
                &routes::event(event_id),
                &json!({ "start_at": "10-09-2026" }),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn banner_floor_holds_on_update() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Bannered").await;

        let res = app
            .patch_with_token(
                &routes::event(event_id),
                &json!({ "banner_images": ["just-one.png"] }),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn foreign_event_admin_cannot_update() {
        let app = TestApp::spawn().await;
        let owner = app.create_event_admin("owner@example.com", "organizer_pw1").await;
        let other = app.create_event_admin("other@example.com", "organizer_pw2").await;
        let event_id = app.create_event(&owner, "Guarded").await;

        let res = app
            .patch_with_token(
                &routes::event(event_id),
                &json!({ "location": "Hijacked" }),
                &other,
            )
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

mod workshop_binding {
    use super::*;

    #[tokio::test]
    async fn binds_a_workshop_once() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Host Event").await;
        let other_event = app.create_event(&token, "Other Event").await;
        let workshop_id = app.create_workshop(&token, "Welding 101", 10).await;

        app.link_workshop(&token, event_id, workshop_id).await;

        // The binding is one-time, even towards another event.
        let res = app
            .post_with_token(
                &routes::event_workshops(other_event),
                &json!({ "workshop_id": workshop_id }),
                &token,
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn rejects_workshop_outside_event_dates() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Host Event").await;
        let workshop_id = app
            .create_workshop_at(&token, "Too Late", 10, "10-09-2026T10:00", "10-09-2026T12:00")
            .await;

        let res = app
            .post_with_token(
                &routes::event_workshops(event_id),
                &json!({ "workshop_id": workshop_id }),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod supervisors_on_events {
    use super::*;
    use server::entity::event_supervisor;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn duplicate_assignment_is_a_conflict() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Staffed Event").await;

        // Resolve the admin's id from the profile endpoint.
        let me = app.get_with_token(routes::ME, &admin).await;
        let admin_id: uuid::Uuid = me.body["id"].as_str().unwrap().parse().unwrap();

        let (supervisor_id, _) = app
            .create_supervisor_with_login("door@example.com", "doorpass123", admin_id)
            .await;

        let res = app
            .post_with_token(
                &routes::event_supervisors(event_id),
                &json!({ "supervisor_id": supervisor_id }),
                &admin,
            )
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let res = app
            .post_with_token(
                &routes::event_supervisors(event_id),
                &json!({ "supervisor_id": supervisor_id }),
                &admin,
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");

        let links = event_supervisor::Entity::find().all(&app.db).await.unwrap();
        assert_eq!(links.len(), 1);
    }
}
