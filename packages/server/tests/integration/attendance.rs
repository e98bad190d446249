use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

/// Stands up an event with an assigned supervisor and one enrolled
/// participant, returning (event_id, supervisor_token, folio).
async fn event_with_checkin(app: &TestApp) -> (Uuid, String, String) {
    let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
    let event_id = app.create_event(&admin, "Tech Summit").await;

    let me = app.get_with_token(routes::ME, &admin).await;
    let admin_id: Uuid = me.body["id"].as_str().unwrap().parse().unwrap();
    let (supervisor_id, supervisor) = app
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

    let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
    let folio = app.enroll_in_event(&ana, event_id).await;
    (event_id, supervisor, folio)
}

mod event_checkin {
    use super::*;

    #[tokio::test]
    async fn supervisor_marks_attendance() {
        let app = TestApp::spawn().await;
        let (event_id, supervisor, folio) = event_with_checkin(&app).await;

        let res = app
            .post_with_token(
                &routes::event_attendance(event_id),
                &json!({ "folio": folio }),
                &supervisor,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["attended"], true);
        assert_eq!(res.body["name"], "Test");
        assert_eq!(res.body["event_name"], "Tech Summit");
    }

    #[tokio::test]
    async fn rescanning_an_event_folio_is_harmless() {
        let app = TestApp::spawn().await;
        let (event_id, supervisor, folio) = event_with_checkin(&app).await;

        for _ in 0..2 {
            let res = app
                .post_with_token(
                    &routes::event_attendance(event_id),
                    &json!({ "folio": folio }),
                    &supervisor,
                )
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
            assert_eq!(res.body["attended"], true);
        }
    }

    #[tokio::test]
    async fn manual_marking_by_participant_id() {
        let app = TestApp::spawn().await;
        let (event_id, _, _) = event_with_checkin(&app).await;

        let ana = app.login("ana@example.com", "s3cure_Pass!").await;
        let me = app.get_with_token(routes::ME, &ana).await;
        let ana_id: Uuid = me.body["id"].as_str().unwrap().parse().unwrap();

        let admin = app.login("eva@example.com", "organizer_pw1").await;
        for _ in 0..2 {
            let res = app
                .post_with_token(
                    &routes::event_participant_attendance(event_id, ana_id),
                    &json!({}),
                    &admin,
                )
                .await;
            assert_eq!(res.status, 200, "{}", res.text);
            assert_eq!(res.body["attended"], true);
        }
    }

    #[tokio::test]
    async fn unknown_folio_is_not_found() {
        let app = TestApp::spawn().await;
        let (event_id, supervisor, _) = event_with_checkin(&app).await;

        let res = app
            .post_with_token(
                &routes::event_attendance(event_id),
                &json!({ "folio": "ffffffffff" }),
                &supervisor,
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn participants_cannot_run_checkin() {
        let app = TestApp::spawn().await;
        let (event_id, _, folio) = event_with_checkin(&app).await;
        let ana = app.login("ana@example.com", "s3cure_Pass!").await;

        let res = app
            .post_with_token(
                &routes::event_attendance(event_id),
                &json!({ "folio": folio }),
                &ana,
            )
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn unassigned_supervisor_is_rejected() {
        let app = TestApp::spawn().await;
        let (event_id, _, folio) = event_with_checkin(&app).await;

        let admin = app.login("eva@example.com", "organizer_pw1").await;
        let me = app.get_with_token(routes::ME, &admin).await;
        let admin_id: Uuid = me.body["id"].as_str().unwrap().parse().unwrap();
        let (_, outsider) = app
            .create_supervisor_with_login("other-door@example.com", "doorpass123", admin_id)
            .await;

        let res = app
            .post_with_token(
                &routes::event_attendance(event_id),
                &json!({ "folio": folio }),
                &outsider,
            )
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn folio_lookup_resolves_the_participant() {
        let app = TestApp::spawn().await;
        let (event_id, supervisor, folio) = event_with_checkin(&app).await;

        let res = app
            .get_with_token(&routes::event_folio(event_id, &folio), &supervisor)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["email"], "ana@example.com");
        assert_eq!(res.body["folio"], folio);
    }
}

mod workshop_checkin {
    use super::*;

    async fn workshop_with_checkin(app: &TestApp) -> (Uuid, String, String) {
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let workshop_id = app.create_workshop(&admin, "Soldering", 10).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let me = app.get_with_token(routes::ME, &admin).await;
        let admin_id: Uuid = me.body["id"].as_str().unwrap().parse().unwrap();
        let (supervisor_id, supervisor) = app
            .create_supervisor_with_login("door@example.com", "doorpass123", admin_id)
            .await;
        let res = app
            .post_with_token(
                &routes::workshop_supervisors(workshop_id),
                &json!({ "supervisor_id": supervisor_id }),
                &admin,
            )
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let folio = res.body["folio"].as_str().unwrap().to_string();
        (workshop_id, supervisor, folio)
    }

    #[tokio::test]
    async fn first_scan_succeeds_second_is_rejected() {
        let app = TestApp::spawn().await;
        let (workshop_id, supervisor, folio) = workshop_with_checkin(&app).await;

        let res = app
            .post_with_token(
                &routes::workshop_attendance(workshop_id),
                &json!({ "folio": folio }),
                &supervisor,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["attended"], true);
        assert_eq!(res.body["workshop_name"], "Soldering");

        // Workshop folios are single-entry.
        let res = app
            .post_with_token(
                &routes::workshop_attendance(workshop_id),
                &json!({ "folio": folio }),
                &supervisor,
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn unknown_workshop_folio_is_not_found() {
        let app = TestApp::spawn().await;
        let (workshop_id, supervisor, _) = workshop_with_checkin(&app).await;

        let res = app
            .post_with_token(
                &routes::workshop_attendance(workshop_id),
                &json!({ "folio": "0000000000" }),
                &supervisor,
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
