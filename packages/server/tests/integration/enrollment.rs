use serde_json::json;

use crate::common::{TestApp, routes};

mod event_enrollment {
    use super::*;

    #[tokio::test]
    async fn enrolling_issues_folio_and_qr() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;

        let res = app
            .post_with_token(&routes::event_enrollments(event_id), &json!({}), &ana)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let folio = res.body["folio"].as_str().unwrap();
        assert_eq!(folio.len(), 10);
        assert!(
            res.body["qr"]
                .as_str()
                .unwrap()
                .starts_with("data:image/svg+xml;base64,")
        );
    }

    #[tokio::test]
    async fn duplicate_enrollment_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;

        app.enroll_in_event(&ana, event_id).await;

        let res = app
            .post_with_token(&routes::event_enrollments(event_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn admins_cannot_enroll_themselves() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;

        let res = app
            .post_with_token(&routes::event_enrollments(event_id), &json!({}), &admin)
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn walk_up_enrollment_creates_an_account() {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
        use server::entity::participant;

        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;

        // No token, no existing account: just an email and a name.
        let body = json!({
            "email": "walkup@example.com",
            "name": "Walk",
            "last_name": "Up",
        });
        let res = app
            .post_without_token(&routes::event_enrollments(event_id), &body)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["folio"].as_str().unwrap().len(), 10);

        let created = participant::Entity::find()
            .filter(participant::Column::Email.eq("walkup@example.com"))
            .one(&app.db)
            .await
            .unwrap();
        assert!(created.is_some());

        // The same email now resolves to that account, so re-enrolling is a
        // duplicate rather than a second account.
        let res = app
            .post_without_token(&routes::event_enrollments(event_id), &body)
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn walk_up_with_password_can_log_in() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;

        let res = app
            .post_without_token(
                &routes::event_enrollments(event_id),
                &json!({
                    "email": "walkup@example.com",
                    "name": "Walk",
                    "last_name": "Up",
                    "password": "chosen_pass1",
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let token = app.login("walkup@example.com", "chosen_pass1").await;
        let ledger = app.get_with_token(routes::MY_QRS, &token).await;
        assert_eq!(ledger.status, 200, "{}", ledger.text);
        assert_eq!(ledger.body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn walk_up_with_staff_email_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;

        let res = app
            .post_without_token(
                &routes::event_enrollments(event_id),
                &json!({
                    "email": "eva@example.com",
                    "name": "Eva",
                    "last_name": "Organizer",
                }),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn anonymous_enrollment_requires_an_email() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;

        let res = app
            .post_without_token(&routes::event_enrollments(event_id), &json!({}))
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn roster_lists_enrolled_participants() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        app.enroll_in_event(&ana, event_id).await;

        let res = app
            .get_with_token(&routes::event_participants(event_id), &admin)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["email"], "ana@example.com");
        assert_eq!(data[0]["attended"], false);
    }
}

mod workshop_enrollment {
    use super::*;

    #[tokio::test]
    async fn auto_enrolls_into_the_event() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let workshop_id = app.create_workshop(&admin, "Soldering", 10).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["folio"].as_str().unwrap().len(), 10);
        // Not previously enrolled in the event, so the implicit enrollment
        // is reported alongside.
        assert_eq!(res.body["event_enrollment"]["event_id"], event_id.to_string());

        // The QR ledger now has one event entry with one nested workshop.
        let ledger = app.get_with_token(routes::MY_QRS, &ana).await;
        assert_eq!(ledger.status, 200, "{}", ledger.text);
        let entries = ledger.body["data"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["workshops"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_implicit_enrollment_when_already_in_event() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let workshop_id = app.create_workshop(&admin, "Soldering", 10).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        app.enroll_in_event(&ana, event_id).await;

        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body.get("event_enrollment").is_none());
    }

    #[tokio::test]
    async fn unbound_workshop_rejects_enrollment() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let workshop_id = app.create_workshop(&admin, "Orphan", 10).await;
        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;

        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn full_workshop_rejects_enrollment() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let workshop_id = app.create_workshop(&admin, "Tiny Room", 1).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let first = app.create_participant("first@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &first)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let second = app.create_participant("second@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &second)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn overlapping_workshops_in_one_event_are_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let first = app
            .create_workshop_at(&admin, "Morning A", 10, "01-09-2026T10:00", "01-09-2026T12:00")
            .await;
        let clashing = app
            .create_workshop_at(&admin, "Morning B", 10, "01-09-2026T11:00", "01-09-2026T13:00")
            .await;
        let later = app
            .create_workshop_at(&admin, "Afternoon", 10, "01-09-2026T14:00", "01-09-2026T16:00")
            .await;
        app.link_workshop(&admin, event_id, first).await;
        app.link_workshop(&admin, event_id, clashing).await;
        app.link_workshop(&admin, event_id, later).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(first), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app
            .post_with_token(&routes::workshop_enrollments(clashing), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        // A non-overlapping slot is fine.
        let res = app
            .post_with_token(&routes::workshop_enrollments(later), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn overlapping_workshops_across_events_are_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_a = app.create_event(&admin, "Summit A").await;
        let event_b = app.create_event(&admin, "Summit B").await;
        let first = app
            .create_workshop_at(&admin, "Morning A", 10, "01-09-2026T10:00", "01-09-2026T12:00")
            .await;
        let clashing = app
            .create_workshop_at(&admin, "Morning B", 10, "01-09-2026T11:00", "01-09-2026T13:00")
            .await;
        app.link_workshop(&admin, event_a, first).await;
        app.link_workshop(&admin, event_b, clashing).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(first), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        // The clash lives under a different event; the schedule check still
        // applies.
        let res = app
            .post_with_token(&routes::workshop_enrollments(clashing), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn duplicate_workshop_enrollment_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let workshop_id = app.create_workshop(&admin, "Soldering", 10).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }
}

mod participant_lookup {
    use super::*;

    #[tokio::test]
    async fn folio_search_finds_event_and_workshop_entries() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Tech Summit").await;
        let workshop_id = app.create_workshop(&admin, "Soldering", 10).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let event_folio = app.enroll_in_event(&ana, event_id).await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let workshop_folio = res.body["folio"].as_str().unwrap().to_string();

        let res = app
            .get_with_token(&format!("{}?folio={event_folio}", routes::MY_QR_SEARCH), &ana)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["event_id"], event_id.to_string());
        assert!(res.body.get("workshop_id").is_none());
        assert!(res.body["qr"].as_str().unwrap().starts_with("data:image/svg+xml;base64,"));

        let res = app
            .get_with_token(
                &format!("{}?folio={workshop_folio}", routes::MY_QR_SEARCH),
                &ana,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["workshop_id"], workshop_id.to_string());
        assert_eq!(res.body["event_id"], event_id.to_string());

        let res = app
            .get_with_token(&format!("{}?folio=ffffffffff", routes::MY_QR_SEARCH), &ana)
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn staff_look_participants_up_by_email() {
        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;

        let res = app
            .get_with_token(
                &format!("{}?email=ana@example.com", routes::PARTICIPANT_BY_EMAIL),
                &admin,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["email"], "ana@example.com");
        assert_eq!(res.body["role"], "participant");

        // Participants themselves cannot use the lookup.
        let res = app
            .get_with_token(
                &format!("{}?email=ana@example.com", routes::PARTICIPANT_BY_EMAIL),
                &ana,
            )
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}
