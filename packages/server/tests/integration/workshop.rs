use serde_json::json;

use crate::common::{TestApp, routes};

mod workshop_crud {
    use super::*;

    #[tokio::test]
    async fn creates_and_reads_a_workshop() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let id = app.create_workshop(&token, "Soldering", 25).await;
        let res = app.get_without_token(&routes::workshop(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Soldering");
        assert_eq!(res.body["limit_quota"], 25);
        assert!(res.body["event_id"].is_null(), "starts unbound");
    }

    #[tokio::test]
    async fn rejects_non_positive_quota() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;

        let res = app
            .post_with_token(
                routes::WORKSHOPS,
                &json!({
                    "name": "Zero Seats",
                    "description": "d",
                    "instructor": "i",
                    "image": "w.png",
                    "limit_quota": 0,
                    "start_at": "01-09-2026T10:00",
                    "end_at": "01-09-2026T12:00",
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_keeps_dates_inside_the_bound_event() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Host Event").await;
        let workshop_id = app.create_workshop(&token, "Bounded", 10).await;
        app.link_workshop(&token, event_id, workshop_id).await;

        let res = app
            .patch_with_token(
                &routes::workshop(workshop_id),
                &json!({ "end_at": "10-09-2026T12:00" }),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn filters_by_event() {
        let app = TestApp::spawn().await;
        let token = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&token, "Host Event").await;
        let bound = app.create_workshop(&token, "Bound", 10).await;
        app.create_workshop(&token, "Loose", 10).await;
        app.link_workshop(&token, event_id, bound).await;

        let res = app
            .get_without_token(&format!("{}?event_id={}", routes::WORKSHOPS, event_id))
            .await;
        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["name"], "Bound");
    }

    #[tokio::test]
    async fn delete_removes_roster_and_folios() {
        use sea_orm::EntityTrait;
        use server::entity::{qr_workshop, workshop_participant};

        let app = TestApp::spawn().await;
        let admin = app.create_event_admin("eva@example.com", "organizer_pw1").await;
        let event_id = app.create_event(&admin, "Host Event").await;
        let workshop_id = app.create_workshop(&admin, "Doomed", 10).await;
        app.link_workshop(&admin, event_id, workshop_id).await;

        let ana = app.create_participant("ana@example.com", "s3cure_Pass!").await;
        let res = app
            .post_with_token(&routes::workshop_enrollments(workshop_id), &json!({}), &ana)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let del = app
            .delete_with_token(&routes::workshop(workshop_id), &admin)
            .await;
        assert_eq!(del.status, 204, "{}", del.text);

        assert!(workshop_participant::Entity::find()
            .all(&app.db)
            .await
            .unwrap()
            .is_empty());
        assert!(qr_workshop::Entity::find().all(&app.db).await.unwrap().is_empty());
    }
}
