use serde_json::json;

use crate::common::{TestApp, member, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_a_team_event() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_EVENTS,
                &json!({"name": "  Code Clash 5.0 ", "date": "2030-02-01T10:00:00Z", "teamSize": 3}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Code Clash 5.0");
        assert_eq!(res.body["isOpen"], true);
        assert_eq!(res.body["eventType"], "team_registration");
        assert_eq!(res.body["teamSize"], 3);
    }

    #[tokio::test]
    async fn team_size_defaults_to_one() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_EVENTS,
                &json!({"name": "Solo Sprint", "date": "2030-02-01T10:00:00Z"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["teamSize"], 1);
    }

    #[tokio::test]
    async fn name_and_date_are_required() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(routes::ADMIN_EVENTS, &json!({"name": "No Date"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["error"], "Name and date are required");
    }

    #[tokio::test]
    async fn team_size_must_be_in_range() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_EVENTS,
                &json!({"name": "Huge", "date": "2030-02-01T10:00:00Z", "teamSize": 11}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Team size must be a number between 1 and 10");
    }

    #[tokio::test]
    async fn recruitment_event_needs_teams() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_EVENTS,
                &json!({"name": "Recruitment", "date": "2030-02-01T10:00:00Z", "eventType": "recruitment"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn recruitment_event_keeps_its_configuration() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_EVENTS,
                &json!({
                    "name": "Club Recruitment 2025",
                    "date": "2030-02-01T10:00:00Z",
                    "eventType": "recruitment",
                    "teams": [
                        {"id": "web", "name": "Web Development", "maxMembers": 5, "questions": [
                            {"id": "stack", "type": "mcq", "question": "Stack?", "required": true, "options": ["React", "Vue"]}
                        ]},
                        {"id": "design", "name": "Design"}
                    ],
                    "commonQuestions": [{"id": "why", "type": "textarea", "question": "Why join?", "required": true, "maxLength": 500}],
                    "allowMultipleTeamSelection": true
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["teams"][0]["maxMembers"], 5);
        assert_eq!(res.body["teams"][0]["questions"][0]["type"], "mcq");
        assert_eq!(res.body["commonQuestions"][0]["maxLength"], 500);
        assert_eq!(res.body["allowMultipleTeamSelection"], true);
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn admin_list_is_sorted_by_date() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_event(&token, &json!({"name": "Later", "date": "2031-01-01T00:00:00Z"}))
            .await;
        app.create_event(&token, &json!({"name": "Sooner", "date": "2030-01-01T00:00:00Z"}))
            .await;

        let res = app.get_with_token(routes::ADMIN_EVENTS, &token).await;

        assert_eq!(res.status, 200);
        let events = res.body["events"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["name"], "Sooner");
        assert_eq!(events[1]["name"], "Later");
    }

    #[tokio::test]
    async fn get_single_event() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "WebMinds", 2).await;

        let res = app.get_with_token(&routes::admin_event(id), &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "WebMinds");

        let res = app.get_with_token(&routes::admin_event(id + 1000), &token).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Event not found");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn partial_update_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 2).await;

        let res = app
            .put_with_token(
                routes::ADMIN_EVENTS,
                &json!({"id": id, "name": "Code Clash 6.0"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Code Clash 6.0");
        assert_eq!(res.body["teamSize"], 2);
        assert_eq!(res.body["isOpen"], true);
    }

    #[tokio::test]
    async fn update_requires_id() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .put_with_token(routes::ADMIN_EVENTS, &json!({"name": "x"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Event ID is required");
    }

    #[tokio::test]
    async fn merged_configuration_is_revalidated() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 2).await;

        // Switching to recruitment without teams leaves an unusable form.
        let res = app
            .put_with_token(
                routes::ADMIN_EVENTS,
                &json!({"id": id, "eventType": "recruitment"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_missing_event_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .put_with_token(routes::ADMIN_EVENTS, &json!({"id": 4242, "name": "x"}), &token)
            .await;

        assert_eq!(res.status, 404);
    }
}

mod toggle {
    use super::*;

    #[tokio::test]
    async fn toggle_without_body_flips_and_hides_from_public_list() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Hack Night", 1).await;

        let public = app.get_without_token(routes::EVENTS).await;
        assert_eq!(public.body["events"].as_array().unwrap().len(), 1);

        let res = app.post_empty_with_token(&routes::toggle_event(id), &token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["isOpen"], false);

        let public = app.get_without_token(routes::EVENTS).await;
        assert_eq!(public.status, 200);
        assert!(public.body["events"].as_array().unwrap().is_empty());

        let res = app.post_empty_with_token(&routes::toggle_event(id), &token).await;
        assert_eq!(res.body["isOpen"], true);
        let public = app.get_without_token(routes::EVENTS).await;
        assert_eq!(public.body["events"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn toggle_with_explicit_state_is_idempotent() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Hack Night", 1).await;

        for _ in 0..2 {
            let res = app
                .post_with_token(&routes::toggle_event(id), &json!({"isOpen": false}), &token)
                .await;
            assert_eq!(res.status, 200);
            assert_eq!(res.body["isOpen"], false);
        }
    }

    #[tokio::test]
    async fn closed_event_rejects_submissions() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Hack Night", 1).await;
        app.post_with_token(&routes::toggle_event(id), &json!({"isOpen": false}), &token)
            .await;

        let res = app
            .post_without_token(routes::REGISTER, &json!({"event": id, "members": [member(1)]}))
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "REGISTRATION_CLOSED");
        assert_eq!(res.body["error"], "Registration for this event is closed");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_cascades_registrations() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Hack Night", 1).await;
        app.register_team(id, vec![member(1)]).await;

        let res = app
            .delete_with_token(routes::ADMIN_EVENTS, &json!({"id": id}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Event deleted successfully");

        let res = app.get_with_token(&routes::admin_event(id), &token).await;
        assert_eq!(res.status, 404);

        let res = app.get_with_token(routes::REGISTRATIONS, &token).await;
        assert_eq!(res.body["pagination"]["total"], 0);
    }

    #[tokio::test]
    async fn delete_missing_event_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .delete_with_token(routes::ADMIN_EVENTS, &json!({"id": 999}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
