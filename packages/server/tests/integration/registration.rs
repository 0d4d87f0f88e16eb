use serde_json::{Value, json};

use crate::common::{TestApp, member, routes};

fn with(mut m: Value, field: &str, value: &str) -> Value {
    m[field] = json!(value);
    m
}

async fn recruitment_event(app: &TestApp, token: &str) -> i32 {
    app.create_event(
        token,
        &json!({
            "name": "Club Recruitment",
            "date": "2030-02-01T10:00:00Z",
            "eventType": "recruitment",
            "teams": [
                {"id": "web", "name": "Web Development", "maxMembers": 1, "questions": [
                    {"id": "stack", "type": "mcq", "question": "Stack?", "required": true, "options": ["React", "Vue"]}
                ]},
                {"id": "design", "name": "Design"}
            ],
            "commonQuestions": [
                {"id": "why", "type": "text", "question": "Why join?", "required": true, "minLength": 5}
            ]
        }),
    )
    .await
}

fn applicant(event_id: i32, n: u32, team: &str) -> Value {
    let mut participant = member(n);
    participant["selectedTeams"] = json!([team]);
    participant["commonAnswers"] = json!([{"questionId": "why", "answer": "I like building things"}]);
    if team == "web" {
        participant["teamAnswers"] =
            json!([{"teamId": "web", "answers": [{"questionId": "stack", "answer": "React"}]}]);
    }
    json!({"event": event_id, "eventType": "recruitment", "participant": participant})
}

mod submit {
    use super::*;

    #[tokio::test]
    async fn team_registration_succeeds() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 2).await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"event": id, "members": [member(1), member(2)]}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "Registration successful");
        assert_eq!(res.body["registration"]["event"]["id"], id);
        assert_eq!(res.body["registration"]["event"]["name"], "Code Clash");
        assert_eq!(res.body["registration"]["members"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn admin_path_accepts_public_submissions() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;

        let res = app
            .post_without_token(
                routes::REGISTRATIONS,
                &json!({"eventId": id, "members": [member(1)]}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn wrong_member_count_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 3).await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"event": id, "members": [member(1), member(2)]}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "This event requires exactly 3 members");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"event": id, "members": [with(member(1), "officialEmail", "not-an-email")]}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["error"], "Please enter a valid email address");
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;

        for phone in ["12345", "98765abcde", "987654321012"] {
            let res = app
                .post_without_token(
                    routes::REGISTER,
                    &json!({"event": id, "members": [with(member(1), "phoneNumber", phone)]}),
                )
                .await;

            assert_eq!(res.status, 400, "{phone} should be rejected");
            assert_eq!(res.body["error"], "Please enter a valid 10-digit phone number");
        }
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"event": id, "members": [with(member(1), "branch", "  ")]}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::REGISTER, &json!({"event": 777, "members": [member(1)]}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Event not found");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::REGISTER, &json!({"event": "abc"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod duplicates {
    use super::*;

    #[tokio::test]
    async fn same_email_cannot_register_twice_for_an_event() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;
        app.register_team(id, vec![member(1)]).await;

        // Different registration number, same email in another case.
        let again = with(
            with(member(2), "officialEmail", "STUDENT1@uni.edu"),
            "name",
            "Someone Else",
        );
        let res = app
            .post_without_token(routes::REGISTER, &json!({"event": id, "members": [again]}))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(
            res.body["error"],
            "One or more members have already registered for this event"
        );
    }

    #[tokio::test]
    async fn concurrent_identical_submissions_admit_one() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;
        let payload = json!({"event": id, "members": [member(1)]});

        let (a, b, c, d) = tokio::join!(
            app.post_without_token(routes::REGISTER, &payload),
            app.post_without_token(routes::REGISTER, &payload),
            app.post_without_token(routes::REGISTER, &payload),
            app.post_without_token(routes::REGISTER, &payload),
        );

        let responses = [a, b, c, d];
        let created = responses.iter().filter(|r| r.status == 201).count();
        assert_eq!(created, 1);
        for res in responses.iter().filter(|r| r.status != 201) {
            assert_eq!(res.status, 409, "{}", res.text);
            assert_eq!(res.body["code"], "CONFLICT");
            assert_eq!(
                res.body["error"],
                "One or more members have already registered for this event"
            );
        }

        let res = app.get_with_token(routes::REGISTRATIONS, &token).await;
        assert_eq!(res.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn same_registration_number_cannot_register_twice() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 2).await;
        app.register_team(id, vec![member(1), member(2)]).await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"event": id, "members": [member(3), with(member(4), "registrationNumber", "12000002")]}),
            )
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn same_person_may_register_for_different_events() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let first = app.create_team_event(&token, "Code Clash", 1).await;
        let second = app.create_team_event(&token, "WebMinds", 1).await;

        app.register_team(first, vec![member(1)]).await;
        app.register_team(second, vec![member(1)]).await;
    }

    #[tokio::test]
    async fn duplicate_members_inside_one_team_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 2).await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"event": id, "members": [member(1), with(member(2), "officialEmail", "student1@uni.edu")]}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod recruitment {
    use super::*;

    #[tokio::test]
    async fn applicant_can_apply_to_a_team() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = recruitment_event(&app, &token).await;

        let res = app
            .post_without_token(routes::REGISTER, &applicant(id, 1, "web"))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let reg = &res.body["registration"];
        assert_eq!(reg["eventType"], "recruitment");
        assert_eq!(reg["selectedTeams"], json!(["web"]));
        assert_eq!(reg["teamAnswers"][0]["answers"][0]["answer"], "React");
    }

    #[tokio::test]
    async fn required_team_question_must_be_answered() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = recruitment_event(&app, &token).await;

        let mut payload = applicant(id, 1, "web");
        payload["participant"]["teamAnswers"] = json!([]);
        let res = app.post_without_token(routes::REGISTER, &payload).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn single_team_selection_is_enforced() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = recruitment_event(&app, &token).await;

        let mut payload = applicant(id, 1, "web");
        payload["participant"]["selectedTeams"] = json!(["web", "design"]);
        let res = app.post_without_token(routes::REGISTER, &payload).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn full_team_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = recruitment_event(&app, &token).await;

        let first = app
            .post_without_token(routes::REGISTER, &applicant(id, 1, "web"))
            .await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app
            .post_without_token(routes::REGISTER, &applicant(id, 2, "web"))
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["error"], "Team 'Web Development' is full");

        let res = app
            .post_without_token(routes::REGISTER, &applicant(id, 2, "design"))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn newest_first_with_event_and_pagination() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;
        for n in 1..=3 {
            app.register_team(id, vec![member(n)]).await;
        }

        let res = app
            .get_with_token(&format!("{}?per_page=2", routes::REGISTRATIONS), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let regs = res.body["registrations"].as_array().unwrap();
        assert_eq!(regs.len(), 2);
        assert_eq!(regs[0]["members"][0]["officialEmail"], "student3@uni.edu");
        assert_eq!(regs[0]["event"]["name"], "Code Clash");
        assert_eq!(res.body["pagination"]["total"], 3);
        assert_eq!(res.body["pagination"]["total_pages"], 2);

        let res = app
            .get_with_token(&format!("{}?per_page=2&page=2", routes::REGISTRATIONS), &token)
            .await;
        assert_eq!(res.body["registrations"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_team_event(&token, "Code Clash", 1).await;
        app.register_team(id, vec![member(1)]).await;

        let res = app
            .get_with_token(
                &format!(
                    "{}?page=100000000000000000&per_page=500",
                    routes::REGISTRATIONS
                ),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["registrations"].as_array().unwrap().is_empty());
        assert_eq!(res.body["pagination"]["total"], 1);
        assert_eq!(res.body["pagination"]["page"], 100000000000000000u64);
    }

    #[tokio::test]
    async fn filter_by_event() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let first = app.create_team_event(&token, "Code Clash", 1).await;
        let second = app.create_team_event(&token, "WebMinds", 1).await;
        app.register_team(first, vec![member(1)]).await;
        app.register_team(second, vec![member(2)]).await;

        let res = app
            .get_with_token(&format!("{}?event_id={second}", routes::REGISTRATIONS), &token)
            .await;

        let regs = res.body["registrations"].as_array().unwrap();
        assert_eq!(regs.len(), 1);
        assert_eq!(regs[0]["event"]["name"], "WebMinds");
    }

    #[tokio::test]
    async fn inverted_window_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .get_with_token(
                &format!(
                    "{}?from=2030-01-02T00:00:00Z&to=2030-01-01T00:00:00Z",
                    routes::REGISTRATIONS
                ),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn stats_count_per_event() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let first = app.create_team_event(&token, "Code Clash", 1).await;
        let second = app.create_team_event(&token, "WebMinds", 1).await;
        app.register_team(first, vec![member(1)]).await;
        app.register_team(second, vec![member(2)]).await;
        app.register_team(second, vec![member(3)]).await;

        let res = app.get_with_token(routes::STATS, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["totalRegistrations"], 3);
        assert_eq!(res.body["registrationsByEvent"][0]["name"], "WebMinds");
        assert_eq!(res.body["registrationsByEvent"][0]["value"], 2);
        let trend_total: u64 = res.body["registrationTrend"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["count"].as_u64().unwrap())
            .sum();
        assert_eq!(trend_total, 3);
    }
}
