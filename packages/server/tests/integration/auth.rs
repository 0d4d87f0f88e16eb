use serde_json::json;

use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn admin_can_log_in_and_gets_a_session_cookie() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["email"], ADMIN_EMAIL);

        let cookie = res.header("set-cookie").expect("session cookie should be set");
        assert!(cookie.starts_with("club_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn email_is_matched_case_insensitively() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "  Admin@Club.DEV ", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
        assert_eq!(res.body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_the_same_way() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "nobody@club.dev", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": ADMIN_EMAIL}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn me_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn me_rejects_a_forged_token() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn me_accepts_bearer_token() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["email"], ADMIN_EMAIL);
        assert!(res.body["id"].is_number());
    }

    #[tokio::test]
    async fn me_accepts_session_cookie() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .get_with_cookie(routes::ME, &format!("club_session={token}"))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["email"], ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn logout_expires_the_cookie() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::LOGOUT, &json!({})).await;

        assert_eq!(res.status, 200);
        let cookie = res.header("set-cookie").expect("removal cookie should be set");
        assert!(cookie.starts_with("club_session="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn admin_endpoints_require_a_session() {
        let app = TestApp::spawn().await;

        for path in [routes::ADMIN_EVENTS, routes::REGISTRATIONS, routes::STATS] {
            let res = app.get_without_token(path).await;
            assert_eq!(res.status, 401, "{path} should require auth");
            assert_eq!(res.body["code"], "TOKEN_MISSING");
        }
    }
}
