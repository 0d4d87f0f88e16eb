use crate::common::{TestApp, routes};

#[tokio::test]
async fn site_content_is_public() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::SITE_CONTENT).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["timeline"][0]["title"], "WebMinds");
    assert!(res.body["faculty"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn frontend_files_are_served() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token("/").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.text, "<html>home</html>");

    let res = app.get_without_token("/style.css").await;
    assert_eq!(res.status, 200);
    assert!(res.header("content-type").unwrap().starts_with("text/css"));

    let res = app.get_without_token("/missing.png").await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn encoded_traversal_is_forbidden() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token("/assets/..%2F..%2Fetc%2Fpasswd").await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_pages_redirect_to_login_without_session() {
    let app = TestApp::spawn().await;

    for path in ["/admin", "/admin/dashboard"] {
        let res = app.get_without_token(path).await;
        assert_eq!(res.status, 303, "{path}");
        assert_eq!(res.header("location"), Some("/admin/login"));
    }

    let res = app.get_without_token("/admin/login").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.text, "<html>login</html>");
}

#[tokio::test]
async fn admin_pages_with_session() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let cookie = format!("club_session={token}");

    for path in ["/admin", "/admin/login"] {
        let res = app.get_with_cookie(path, &cookie).await;
        assert_eq!(res.status, 303, "{path}");
        assert_eq!(res.header("location"), Some("/admin/dashboard"));
    }

    let res = app.get_with_cookie("/admin/dashboard", &cookie).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.text, "<html>dashboard</html>");
}
