mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_user_listing_is_admin_only_and_safe() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    app.register_user("User", "user@example.com", "user-pw-12").await;
    let user = app.login("user@example.com", "user-pw-12").await;

    let res = app.request("GET", "/api/v1/users", Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request("GET", "/api/v1/users", Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    for entry in list.as_array().unwrap() {
        assert!(entry.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn test_role_promotion_takes_effect() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    app.register_user("User", "user@example.com", "user-pw-12").await;
    let user = app.login("user@example.com", "user-pw-12").await;

    // Not an admin yet
    let res = app.request("GET", "/api/v1/users", Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request("PATCH", "/api/v1/users/role", Some(&admin), Some(json!({
        "email": "user@example.com", "role": "ADMIN"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["role"], "ADMIN");

    // Fresh token carries the new role
    let user = app.login("user@example.com", "user-pw-12").await;
    let res = app.request("GET", "/api/v1/users", Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_role_update_validates_input() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;

    let res = app.request("PATCH", "/api/v1/users/role", Some(&admin), Some(json!({
        "email": "admin@example.com", "role": "SUPERUSER"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("PATCH", "/api/v1/users/role", Some(&admin), Some(json!({
        "email": "nobody@example.com", "role": "ADMIN"
    }))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_by_email() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    app.register_user("Target", "target@example.com", "target-pw-1").await;

    let res = app.request("DELETE", "/api/v1/users?email=target@example.com", Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("POST", "/api/v1/auth/login", None, Some(json!({
        "email": "target@example.com", "password": "target-pw-1"
    }))).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = app.request("DELETE", "/api/v1/users?email=target@example.com", Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.request("DELETE", "/api/v1/users", Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
