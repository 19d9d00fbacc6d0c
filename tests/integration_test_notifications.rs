mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

struct Setup {
    admin: String,
    event_id: String,
}

async fn setup_event_with_attendees(app: &TestApp) -> Setup {
    let admin = app.setup_admin().await;

    let res = app.request("POST", "/api/v1/venues", Some(&admin), Some(json!({
        "name": "Hall", "location": "Berlin"
    }))).await;
    let venue = parse_body(res).await;

    let res = app.request("POST", "/api/v1/events", Some(&admin), Some(json!({
        "title": "Meetup", "description": "d", "date": "2030-11-11", "time": "19:00",
        "venue_id": venue["id"]
    }))).await;
    let event = parse_body(res).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let res = app.request("POST", "/api/v1/ticket-types", Some(&admin), Some(json!({
        "event_id": &event_id, "name": "Standard", "price": 0.0, "quantity": 10
    }))).await;
    let ticket = parse_body(res).await;
    let ticket_id = ticket["id"].as_str().unwrap();

    for (name, email, pw) in [
        ("Alice", "alice@example.com", "alice-pw-1"),
        ("Bob", "bob@example.com", "bob-pw-123"),
    ] {
        app.register_user(name, email, pw).await;
        let token = app.login(email, pw).await;
        let uri = format!("/api/v1/attendees/{}/register/{}", event_id, ticket_id);
        let res = app.request("POST", &uri, Some(&token), None).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    Setup { admin, event_id }
}

#[tokio::test]
async fn test_notification_reaches_every_attendee() {
    let app = TestApp::new().await;
    let setup = setup_event_with_attendees(&app).await;

    let res = app.request("POST", &format!("/api/v1/notifications/{}", setup.event_id),
        Some(&setup.admin), Some(json!({"message": "Doors open at 18:00"}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Notification sent to all attendees.");

    let notification_mails: Vec<_> = app.emails().into_iter()
        .filter(|e| e.subject == "Event Notification")
        .collect();
    assert_eq!(notification_mails.len(), 2);
    assert!(notification_mails.iter().any(|e| e.recipient == "alice@example.com"));
    assert!(notification_mails.iter().any(|e| e.recipient == "bob@example.com"));
    assert!(notification_mails[0].html_body.contains("Doors open at 18:00"));

    // Each attendee sees exactly their own copy
    let alice = app.login("alice@example.com", "alice-pw-1").await;
    let res = app.request("GET", "/api/v1/notifications", Some(&alice), None).await;
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["message"], "Doors open at 18:00");
}

#[tokio::test]
async fn test_notification_for_unknown_event_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;

    let res = app.request("POST", "/api/v1/notifications/missing-event",
        Some(&admin), Some(json!({"message": "hello"}))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sending_notifications_is_admin_only() {
    let app = TestApp::new().await;
    let setup = setup_event_with_attendees(&app).await;

    let alice = app.login("alice@example.com", "alice-pw-1").await;
    let res = app.request("POST", &format!("/api/v1/notifications/{}", setup.event_id),
        Some(&alice), Some(json!({"message": "spam"}))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_single_notification_is_owner_scoped() {
    let app = TestApp::new().await;
    let setup = setup_event_with_attendees(&app).await;

    app.request("POST", &format!("/api/v1/notifications/{}", setup.event_id),
        Some(&setup.admin), Some(json!({"message": "Schedule change"}))).await;

    let alice = app.login("alice@example.com", "alice-pw-1").await;
    let res = app.request("GET", "/api/v1/notifications", Some(&alice), None).await;
    let list = parse_body(res).await;
    let notification_id = list[0]["id"].as_str().unwrap().to_string();

    let res = app.request("GET", &format!("/api/v1/notifications/{}", notification_id),
        Some(&alice), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Schedule change");

    // Bob cannot read Alice's copy
    let bob = app.login("bob@example.com", "bob-pw-123").await;
    let res = app.request("GET", &format!("/api/v1/notifications/{}", notification_id),
        Some(&bob), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
