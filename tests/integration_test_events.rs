mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};

async fn create_venue(app: &TestApp, admin: &str, name: &str, location: &str) -> Value {
    let res = app.request("POST", "/api/v1/venues", Some(admin), Some(json!({
        "name": name, "location": location
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

async fn create_event(app: &TestApp, admin: &str, venue_id: &str, title: &str, date: &str) -> Value {
    let res = app.request("POST", "/api/v1/events", Some(admin), Some(json!({
        "title": title, "description": "desc", "date": date, "time": "19:00",
        "venue_id": venue_id
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_create_event_requires_existing_venue() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;

    let res = app.request("POST", "/api/v1/events", Some(&admin), Some(json!({
        "title": "Ghost", "description": "d", "date": "2030-01-01", "time": "10:00",
        "venue_id": "no-such-venue"
    }))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_event_validates_date_and_time() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    let venue = create_venue(&app, &admin, "Hall", "Berlin").await;
    let venue_id = venue["id"].as_str().unwrap();

    let res = app.request("POST", "/api/v1/events", Some(&admin), Some(json!({
        "title": "T", "description": "d", "date": "01.01.2030", "time": "10:00",
        "venue_id": venue_id
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("POST", "/api/v1/events", Some(&admin), Some(json!({
        "title": "T", "description": "d", "date": "2030-01-01", "time": "10 o'clock",
        "venue_id": venue_id
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_venue_date_conflict_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    let venue = create_venue(&app, &admin, "Hall", "Berlin").await;
    let venue_id = venue["id"].as_str().unwrap();

    create_event(&app, &admin, venue_id, "First", "2030-03-03").await;

    let res = app.request("POST", "/api/v1/events", Some(&admin), Some(json!({
        "title": "Second", "description": "d", "date": "2030-03-03", "time": "21:00",
        "venue_id": venue_id
    }))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Same venue, another day is fine
    create_event(&app, &admin, venue_id, "Third", "2030-03-04").await;
}

#[tokio::test]
async fn test_list_events_with_filters() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;

    let berlin = create_venue(&app, &admin, "Hall A", "Berlin").await;
    let munich = create_venue(&app, &admin, "Hall B", "Munich").await;

    create_event(&app, &admin, berlin["id"].as_str().unwrap(), "Berlin Show", "2030-04-01").await;
    create_event(&app, &admin, munich["id"].as_str().unwrap(), "Munich Show", "2030-04-02").await;

    let res = app.request("GET", "/api/v1/events", None, None).await;
    let all = parse_body(res).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let res = app.request("GET", "/api/v1/events?date=2030-04-01", None, None).await;
    let by_date = parse_body(res).await;
    assert_eq!(by_date.as_array().unwrap().len(), 1);
    assert_eq!(by_date[0]["title"], "Berlin Show");

    let uri = format!("/api/v1/events?venue_id={}", munich["id"].as_str().unwrap());
    let res = app.request("GET", &uri, None, None).await;
    let by_venue = parse_body(res).await;
    assert_eq!(by_venue.as_array().unwrap().len(), 1);
    assert_eq!(by_venue[0]["title"], "Munich Show");

    // Location filter is a case-insensitive substring match
    let res = app.request("GET", "/api/v1/events?location=berl", None, None).await;
    let by_location = parse_body(res).await;
    assert_eq!(by_location.as_array().unwrap().len(), 1);
    assert_eq!(by_location[0]["venue"]["location"], "Berlin");
}

#[tokio::test]
async fn test_listing_annotates_remaining_tickets_and_hides_sold_out() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    let venue = create_venue(&app, &admin, "Hall", "Berlin").await;
    let event = create_event(&app, &admin, venue["id"].as_str().unwrap(), "Show", "2030-05-05").await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.request("POST", "/api/v1/ticket-types", Some(&admin), Some(json!({
        "event_id": event_id, "name": "Standard", "price": 25.0, "quantity": 10
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("POST", "/api/v1/ticket-types", Some(&admin), Some(json!({
        "event_id": event_id, "name": "VIP", "price": 90.0, "quantity": 0
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/v1/events", None, None).await;
    let list = parse_body(res).await;
    let entry = &list[0];

    assert_eq!(entry["registered_count"], 0);
    assert_eq!(entry["remaining_tickets"], 10);

    // The sold-out VIP type is hidden from the public listing
    let types = entry["ticket_types"].as_array().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0]["name"], "Standard");
    assert_eq!(types[0]["remaining_tickets"], 10);
    assert_eq!(types[0]["registered_count"], 0);
}

#[tokio::test]
async fn test_get_event_returns_venue_and_all_ticket_types() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    let venue = create_venue(&app, &admin, "Hall", "Berlin").await;
    let event = create_event(&app, &admin, venue["id"].as_str().unwrap(), "Show", "2030-06-06").await;
    let event_id = event["id"].as_str().unwrap();

    app.request("POST", "/api/v1/ticket-types", Some(&admin), Some(json!({
        "event_id": event_id, "name": "Sold Out", "price": 5.0, "quantity": 0
    }))).await;

    let res = app.request("GET", &format!("/api/v1/events/{}", event_id), None, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let detail = parse_body(res).await;

    assert_eq!(detail["title"], "Show");
    assert_eq!(detail["venue"]["name"], "Hall");
    // The registration page sees every type, sold out or not
    assert_eq!(detail["ticket_types"].as_array().unwrap().len(), 1);

    let res = app.request("GET", "/api/v1/events/missing", None, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_event() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    let venue = create_venue(&app, &admin, "Hall", "Berlin").await;
    let event = create_event(&app, &admin, venue["id"].as_str().unwrap(), "Old Title", "2030-07-07").await;
    let event_id = event["id"].as_str().unwrap();

    let res = app.request("PATCH", &format!("/api/v1/events/{}", event_id), Some(&admin), Some(json!({
        "title": "New Title", "time": "21:30"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["title"], "New Title");
    assert_eq!(updated["time"], "21:30");
    assert_eq!(updated["date"], "2030-07-07");

    let res = app.request("PATCH", &format!("/api/v1/events/{}", event_id), Some(&admin), Some(json!({
        "venue_id": "no-such-venue"
    }))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_event_notifies_attendees() {
    let app = TestApp::new().await;
    let admin = app.setup_admin().await;
    let venue = create_venue(&app, &admin, "Hall", "Berlin").await;
    let event = create_event(&app, &admin, venue["id"].as_str().unwrap(), "Doomed Show", "2030-08-08").await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let res = app.request("POST", "/api/v1/ticket-types", Some(&admin), Some(json!({
        "event_id": &event_id, "name": "Standard", "price": 10.0, "quantity": 5
    }))).await;
    let ticket = parse_body(res).await;

    app.register_user("Guest", "guest@example.com", "guest-pw-1").await;
    let guest = app.login("guest@example.com", "guest-pw-1").await;

    let uri = format!("/api/v1/attendees/{}/register/{}", event_id, ticket["id"].as_str().unwrap());
    let res = app.request("POST", &uri, Some(&guest), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("DELETE", &format!("/api/v1/events/{}", event_id), Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "Event deleted and attendees notified.");

    let email = app.last_email();
    assert_eq!(email.recipient, "guest@example.com");
    assert_eq!(email.subject, "Event Canceled: Doomed Show");

    let res = app.request("GET", &format!("/api/v1/events/{}", event_id), None, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_mutations_are_admin_only() {
    let app = TestApp::new().await;
    let _admin = app.setup_admin().await;
    app.register_user("User", "user@example.com", "user-pw-12").await;
    let user = app.login("user@example.com", "user-pw-12").await;

    let res = app.request("POST", "/api/v1/events", Some(&user), Some(json!({
        "title": "T", "description": "d", "date": "2030-01-01", "time": "10:00",
        "venue_id": "x"
    }))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request("DELETE", "/api/v1/events/some-id", Some(&user), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
