mod common;

use common::{set_cookie, spawn_app, ALLOWED_ORIGIN};
use reqwest::{header, Method};
use serde_json::{json, Value};

#[tokio::test]
async fn login_sets_an_http_only_token_cookie() {
    let app = spawn_app().await;
    let response = app.post_json("/jwt", &json!({ "email": "a@x.com" })).await;
    assert_eq!(response.status(), 200);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=18000"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn booked_tutors_are_returned_for_the_token_owner() {
    let app = spawn_app().await;
    app.post_json("/bookTutor", &json!({ "email": "a@x.com", "language": "Go" })).await;
    app.post_json("/bookTutor", &json!({ "email": "b@x.com", "language": "Go" })).await;
    app.post_json("/bookTutor", &json!({ "email": "a@x.com", "language": "Rust" })).await;

    let cookie = app.login("a@x.com").await;
    let response = app.get_with_cookie("/myBookedTutors?email=a@x.com", &cookie).await;
    assert_eq!(response.status(), 200);

    let bookings: Value = response.json().await.unwrap();
    let bookings = bookings.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b["email"] == "a@x.com"));
}

#[tokio::test]
async fn booked_tutors_of_another_email_are_forbidden() {
    let app = spawn_app().await;
    app.post_json("/bookTutor", &json!({ "email": "b@x.com", "language": "Go" })).await;

    let cookie = app.login("a@x.com").await;
    let response = app.get_with_cookie("/myBookedTutors?email=b@x.com", &cookie).await;
    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "forbidden access" }));

    let missing = app.get_with_cookie("/myBookedTutors", &cookie).await;
    assert_eq!(missing.status(), 403);
}

#[tokio::test]
async fn non_string_email_gets_a_token_but_no_bookings() {
    let app = spawn_app().await;
    app.post_json("/bookTutor", &json!({ "email": "5", "language": "Go" })).await;

    let response = app.post_json("/jwt", &json!({ "email": 5 })).await;
    assert_eq!(response.status(), 200);
    let cookie = set_cookie(&response)
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string();

    let bookings = app.get_with_cookie("/myBookedTutors?email=5", &cookie).await;
    assert_eq!(bookings.status(), 403);
    let body: Value = bookings.json().await.unwrap();
    assert_eq!(body, json!({ "message": "forbidden access" }));
}

#[tokio::test]
async fn booked_tutors_require_a_valid_cookie() {
    let app = spawn_app().await;

    let response = app.get("/myBookedTutors?email=a@x.com").await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "unauthorized access" }));

    let forged = app
        .get_with_cookie("/myBookedTutors?email=a@x.com", "token=forged.token.value")
        .await;
    assert_eq!(forged.status(), 401);
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let app = spawn_app().await;
    let response = app.post_json("/logout", &json!({})).await;
    assert_eq!(response.status(), 200);

    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("token=;"));
    assert!(cookie.contains("Max-Age=0"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[tokio::test]
async fn cors_allows_only_configured_origins_with_credentials() {
    let app = spawn_app().await;

    let allowed = app
        .client
        .request(Method::OPTIONS, app.url("/findTutorials"))
        .header(header::ORIGIN, ALLOWED_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        ALLOWED_ORIGIN
    );
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let refused = app
        .client
        .request(Method::OPTIONS, app.url("/findTutorials"))
        .header(header::ORIGIN, "http://evil.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .send()
        .await
        .unwrap();
    assert!(refused.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
