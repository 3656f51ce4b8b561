#![allow(dead_code)]

use std::sync::Arc;

use api_lib::adapters::InMemoryStore;
use api_lib::config::{Config, Environment};
use api_lib::web::{build_router, AppState};
use axum::http::HeaderValue;
use reqwest::{header, Response};
use serde_json::Value;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().expect("valid address"),
        database_url: None,
        database_max_connections: 1,
        log_level: tracing::Level::INFO,
        token_secret: "integration-secret".to_string(),
        environment: Environment::Development,
        allowed_origins: vec![HeaderValue::from_static(ALLOWED_ORIGIN)],
    }
}

/// Serves the real router over the in-memory store on an ephemeral port.
pub async fn spawn_app() -> TestApp {
    let state = Arc::new(AppState::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(test_config()),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let address = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("test server failed");
    });

    TestApp {
        base_url: format!("http://{}", address),
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Response {
        self.client
            .get(self.url(path))
            .header(header::COOKIE, cookie)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get_json(&self, path: &str) -> Value {
        let response = self.get(path).await;
        assert_eq!(response.status(), 200, "GET {} failed", path);
        response.json().await.expect("response is JSON")
    }

    /// Inserts a tutorial and returns its id.
    pub async fn add_tutorial(&self, tutorial: Value) -> String {
        let body: Value = self
            .post_json("/addTutorial", &tutorial)
            .await
            .json()
            .await
            .expect("insert result is JSON");
        body["insertedId"]
            .as_str()
            .expect("insert result carries an id")
            .to_string()
    }

    /// Logs in as `email` and returns the `name=value` pair of the token cookie.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post_json("/jwt", &serde_json::json!({ "email": email }))
            .await;
        assert_eq!(response.status(), 200);
        set_cookie(&response)
            .split(';')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

pub fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("response sets a cookie")
        .to_string()
}
