//! services/api/src/web/cookie.rs
//!
//! Reading and writing of the auth cookie.

use axum::http::{header, HeaderMap};
use chrono::Duration;

use crate::config::Environment;

/// Name of the cookie carrying the signed token.
pub const AUTH_COOKIE: &str = "token";

/// Returns the value of cookie `name` from the request headers.
/// Empty values are treated as absent.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|c| {
            let (key, value) = c.trim().split_once('=')?;
            (key == name).then_some(value)
        })
        .filter(|value| !value.is_empty())
}

fn attributes(environment: Environment) -> &'static str {
    if environment.is_production() {
        "HttpOnly; Secure; SameSite=None; Path=/"
    } else {
        "HttpOnly; SameSite=Strict; Path=/"
    }
}

/// `Set-Cookie` value storing `token` for `max_age`.
pub fn auth_cookie(token: &str, max_age: Duration, environment: Environment) -> String {
    format!(
        "{}={}; {}; Max-Age={}",
        AUTH_COOKIE,
        token,
        attributes(environment),
        max_age.num_seconds()
    )
}

/// `Set-Cookie` value clearing the auth cookie. Attributes must match the
/// issuing cookie for browsers to drop it.
pub fn cleared_auth_cookie(environment: Environment) -> String {
    format!("{}=; {}; Max-Age=0", AUTH_COOKIE, attributes(environment))
}
