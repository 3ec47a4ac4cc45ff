//! One-shot messages carried across a redirect in a signed cookie.

use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const FLASH_COOKIE: &str = "skis_flash";

pub fn jar(headers: &HeaderMap, key: &Key) -> SignedCookieJar {
    SignedCookieJar::from_headers(headers, key.clone())
}

/// Read pending messages and clear the cookie.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Vec::new());
    };
    let messages = decode(cookie.value()).unwrap_or_default();
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

pub fn push(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut messages = jar
        .get(FLASH_COOKIE)
        .and_then(|c| decode(c.value()))
        .unwrap_or_default();
    messages.push(message.into());

    let cookie = Cookie::build((FLASH_COOKIE, encode(&messages)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Flash `message` and send the browser to `to`.
pub fn redirect(jar: SignedCookieJar, message: impl Into<String>, to: &str) -> Response {
    (push(jar, message), Redirect::to(to)).into_response()
}

fn encode(messages: &[String]) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(messages).unwrap_or_default())
}

fn decode(value: &str) -> Option<Vec<String>> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}
