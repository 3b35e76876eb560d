//! One-shot status messages / 一次性状态消息
//!
//! Rendering routes collect messages in a request-local [`Flashes`] value.
//! Redirecting routes stash theirs in a cookie; the next rendered page takes
//! the cookie (which removes it) and shows the messages exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;
use tower_cookies::{Cookie, Cookies};

/// Severity category of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Danger,
    Info,
    Warning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Danger => "danger",
            Category::Info => "info",
            Category::Warning => "warning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: Category,
    pub message: String,
}

/// Ordered list of status messages produced while handling a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flashes(Vec<FlashMessage>);

impl Flashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, category: Category, message: impl Into<String>) {
        self.0.push(FlashMessage {
            category,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Category::Success, message);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.push(Category::Danger, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Category::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Category::Warning, message);
    }

    pub fn extend(&mut self, other: Flashes) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlashMessage> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<FlashMessage> {
        self.0
    }

    /// Cookie-safe encoding: JSON, then percent-encoded.
    pub fn encode(&self) -> String {
        let json = serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string());
        urlencoding::encode(&json).into_owned()
    }

    /// Inverse of [`Flashes::encode`]. A tampered or stale value yields no messages.
    pub fn decode(raw: &str) -> Self {
        let decoded = match urlencoding::decode(raw) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!("Discarding undecodable flash cookie: {}", e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<FlashMessage>>(&decoded) {
            Ok(messages) => Self(messages),
            Err(e) => {
                tracing::debug!("Discarding malformed flash cookie: {}", e);
                Self::default()
            }
        }
    }
}

/// Remove the pending messages from the cookie jar and return them.
pub fn take(cookies: &Cookies, cookie_name: &str) -> Flashes {
    let Some(cookie) = cookies.get(cookie_name) else {
        return Flashes::default();
    };
    let flashes = Flashes::decode(cookie.value());

    let mut removal = Cookie::new(cookie_name.to_string(), "");
    removal.set_path("/");
    cookies.remove(removal);

    flashes
}

/// Append messages to whatever is already pending for the next render.
pub fn stash(cookies: &Cookies, cookie_name: &str, flashes: Flashes) {
    if flashes.is_empty() {
        return;
    }
    let mut pending = cookies
        .get(cookie_name)
        .map(|c| Flashes::decode(c.value()))
        .unwrap_or_default();
    pending.extend(flashes);

    let mut cookie = Cookie::new(cookie_name.to_string(), pending.encode());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookies.add(cookie);
}
