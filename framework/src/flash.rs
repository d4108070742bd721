//! Flash messages
//!
//! One-shot notifications shown to the user on the next rendered page.
//! Messages pushed while handling a request are visible to that request's
//! page; if the response is a redirect instead, they travel to the next
//! request in the `kit_flash` cookie. The cookie is cleared once the
//! messages have been displayed.
//!
//! The state is scoped to the request's task by the server, so `push` and
//! `take` need no handle:
//!
//! ```rust,ignore
//! Flash::push(FlashLevel::Error, "Todo item not found: ID 3");
//! // ... later, while rendering
//! let messages = Flash::take();
//! ```

use crate::http::HttpResponse;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::future::Future;

/// Most messages carried in the cookie; older ones are dropped
const MAX_CARRIED: usize = 10;

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl FlashLevel {
    /// Bootstrap alert modifier for this level
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
struct FlashState {
    /// Decoded from the request cookie
    incoming: Vec<FlashMessage>,
    /// Pushed while handling this request
    outgoing: Vec<FlashMessage>,
}

tokio::task_local! {
    static FLASH: RefCell<FlashState>;
}

/// Flash facade
pub struct Flash;

impl Flash {
    pub const COOKIE: &'static str = "kit_flash";

    /// Queue a message for the user
    ///
    /// Outside a request scope the message is dropped.
    pub fn push(level: FlashLevel, message: impl Into<String>) {
        let message = FlashMessage::new(level, message);
        let pushed = FLASH
            .try_with(|state| state.borrow_mut().outgoing.push(message.clone()))
            .is_ok();
        if !pushed {
            tracing::debug!(message = %message.message, "flash pushed outside a request, dropped");
        }
    }

    /// Take every pending message, oldest first
    ///
    /// Messages taken here are not carried to the next request.
    pub fn take() -> Vec<FlashMessage> {
        FLASH
            .try_with(|state| {
                let mut state = state.borrow_mut();
                let mut messages = std::mem::take(&mut state.incoming);
                messages.append(&mut state.outgoing);
                messages
            })
            .unwrap_or_default()
    }

    /// Run `handler` with flash state loaded from the request cookie, then
    /// write or clear the cookie on the response
    pub async fn scope<F>(cookie: Option<&str>, handler: F) -> HttpResponse
    where
        F: Future<Output = HttpResponse>,
    {
        let had_cookie = cookie.is_some();
        let state = FlashState {
            incoming: cookie.map(decode).unwrap_or_default(),
            outgoing: Vec::new(),
        };

        FLASH
            .scope(RefCell::new(state), async move {
                let response = handler.await;
                let pending = Self::take();
                attach_cookie(response, pending, had_cookie)
            })
            .await
    }

    /// Run `handler` with empty flash state that is dropped afterwards
    ///
    /// For requests whose body is never shown (HEAD): the cookie is neither
    /// read nor written, so pending messages wait for a real page.
    pub async fn ephemeral<F>(handler: F) -> HttpResponse
    where
        F: Future<Output = HttpResponse>,
    {
        FLASH.scope(RefCell::new(FlashState::default()), handler).await
    }
}

fn attach_cookie(
    response: HttpResponse,
    mut pending: Vec<FlashMessage>,
    had_cookie: bool,
) -> HttpResponse {
    if !pending.is_empty() {
        if pending.len() > MAX_CARRIED {
            pending.drain(..pending.len() - MAX_CARRIED);
        }
        match encode(&pending) {
            Some(value) => response.header(
                "Set-Cookie",
                format!("{}={}; Path=/; HttpOnly; SameSite=Lax", Flash::COOKIE, value),
            ),
            None => response,
        }
    } else if had_cookie {
        response.header(
            "Set-Cookie",
            format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", Flash::COOKIE),
        )
    } else {
        response
    }
}

/// JSON, then percent-encoded so the value is cookie-safe
fn encode(messages: &[FlashMessage]) -> Option<String> {
    let json = serde_json::to_string(messages).ok()?;
    let encoded = serde_urlencoded::to_string([("f", json)]).ok()?;
    encoded.strip_prefix("f=").map(str::to_string)
}

/// A cookie that does not decode is treated as empty
fn decode(value: &str) -> Vec<FlashMessage> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(&format!("f={}", value)).unwrap_or_default();
    pairs
        .into_iter()
        .next()
        .and_then(|(_, json)| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}
