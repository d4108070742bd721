//! Where user-facing notifications go
//!
//! Notifying never affects control flow.

use kit::{Flash, FlashLevel, FlashMessage};
use std::sync::Mutex;

pub trait Notifier: Send + Sync {
    fn notify(&self, level: FlashLevel, message: &str);
}

/// Flash messages for the current request
#[derive(Debug, Default, Clone, Copy)]
pub struct FlashNotifier;

impl Notifier for FlashNotifier {
    fn notify(&self, level: FlashLevel, message: &str) {
        Flash::push(level, message);
    }
}

/// Records notifications, for tests
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<FlashMessage>>,
}

impl MemoryNotifier {
    pub fn messages(&self) -> Vec<FlashMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Message texts only
    pub fn texts(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.message).collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: FlashLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(FlashMessage::new(level, message));
        }
    }
}
