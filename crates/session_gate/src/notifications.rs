//! Toast queue. Times are caller-supplied milliseconds so the queue works the same
//! under `Date.now()` in the browser and fixed clocks in tests.

use serde::Serialize;

/// Default lifetime of a toast, in milliseconds.
pub const DEFAULT_TTL_MS: u64 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub expires_at_ms: u64,
}

#[derive(Clone, Debug)]
pub struct NotificationCenter {
    next_id: u64,
    ttl_ms: u64,
    items: Vec<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL_MS)
    }
}

impl NotificationCenter {
    #[must_use]
    pub fn with_ttl(ttl_ms: u64) -> Self {
        Self {
            next_id: 1,
            ttl_ms,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>, now_ms: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now_ms: u64) -> u64 {
        self.push(Severity::Success, message, now_ms)
    }

    pub fn error(&mut self, message: impl Into<String>, now_ms: u64) -> u64 {
        self.push(Severity::Error, message, now_ms)
    }

    /// Returns true if a toast with `id` was removed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Drops every toast whose deadline has passed; returns how many were removed.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.expires_at_ms > now_ms);
        before - self.items.len()
    }

    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.items.iter().map(|item| item.expires_at_ms).min()
    }
}
