//! Transient notifications
//!
//! Dismissible toasts shown after create/update/delete. Each notice expires
//! on its own 3-second timer; expiry happens lazily when the active set is
//! read, so no background task is needed.

use std::time::{Duration, Instant};

/// How long a notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    created_at: Instant,
}

impl Notice {
    fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= NOTICE_TTL
    }
}

#[derive(Debug, Default)]
pub struct Notifier {
    notices: Vec<Notice>,
}

impl Notifier {
    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notices.push(Notice::new(message, kind));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, NoticeKind::Success);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, NoticeKind::Info);
    }

    /// Drop expired notices and return the ones still visible
    pub fn active(&mut self) -> &[Notice] {
        let now = Instant::now();
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }
}
