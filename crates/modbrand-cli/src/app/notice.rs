//! Dismissible notifications (one visible at a time, newest wins).

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// Holds the notice currently on screen.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<(Notice, Instant)>,
    ttl: Duration,
}

impl NoticeBoard {
    pub const fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, notice: Notice) {
        self.show_at(notice, Instant::now());
    }

    pub fn show_at(&mut self, notice: Notice, now: Instant) {
        self.current = Some((notice, now));
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(n, _)| n)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the notice once it has been visible for the configured TTL.
    pub fn expire(&mut self, now: Instant) {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|(_, shown)| now.saturating_duration_since(*shown) >= self.ttl);
        if expired {
            self.current = None;
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_secs(6))
    }
}
