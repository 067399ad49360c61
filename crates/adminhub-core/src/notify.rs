//! Toast notifications shown in the status bar

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A short-lived user notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: Level,
    pub message: String,
    pub created: Instant,
}

/// Keeps the most recent toasts and expires them after a fixed time
#[derive(Debug, Clone)]
pub struct Toasts {
    items: VecDeque<Toast>,
    ttl: Duration,
    capacity: usize,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
            capacity: 8,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message);
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    fn push_at(&mut self, level: Level, message: impl Into<String>, created: Instant) {
        self.items.push_back(Toast {
            level,
            message: message.into(),
            created,
        });
        if self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Newest toast that has not expired
    pub fn current(&self) -> Option<&Toast> {
        self.current_at(Instant::now())
    }

    fn current_at(&self, now: Instant) -> Option<&Toast> {
        self.items
            .back()
            .filter(|toast| now.saturating_duration_since(toast.created) < self.ttl)
    }

    /// Drop expired toasts
    pub fn prune(&mut self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.items
            .retain(|toast| now.saturating_duration_since(toast.created) < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_toast_wins() {
        let mut toasts = Toasts::default();
        toasts.success("first");
        toasts.error("second");

        let current = toasts.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.level, Level::Error);
    }

    #[test]
    fn test_toast_expires() {
        let mut toasts = Toasts::new(Duration::from_secs(3));
        let start = Instant::now();
        toasts.push_at(Level::Info, "saved", start);

        assert!(toasts.current_at(start + Duration::from_secs(2)).is_some());
        assert!(toasts.current_at(start + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut toasts = Toasts::default();
        for i in 0..10 {
            toasts.info(format!("toast {i}"));
        }
        assert_eq!(toasts.items.len(), 8);
        assert_eq!(toasts.items.front().unwrap().message, "toast 2");
        assert_eq!(toasts.current().unwrap().message, "toast 9");
    }
}
