use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub(crate) const NOTIFICATION_TTL: Duration = Duration::from_secs(4);
pub(crate) const MAX_NOTIFICATIONS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub(crate) struct Notification {
    pub(crate) level: Level,
    pub(crate) message: String,
    pub(crate) created: Instant,
}

impl Notification {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created: Instant::now(),
        }
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default)]
pub(crate) struct Notifications {
    items: VecDeque<Notification>,
}

impl Notifications {
    pub(crate) fn push(&mut self, notification: Notification) {
        self.items.push_back(notification);
        while self.items.len() > MAX_NOTIFICATIONS {
            let _ = self.items.pop_front();
        }
    }

    pub(crate) fn expire(&mut self, now: Instant) {
        self.items
            .retain(|item| now.saturating_duration_since(item.created) < NOTIFICATION_TTL);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub(crate) fn last(&self) -> Option<&Notification> {
        self.items.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_a_bounded_queue() {
        let mut notifications = Notifications::default();
        for i in 0..(MAX_NOTIFICATIONS + 2) {
            notifications.push(Notification::info(format!("n{i}")));
        }

        assert_eq!(notifications.iter().count(), MAX_NOTIFICATIONS);
        assert_eq!(notifications.iter().next().unwrap().message, "n2");
    }

    #[test]
    fn expires_old_toasts() {
        let mut notifications = Notifications::default();
        notifications.push(Notification::error("boom"));

        notifications.expire(Instant::now());
        assert_eq!(notifications.iter().count(), 1);

        notifications.expire(Instant::now() + NOTIFICATION_TTL);
        assert_eq!(notifications.iter().count(), 0);
    }
}
