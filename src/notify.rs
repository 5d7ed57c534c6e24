use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// What happened to a driver, as surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripEvent {
    EnRoute,
    PickedUp,
    DroppedOff,
}

impl TripEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            TripEvent::EnRoute => "en_route",
            TripEvent::PickedUp => "picked_up",
            TripEvent::DroppedOff => "dropped_off",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub driver: String,
    pub event: TripEvent,
    pub message: String,
}

/// Bounded most-recent-first log plus live fanout. The newest entry doubles
/// as the floating toast; subscribers get every entry they can keep up with.
pub struct Notifier {
    log: RwLock<VecDeque<Notification>>,
    capacity: usize,
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize, event_buffer_size: usize) -> Self {
        let (tx, _unused_rx) = broadcast::channel(event_buffer_size.max(1));
        Self {
            log: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
            tx,
        }
    }

    pub fn push(
        &self,
        driver: &str,
        event: TripEvent,
        message: String,
        at: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            at,
            driver: driver.to_string(),
            event,
            message,
        };

        {
            let mut log = self.log.write().expect("notification log poisoned");
            log.push_front(notification.clone());
            log.truncate(self.capacity);
        }

        let _ = self.tx.send(notification.clone());
        notification
    }

    /// Latest entry, shown as the transient toast.
    pub fn toast(&self) -> Option<Notification> {
        self.log
            .read()
            .expect("notification log poisoned")
            .front()
            .cloned()
    }

    /// Full log, newest first.
    pub fn entries(&self) -> Vec<Notification> {
        self.log
            .read()
            .expect("notification log poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.log.read().expect("notification log poisoned").len()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn clear(&self) {
        self.log.write().expect("notification log poisoned").clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Notifier, TripEvent};

    #[test]
    fn log_is_newest_first_and_bounded() {
        let notifier = Notifier::new(2, 8);
        notifier.push("d1", TripEvent::EnRoute, "first".to_string(), Utc::now());
        notifier.push("d1", TripEvent::PickedUp, "second".to_string(), Utc::now());
        notifier.push("d1", TripEvent::DroppedOff, "third".to_string(), Utc::now());

        let entries = notifier.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "third");
        assert_eq!(entries[1].message, "second");
        assert_eq!(notifier.toast().unwrap().message, "third");
    }

    #[test]
    fn subscribers_receive_pushed_entries() {
        let notifier = Notifier::new(8, 8);
        let mut rx = notifier.subscribe();
        notifier.push("d1", TripEvent::EnRoute, "hello".to_string(), Utc::now());

        let received = rx.try_recv().unwrap();
        assert_eq!(received.driver, "d1");
        assert_eq!(received.event, TripEvent::EnRoute);
    }
}
