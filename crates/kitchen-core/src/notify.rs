//! # Notifications
//!
//! Structured messages addressed to a logical actor (a staff member, the kitchen, a table or
//! the managers). The engine never formats log lines itself; it hands [`Notification`]s to a
//! [`NotificationSink`] after every lock it took has been released.

use crate::model::{StaffId, TableId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorId {
    Staff(StaffId),
    Table(TableId),
    Kitchen,
    Managers,
}

impl Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorId::Staff(id) => write!(f, "{id}"),
            ActorId::Table(id) => write!(f, "{id}"),
            ActorId::Kitchen => f.write_str("kitchen"),
            ActorId::Managers => f.write_str("managers"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Routine progress.
    Log,
    /// Needs attention (cancellations, reorders).
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub actor: ActorId,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn log(actor: ActorId, message: impl Into<String>) -> Self {
        Self {
            actor,
            kind: NotificationKind::Log,
            message: message.into(),
        }
    }

    pub fn alert(actor: ActorId, message: impl Into<String>) -> Self {
        Self {
            actor,
            kind: NotificationKind::Alert,
            message: message.into(),
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, n: Notification) {
        match n.kind {
            NotificationKind::Log => info!(actor = %n.actor, "{}", n.message),
            NotificationKind::Alert => warn!(actor = %n.actor, "{}", n.message),
        }
    }
}

/// Forwards notifications to a Tokio channel, for a UI or another task to consume.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        // A closed receiver means nobody is listening any more.
        let _ = self.sender.send(notification);
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    received: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    pub fn for_actor(&self, actor: ActorId) -> Vec<Notification> {
        self.received
            .lock()
            .iter()
            .filter(|n| n.actor == actor)
            .cloned()
            .collect()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock())
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.received.lock().push(notification);
    }
}

/// Notifications collected while an event holds locks, delivered once they are released.
#[derive(Debug, Default)]
pub(crate) struct Outbox(Vec<Notification>);

impl Outbox {
    pub(crate) fn log(&mut self, actor: ActorId, message: impl Into<String>) {
        self.0.push(Notification::log(actor, message));
    }

    pub(crate) fn alert(&mut self, actor: ActorId, message: impl Into<String>) {
        self.0.push(Notification::alert(actor, message));
    }

    pub(crate) fn deliver(self, sink: &dyn NotificationSink) {
        for notification in self.0 {
            sink.notify(notification);
        }
    }
}
