//! Snapshot records handed to an external persistence collaborator.
//!
//! The core decides *what* is saved and *when* (after every accepted event); the format and
//! storage belong to whoever implements [`SnapshotSink`].

use crate::model::IngredientId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub id: IngredientId,
    pub name: String,
    pub amount: u32,
    pub reserved: u32,
    pub threshold: u32,
    pub usage: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuUsageRecord {
    pub name: String,
    pub usage: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRecord {
    pub id: IngredientId,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ingredients: Vec<IngredientRecord>,
    pub menu_usage: Vec<MenuUsageRecord>,
    pub reorders: Vec<ReorderRecord>,
}

pub trait SnapshotSink: Send + Sync {
    fn persist(&self, snapshot: &Snapshot);
}

/// Drops every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSnapshots;

impl SnapshotSink for DiscardSnapshots {
    fn persist(&self, _snapshot: &Snapshot) {}
}

/// Keeps the most recent snapshot and counts how many were offered.
#[derive(Debug, Default)]
pub struct LatestSnapshot {
    inner: Mutex<(Option<Snapshot>, usize)>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.inner.lock().0.clone()
    }

    pub fn count(&self) -> usize {
        self.inner.lock().1
    }
}

impl SnapshotSink for LatestSnapshot {
    fn persist(&self, snapshot: &Snapshot) {
        let mut inner = self.inner.lock();
        inner.0 = Some(snapshot.clone());
        inner.1 += 1;
    }
}
