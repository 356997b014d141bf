// ── Central inventory store ──
//
// Holds the last successfully loaded device list. Each load replaces the
// whole snapshot atomically; subscribers are notified through `watch`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{DeviceId, DeviceRecord, InventorySnapshot};
use crate::stream::InventoryStream;

/// In-memory copy of the backend's device list.
///
/// Readers always see a complete snapshot from one load; there is no
/// partial or merged state.
pub struct InventoryStore {
    snapshot: watch::Sender<Arc<InventorySnapshot>>,
    last_load: watch::Sender<Option<DateTime<Utc>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(InventorySnapshot::default()));
        let (last_load, _) = watch::channel(None);
        Self {
            snapshot,
            last_load,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn device(&self, id: &DeviceId) -> Option<DeviceRecord> {
        self.snapshot.borrow().by_id(id).cloned()
    }

    pub fn device_by_ip(&self, ip: &str) -> Option<DeviceRecord> {
        self.snapshot.borrow().by_ip(ip).cloned()
    }

    pub fn device_count(&self) -> usize {
        self.snapshot.borrow().len()
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Replace the whole inventory with a freshly loaded snapshot.
    pub(crate) fn replace(&self, snapshot: InventorySnapshot) {
        self.snapshot.send_replace(Arc::new(snapshot));
        self.last_load.send_replace(Some(Utc::now()));
    }

    /// Drop everything after a failed load.
    pub(crate) fn reset(&self) {
        self.snapshot.send_replace(Arc::new(InventorySnapshot::default()));
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> InventoryStream {
        InventoryStream::new(self.snapshot.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_load(&self) -> Option<DateTime<Utc>> {
        *self.last_load.borrow()
    }

    /// How long ago the last successful load happened, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_load().map(|t| Utc::now() - t)
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}
