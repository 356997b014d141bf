// ── Reactive inventory streams ──
//
// Subscription types for consuming snapshot changes from the InventoryStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::InventorySnapshot;

/// A subscription to the device inventory.
///
/// Provides both point-in-time snapshot access and change notification
/// via [`changed`](Self::changed) or by converting to a `Stream`.
pub struct InventoryStream {
    current: Arc<InventorySnapshot>,
    receiver: watch::Receiver<Arc<InventorySnapshot>>,
}

impl InventoryStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<InventorySnapshot>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time or at the last `changed()`.
    pub fn current(&self) -> &Arc<InventorySnapshot> {
        &self.current
    }

    /// The latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<InventorySnapshot> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<InventorySnapshot>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> InventoryWatchStream {
        InventoryWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the current snapshot first, then one item per replacement.
pub struct InventoryWatchStream {
    inner: WatchStream<Arc<InventorySnapshot>>,
}

impl Stream for InventoryWatchStream {
    type Item = Arc<InventorySnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use crate::model::{DeviceId, DeviceRecord, DeviceStatus, InventorySnapshot};
    use crate::store::InventoryStore;

    fn one_device() -> InventorySnapshot {
        InventorySnapshot::new(
            vec![DeviceRecord {
                id: DeviceId::from("1"),
                name: "PC".into(),
                ip: "10.0.0.5".into(),
                mac: None,
                status: DeviceStatus::Unknown,
                last_seen: None,
            }],
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn stream_yields_current_then_replacements() {
        let store = InventoryStore::new();
        let mut stream = store.subscribe().into_stream();

        assert!(stream.next().await.unwrap().is_empty());

        store.replace(one_device());
        assert_eq!(stream.next().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn changed_updates_current() {
        let store = InventoryStore::new();
        let mut sub = store.subscribe();
        assert!(sub.current().is_empty());

        store.replace(one_device());
        sub.changed().await.unwrap();
        assert_eq!(sub.current().len(), 1);
        assert_eq!(sub.latest().len(), 1);
    }
}
