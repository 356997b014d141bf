// ── Reactive inventory store ──
//
// Snapshot storage with push-based change notification.

mod inventory_store;

pub use inventory_store::InventoryStore;
