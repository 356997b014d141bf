// ── Domain model ──
//
// Canonical representation of tracked devices. Wire types from
// wakedeck-api are converted into these in `convert.rs`; consumers
// (CLI, watch mode) only ever see the types re-exported here.

pub mod device;
pub mod identity;
pub mod inventory;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::{DeviceRecord, DeviceStatus, DiscoveredHost};
pub use identity::{DeviceId, MacAddress};
pub use inventory::{InventorySnapshot, StatusCounts};
