// wakedeck-core: Inventory state and operation orchestration between
// wakedeck-api and front-ends (CLI, watch mode).

pub mod backend;
pub mod client;
pub mod convert;
pub mod discovery;
pub mod error;
pub mod model;
pub mod notify;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::DeviceBackend;
pub use client::{DeleteOutcome, OperationClient, PingOutcome};
pub use discovery::{AddCandidate, DiscoveryReconciler, UNKNOWN_DEVICE_NAME};
pub use error::CoreError;
pub use notify::{Notification, NotificationLevel, Notifier};
pub use scheduler::{RefreshScheduler, ScanOutcome, ScanState, TickOutcome};
pub use session::{Session, SessionConfig};
pub use store::InventoryStore;
pub use stream::InventoryStream;
pub use validate::{DeviceDraft, ValidDevice, parse_ipv4, parse_mac};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DeviceId, DeviceRecord, DeviceStatus, DiscoveredHost, InventorySnapshot, MacAddress,
    StatusCounts,
};
