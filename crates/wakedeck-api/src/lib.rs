// wakedeck-api: Async Rust client for the wakedeck dashboard backend

pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DashboardClient;
pub use error::Error;
pub use transport::TransportConfig;
