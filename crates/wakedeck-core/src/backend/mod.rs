// ── Backend abstraction ──
//
// `DeviceBackend` is the seam between orchestration and HTTP. The real
// implementation is `wakedeck_api::DashboardClient`; tests substitute an
// in-memory backend that records calls.

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use wakedeck_api::DashboardClient;
use wakedeck_api::models::{ApiDevice, DeviceList, DevicePayload, HealthResponse, PingResult};

use crate::error::CoreError;

/// The remote operations the dashboard backend exposes.
///
/// Each method is one request. Implementations do not retry, and they
/// report failure envelopes as [`CoreError::Operation`].
#[async_trait]
pub trait DeviceBackend: Send + Sync {
    async fn list_devices(&self) -> Result<DeviceList, CoreError>;

    /// Sweep the network and refresh device status. Returns the host count.
    async fn scan(&self) -> Result<u64, CoreError>;

    async fn discover(&self) -> Result<Vec<ApiDevice>, CoreError>;

    async fn wake(&self, device_id: &str, mac: &str) -> Result<(), CoreError>;

    async fn ping(&self, ip: &str) -> Result<PingResult, CoreError>;

    async fn add_device(&self, payload: &DevicePayload) -> Result<(), CoreError>;

    async fn update_device(&self, id: &str, payload: &DevicePayload) -> Result<(), CoreError>;

    async fn delete_device(&self, id: &str) -> Result<(), CoreError>;

    async fn health(&self) -> Result<HealthResponse, CoreError>;
}

#[async_trait]
impl DeviceBackend for DashboardClient {
    async fn list_devices(&self) -> Result<DeviceList, CoreError> {
        Ok(DashboardClient::list_devices(self).await?)
    }

    async fn scan(&self) -> Result<u64, CoreError> {
        Ok(DashboardClient::scan(self).await?)
    }

    async fn discover(&self) -> Result<Vec<ApiDevice>, CoreError> {
        Ok(DashboardClient::discover(self).await?)
    }

    async fn wake(&self, device_id: &str, mac: &str) -> Result<(), CoreError> {
        Ok(DashboardClient::wake(self, device_id, mac).await?)
    }

    async fn ping(&self, ip: &str) -> Result<PingResult, CoreError> {
        Ok(DashboardClient::ping(self, ip).await?)
    }

    async fn add_device(&self, payload: &DevicePayload) -> Result<(), CoreError> {
        Ok(DashboardClient::add_device(self, payload).await?)
    }

    async fn update_device(&self, id: &str, payload: &DevicePayload) -> Result<(), CoreError> {
        Ok(DashboardClient::update_device(self, id, payload).await?)
    }

    async fn delete_device(&self, id: &str) -> Result<(), CoreError> {
        Ok(DashboardClient::delete_device(self, id).await?)
    }

    async fn health(&self) -> Result<HealthResponse, CoreError> {
        Ok(DashboardClient::health(self).await?)
    }
}
