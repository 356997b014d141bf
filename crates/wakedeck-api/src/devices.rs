// Dashboard device endpoints
//
// Inventory reads, the three network side-effect operations (scan, wake,
// ping), discovery, and device CRUD.

use serde_json::json;
use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::models::{
    ApiDevice, DeviceList, DevicePayload, DiscoverResponse, HealthResponse, ListResponse,
    PingResponse, PingResult, ScanResponse,
};

/// Body-less success responses only carry the envelope.
#[derive(serde::Deserialize)]
struct Ack {}

impl DashboardClient {
    /// List all tracked devices.
    ///
    /// `GET /api/devices`
    pub async fn list_devices(&self) -> Result<DeviceList, Error> {
        let url = self.endpoint("api/devices")?;
        let resp: ListResponse = self.get(url).await?;
        Ok(resp.into())
    }

    /// Refresh reachability of every tracked device.
    ///
    /// `POST /scan`. Returns the number of hosts the sweep found.
    pub async fn scan(&self) -> Result<u64, Error> {
        let url = self.endpoint("scan")?;
        debug!("starting network scan");
        let resp: ScanResponse = self.post_empty(url).await?;
        Ok(resp.found())
    }

    /// Find hosts on the network that are not tracked yet.
    ///
    /// `POST /discover`
    pub async fn discover(&self) -> Result<Vec<ApiDevice>, Error> {
        let url = self.endpoint("discover")?;
        debug!("starting discovery sweep");
        let resp: DiscoverResponse = self.post_empty(url).await?;
        Ok(resp.discovered)
    }

    /// Send a Wake-on-LAN packet to a tracked device.
    ///
    /// `POST /wake` with `{"device_id": "...", "mac": "..."}`
    pub async fn wake(&self, device_id: &str, mac: &str) -> Result<(), Error> {
        let url = self.endpoint("wake")?;
        debug!(device_id, mac, "sending wake packet");
        let _: Ack = self
            .post(url, &json!({ "device_id": device_id, "mac": mac }))
            .await?;
        Ok(())
    }

    /// Probe a single address.
    ///
    /// `POST /ping` with `{"ip": "..."}`
    pub async fn ping(&self, ip: &str) -> Result<PingResult, Error> {
        let url = self.endpoint("ping")?;
        debug!(ip, "pinging");
        let resp: PingResponse = self.post(url, &json!({ "ip": ip })).await?;
        Ok(resp.into())
    }

    /// Start tracking a device.
    ///
    /// `POST /add_device`
    pub async fn add_device(&self, payload: &DevicePayload) -> Result<(), Error> {
        let url = self.endpoint("add_device")?;
        debug!(name = %payload.name, ip = %payload.ip, "adding device");
        let _: Ack = self.post(url, payload).await?;
        Ok(())
    }

    /// Replace a tracked device's name and addresses.
    ///
    /// `PUT /update_device/{id}`
    pub async fn update_device(&self, id: &str, payload: &DevicePayload) -> Result<(), Error> {
        let url = self.resource_endpoint("update_device", id)?;
        debug!(id, "updating device");
        let _: Ack = self.put(url, payload).await?;
        Ok(())
    }

    /// Stop tracking a device.
    ///
    /// `DELETE /delete_device/{id}`
    pub async fn delete_device(&self, id: &str) -> Result<(), Error> {
        let url = self.resource_endpoint("delete_device", id)?;
        debug!(id, "deleting device");
        let _: Ack = self.delete(url).await?;
        Ok(())
    }

    /// Backend liveness probe.
    ///
    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse, Error> {
        let url = self.endpoint("health")?;
        self.get(url).await
    }
}
