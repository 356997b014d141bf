// ── Operation client ──
//
// Issues every remote operation, folds results back into the
// InventoryStore, and reports each outcome through the Notifier.
// Failures are returned to the caller as well as notified; nothing is
// retried.

use std::sync::Arc;

use tracing::{debug, info, warn};
use wakedeck_api::models::HealthResponse;

use crate::backend::DeviceBackend;
use crate::error::CoreError;
use crate::model::{DeviceId, DeviceRecord, DiscoveredHost, InventorySnapshot};
use crate::notify::Notifier;
use crate::store::InventoryStore;
use crate::validate::{DeviceDraft, parse_ipv4};

/// Result of a reachability probe.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PingOutcome {
    /// Device name when the address is tracked, otherwise the address.
    pub target: String,
    pub ip: String,
    pub reachable: bool,
    pub response_time_ms: Option<f64>,
}

/// Result of a confirmed delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation callback declined; nothing was sent.
    Cancelled,
}

/// Orchestrates backend calls against one [`InventoryStore`].
pub struct OperationClient {
    backend: Arc<dyn DeviceBackend>,
    store: Arc<InventoryStore>,
    notifier: Notifier,
}

impl OperationClient {
    pub fn new(
        backend: Arc<dyn DeviceBackend>,
        store: Arc<InventoryStore>,
        notifier: Notifier,
    ) -> Self {
        Self {
            backend,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Load the device list and replace the store with it.
    ///
    /// A failed load resets the store to empty; the previous snapshot is
    /// not kept alongside an error.
    pub async fn load(&self) -> Result<Arc<InventorySnapshot>, CoreError> {
        let result = self
            .backend
            .list_devices()
            .await
            .and_then(InventorySnapshot::try_from);

        match result {
            Ok(snapshot) => {
                debug!(devices = snapshot.len(), "inventory loaded");
                self.store.replace(snapshot);
                Ok(self.store.snapshot())
            }
            Err(e) => {
                self.store.reset();
                self.report("Failed to load devices", &e);
                Err(e)
            }
        }
    }

    /// Reload after a successful mutation. A failure here is already
    /// notified by [`load`](Self::load) and does not fail the mutation.
    async fn reload(&self) {
        if let Err(e) = self.load().await {
            warn!(error = %e, "reload after operation failed");
        }
    }

    /// Backend liveness probe.
    pub async fn health(&self) -> Result<HealthResponse, CoreError> {
        match self.backend.health().await {
            Ok(health) => {
                self.notifier.info(format!("Backend is {}", health.status));
                Ok(health)
            }
            Err(e) => {
                self.report("Health check failed", &e);
                Err(e)
            }
        }
    }

    // ── Network side effects ─────────────────────────────────────────

    /// Run a status sweep, then reload.
    ///
    /// Only the scheduler calls this, so that at most one scan is in
    /// flight per session.
    pub(crate) async fn scan(&self) -> Result<u64, CoreError> {
        info!("scanning network");
        let found = match self.backend.scan().await {
            Ok(found) => found,
            Err(e) => {
                self.report("Scan failed", &e);
                return Err(e);
            }
        };

        self.notifier
            .success(format!("Scan completed! Found {found} devices"));
        self.reload().await;
        Ok(found)
    }

    /// Ask the backend for hosts that are not tracked yet.
    pub async fn discover(&self) -> Result<Vec<DiscoveredHost>, CoreError> {
        info!("discovering devices");
        match self.backend.discover().await {
            Ok(raw) => {
                let hosts: Vec<DiscoveredHost> = raw.into_iter().map(DiscoveredHost::from).collect();
                if hosts.is_empty() {
                    self.notifier.info("No new devices discovered");
                } else {
                    self.notifier
                        .success(format!("Discovered {} new device(s)", hosts.len()));
                }
                Ok(hosts)
            }
            Err(e) => {
                self.report("Discovery failed", &e);
                Err(e)
            }
        }
    }

    /// Send a Wake-on-LAN packet to a tracked device.
    ///
    /// A device without a hardware address is rejected before any
    /// request is made.
    pub async fn wake(&self, device: &DeviceRecord) -> Result<(), CoreError> {
        let Some(mac) = device.wake_mac() else {
            let e = CoreError::validation("mac", "Device MAC address is required for Wake-on-LAN");
            self.report("Wake failed", &e);
            return Err(e);
        };

        match self.backend.wake(device.id.as_str(), mac).await {
            Ok(()) => {
                self.notifier
                    .success(format!("Wake-on-LAN packet sent to {}", device.name));
                Ok(())
            }
            Err(e) => {
                self.report("Failed to send Wake-on-LAN packet", &e);
                Err(e)
            }
        }
    }

    /// Wake by id, looking the device up in the current snapshot.
    pub async fn wake_by_id(&self, id: &DeviceId) -> Result<(), CoreError> {
        let device = self.lookup(id)?;
        self.wake(&device).await
    }

    /// Probe one address, then reload so status reflects the probe.
    pub async fn ping(&self, ip: &str) -> Result<PingOutcome, CoreError> {
        let addr = match parse_ipv4(ip) {
            Ok(addr) => addr.to_string(),
            Err(e) => {
                self.report("Ping failed", &e);
                return Err(e);
            }
        };
        let target = self
            .store
            .device_by_ip(&addr)
            .map_or_else(|| addr.clone(), |d| d.name);

        let result = match self.backend.ping(&addr).await {
            Ok(result) => result,
            Err(e) => {
                self.report(&format!("Failed to ping {target}"), &e);
                return Err(e);
            }
        };

        if result.reachable {
            match result.response_time_ms {
                Some(ms) => self
                    .notifier
                    .success(format!("{target} is reachable ({ms}ms)")),
                None => self.notifier.success(format!("{target} is reachable")),
            }
        } else {
            self.notifier.warning(format!("{target} is not reachable"));
        }

        self.reload().await;
        Ok(PingOutcome {
            target,
            ip: addr,
            reachable: result.reachable,
            response_time_ms: result.response_time_ms,
        })
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub async fn add_device(&self, draft: &DeviceDraft) -> Result<(), CoreError> {
        let valid = match draft.validate() {
            Ok(valid) => valid,
            Err(e) => {
                self.report("Failed to add device", &e);
                return Err(e);
            }
        };

        match self.backend.add_device(&valid.to_payload()).await {
            Ok(()) => {
                self.notifier
                    .success(format!("Device {} added successfully", valid.name));
                self.reload().await;
                Ok(())
            }
            Err(e) => {
                self.report("Failed to add device", &e);
                Err(e)
            }
        }
    }

    pub async fn update_device(&self, id: &DeviceId, draft: &DeviceDraft) -> Result<(), CoreError> {
        let valid = match Self::require_id(id).and_then(|()| draft.validate()) {
            Ok(valid) => valid,
            Err(e) => {
                self.report("Failed to update device", &e);
                return Err(e);
            }
        };

        match self
            .backend
            .update_device(id.as_str(), &valid.to_payload())
            .await
        {
            Ok(()) => {
                self.notifier
                    .success(format!("Device {} updated successfully", valid.name));
                self.reload().await;
                Ok(())
            }
            Err(e) => {
                self.report("Failed to update device", &e);
                Err(e)
            }
        }
    }

    /// Delete a tracked device once `confirm` agrees.
    ///
    /// `confirm` receives the device's display name (or the raw id when
    /// the device is not in the current snapshot). Returning `false`
    /// cancels without sending anything.
    pub async fn delete_device(
        &self,
        id: &DeviceId,
        confirm: impl FnOnce(&str) -> bool + Send,
    ) -> Result<DeleteOutcome, CoreError> {
        if let Err(e) = Self::require_id(id) {
            self.report("Failed to delete device", &e);
            return Err(e);
        }

        let label = self
            .store
            .device(id)
            .map_or_else(|| id.to_string(), |d| d.name);
        if !confirm(&label) {
            debug!(%id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.backend.delete_device(id.as_str()).await {
            Ok(()) => {
                self.notifier
                    .success(format!("Device {label} deleted successfully"));
                self.reload().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.report("Failed to delete device", &e);
                Err(e)
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn require_id(id: &DeviceId) -> Result<(), CoreError> {
        if id.as_str().trim().is_empty() {
            return Err(CoreError::validation("id", "Device id is required"));
        }
        Ok(())
    }

    fn lookup(&self, id: &DeviceId) -> Result<DeviceRecord, CoreError> {
        self.store.device(id).ok_or_else(|| {
            let e = CoreError::DeviceNotFound { id: id.to_string() };
            self.report("Lookup failed", &e);
            e
        })
    }

    /// Publish the one notification a failure gets.
    ///
    /// Validation and backend messages are shown as-is; transport
    /// failures get `context` prepended.
    fn report(&self, context: &str, err: &CoreError) {
        match err {
            CoreError::Validation { reason, .. } => self.notifier.warning(reason.clone()),
            CoreError::DeviceNotFound { .. } => self.notifier.warning(err.to_string()),
            CoreError::Operation { message, .. } => self.notifier.error(message.clone()),
            CoreError::Transport { .. } => self.notifier.error(format!("{context}: {err}")),
        }
    }
}
