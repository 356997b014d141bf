// ── Inventory snapshot ──

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::device::{DeviceRecord, DeviceStatus};
use super::identity::DeviceId;
use crate::error::CoreError;

/// The full device list as of one successful load, in backend order.
///
/// Ids are unique within a snapshot; [`InventorySnapshot::new`] rejects
/// lists that repeat one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventorySnapshot {
    devices: Vec<DeviceRecord>,
    last_scan: Option<DateTime<Utc>>,
}

impl InventorySnapshot {
    pub fn new(
        devices: Vec<DeviceRecord>,
        last_scan: Option<DateTime<Utc>>,
    ) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(devices.len());
        for device in &devices {
            if !seen.insert(&device.id) {
                return Err(CoreError::malformed(format!(
                    "malformed response: duplicate device id '{}'",
                    device.id
                )));
            }
        }
        Ok(Self { devices, last_scan })
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn last_scan(&self) -> Option<DateTime<Utc>> {
        self.last_scan
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn by_id(&self, id: &DeviceId) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| &d.id == id)
    }

    pub fn by_ip(&self, ip: &str) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| d.ip == ip)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts {
            total: self.devices.len(),
            ..StatusCounts::default()
        };
        for device in &self.devices {
            match device.status {
                DeviceStatus::Online => counts.online += 1,
                DeviceStatus::Offline => counts.offline += 1,
                DeviceStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}

/// Per-status device counts for the summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    pub unknown: usize,
}
