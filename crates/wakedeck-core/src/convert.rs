// ── API-to-domain type conversions ──
//
// Bridges raw `wakedeck_api` response types into canonical
// `wakedeck_core::model` domain types. Missing optional data becomes
// `None`; a tracked device without an id is a malformed response.

use chrono::{DateTime, NaiveDateTime, Utc};

use wakedeck_api::models::{ApiDevice, DeviceList};

use crate::error::CoreError;
use crate::model::{DeviceId, DeviceRecord, DeviceStatus, DiscoveredHost, InventorySnapshot};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend timestamp. Offset-less ISO-8601 is read as UTC;
/// anything unparseable becomes `None`.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Empty strings and JSON nulls both mean "absent".
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

// ── Device ─────────────────────────────────────────────────────────

impl TryFrom<ApiDevice> for DeviceRecord {
    type Error = CoreError;

    fn try_from(raw: ApiDevice) -> Result<Self, Self::Error> {
        let Some(id) = non_empty(raw.id) else {
            return Err(CoreError::malformed(format!(
                "malformed response: device {} has no id",
                raw.ip
            )));
        };

        let name = non_empty(raw.name).unwrap_or_else(|| raw.ip.clone());

        Ok(Self {
            id: DeviceId::from(id),
            name,
            ip: raw.ip,
            mac: non_empty(raw.mac),
            status: DeviceStatus::from_backend(raw.status.as_deref()),
            last_seen: parse_timestamp(raw.last_seen.as_deref()),
        })
    }
}

impl From<ApiDevice> for DiscoveredHost {
    fn from(raw: ApiDevice) -> Self {
        Self {
            name: non_empty(raw.name),
            ip: raw.ip,
            mac: non_empty(raw.mac),
            status: DeviceStatus::from_backend(raw.status.as_deref()),
        }
    }
}

// ── Inventory ──────────────────────────────────────────────────────

impl TryFrom<DeviceList> for InventorySnapshot {
    type Error = CoreError;

    fn try_from(list: DeviceList) -> Result<Self, Self::Error> {
        let devices = list
            .devices
            .into_iter()
            .map(DeviceRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        InventorySnapshot::new(devices, parse_timestamp(list.last_scan.as_deref()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn api_device(value: serde_json::Value) -> ApiDevice {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let ts = parse_timestamp(Some("2024-03-01T08:15:30.123456")).unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 1));
        assert_eq!((ts.hour(), ts.minute()), (8, 15));
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(Some("")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn record_from_full_device() {
        let record = DeviceRecord::try_from(api_device(json!({
            "id": "1",
            "name": "PC",
            "ip": "10.0.0.5",
            "mac": "AA:BB:CC:DD:EE:FF",
            "status": "online",
            "last_seen": "2024-01-01T00:00:00Z"
        })))
        .unwrap();

        assert_eq!(record.id.as_str(), "1");
        assert_eq!(record.status, DeviceStatus::Online);
        assert!(record.can_wake());
        assert!(record.last_seen.is_some());
    }

    #[test]
    fn empty_mac_means_absent() {
        let record = DeviceRecord::try_from(api_device(json!({
            "id": "2", "name": "NAS", "ip": "10.0.0.6", "mac": ""
        })))
        .unwrap();
        assert!(record.mac.is_none());
        assert_eq!(record.status, DeviceStatus::Unknown);
    }

    #[test]
    fn missing_id_is_malformed() {
        let result = DeviceRecord::try_from(api_device(json!({ "ip": "10.0.0.7" })));
        assert!(matches!(result, Err(CoreError::Transport { .. })));
    }

    #[test]
    fn missing_name_falls_back_to_ip() {
        let record =
            DeviceRecord::try_from(api_device(json!({ "id": "3", "ip": "10.0.0.8" }))).unwrap();
        assert_eq!(record.name, "10.0.0.8");
    }
}
