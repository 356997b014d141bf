// Backend wire types
//
// Models for the dashboard backend's JSON API. Every object response may
// carry the `{ success, error }` envelope fields alongside its payload.
// Fields use `#[serde(default)]` liberally because the backend is loose
// about which fields it includes.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// The envelope fields shared by every object response.
///
/// ```json
/// { "success": false, "error": "Device with this IP already exists" }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    /// The failure message, if this envelope reports one.
    ///
    /// `success: false` without a message still counts as a failure.
    pub fn failure(&self) -> Option<String> {
        match (&self.error, self.success) {
            (Some(msg), _) if !msg.trim().is_empty() => Some(msg.clone()),
            (_, Some(false)) => Some("operation failed".into()),
            _ => None,
        }
    }
}

// ── Device ───────────────────────────────────────────────────────────

/// A device object as the backend stores it.
///
/// Discovery results carry no `id` yet, so it is optional here; `status`
/// is left as a raw string and interpreted by the core crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDevice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub ip: String,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    /// Catch-all for fields the dashboard does not interpret
    /// (`added`, `modified`, `last_wake`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── List ─────────────────────────────────────────────────────────────

/// `GET /api/devices` accepts two success shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Envelope {
        devices: Vec<ApiDevice>,
        #[serde(default)]
        last_scan: Option<String>,
    },
    Bare(Vec<ApiDevice>),
}

/// Normalized device list.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceList {
    pub devices: Vec<ApiDevice>,
    pub last_scan: Option<String>,
}

impl From<ListResponse> for DeviceList {
    fn from(resp: ListResponse) -> Self {
        match resp {
            ListResponse::Envelope { devices, last_scan } => Self { devices, last_scan },
            ListResponse::Bare(devices) => Self {
                devices,
                last_scan: None,
            },
        }
    }
}

// ── Scan ─────────────────────────────────────────────────────────────

/// `POST /scan` response.
#[derive(Debug, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub devices_found: Option<u64>,
    /// Raw sweep result some backends return instead of a count.
    #[serde(default)]
    pub discovered_devices: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub scan_time: Option<String>,
}

impl ScanResponse {
    /// Number of hosts the sweep reported.
    pub fn found(&self) -> u64 {
        self.devices_found.unwrap_or_else(|| {
            self.discovered_devices
                .as_ref()
                .map_or(0, |d| u64::try_from(d.len()).unwrap_or(u64::MAX))
        })
    }
}

// ── Discover ─────────────────────────────────────────────────────────

/// `POST /discover` response.
#[derive(Debug, Deserialize)]
pub struct DiscoverResponse {
    #[serde(default)]
    pub discovered: Vec<ApiDevice>,
}

// ── Ping ─────────────────────────────────────────────────────────────

/// `POST /ping` response.
#[derive(Debug, Deserialize)]
pub struct PingResponse {
    #[serde(default)]
    pub reachable: Option<bool>,
    #[serde(default)]
    pub response_time: Option<f64>,
    /// `"online"` / `"offline"`, returned by backends that report status
    /// instead of a reachability flag.
    #[serde(default)]
    pub status: Option<String>,
}

/// Normalized probe result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingResult {
    pub reachable: bool,
    pub response_time_ms: Option<f64>,
}

impl From<PingResponse> for PingResult {
    fn from(resp: PingResponse) -> Self {
        let reachable = resp
            .reachable
            .unwrap_or_else(|| resp.status.as_deref() == Some("online"));
        Self {
            reachable,
            response_time_ms: resp.response_time,
        }
    }
}

// ── Health ───────────────────────────────────────────────────────────

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ── Request bodies ───────────────────────────────────────────────────

/// Body for `POST /add_device` and `PUT /update_device/{id}`.
///
/// `mac` is sent as an empty string when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevicePayload {
    pub name: String,
    pub ip: String,
    pub mac: String,
}
