// ── Device domain types ──

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};

use super::identity::DeviceId;

/// Last observed reachability.
///
/// The backend owns status values; anything it sends that is not
/// `online` or `offline` is read as `Unknown`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl DeviceStatus {
    /// Lenient parse of a backend status string.
    pub fn from_backend(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse().ok()).unwrap_or_default()
    }

    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    /// Capitalized label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Unknown => "Unknown",
        }
    }
}

/// A tracked device, as last reported by the backend.
///
/// Every field is server-owned. `ip` is stored as the backend sent it;
/// only addresses typed by the user are validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
    pub ip: String,
    pub mac: Option<String>,
    pub status: DeviceStatus,
    pub last_seen: Option<DateTime<Utc>>,
}

impl DeviceRecord {
    /// Wake-on-LAN needs a hardware address.
    pub fn can_wake(&self) -> bool {
        self.wake_mac().is_some()
    }

    /// The address a wake packet would target. Blank counts as absent.
    pub fn wake_mac(&self) -> Option<&str> {
        self.mac.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    pub fn mac_label(&self) -> &str {
        self.mac.as_deref().unwrap_or("N/A")
    }

    pub fn last_seen_label(&self) -> String {
        self.last_seen.map_or_else(
            || "Never".to_owned(),
            |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
    }
}

/// A host reported by a discovery sweep. Not tracked, has no id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveredHost {
    pub name: Option<String>,
    pub ip: String,
    pub mac: Option<String>,
    pub status: DeviceStatus,
}
