// ── Core identity types ──
//
// DeviceId is the opaque server-assigned key of a tracked device.
// MacAddress is a validated hardware address; only user input is
// parsed into one, server-supplied strings are kept as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ── DeviceId ────────────────────────────────────────────────────────

/// Server-assigned device identifier. Never generated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeviceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address, normalized to uppercase colon-separated form
/// (`AA:BB:CC:DD:EE:FF`).
///
/// Accepts six two-digit hex octets separated by `:` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalize any hardware-address-ish string for comparison, without
    /// validating it. Used to match server-supplied addresses.
    pub fn comparable(raw: &str) -> String {
        raw.trim().to_ascii_uppercase().replace('-', ":")
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let bytes = raw.as_bytes();

        // 6 octets * 2 digits + 5 separators
        let well_formed = bytes.len() == 17
            && bytes.chunks(3).all(|chunk| match chunk {
                [a, b, sep] => {
                    a.is_ascii_hexdigit() && b.is_ascii_hexdigit() && matches!(sep, b':' | b'-')
                }
                [a, b] => a.is_ascii_hexdigit() && b.is_ascii_hexdigit(),
                _ => false,
            });

        if !well_formed {
            return Err(CoreError::validation(
                "mac",
                format!("'{raw}' is not a MAC address (expected AA:BB:CC:DD:EE:FF)"),
            ));
        }

        Ok(Self(Self::comparable(raw)))
    }
}
