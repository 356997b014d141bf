// ── Client-side input validation ──
//
// Everything here runs before a request is built. A failure returns
// `CoreError::Validation` and nothing is sent.

use std::net::Ipv4Addr;

use serde::Serialize;

use wakedeck_api::models::DevicePayload;

use crate::error::CoreError;
use crate::model::MacAddress;

/// Parse a dotted-quad IPv4 address: four decimal groups of one to three
/// digits, each at most 255. Leading zeros are accepted.
pub fn parse_ipv4(raw: &str) -> Result<Ipv4Addr, CoreError> {
    let raw = raw.trim();
    let invalid = || {
        CoreError::validation(
            "ip",
            format!("'{raw}' is not an IPv4 address (expected a.b.c.d)"),
        )
    };

    let mut octets = [0u8; 4];
    let mut groups = raw.split('.');
    for octet in &mut octets {
        let group = groups.next().ok_or_else(invalid)?;
        if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *octet = group.parse().map_err(|_| invalid())?;
    }
    if groups.next().is_some() {
        return Err(invalid());
    }

    Ok(Ipv4Addr::from(octets))
}

/// Parse a hardware address in colon or hyphen form.
pub fn parse_mac(raw: &str) -> Result<MacAddress, CoreError> {
    raw.parse()
}

// ── Device drafts ──────────────────────────────────────────────────

/// Unvalidated add/update input as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceDraft {
    pub name: String,
    pub ip: String,
    /// Blank or `None` means "no hardware address".
    pub mac: Option<String>,
}

impl DeviceDraft {
    pub fn new(name: impl Into<String>, ip: impl Into<String>, mac: Option<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
            mac,
        }
    }

    /// Check every field; the first failure wins.
    pub fn validate(&self) -> Result<ValidDevice, CoreError> {
        let name = self.name.trim();
        if name.is_empty() || self.ip.trim().is_empty() {
            return Err(CoreError::validation(
                "name",
                "Name and IP address are required",
            ));
        }

        let ip = parse_ipv4(&self.ip)?;
        let mac = match self.mac.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_mac(raw)?),
        };

        Ok(ValidDevice {
            name: name.to_owned(),
            ip,
            mac,
        })
    }
}

/// A draft that passed validation. Only these become request bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDevice {
    pub name: String,
    pub ip: Ipv4Addr,
    pub mac: Option<MacAddress>,
}

impl ValidDevice {
    pub(crate) fn to_payload(&self) -> DevicePayload {
        DevicePayload {
            name: self.name.clone(),
            ip: self.ip.to_string(),
            mac: self
                .mac
                .as_ref()
                .map(|m| m.as_str().to_owned())
                .unwrap_or_default(),
        }
    }
}
