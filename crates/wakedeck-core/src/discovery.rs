// ── Discovery reconciliation ──
//
// Turns a discovery sweep into add-candidates. Candidates are drafts:
// nothing is written until one is committed, and committing goes through
// the ordinary add path with its validation.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::client::OperationClient;
use crate::error::CoreError;
use crate::model::{DiscoveredHost, InventorySnapshot, MacAddress};
use crate::validate::{DeviceDraft, parse_mac};

/// Name given to hosts that did not report one.
pub const UNKNOWN_DEVICE_NAME: &str = "Unknown Device";

/// A discovered host prepared for adding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddCandidate {
    pub host: DiscoveredHost,
    /// Pre-filled form. Callers may edit it before committing.
    pub draft: DeviceDraft,
}

/// Merges discovery results into add-candidates without touching the
/// existing inventory.
#[derive(Clone)]
pub struct DiscoveryReconciler {
    client: Arc<OperationClient>,
}

impl DiscoveryReconciler {
    pub fn new(client: Arc<OperationClient>) -> Self {
        Self { client }
    }

    /// Run a discovery sweep and reconcile it against the current store.
    pub async fn discover(&self) -> Result<Vec<AddCandidate>, CoreError> {
        let hosts = self.client.discover().await?;
        let snapshot = self.client.store().snapshot();
        Ok(reconcile(&snapshot, hosts))
    }

    /// Track a candidate, via the same validation as a manual add.
    pub async fn commit(&self, draft: &DeviceDraft) -> Result<(), CoreError> {
        self.client.add_device(draft).await
    }
}

/// Drop hosts already tracked (by address or hardware address) and
/// duplicates within the sweep; pre-fill a draft for each survivor.
pub fn reconcile(snapshot: &InventorySnapshot, hosts: Vec<DiscoveredHost>) -> Vec<AddCandidate> {
    let mut known_ips: HashSet<String> = snapshot.devices().iter().map(|d| d.ip.clone()).collect();
    let known_macs: HashSet<String> = snapshot
        .devices()
        .iter()
        .filter_map(|d| d.mac.as_deref().map(MacAddress::comparable))
        .collect();

    hosts
        .into_iter()
        .filter(|host| {
            let mac_known = host
                .mac
                .as_deref()
                .is_some_and(|m| known_macs.contains(&MacAddress::comparable(m)));
            // `insert` also dedupes the sweep itself
            let fresh = !mac_known && known_ips.insert(host.ip.clone());
            if !fresh {
                debug!(ip = %host.ip, "skipping already tracked host");
            }
            fresh
        })
        .map(|host| {
            let draft = DeviceDraft {
                name: host
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_DEVICE_NAME.to_owned()),
                ip: host.ip.clone(),
                // Only pre-fill an address that would pass validation.
                mac: host
                    .mac
                    .as_deref()
                    .and_then(|m| parse_mac(m).ok())
                    .map(|m| m.as_str().to_owned()),
            };
            AddCandidate { host, draft }
        })
        .collect()
}
