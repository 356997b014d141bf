// In-memory backend for unit tests.
//
// Records every call, serves canned responses, and can fail a chosen
// operation or hold scans open until the test releases them.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Map;
use tokio::sync::Notify;

use wakedeck_api::models::{ApiDevice, DeviceList, DevicePayload, HealthResponse, PingResult};

use super::DeviceBackend;
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Scan,
    Discover,
    Wake { device_id: String, mac: String },
    Ping { ip: String },
    Add(DevicePayload),
    Update { id: String, payload: DevicePayload },
    Delete { id: String },
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    List,
    Scan,
    Discover,
    Wake,
    Ping,
    Add,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub(crate) enum Failure {
    /// Backend answered `{ "success": false, "error": ... }`.
    Operation(String),
    /// Request never produced a usable response.
    Transport,
}

impl Failure {
    fn to_error(&self) -> CoreError {
        match self {
            Self::Operation(message) => CoreError::Operation {
                message: message.clone(),
                status: Some(400),
            },
            Self::Transport => CoreError::Transport {
                message: "connection failed".into(),
                status: None,
            },
        }
    }
}

pub(crate) fn api_device(id: &str, name: &str, ip: &str, mac: Option<&str>) -> ApiDevice {
    ApiDevice {
        id: Some(id.into()),
        name: Some(name.into()),
        ip: ip.into(),
        mac: mac.map(Into::into),
        status: Some("online".into()),
        last_seen: None,
        extra: Map::new(),
    }
}

pub(crate) struct MockBackend {
    calls: Mutex<Vec<Call>>,
    devices: Mutex<Vec<ApiDevice>>,
    discovered: Mutex<Vec<ApiDevice>>,
    ping: Mutex<PingResult>,
    failures: Mutex<HashMap<Op, Failure>>,
    scan_found: AtomicU64,
    scan_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            devices: Mutex::new(Vec::new()),
            discovered: Mutex::new(Vec::new()),
            ping: Mutex::new(PingResult {
                reachable: true,
                response_time_ms: Some(1.0),
            }),
            failures: Mutex::new(HashMap::new()),
            scan_found: AtomicU64::new(0),
            scan_gate: Mutex::new(None),
        }
    }

    pub(crate) fn with_devices(devices: Vec<ApiDevice>) -> Self {
        let mock = Self::new();
        *mock.devices.lock().unwrap() = devices;
        mock
    }

    pub(crate) fn set_devices(&self, devices: Vec<ApiDevice>) {
        *self.devices.lock().unwrap() = devices;
    }

    pub(crate) fn set_discovered(&self, discovered: Vec<ApiDevice>) {
        *self.discovered.lock().unwrap() = discovered;
    }

    pub(crate) fn set_ping(&self, result: PingResult) {
        *self.ping.lock().unwrap() = result;
    }

    pub(crate) fn set_scan_found(&self, n: u64) {
        self.scan_found.store(n, Ordering::SeqCst);
    }

    pub(crate) fn fail(&self, op: Op, failure: Failure) {
        self.failures.lock().unwrap().insert(op, failure);
    }

    pub(crate) fn clear_failure(&self, op: Op) {
        self.failures.lock().unwrap().remove(&op);
    }

    /// Make every subsequent scan block until the returned gate is notified.
    pub(crate) fn hold_scans(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.scan_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: Op) -> Result<(), CoreError> {
        match self.failures.lock().unwrap().get(&op) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DeviceBackend for MockBackend {
    async fn list_devices(&self) -> Result<DeviceList, CoreError> {
        self.record(Call::List);
        self.check(Op::List)?;
        Ok(DeviceList {
            devices: self.devices.lock().unwrap().clone(),
            last_scan: None,
        })
    }

    async fn scan(&self) -> Result<u64, CoreError> {
        self.record(Call::Scan);
        let gate = self.scan_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check(Op::Scan)?;
        Ok(self.scan_found.load(Ordering::SeqCst))
    }

    async fn discover(&self) -> Result<Vec<ApiDevice>, CoreError> {
        self.record(Call::Discover);
        self.check(Op::Discover)?;
        Ok(self.discovered.lock().unwrap().clone())
    }

    async fn wake(&self, device_id: &str, mac: &str) -> Result<(), CoreError> {
        self.record(Call::Wake {
            device_id: device_id.into(),
            mac: mac.into(),
        });
        self.check(Op::Wake)
    }

    async fn ping(&self, ip: &str) -> Result<PingResult, CoreError> {
        self.record(Call::Ping { ip: ip.into() });
        self.check(Op::Ping)?;
        Ok(*self.ping.lock().unwrap())
    }

    async fn add_device(&self, payload: &DevicePayload) -> Result<(), CoreError> {
        self.record(Call::Add(payload.clone()));
        self.check(Op::Add)
    }

    async fn update_device(&self, id: &str, payload: &DevicePayload) -> Result<(), CoreError> {
        self.record(Call::Update {
            id: id.into(),
            payload: payload.clone(),
        });
        self.check(Op::Update)
    }

    async fn delete_device(&self, id: &str) -> Result<(), CoreError> {
        self.record(Call::Delete { id: id.into() });
        self.check(Op::Delete)
    }

    async fn health(&self) -> Result<HealthResponse, CoreError> {
        self.record(Call::Health);
        Ok(HealthResponse {
            status: "ok".into(),
            service: Some("mock".into()),
            timestamp: None,
        })
    }
}
