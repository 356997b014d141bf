// ── Session ──
//
// One explicitly constructed set of store, notifier, client, scheduler
// and reconciler per front-end lifetime. Nothing in this crate is global.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::debug;
use url::Url;

use wakedeck_api::{DashboardClient, TransportConfig};

use crate::backend::DeviceBackend;
use crate::client::OperationClient;
use crate::discovery::DiscoveryReconciler;
use crate::error::CoreError;
use crate::notify::{Notification, Notifier};
use crate::scheduler::RefreshScheduler;
use crate::store::InventoryStore;
use crate::stream::InventoryStream;

/// Runtime settings for one session.
///
/// Built by the CLI from config files and flags; core never reads
/// config files itself.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Dashboard backend root, e.g. `http://192.168.1.20:5000`.
    pub base_url: Url,
    /// Periodic reload interval. Zero disables the timer.
    pub refresh_interval: Duration,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl SessionConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            refresh_interval: Duration::from_secs(30),
            timeout: None,
        }
    }
}

/// The wired-up core for one front-end.
pub struct Session {
    config: SessionConfig,
    store: Arc<InventoryStore>,
    notifier: Notifier,
    client: Arc<OperationClient>,
    scheduler: RefreshScheduler,
    discovery: DiscoveryReconciler,
}

impl Session {
    /// Build a session talking HTTP to `config.base_url`.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let http = DashboardClient::new(config.base_url.clone(), &transport)?;
        Ok(Self::with_backend(config, Arc::new(http)))
    }

    /// Build a session over any backend implementation.
    pub fn with_backend(config: SessionConfig, backend: Arc<dyn DeviceBackend>) -> Self {
        debug!(url = %config.base_url, "creating session");
        let store = Arc::new(InventoryStore::new());
        let notifier = Notifier::new();
        let client = Arc::new(OperationClient::new(
            backend,
            Arc::clone(&store),
            notifier.clone(),
        ));
        let scheduler = RefreshScheduler::new(Arc::clone(&client), config.refresh_interval);
        let discovery = DiscoveryReconciler::new(Arc::clone(&client));

        Self {
            config,
            store,
            notifier,
            client,
            scheduler,
            discovery,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }

    pub fn client(&self) -> &OperationClient {
        &self.client
    }

    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    pub fn discovery(&self) -> &DiscoveryReconciler {
        &self.discovery
    }

    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    pub fn subscribe_inventory(&self) -> InventoryStream {
        self.store.subscribe()
    }

    /// Stop the periodic timer. In-flight requests are left to finish.
    pub async fn shutdown(&self) {
        self.scheduler.shutdown().await;
    }
}
