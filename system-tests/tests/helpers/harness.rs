// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Contact Server Harness
// Description: Helpers for spawning contact form servers in system-tests.
// Purpose: Provide deterministic server startup and teardown for tests.
// Dependencies: contact-form-server, tokio
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use contact_form_config::ContactFormConfig;
use contact_form_config::ServerAuditConfig;
use contact_form_config::ServerConfig;
use contact_form_config::StoreConfig;
use contact_form_config::StoreType;
use contact_form_core::SharedMessageStore;
use contact_form_server::ContactServer;
use contact_form_server::ServerError;
use reqwest::redirect::Policy;
use system_tests::config::SystemTestConfig;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use super::readiness::wait_for_server_ready;

/// Backend selection for a spawned server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    /// Non-persistent in-memory store.
    Memory,
    /// `SQLite` store at the given path.
    Sqlite(PathBuf),
}

/// Working directory for one test, removed on drop unless overridden.
pub struct RunRoot {
    /// Directory path.
    path: PathBuf,
    /// Temporary directory guard when no override is configured.
    _temp: Option<TempDir>,
}

impl RunRoot {
    /// Creates a run root for `label`.
    pub fn new(label: &str) -> Result<Self, String> {
        let config = SystemTestConfig::load()?;
        match config.run_root {
            Some(root) => {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_err(|err| err.to_string())?
                    .as_nanos();
                let path = root.join(format!("{label}-{nanos}"));
                std::fs::create_dir_all(&path).map_err(|err| err.to_string())?;
                Ok(Self {
                    path,
                    _temp: None,
                })
            }
            None => {
                let temp = tempfile::Builder::new()
                    .prefix(&format!("contact-form-{label}-"))
                    .tempdir()
                    .map_err(|err| err.to_string())?;
                Ok(Self {
                    path: temp.path().to_path_buf(),
                    _temp: Some(temp),
                })
            }
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Handle for a spawned contact form server.
pub struct ContactServerHandle {
    /// Base URL of the server.
    base_url: Url,
    /// Store the server persists into.
    store: SharedMessageStore,
    /// Server task.
    join: JoinHandle<Result<(), ServerError>>,
}

impl ContactServerHandle {
    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the absolute URL for `path`.
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).unwrap_or_else(|_| self.base_url.clone())
    }

    /// Returns the store the server persists into.
    pub fn store(&self) -> &SharedMessageStore {
        &self.store
    }

    /// Shuts down the server task.
    pub async fn shutdown(self) {
        self.join.abort();
        let _ = self.join.await;
    }
}

/// Builds a loopback config for `store`, with audit lines written to `audit_log`.
pub fn server_config(store: &StoreChoice, audit_log: Option<&Path>) -> ContactFormConfig {
    let store = match store {
        StoreChoice::Memory => StoreConfig::default(),
        StoreChoice::Sqlite(path) => StoreConfig {
            store_type: StoreType::Sqlite,
            path: Some(path.clone()),
            ..StoreConfig::default()
        },
    };
    ContactFormConfig {
        server: ServerConfig {
            bind: "127.0.0.1:0".to_string(),
            audit: ServerAuditConfig {
                enabled: audit_log.is_some(),
                path: audit_log.map(|path| path.display().to_string()),
            },
            ..ServerConfig::default()
        },
        store,
        ..ContactFormConfig::default()
    }
}

/// Spawns a server for `config` and waits until it serves the page.
pub async fn spawn_server(config: ContactFormConfig) -> Result<ContactServerHandle, String> {
    let timeout = SystemTestConfig::load()?.timeout_or_default();
    let server = ContactServer::from_config(config).map_err(|err| err.to_string())?;
    let store = server.service().store().clone();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let base_url = Url::parse(&format!("http://{addr}/")).map_err(|err| err.to_string())?;
    let join = tokio::spawn(server.serve_listener(listener));
    wait_for_server_ready(&http_client(timeout)?, &base_url, timeout).await?;
    Ok(ContactServerHandle {
        base_url,
        store,
        join,
    })
}

/// Spawns an in-memory server without audit output.
pub async fn spawn_memory_server() -> Result<ContactServerHandle, String> {
    spawn_server(server_config(&StoreChoice::Memory, None)).await
}

/// Builds an HTTP client that does not follow redirects.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(Policy::none())
        .build()
        .map_err(|err| err.to_string())
}

/// Returns a loopback address nothing listens on.
pub fn unused_loopback_addr() -> Result<SocketAddr, String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("failed to read listener address: {err}"))?;
    drop(listener);
    Ok(addr)
}
