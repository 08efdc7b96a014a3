//! API credentials: bundled config and a process-wide cache.
//!
//! Credentials live in a key-value store under fixed keys. They are copied
//! from the bundled config file at install time, or lazily on the first
//! resolve, and only read afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
pub use secrecy::SecretString;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::CredentialsError;

/// Store key for the API key.
pub const API_KEY: &str = "OPENAI_API_KEY";
/// Store key for the model identifier.
pub const MODEL: &str = "OPENAI_MODEL";
/// Model used when the bundled config names none.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// API key plus model.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub api_key: SecretString,
    pub model: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }
}

// =============================================================================
// Key-value store
// =============================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
}

/// In-process store shared by clones.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.write().await.insert(key.to_string(), value);
    }
}

// =============================================================================
// Bundled config
// =============================================================================

/// The static config file shipped next to the binary (`KEY=value` lines).
#[derive(Debug, Clone)]
pub struct BundledConfig {
    path: PathBuf,
}

impl BundledConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read credentials from the file without touching the process
    /// environment.
    pub fn load(&self) -> Result<Credentials, CredentialsError> {
        let display = self.path.display().to_string();
        let config_error = |reason: String| CredentialsError::Config {
            path: display.clone(),
            reason,
        };

        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(&self.path).map_err(|e| config_error(e.to_string()))? {
            let (key, value) = item.map_err(|e| config_error(e.to_string()))?;
            values.insert(key, value);
        }

        let api_key = values
            .remove(API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CredentialsError::MissingApiKey(display.clone()))?;
        let model = values
            .remove(MODEL)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Credentials::new(api_key, model))
    }
}

/// Copy the bundled credentials into the store (install/update hook).
pub async fn install(
    store: &dyn CredentialStore,
    bundled: &BundledConfig,
) -> Result<Credentials, CredentialsError> {
    let credentials = bundled.load()?;
    store
        .set(API_KEY, credentials.api_key.expose_secret().to_string())
        .await;
    store.set(MODEL, credentials.model.clone()).await;
    info!(model = %credentials.model, "Credentials stored");
    Ok(credentials)
}

/// Read credentials from the store, populating it from the bundled config
/// on first use.
pub async fn resolve(
    store: &dyn CredentialStore,
    bundled: &BundledConfig,
) -> Result<Credentials, CredentialsError> {
    if let Some(api_key) = store.get(API_KEY).await {
        let model = store
            .get(MODEL)
            .await
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        debug!(model = %model, "Credentials read from store");
        return Ok(Credentials::new(api_key, model));
    }

    debug!(path = %bundled.path.display(), "Credentials not cached, loading bundled config");
    install(store, bundled).await
}
