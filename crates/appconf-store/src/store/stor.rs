use std::sync::Arc;

use tracing::debug;

use crate::{backend::Backend, config::StoreConfig, Result};

/// Persists applications, their per-server deployment records and global settings.
///
/// `ConfigurationStore` is the only component that derives backend document ids.
/// It keeps no caches: every read goes to the backend, and every write replaces or
/// merges a document addressed by an id derived from the record's logical key.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use appconf_store::{Application, ConfigurationStore, MemoryBackend};
///
/// # async fn example() -> appconf_store::Result<()> {
/// let store = ConfigurationStore::new(Arc::new(MemoryBackend::new()));
///
/// let stored = store.add_or_update_app(&Application::new("/var/apps/billing/")).await?;
/// assert_eq!(stored.name.as_deref(), Some("billing"));
///
/// let found = store.find_app("/var/apps/billing/").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
///
/// # Concurrency
///
/// The store is cheap to clone and safe to share across tasks; all clones use the
/// same backend handle. Operations on different keys need no coordination. For the
/// same application, [`ConfigurationStore::update_app_properties`] reads, modifies
/// and writes back without any lock, so a concurrent full upsert can interleave with
/// it and the last writer of each field wins. Callers that need to detect this use
/// [`ConfigurationStore::update_app_properties_checked`].
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    /// Backend handle shared by all clones.
    pub(crate) backend: Arc<dyn Backend>,
    /// Index names.
    pub(crate) config:  StoreConfig,
}

impl ConfigurationStore {
    /// Creates a store over `backend` using the default index names.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            config: StoreConfig::default(),
        }
    }

    /// Creates a store over `backend` with custom index names.
    ///
    /// Fails with `ConfigError` if the configuration does not validate.
    pub fn with_config(backend: Arc<dyn Backend>, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        debug!("Configuration store created with indexes {:?}", config);
        Ok(Self {
            backend,
            config,
        })
    }

    /// The index names used by this store.
    pub const fn config(&self) -> &StoreConfig { &self.config }
}
