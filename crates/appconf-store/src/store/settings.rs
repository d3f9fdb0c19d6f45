use tracing::{debug, trace};

use super::{stor::ConfigurationStore, validation::require_non_empty};
use crate::{
    mapper::{from_document, to_document, GlobalSettingDocument},
    AppConfError,
    Result,
};

#[allow(
    clippy::multiple_inherent_impl,
    reason = "multiple impl blocks for ConfigurationStore are intentional for organization"
)]
impl ConfigurationStore {
    /// Reads a global setting. The key is used as the document id as is.
    ///
    /// Returns `Ok(None)` when the setting was never set or was set to no value.
    pub async fn get_global_setting(&self, key: &str) -> Result<Option<String>> {
        trace!("Getting global setting {}", key);
        require_non_empty(key, "setting key")?;

        let index = &self.config.settings_index;
        let Some(stored) = self.backend.get(index, key).await?
        else {
            debug!("Global setting {} is not set", key);
            return Ok(None);
        };
        let doc: GlobalSettingDocument = from_document(index, key, stored.data)?;
        Ok(doc.conf_value)
    }

    /// Blocking variant of [`ConfigurationStore::get_global_setting`].
    ///
    /// Drives the lookup on a private current-thread runtime. It must be called
    /// from synchronous code; calling it from inside a Tokio runtime fails with
    /// `InvalidArgument` instead of blocking the executor.
    pub fn get_global_setting_blocking(&self, key: &str) -> Result<Option<String>> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(AppConfError::invalid_argument(
                "get_global_setting_blocking cannot be used inside an async runtime",
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.get_global_setting(key))
    }

    /// Sets or overwrites a global setting. `None` stores the setting as not set.
    pub async fn set_global_setting(&self, key: &str, value: Option<&str>) -> Result<()> {
        trace!("Setting global setting {}", key);
        require_non_empty(key, "setting key")?;

        let doc = GlobalSettingDocument {
            id:         key.to_owned(),
            conf_value: value.map(str::to_owned),
        };
        self.backend
            .index(&self.config.settings_index, key, to_document(&doc)?)
            .await?;
        debug!("Global setting {} stored", key);
        Ok(())
    }
}
