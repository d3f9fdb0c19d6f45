//! # appconf-store
//!
//! Persists configuration metadata of monitored applications, their per-server
//! deployment records and process-wide settings in a document backend.
//!
//! Document ids are derived from logical keys (an application path, or a path and
//! server pair), which makes every write an idempotent upsert. Partial updates copy
//! only the selected [`AppProperty`] values and leave the rest of the stored
//! document alone. List operations are capped at
//! [`constants::MAX_SEARCH_RESULTS`] documents.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use appconf_store::{AppProperty, Application, ConfigurationStore, MemoryBackend};
//!
//! # async fn example() -> appconf_store::Result<()> {
//! let store = ConfigurationStore::new(Arc::new(MemoryBackend::new()));
//! store
//!     .add_or_update_app(&Application::new("/var/apps/shop").with_days_to_keep_logs(7))
//!     .await?;
//!
//! let change = Application::new("/var/apps/shop").with_days_to_keep_logs(14);
//! store
//!     .update_app_properties(&change, &[AppProperty::DaysToKeepLogs])
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod error;
pub mod filtering;
pub mod identity;
pub mod mapper;
pub mod model;
pub mod query;
pub mod store;
pub mod streaming;
pub mod validation;

pub use backend::{Backend, FileSystemBackend, MemoryBackend, StoredDocument};
pub use config::StoreConfig;
pub use error::{AppConfError, Result};
pub use model::{AppProperty, Application, ApplicationServerConfig, GlobalSetting, Versioned};
pub use query::{Filter, SearchRequest, SortOrder};
pub use store::ConfigurationStore;
