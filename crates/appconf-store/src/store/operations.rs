use serde_json::{json, Value};
use tracing::{debug, trace, warn};

use super::{
    stor::ConfigurationStore,
    validation::{default_app_name, require_non_empty, validate_server_config},
};
use crate::{
    constants::{FIELD_ID, FIELD_PATH, FIELD_SERVER, MAX_SEARCH_RESULTS},
    identity::app_id,
    mapper::{from_document, to_document, ApplicationDocument, ServerConfigDocument},
    model::{AppProperty, Application, ApplicationServerConfig, Versioned},
    AppConfError,
    Filter,
    Result,
    SearchRequest,
    SortOrder,
};

#[allow(
    clippy::multiple_inherent_impl,
    reason = "multiple impl blocks for ConfigurationStore are intentional for organization"
)]
impl ConfigurationStore {
    /// Creates or fully replaces the application stored under `app.path`.
    ///
    /// When `app.name` is absent or empty, the last path segment is used as the name.
    /// Calling this twice with the same path overwrites the same document.
    ///
    /// # Returns
    ///
    /// The application as stored, including the derived name.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `app.path` is empty; backend errors are propagated.
    pub async fn add_or_update_app(&self, app: &Application) -> Result<Application> {
        trace!("Adding or updating application {}", app.path);
        require_non_empty(&app.path, "Path")?;

        let mut app = app.clone();
        if app.name.as_deref().is_none_or(str::is_empty) {
            app.name = Some(default_app_name(&app.path));
        }

        let doc = ApplicationDocument::from_app(&app);
        self.backend
            .index(&self.config.app_index, &doc.id, to_document(&doc)?)
            .await?;
        debug!("Application {} stored under id {}", app.path, doc.id);
        Ok(app)
    }

    /// Creates or fully replaces the server configuration of `(app_path, server)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `app_path` or `server` is empty, if `server` contains `:`,
    /// or if a binding contains `|`.
    pub async fn add_or_update_app_server_config(&self, config: &ApplicationServerConfig) -> Result<()> {
        trace!(
            "Adding or updating config of {} on {}",
            config.app_path,
            config.server
        );
        validate_server_config(config)?;

        let doc = ServerConfigDocument::from_config(config);
        self.backend
            .index(&self.config.app_config_index, &doc.id, to_document(&doc)?)
            .await?;
        debug!(
            "Config of {} on {} stored under id {}",
            config.app_path, config.server, doc.id
        );
        Ok(())
    }

    /// Looks up an application by path. Returns `Ok(None)` when it is not stored.
    pub async fn find_app(&self, path: &str) -> Result<Option<Application>> {
        Ok(self.find_app_versioned(path).await?.map(|found| found.value))
    }

    /// Looks up an application by path together with its stored version.
    ///
    /// The version can be passed to [`ConfigurationStore::update_app_properties_checked`].
    pub async fn find_app_versioned(&self, path: &str) -> Result<Option<Versioned<Application>>> {
        trace!("Finding application {}", path);
        require_non_empty(path, "path")?;

        let id = app_id(path);
        let Some(stored) = self.backend.get(&self.config.app_index, &id).await?
        else {
            debug!("Application {} not found", path);
            return Ok(None);
        };
        let doc: ApplicationDocument = from_document(&self.config.app_index, &id, stored.data)?;
        Ok(Some(Versioned {
            value:   doc.into(),
            version: stored.version,
        }))
    }

    /// Lists server configurations of the given applications, optionally on one server.
    ///
    /// At most [`crate::constants::MAX_SEARCH_RESULTS`] records are returned, in
    /// backend order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `app_paths` is empty or `server` is `Some("")`.
    pub async fn get_app_configs<S>(&self, app_paths: &[S], server: Option<&str>) -> Result<Vec<ApplicationServerConfig>>
    where
        S: AsRef<str>,
    {
        trace!("Listing configs of {} applications", app_paths.len());
        if app_paths.is_empty() {
            return Err(AppConfError::invalid_argument("at least one application path must be provided"));
        }

        let paths: Vec<Value> = app_paths.iter().map(|p| json!(p.as_ref())).collect();
        let mut request = SearchRequest::new().filter(Filter::In(FIELD_PATH.to_owned(), paths));
        if let Some(server) = server {
            require_non_empty(server, "server")?;
            request = request.filter(Filter::Equals(FIELD_SERVER.to_owned(), json!(server)));
        }

        let index = &self.config.app_config_index;
        let documents = self.backend.search(index, &request).await?;
        let configs = documents
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|data| Self::decode_search_hit::<ServerConfigDocument>(index, data).map(Into::into))
            .collect::<Result<Vec<ApplicationServerConfig>>>()?;
        debug!("Found {} application configs", configs.len());
        Ok(configs)
    }

    /// Lists applications ordered ascending by path, capped at
    /// [`crate::constants::MAX_SEARCH_RESULTS`].
    pub async fn get_apps(&self) -> Result<Vec<Application>> {
        trace!("Listing applications");
        let request = SearchRequest::new().sort(FIELD_PATH, SortOrder::Ascending);
        let index = &self.config.app_index;
        let documents = self.backend.search(index, &request).await?;
        let apps = documents
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|data| Self::decode_search_hit::<ApplicationDocument>(index, data).map(Into::into))
            .collect::<Result<Vec<Application>>>()?;
        debug!("Found {} applications", apps.len());
        Ok(apps)
    }

    /// Updates only the listed properties of an existing application.
    ///
    /// The stored document is read, the listed properties are copied from `app`, and
    /// the result is merged back. Properties that are not listed keep their stored
    /// values, whatever `app` holds for them. Pass [`AppProperty::ALL`] to copy every
    /// property.
    ///
    /// This is not atomic with respect to concurrent writers of the same application;
    /// see [`ConfigurationStore::update_app_properties_checked`].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `app.path` is empty, `NotFound` if no application is
    /// stored at that path.
    pub async fn update_app_properties(&self, app: &Application, properties: &[AppProperty]) -> Result<()> {
        self.update_app_properties_inner(app, properties, None)
            .await
            .map(|_| ())
    }

    /// Like [`ConfigurationStore::update_app_properties`], but only writes if the
    /// stored document is still at `expected_version`.
    ///
    /// # Returns
    ///
    /// The new version of the document.
    ///
    /// # Errors
    ///
    /// Additionally fails with `VersionConflict` if another write happened since the
    /// caller read `expected_version`.
    pub async fn update_app_properties_checked(
        &self,
        app: &Application,
        properties: &[AppProperty],
        expected_version: u64,
    ) -> Result<u64> {
        self.update_app_properties_inner(app, properties, Some(expected_version))
            .await
    }

    /// Shared read-modify-write for the partial update operations.
    async fn update_app_properties_inner(
        &self,
        app: &Application,
        properties: &[AppProperty],
        expected_version: Option<u64>,
    ) -> Result<u64> {
        trace!("Updating properties {:?} of application {}", properties, app.path);
        require_non_empty(&app.path, "Path")?;

        let index = &self.config.app_index;
        let id = app_id(&app.path);
        let Some(stored) = self.backend.get(index, &id).await?
        else {
            warn!("Cannot update application {}: not found", app.path);
            return Err(AppConfError::NotFound {
                index: index.clone(),
                id,
            });
        };

        let mut doc: ApplicationDocument = from_document(index, &id, stored.data)?;
        doc.apply(app, Some(properties));
        let version = self
            .backend
            .update(index, &id, to_document(&doc)?, expected_version)
            .await?;
        debug!("Application {} updated to version {}", app.path, version);
        Ok(version)
    }

    /// Decodes a search hit, using its `Id` field (if any) for error reporting.
    fn decode_search_hit<T>(index: &str, data: Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let id = data
            .get(FIELD_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        from_document(index, &id, data)
    }
}
