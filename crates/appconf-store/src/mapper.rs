//! Conversion between domain records and their stored document shape.
//!
//! Documents use the PascalCase field names expected on the wire. Server bindings
//! are stored as one `|`-joined string, or `null` when there are none.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    constants::BINDING_SEPARATOR,
    identity::{app_id, app_server_config_id},
    model::{AppProperty, Application, ApplicationServerConfig},
    AppConfError,
    Result,
};

/// Stored shape of an [`Application`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationDocument {
    pub id:                String,
    pub path:              String,
    #[serde(default)]
    pub name:              Option<String>,
    #[serde(default)]
    pub days_to_keep_logs: u32,
    #[serde(default)]
    pub is_excluded:       bool,
    #[serde(default)]
    pub is_hidden:         bool,
}

impl ApplicationDocument {
    /// Builds a full document from `app`.
    pub fn from_app(app: &Application) -> Self {
        let mut doc = Self::default();
        doc.apply(app, None);
        doc
    }

    /// Copies properties of `app` into this document.
    ///
    /// With `properties` set to `None` every field is copied. Otherwise only the
    /// listed properties are copied and the remaining fields keep their current
    /// values. `Id` and `Path` are always written.
    pub fn apply(&mut self, app: &Application, properties: Option<&[AppProperty]>) {
        let selected = |prop: AppProperty| properties.is_none_or(|props| props.contains(&prop));

        self.id = app_id(&app.path);
        self.path.clone_from(&app.path);
        if selected(AppProperty::Name) {
            self.name.clone_from(&app.name);
        }
        if selected(AppProperty::DaysToKeepLogs) {
            self.days_to_keep_logs = app.days_to_keep_logs;
        }
        if selected(AppProperty::IsExcluded) {
            self.is_excluded = app.is_excluded;
        }
        if selected(AppProperty::IsHidden) {
            self.is_hidden = app.is_hidden;
        }
    }
}

impl From<ApplicationDocument> for Application {
    fn from(doc: ApplicationDocument) -> Self {
        Self {
            path:              doc.path,
            name:              doc.name,
            days_to_keep_logs: doc.days_to_keep_logs,
            is_excluded:       doc.is_excluded,
            is_hidden:         doc.is_hidden,
        }
    }
}

/// Stored shape of an [`ApplicationServerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConfigDocument {
    pub id:                String,
    pub path:              String,
    pub server:            String,
    #[serde(default)]
    pub server_fqdn_or_ip: Option<String>,
    #[serde(default)]
    pub service_name:      Option<String>,
    #[serde(default)]
    pub app_pool_name:     Option<String>,
    #[serde(default)]
    pub app_type:          Option<String>,
    #[serde(default)]
    pub binding:           Option<String>,
    #[serde(default)]
    pub display_name:      Option<String>,
}

impl ServerConfigDocument {
    /// Builds a full document from `config`.
    pub fn from_config(config: &ApplicationServerConfig) -> Self {
        Self {
            id:                app_server_config_id(&config.app_path, &config.server),
            path:              config.app_path.clone(),
            server:            config.server.clone(),
            server_fqdn_or_ip: config.server_fqdn_or_ip.clone(),
            service_name:      config.service_name.clone(),
            app_pool_name:     config.app_pool_name.clone(),
            app_type:          config.app_type.clone(),
            binding:           join_bindings(&config.bindings),
            display_name:      config.display_name.clone(),
        }
    }
}

impl From<ServerConfigDocument> for ApplicationServerConfig {
    fn from(doc: ServerConfigDocument) -> Self {
        Self {
            bindings:          split_bindings(doc.binding.as_deref()),
            app_path:          doc.path,
            server:            doc.server,
            server_fqdn_or_ip: doc.server_fqdn_or_ip,
            service_name:      doc.service_name,
            app_pool_name:     doc.app_pool_name,
            app_type:          doc.app_type,
            display_name:      doc.display_name,
        }
    }
}

/// Stored shape of a global setting. The document id is the setting key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSettingDocument {
    pub id:         String,
    #[serde(default)]
    pub conf_value: Option<String>,
}

/// Joins bindings into the stored representation. No bindings yield `None`.
pub fn join_bindings(bindings: &[String]) -> Option<String> {
    if bindings.is_empty() {
        return None;
    }
    let mut separator = [0_u8; 4];
    Some(bindings.join(&*BINDING_SEPARATOR.encode_utf8(&mut separator)))
}

/// Splits the stored binding string, dropping empty entries.
pub fn split_bindings(binding: Option<&str>) -> Vec<String> {
    binding
        .map(|b| {
            b.split(BINDING_SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Serializes a document into the JSON value handed to the backend.
pub fn to_document<T: Serialize>(doc: &T) -> Result<Value> { Ok(serde_json::to_value(doc)?) }

/// Deserializes a stored document, reporting shape mismatches as corruption.
pub fn from_document<T: DeserializeOwned>(index: &str, id: &str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| {
        AppConfError::CorruptDocument {
            index:  index.to_owned(),
            id:     id.to_owned(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn stored_app() -> ApplicationDocument {
        ApplicationDocument::from_app(
            &Application::new("/var/apps/a")
                .with_name("a")
                .with_days_to_keep_logs(7)
                .with_hidden(true),
        )
    }

    #[test]
    fn test_application_document_wire_shape() {
        let value = to_document(&stored_app()).unwrap();
        assert_eq!(
            value,
            json!({
                "Id": app_id("/var/apps/a"),
                "Path": "/var/apps/a",
                "Name": "a",
                "DaysToKeepLogs": 7,
                "IsExcluded": false,
                "IsHidden": true
            })
        );
    }

    #[test]
    fn test_apply_all_properties() {
        let mut doc = stored_app();
        let update = Application::new("/var/apps/a").with_name("renamed");
        doc.apply(&update, None);
        assert_eq!(doc.name.as_deref(), Some("renamed"));
        assert_eq!(doc.days_to_keep_logs, 0);
        assert!(!doc.is_hidden);
    }

    #[test]
    fn test_apply_selected_properties_only() {
        let mut doc = stored_app();
        let update = Application::new("/var/apps/a")
            .with_name("renamed")
            .with_days_to_keep_logs(14)
            .with_hidden(false);
        doc.apply(&update, Some(&[AppProperty::DaysToKeepLogs]));
        assert_eq!(doc.days_to_keep_logs, 14);
        assert!(doc.is_hidden);
        assert_eq!(doc.name.as_deref(), Some("a"));
    }

    #[test]
    fn test_apply_empty_selection_still_sets_identity() {
        let mut doc = ApplicationDocument::default();
        doc.apply(&Application::new("/x").with_hidden(true), Some(&[]));
        assert_eq!(doc.id, app_id("/x"));
        assert_eq!(doc.path, "/x");
        assert!(!doc.is_hidden);
    }

    #[test]
    fn test_server_config_document_wire_shape() {
        let mut config = ApplicationServerConfig::new("/var/apps/a", "srv1");
        config.bindings = vec!["http://a".to_owned(), "https://b".to_owned()];
        config.app_type = Some("web".to_owned());
        let value = to_document(&ServerConfigDocument::from_config(&config)).unwrap();
        assert_eq!(value["Id"], json!(app_server_config_id("/var/apps/a", "srv1")));
        assert_eq!(value["Path"], json!("/var/apps/a"));
        assert_eq!(value["Server"], json!("srv1"));
        assert_eq!(value["Binding"], json!("http://a|https://b"));
        assert_eq!(value["AppType"], json!("web"));
        assert_eq!(value["ServerFqdnOrIp"], Value::Null);
    }

    #[test]
    fn test_bindings_round_trip_keeps_order() {
        let mut config = ApplicationServerConfig::new("/a", "s");
        config.bindings = vec!["https://b".to_owned(), "http://a".to_owned()];
        let back: ApplicationServerConfig = ServerConfigDocument::from_config(&config).into();
        assert_eq!(back, config);
    }

    #[test]
    fn test_no_bindings_round_trip_to_empty() {
        let config = ApplicationServerConfig::new("/a", "s");
        let doc = ServerConfigDocument::from_config(&config);
        assert_eq!(doc.binding, None);
        let back: ApplicationServerConfig = doc.into();
        assert!(back.bindings.is_empty());
    }

    #[test]
    fn test_split_bindings_drops_empty_entries() {
        assert_eq!(split_bindings(Some("|a||b|")), vec!["a", "b"]);
        assert!(split_bindings(Some("")).is_empty());
        assert!(split_bindings(None).is_empty());
    }

    #[test]
    fn test_global_setting_document_shape() {
        let doc = GlobalSettingDocument {
            id:         "smtp.host".to_owned(),
            conf_value: Some("mail".to_owned()),
        };
        assert_eq!(
            to_document(&doc).unwrap(),
            json!({"Id": "smtp.host", "ConfValue": "mail"})
        );
    }

    #[test]
    fn test_from_document_reports_corruption() {
        let err = from_document::<ApplicationDocument>("applications", "X", json!({"Id": 5})).unwrap_err();
        assert!(matches!(err, AppConfError::CorruptDocument { .. }));
    }
}
