//! Domain records handled by the configuration store.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::AppConfError;

/// A monitored application, identified by its filesystem-style path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Logical key of the application. Immutable once stored.
    pub path:              String,
    /// Display name. Derived from the last path segment when absent.
    #[serde(default)]
    pub name:              Option<String>,
    /// How long the collected logs are retained.
    #[serde(default)]
    pub days_to_keep_logs: u32,
    /// Excluded applications are not monitored.
    #[serde(default)]
    pub is_excluded:       bool,
    /// Hidden applications are left out of dashboards.
    #[serde(default)]
    pub is_hidden:         bool,
}

impl Application {
    /// Creates an application with the given path and default properties.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the log retention in days.
    pub const fn with_days_to_keep_logs(mut self, days: u32) -> Self {
        self.days_to_keep_logs = days;
        self
    }

    /// Marks the application as excluded or not.
    pub const fn with_excluded(mut self, excluded: bool) -> Self {
        self.is_excluded = excluded;
        self
    }

    /// Marks the application as hidden or not.
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.is_hidden = hidden;
        self
    }
}

/// Deployment record of an application on a single server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationServerConfig {
    pub app_path:          String,
    pub server:            String,
    #[serde(default)]
    pub server_fqdn_or_ip: Option<String>,
    #[serde(default)]
    pub service_name:      Option<String>,
    #[serde(default)]
    pub app_pool_name:     Option<String>,
    #[serde(default)]
    pub app_type:          Option<String>,
    /// Ordered bindings. Values must not contain `|`.
    #[serde(default)]
    pub bindings:          Vec<String>,
    #[serde(default)]
    pub display_name:      Option<String>,
}

impl ApplicationServerConfig {
    /// Creates a config for `app_path` deployed on `server`.
    pub fn new(app_path: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            app_path: app_path.into(),
            server: server.into(),
            ..Self::default()
        }
    }
}

/// A process-wide key/value setting. `None` means the setting is not set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSetting {
    pub key:   String,
    pub value: Option<String>,
}

/// A stored record together with the backend version it was read at.
///
/// The version is the token expected by the optimistic update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Versioned<T> {
    pub value:   T,
    pub version: u64,
}

/// Mutable application properties that can be targeted by a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppProperty {
    Name,
    DaysToKeepLogs,
    IsExcluded,
    IsHidden,
}

impl AppProperty {
    /// Every property, in document order.
    pub const ALL: [Self; 4] = [
        Self::Name,
        Self::DaysToKeepLogs,
        Self::IsExcluded,
        Self::IsHidden,
    ];

    /// Wire name of the document field backing this property.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::DaysToKeepLogs => "DaysToKeepLogs",
            Self::IsExcluded => "IsExcluded",
            Self::IsHidden => "IsHidden",
        }
    }
}

impl fmt::Display for AppProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.field_name()) }
}

impl FromStr for AppProperty {
    type Err = AppConfError;

    /// Parses a property name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppConfError::invalid_argument(format!("unknown application property '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_property_parse_ignores_case() {
        assert_eq!(
            "daystokeeplogs".parse::<AppProperty>().unwrap(),
            AppProperty::DaysToKeepLogs
        );
        assert_eq!("NAME".parse::<AppProperty>().unwrap(), AppProperty::Name);
        assert_eq!(" IsHidden ".parse::<AppProperty>().unwrap(), AppProperty::IsHidden);
    }

    #[test]
    fn test_app_property_parse_rejects_unknown() {
        let err = "Path".parse::<AppProperty>().unwrap_err();
        assert!(matches!(err, AppConfError::InvalidArgument { .. }));
    }

    #[test]
    fn test_app_property_display_matches_field_name() {
        for prop in AppProperty::ALL {
            assert_eq!(prop.to_string(), prop.field_name());
        }
    }

    #[test]
    fn test_application_builder() {
        let app = Application::new("/var/apps/a")
            .with_name("a")
            .with_days_to_keep_logs(7)
            .with_hidden(true);
        assert_eq!(app.path, "/var/apps/a");
        assert_eq!(app.name.as_deref(), Some("a"));
        assert_eq!(app.days_to_keep_logs, 7);
        assert!(app.is_hidden);
        assert!(!app.is_excluded);
    }
}
