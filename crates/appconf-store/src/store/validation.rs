use crate::{
    constants::{BINDING_SEPARATOR, ID_PART_SEPARATOR},
    model::ApplicationServerConfig,
    AppConfError,
    Result,
};

/// Characters treated as path separators when deriving a default name.
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

/// Fails with `InvalidArgument` if a required value is empty.
pub(crate) fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppConfError::invalid_argument(format!("{} must be provided", what)));
    }
    Ok(())
}

/// Derives the default application name from its path.
///
/// Trailing separators are trimmed and the text after the last separator is
/// returned. Both `/` and `\` count as separators. A path with no non-empty
/// segment (such as `/`) is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use appconf_store::store::validation::default_app_name;
///
/// assert_eq!(default_app_name("/var/apps/myservice/"), "myservice");
/// assert_eq!(default_app_name("c:\\inetpub\\shop"), "shop");
/// ```
pub fn default_app_name(path: &str) -> String {
    let trimmed = path.trim_end_matches(PATH_SEPARATORS);
    match trimmed.rsplit(PATH_SEPARATORS).next() {
        Some(segment) if !segment.is_empty() => segment.to_owned(),
        _ => path.to_owned(),
    }
}

/// Checks the key fields and bindings of a server configuration.
///
/// The server name must not contain `:` so that `path:server` stays unambiguous,
/// and bindings must not contain `|` so that they survive the join.
pub(crate) fn validate_server_config(config: &ApplicationServerConfig) -> Result<()> {
    require_non_empty(&config.app_path, "AppPath")?;
    require_non_empty(&config.server, "Server")?;
    if config.server.contains(ID_PART_SEPARATOR) {
        return Err(AppConfError::invalid_argument(format!(
            "Server '{}' must not contain '{}'",
            config.server, ID_PART_SEPARATOR
        )));
    }
    if let Some(binding) = config
        .bindings
        .iter()
        .find(|b| b.contains(BINDING_SEPARATOR))
    {
        return Err(AppConfError::invalid_argument(format!(
            "binding '{}' must not contain '{}'",
            binding, BINDING_SEPARATOR
        )));
    }
    Ok(())
}
