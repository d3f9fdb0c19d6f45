use crate::{AppConfError, Result};

/// Windows reserved names that cannot be used as directory names.
pub const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9", "LPT1", "LPT2",
    "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Checks if a name contains only alphanumerics, `_`, `-` and `.`.
pub fn is_valid_name_chars(name: &str) -> bool {
    name.chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'))
}

/// Checks if a name is a Windows reserved name (case-insensitive), with or without extension.
pub fn is_reserved_name(name: &str) -> bool {
    let name_upper = name.to_uppercase();
    let base_name = name_upper.split('.').next().unwrap_or(&name_upper);
    WINDOWS_RESERVED_NAMES.contains(&name_upper.as_str()) || WINDOWS_RESERVED_NAMES.contains(&base_name)
}

/// Validates an index name so it can double as a directory name.
///
/// - Must not be empty
/// - Must not start with a dot
/// - Must not end with a dot
/// - Must only contain alphanumeric characters, `_`, `-` and `.`
/// - Must not be a Windows reserved name
pub fn validate_index_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| {
        Err(AppConfError::ConfigError {
            message: format!("invalid index name '{}': {}", name, reason),
        })
    };
    if name.is_empty() {
        return invalid("must not be empty");
    }
    if name.starts_with('.') || name.ends_with('.') {
        return invalid("must not start or end with a dot");
    }
    if !is_valid_name_chars(name) {
        return invalid("only alphanumerics, '_', '-' and '.' are allowed");
    }
    if is_reserved_name(name) {
        return invalid("reserved name");
    }
    Ok(())
}
