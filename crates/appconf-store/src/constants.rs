//! Constants shared by the store and its backends.
//!
//! Field names here are the wire names of the stored documents and must not change.

/// Directory name for index data within a filesystem backend root.
pub const DATA_DIR: &str = "data";

/// File extension for document files.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Hard cap on the number of documents returned by any list or search call.
pub const MAX_SEARCH_RESULTS: usize = 400;

/// Separator placed between key parts before hashing.
pub const ID_PART_SEPARATOR: char = ':';

/// Separator used to join server bindings into a single field.
pub const BINDING_SEPARATOR: char = '|';

/// Default index holding application documents.
pub const DEFAULT_APP_INDEX: &str = "applications";

/// Default index holding per-server application configuration documents.
pub const DEFAULT_APP_CONFIG_INDEX: &str = "app-server-configs";

/// Default index holding global settings.
pub const DEFAULT_SETTINGS_INDEX: &str = "global-settings";

/// Document id field.
pub const FIELD_ID: &str = "Id";

/// Application path field, shared by application and server config documents.
pub const FIELD_PATH: &str = "Path";

/// Server name field of server config documents.
pub const FIELD_SERVER: &str = "Server";
