/// Application and server configuration operations.
pub mod operations;
/// Global setting operations.
pub mod settings;
/// Store implementation.
pub mod stor;
/// Argument validation and defaults.
pub mod validation;

pub use stor::ConfigurationStore;
