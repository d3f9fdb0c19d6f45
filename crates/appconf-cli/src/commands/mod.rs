use std::sync::Arc;

use appconf_store::{ConfigurationStore, FileSystemBackend, StoreConfig};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

/// Add-app command module.
mod add_app;
/// Add-server-config command module.
mod add_server_config;
/// Find-app command module.
mod find_app;
/// Get-setting command module.
mod get_setting;
/// List-apps command module.
mod list_apps;
/// List-configs command module.
mod list_configs;
/// Set-setting command module.
mod set_setting;
/// Update-app command module.
mod update_app;

/// Manage monitored applications, their server deployments and global settings.
#[derive(Parser)]
#[command(name = "appconf")]
#[command(about = "Application configuration store CLI")]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Commands,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (can be used multiple times: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Enumeration of all available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create or replace an application.
    AddApp(add_app::AddAppArgs),
    /// Create or replace the configuration of an application on one server.
    AddServerConfig(add_server_config::AddServerConfigArgs),
    /// Print an application by path.
    FindApp(find_app::FindAppArgs),
    /// Print all applications ordered by path.
    ListApps(list_apps::ListAppsArgs),
    /// Print server configurations of the given applications.
    ListConfigs(list_configs::ListConfigsArgs),
    /// Update selected properties of an existing application.
    UpdateApp(update_app::UpdateAppArgs),
    /// Print a global setting.
    GetSetting(get_setting::GetSettingArgs),
    /// Set or clear a global setting.
    SetSetting(set_setting::SetSettingArgs),
}

/// Location of the store, shared by every command.
#[derive(Args, Clone, Default)]
pub struct StoreArgs {
    /// Root directory of the filesystem backend
    #[arg(short, long)]
    pub store_path: String,
    /// JSON file with index names (defaults are used when omitted)
    #[arg(long)]
    pub config:     Option<String>,
}

impl StoreArgs {
    /// Opens the configuration store described by these arguments.
    pub async fn open(&self) -> appconf_store::Result<ConfigurationStore> {
        let config = match self.config.as_deref() {
            Some(path) => StoreConfig::load(path).await?,
            None => StoreConfig::default(),
        };
        debug!(
            "Opening store at {} with indexes {:?}",
            self.store_path, config
        );
        let backend = FileSystemBackend::new(&self.store_path).await?;
        ConfigurationStore::with_config(Arc::new(backend), config)
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> appconf_store::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout, reason = "CLI output")]
    {
        println!("{}", json);
    }
    Ok(())
}

/// Executes the given command.
pub async fn run_command(command: Commands) -> appconf_store::Result<()> {
    match command {
        Commands::AddApp(args) => add_app::run(args).await,
        Commands::AddServerConfig(args) => add_server_config::run(args).await,
        Commands::FindApp(args) => find_app::run(args).await,
        Commands::ListApps(args) => list_apps::run(args).await,
        Commands::ListConfigs(args) => list_configs::run(args).await,
        Commands::UpdateApp(args) => update_app::run(args).await,
        Commands::GetSetting(args) => get_setting::run(args).await,
        Commands::SetSetting(args) => set_setting::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_parse_update_app() {
        let cli = Cli::try_parse_from([
            "appconf",
            "update-app",
            "--store-path",
            "/tmp/s",
            "--path",
            "/var/apps/a",
            "--property",
            "DaysToKeepLogs",
            "--days-to-keep-logs",
            "14",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::UpdateApp(_)));
    }

    #[tokio::test]
    async fn test_open_with_missing_config_file_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = StoreArgs {
            store_path: temp_dir.path().to_string_lossy().to_string(),
            config:     Some(temp_dir.path().join("missing.json").to_string_lossy().to_string()),
        };
        assert!(args.open().await.is_err());
    }
}
