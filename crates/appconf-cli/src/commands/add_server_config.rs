use appconf_store::ApplicationServerConfig;
use clap::Args;
use tracing::info;

use super::StoreArgs;

/// Arguments for add-server-config command.
#[derive(Args, Clone, Default)]
pub struct AddServerConfigArgs {
    #[command(flatten)]
    pub store:             StoreArgs,
    /// Application path
    #[arg(short, long)]
    pub path:              String,
    /// Server name (must not contain ':')
    #[arg(long)]
    pub server:            String,
    /// Fully qualified name or IP address of the server
    #[arg(long)]
    pub server_fqdn_or_ip: Option<String>,
    /// Windows service name
    #[arg(long)]
    pub service_name:      Option<String>,
    /// IIS application pool name
    #[arg(long)]
    pub app_pool_name:     Option<String>,
    /// Application type
    #[arg(long)]
    pub app_type:          Option<String>,
    /// Binding, in order (can be repeated)
    #[arg(short, long = "binding")]
    pub bindings:          Vec<String>,
    /// Display name
    #[arg(long)]
    pub display_name:      Option<String>,
}

/// Creates or replaces the configuration of an application on one server.
pub async fn run(args: AddServerConfigArgs) -> appconf_store::Result<()> {
    info!(
        "Adding config of {} on {} to store {}",
        args.path, args.server, args.store.store_path
    );
    let store = args.store.open().await?;
    let config = ApplicationServerConfig {
        app_path:          args.path,
        server:            args.server,
        server_fqdn_or_ip: args.server_fqdn_or_ip,
        service_name:      args.service_name,
        app_pool_name:     args.app_pool_name,
        app_type:          args.app_type,
        bindings:          args.bindings,
        display_name:      args.display_name,
    };
    store.add_or_update_app_server_config(&config).await?;
    info!("Config of {} on {} stored", config.app_path, config.server);
    Ok(())
}
