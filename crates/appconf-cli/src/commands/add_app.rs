use appconf_store::Application;
use clap::Args;
use tracing::info;

use super::{print_json, StoreArgs};

/// Arguments for add-app command.
#[derive(Args, Clone, Default)]
pub struct AddAppArgs {
    #[command(flatten)]
    pub store:             StoreArgs,
    /// Application path
    #[arg(short, long)]
    pub path:              String,
    /// Display name (defaults to the last path segment)
    #[arg(short, long)]
    pub name:              Option<String>,
    /// Log retention in days
    #[arg(long, default_value_t = 0)]
    pub days_to_keep_logs: u32,
    /// Exclude the application from monitoring
    #[arg(long)]
    pub excluded:          bool,
    /// Hide the application from dashboards
    #[arg(long)]
    pub hidden:            bool,
}

/// Creates or replaces an application and prints it as stored.
pub async fn run(args: AddAppArgs) -> appconf_store::Result<()> {
    info!("Adding application {} to store {}", args.path, args.store.store_path);
    let store = args.store.open().await?;
    let app = Application {
        path:              args.path,
        name:              args.name,
        days_to_keep_logs: args.days_to_keep_logs,
        is_excluded:       args.excluded,
        is_hidden:         args.hidden,
    };
    let stored = store.add_or_update_app(&app).await?;
    print_json(&stored)
}
