use clap::Args;
use tracing::info;

use super::{print_json, StoreArgs};

/// Arguments for list-apps command.
#[derive(Args, Clone, Default)]
pub struct ListAppsArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Prints up to 400 applications ordered by path.
pub async fn run(args: ListAppsArgs) -> appconf_store::Result<()> {
    info!("Listing applications in store {}", args.store.store_path);
    let store = args.store.open().await?;
    let apps = store.get_apps().await?;
    info!("Found {} applications", apps.len());
    print_json(&apps)
}
