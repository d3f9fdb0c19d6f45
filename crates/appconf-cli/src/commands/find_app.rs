use clap::Args;
use tracing::{info, warn};

use super::{print_json, StoreArgs};

/// Arguments for find-app command.
#[derive(Args, Clone, Default)]
pub struct FindAppArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Application path
    #[arg(short, long)]
    pub path:  String,
}

/// Prints the application stored under the given path, if any.
///
/// A missing application is not an error: a warning is logged and nothing is printed.
pub async fn run(args: FindAppArgs) -> appconf_store::Result<()> {
    info!("Finding application {} in store {}", args.path, args.store.store_path);
    let store = args.store.open().await?;
    match store.find_app_versioned(&args.path).await? {
        Some(found) => print_json(&found),
        None => {
            warn!("Application '{}' not found", args.path);
            Ok(())
        },
    }
}
