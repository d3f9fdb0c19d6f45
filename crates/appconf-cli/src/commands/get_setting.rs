use appconf_store::GlobalSetting;
use clap::Args;
use tracing::info;

use super::{print_json, StoreArgs};

/// Arguments for get-setting command.
#[derive(Args, Clone, Default)]
pub struct GetSettingArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Setting key
    #[arg(short, long)]
    pub key:   String,
}

/// Prints a global setting; `value` is `null` when the setting is not set.
pub async fn run(args: GetSettingArgs) -> appconf_store::Result<()> {
    info!("Getting setting {} from store {}", args.key, args.store.store_path);
    let store = args.store.open().await?;
    let value = store.get_global_setting(&args.key).await?;
    print_json(&GlobalSetting {
        key: args.key,
        value,
    })
}
