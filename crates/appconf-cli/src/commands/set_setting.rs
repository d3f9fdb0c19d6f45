use clap::Args;
use tracing::info;

use super::StoreArgs;

/// Arguments for set-setting command.
#[derive(Args, Clone, Default)]
pub struct SetSettingArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Setting key
    #[arg(short, long)]
    pub key:   String,
    /// New value; omit to mark the setting as not set
    #[arg(long)]
    pub value: Option<String>,
}

/// Sets or clears a global setting.
pub async fn run(args: SetSettingArgs) -> appconf_store::Result<()> {
    info!("Setting {} in store {}", args.key, args.store.store_path);
    let store = args.store.open().await?;
    store
        .set_global_setting(&args.key, args.value.as_deref())
        .await
}
