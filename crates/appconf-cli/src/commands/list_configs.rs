use clap::Args;
use tracing::info;

use super::{print_json, StoreArgs};

/// Arguments for list-configs command.
#[derive(Args, Clone, Default)]
pub struct ListConfigsArgs {
    #[command(flatten)]
    pub store:  StoreArgs,
    /// Application path (can be repeated)
    #[arg(short, long = "path", required = true)]
    pub paths:  Vec<String>,
    /// Only return configurations of this server
    #[arg(long)]
    pub server: Option<String>,
}

/// Prints up to 400 server configurations of the given applications.
pub async fn run(args: ListConfigsArgs) -> appconf_store::Result<()> {
    info!(
        "Listing configs of {} applications in store {}",
        args.paths.len(),
        args.store.store_path
    );
    let store = args.store.open().await?;
    let configs = store
        .get_app_configs(&args.paths, args.server.as_deref())
        .await?;
    print_json(&configs)
}

#[cfg(test)]
mod tests {
    use appconf_store::ApplicationServerConfig;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_list_configs_after_add() {
        let temp_dir = TempDir::new().unwrap();
        let store_args = StoreArgs {
            store_path: temp_dir.path().to_string_lossy().to_string(),
            config:     None,
        };
        let store = store_args.open().await.unwrap();
        store
            .add_or_update_app_server_config(&ApplicationServerConfig::new("/a", "web01"))
            .await
            .unwrap();

        let args = ListConfigsArgs {
            store:  store_args,
            paths:  vec!["/a".to_owned()],
            server: Some("web01".to_owned()),
        };
        assert!(run(args).await.is_ok());
    }
}
