use appconf_store::{AppProperty, Application};
use clap::Args;
use tracing::info;

use super::StoreArgs;

/// Arguments for update-app command.
///
/// Only the properties named with `--property` are written; the value flags of the
/// other properties are ignored.
#[derive(Args, Clone, Default)]
pub struct UpdateAppArgs {
    #[command(flatten)]
    pub store:             StoreArgs,
    /// Application path
    #[arg(short, long)]
    pub path:              String,
    /// Property to update: Name, DaysToKeepLogs, IsExcluded or IsHidden (case-insensitive, can be
    /// repeated)
    #[arg(long = "property", required = true)]
    pub properties:        Vec<String>,
    /// New display name
    #[arg(short, long)]
    pub name:              Option<String>,
    /// New log retention in days
    #[arg(long, default_value_t = 0)]
    pub days_to_keep_logs: u32,
    /// New excluded flag
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    pub excluded:          bool,
    /// New hidden flag
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    pub hidden:            bool,
    /// Only write if the stored version still matches
    #[arg(long)]
    pub expected_version:  Option<u64>,
}

/// Updates the selected properties of an existing application.
pub async fn run(args: UpdateAppArgs) -> appconf_store::Result<()> {
    let properties = args
        .properties
        .iter()
        .map(|p| p.parse::<AppProperty>())
        .collect::<appconf_store::Result<Vec<_>>>()?;
    info!(
        "Updating {:?} of application {} in store {}",
        properties, args.path, args.store.store_path
    );

    let store = args.store.open().await?;
    let app = Application {
        path:              args.path,
        name:              args.name,
        days_to_keep_logs: args.days_to_keep_logs,
        is_excluded:       args.excluded,
        is_hidden:         args.hidden,
    };
    match args.expected_version {
        Some(expected) => {
            let version = store
                .update_app_properties_checked(&app, &properties, expected)
                .await?;
            info!("Application {} updated to version {}", app.path, version);
        },
        None => {
            store.update_app_properties(&app, &properties).await?;
            info!("Application {} updated", app.path);
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use appconf_store::AppConfError;
    use tempfile::TempDir;

    use super::*;

    fn store_args(temp_dir: &TempDir) -> StoreArgs {
        StoreArgs {
            store_path: temp_dir.path().to_string_lossy().to_string(),
            config:     None,
        }
    }

    #[tokio::test]
    async fn test_update_only_named_property() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_args(&temp_dir).open().await.unwrap();
        store
            .add_or_update_app(&Application::new("/a").with_hidden(true).with_days_to_keep_logs(7))
            .await
            .unwrap();

        let args = UpdateAppArgs {
            store: store_args(&temp_dir),
            path: "/a".to_owned(),
            properties: vec!["daystokeeplogs".to_owned()],
            days_to_keep_logs: 14,
            hidden: false,
            ..UpdateAppArgs::default()
        };
        run(args).await.unwrap();

        let app = store.find_app("/a").await.unwrap().unwrap();
        assert_eq!(app.days_to_keep_logs, 14);
        assert!(app.is_hidden);
    }

    #[tokio::test]
    async fn test_update_unknown_property_fails() {
        let temp_dir = TempDir::new().unwrap();
        let args = UpdateAppArgs {
            store: store_args(&temp_dir),
            path: "/a".to_owned(),
            properties: vec!["Path".to_owned()],
            ..UpdateAppArgs::default()
        };
        assert!(matches!(
            run(args).await,
            Err(AppConfError::InvalidArgument { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_app_fails() {
        let temp_dir = TempDir::new().unwrap();
        let args = UpdateAppArgs {
            store: store_args(&temp_dir),
            path: "/missing".to_owned(),
            properties: vec!["Name".to_owned()],
            ..UpdateAppArgs::default()
        };
        assert!(matches!(
            run(args).await,
            Err(AppConfError::NotFound { .. })
        ));
    }
}
