use adcat_assets::AssetResolver;
use adcat_core::{AppConfig, AssetCategory};
use clap::{Subcommand, ValueEnum};

/// Asset categories accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Images,
    Videos,
}

impl From<CategoryArg> for AssetCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Images => AssetCategory::Images,
            CategoryArg::Videos => AssetCategory::Videos,
        }
    }
}

/// Sub-commands available under `assets`.
#[derive(Debug, Subcommand)]
pub enum AssetsCommands {
    /// Print the assets root in use
    Root,
    /// Resolve an asset to its on-disk path
    Resolve {
        #[arg(value_enum)]
        category: CategoryArg,
        filename: String,
    },
}

/// Dispatches an `assets` sub-command. Never touches the database.
///
/// # Errors
///
/// Returns an error if the asset cannot be resolved inside the assets root.
pub(crate) fn run_assets_command(config: &AppConfig, command: &AssetsCommands) -> anyhow::Result<()> {
    let resolver = AssetResolver::new(config.asset_roots.clone());

    match command {
        AssetsCommands::Root => println!("{}", resolver.assets_root().display()),
        AssetsCommands::Resolve { category, filename } => {
            let path = resolver.resolve((*category).into(), filename)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
