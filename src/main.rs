//! import_assets: copy food photography into an Xcode asset catalog
//!
//! Usage:
//!   import_assets <source_dir> <target_assets_dir>
//!   import_assets --config import.ron <source_dir> <target_assets_dir>

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use imageset_import::{import, ImportConfig};

#[derive(Parser)]
#[command(name = "import_assets", version)]
#[command(about = "Import food_*.png images into an asset catalog as .imageset entries")]
struct Cli {
    /// Directory holding the flat source images
    source_dir: PathBuf,

    /// Existing asset catalog directory (e.g. Assets.xcassets)
    target_assets_dir: PathBuf,

    /// RON file overriding prefix, bundle extension, payload name or density tags
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage errors exit with 1 rather than clap's default of 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ImportConfig::new(cli.source_dir, cli.target_assets_dir);
    if let Some(path) = &cli.config {
        config
            .load_overrides(path)
            .with_context(|| format!("Failed to apply config {}", path.display()))?;
    }

    let summary = import(&config)?;

    for skipped in &summary.skipped {
        log::debug!("Skipped {}", skipped);
    }
    log::info!(
        "Imported {} asset(s), skipped {}",
        summary.imported_count(),
        summary.skipped_count()
    );
    Ok(())
}
