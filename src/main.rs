//! flarecat - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// flarecat - terminal browser for an SDO/AIA solar flare cache
#[derive(Parser, Debug)]
#[command(name = "flarecat")]
#[command(version)]
#[command(about = "Query solar flares and curate a local flare cache")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Flare cache TSV file
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Query settings file shared with the query scripts
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Working directory of the flare query
    #[arg(long)]
    pub query_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn overrides(&self) -> flarecat::config::CliOverrides {
        flarecat::config::CliOverrides {
            cache_path: self.cache.clone(),
            settings_path: self.settings.clone(),
            query_dir: self.query_dir.clone(),
            log_file_path: self.log_file.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = flarecat::config::load_config_with_precedence(args.config.clone())?;
        let merged = flarecat::config::merge_config(config_file);
        let with_env = flarecat::config::apply_env_overrides(merged);
        flarecat::config::apply_cli_overrides(with_env, args.overrides())
    };

    flarecat::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let colors = flarecat::view::ColorConfig::from_env_and_args(args.no_color);
    flarecat::view::run_with_config(&config, colors)?;

    info!("Exited cleanly");
    Ok(())
}
