//! Head-tracked AR desktop viewer.

use anyhow::Result;
use clap::Parser;
use glasswide::app::ViewerApp;
use glasswide::config::Config;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Physical output to capture (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Capture FIFO path (overrides config)
    #[arg(long)]
    fifo: Option<PathBuf>,

    /// Skip adding/removing virtual outputs (use an existing display setup)
    #[arg(long)]
    no_virtual_screens: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("glasswide - head-tracked AR desktop viewer");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Apply command line overrides
    if let Some(output) = args.output {
        config.capture.output = output;
    }
    if let Some(fifo) = args.fifo {
        config.capture.fifo_path = fifo;
    }

    // Create and run the viewer session
    let mut app = ViewerApp::new(config, !args.no_virtual_screens)?;
    app.run()?;

    Ok(())
}
