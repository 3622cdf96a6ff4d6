use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use termipet::app::{self, LaunchOptions};
use termipet::config::project_paths;
use termipet::PetType;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "termipet")]
#[command(about = "A virtual pet that lives in your terminal")]
struct Cli {
    /// Name for a new pet (ignored when a save exists)
    name: Option<String>,

    /// Pet type for a new pet: puppy, kitten or dragon
    pet_type: Option<PetType>,
}

impl From<Cli> for LaunchOptions {
    fn from(cli: Cli) -> Self {
        LaunchOptions {
            pet_name: cli.name,
            pet_type: cli.pet_type,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = project_paths()?;

    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_path)
        .with_context(|| format!("opening log file {}", paths.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();
    tracing::info!("starting termipet {}", env!("CARGO_PKG_VERSION"));

    let result = app::run(paths, cli.into());
    if let Err(err) = &result {
        tracing::error!("exiting with error: {err:#}");
    }
    result
}
