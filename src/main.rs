use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{ConfigCommand, ProductCommand, SaladCommand};
use config::Config;
use saladbar_core::{Diagnostics, ProductCatalog, SaladStore, StorageError, TracingDiagnostics};

#[derive(Parser)]
#[command(name = "saladbar")]
#[command(version)]
#[command(about = "Build salads from a catalog of vegetables, dressings and toppings", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log load summaries and skipped records
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Product(ProductCommand),

    /// Manage salad recipes
    Salad(SaladCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config)?;
    let diagnostics: Arc<dyn Diagnostics> = Arc::new(TracingDiagnostics);

    match cli.command {
        Some(Commands::Product(cmd)) => {
            let mut catalog =
                ProductCatalog::new(config.catalog_path.value.clone(), diagnostics);
            continue_unless_writing(catalog.load(), cmd.writes_catalog())?;
            cmd.run(&mut catalog)?;
        }
        Some(Commands::Salad(cmd)) => {
            let mut catalog =
                ProductCatalog::new(config.catalog_path.value.clone(), diagnostics.clone());
            continue_unless_writing(catalog.load(), cmd.writes_recipes())?;
            let mut store = SaladStore::new(config.salads_dir.value.clone(), diagnostics);
            continue_unless_writing(store.load_all(&catalog), cmd.writes_recipes())?;
            cmd.run(&catalog, &mut store)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// A store that could not be read only stops commands that would write it back.
fn continue_unless_writing<T>(
    loaded: Result<T, StorageError>,
    writes: bool,
) -> Result<(), StorageError> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if writes => Err(e),
        Err(e) => {
            tracing::warn!("Continuing without stored data: {}", e);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "saladbar=info,saladbar_core=info"
    } else {
        "saladbar=warn,saladbar_core=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
