use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use daisy_core::{
    config::{ApiKeys, Config},
    store::LocalRecordStore,
    Catalog,
};
use daisy_provider::{HttpProvider, ProviderConfig};

#[derive(Parser)]
#[command(name = "daisy", about = "daisy — medicinal plant remedies and plant care lookup")]
struct Cli {
    /// Write debug logs to <tmp>/daisy-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Catalog to open: remedies or care.
    #[arg(long, global = true, default_value = "remedies")]
    catalog: Catalog,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search without the TUI and print the records as JSON.
    Search {
        /// Symptom (remedies) or plant (care). Omit for the common plants list.
        term: Option<String>,
        /// Ignore the cached common plants list and fetch it again.
        #[arg(long)]
        refresh: bool,
    },
    /// Filter a blog export by plant or symptom keywords and print matches as JSON.
    Blog {
        /// JSON array of blog documents.
        file: PathBuf,
        /// Space-separated keywords; omit to print every entry.
        #[arg(long, default_value = "")]
        filter: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let path = std::env::temp_dir().join("daisy-debug.log");
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "daisy debug log started");
    }

    match cli.command {
        None => {
            let config = Config::load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "config: falling back to defaults");
                Config::defaults()
            });
            daisy_tui::run(config, cli.catalog)
        }
        Some(Commands::Search { term, refresh }) => {
            let config = Config::load()?;
            let keys = ApiKeys::load(&config.keys_path())?;
            let provider = HttpProvider::new(ProviderConfig::from_config(&config, &keys))?;
            let store = LocalRecordStore::for_catalog(&config.data_dir(), cli.catalog);
            let request = daisy::headless::SearchRequest { catalog: cli.catalog, term, refresh };

            let runtime = tokio::runtime::Runtime::new()?;
            let records = runtime.block_on(daisy::headless::search(
                request,
                config.search_options(),
                Arc::new(provider),
                Arc::new(store),
            ))?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        Some(Commands::Blog { file, filter }) => {
            let entries = daisy::headless::blog(&file, &filter)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
    }
}
