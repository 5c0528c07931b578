//! # Thumbnail Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Caricamento della configurazione (file JSON + flag CLI)
//! - Conferma esplicita dell'operatore prima di sovrascrivere
//! - Avvio del batch in background e rendering degli eventi
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, yes, json, follow-links, config, verbose)
//! 2. Configura il logging (INFO o DEBUG, `RUST_LOG` ha la precedenza)
//! 3. Valida che la directory esista
//! 4. Chiede conferma (salvo `--yes`)
//! 5. Avvia il worker, consuma gli eventi, Ctrl-C richiede la cancellazione
//!    (un secondo Ctrl-C termina subito)
//! 6. Stampa lo stato terminale ed esce con il relativo exit code
//!
//! ## Esempio di utilizzo:
//! ```bash
//! thumb-optimizer /path/to/site --yes --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use thumbnail_optimizer::{
    consent, spawn_batch, BatchRunner, BatchStatus, CancelFlag, Config, FileManager,
    OverwriteConsent, ProgressTracker, ThumbnailProcessor,
};

#[derive(Parser)]
#[command(name = "thumb-optimizer")]
#[command(about = "Halve and enhance every thumbnail.png/jpg/jpeg in a directory tree, in place (no backup)")]
struct Args {
    /// Root directory to search for thumbnail files
    directory: PathBuf,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Output progress and status as JSON lines
    #[arg(long)]
    json: bool,

    /// Follow symbolic links while scanning
    #[arg(long)]
    follow_links: bool,

    /// Config file (defaults to <config dir>/thumb-optimizer/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::from_file(&path).await?,
        None => Config::default(),
    };
    let config = Config {
        assume_yes: config.assume_yes || args.yes,
        json_output: config.json_output || args.json,
        follow_links: config.follow_links || args.follow_links,
        verbose: config.verbose || args.verbose,
    };

    // Initialize logging
    let level = if config.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut tracker = ProgressTracker::new(config.json_output);

    // Validate arguments
    if let Err(e) = FileManager::validate_root(&args.directory) {
        let status = tracker.report(&Err(e));
        std::process::exit(status.exit_code());
    }

    let consent = if config.assume_yes {
        OverwriteConsent::assumed()
    } else {
        match consent::confirm(&args.directory)? {
            Some(consent) => consent,
            None => {
                tracker.declined(&args.directory);
                return Ok(());
            }
        }
    };

    let runner = BatchRunner::new(ThumbnailProcessor::new(), CancelFlag::new())
        .with_follow_links(config.follow_links);
    let mut handle = spawn_batch(runner, args.directory.clone(), consent);
    let cancel = handle.cancel_flag();

    loop {
        tokio::select! {
            event = handle.events.recv() => match event {
                Some(event) => tracker.handle(&event),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                if cancel.cancel() {
                    warn!("Second interrupt, exiting without waiting for the current file");
                    std::process::exit(BatchStatus::Cancelled.exit_code());
                }
                warn!("Cancellation requested, finishing the current file (Ctrl-C again to force quit)...");
            }
        }
    }

    let outcome = handle.finish().await;
    let status = tracker.report(&outcome);
    info!("Exiting with status {:?}", status);

    std::process::exit(status.exit_code());
}
