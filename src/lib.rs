//! # Thumbnail Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri front end
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione del front end
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery dei file thumbnail
//! - `image_processor`: Dimezzamento, miglioramento e riscrittura di un file
//! - `enhance`: Filtri post-resize (autocontrast, sharpen)
//! - `batch`: Driver del batch, worker in background, consumer degli eventi
//! - `consent`: Conferma esplicita prima di sovrascrivere
//! - `progress`: Progress bar, contatori e stato terminale
//! - `json_output`: Eventi JSON line-delimited
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use thumbnail_optimizer::{BatchRunner, CancelFlag, OverwriteConsent, ThumbnailProcessor};
//!
//! let runner = BatchRunner::new(ThumbnailProcessor::new(), CancelFlag::new());
//! let summary = runner.run(&path, OverwriteConsent::assumed(), |event| println!("{:?}", event))?;
//! ```

pub mod batch;
pub mod config;
pub mod consent;
pub mod enhance;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod json_output;
pub mod progress;

pub use batch::{spawn_batch, BatchEvent, BatchHandle, BatchRunner, CancelFlag, ProgressTracker};
pub use config::Config;
pub use consent::OverwriteConsent;
pub use error::ThumbnailError;
pub use file_manager::FileManager;
pub use image_processor::{ProcessResult, ThumbnailProcessor};
pub use progress::{BatchStatus, BatchSummary};
