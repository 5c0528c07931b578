//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche del batch.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Spinner per la fase di scansione (durata indeterminata)
//! - Contatori del batch (`BatchSummary`) aggiornati file per file
//! - Stato terminale del batch (`BatchStatus`) con messaggio ed exit code
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce progress bar e log lines sopra la barra
//! - `BatchSummary`: Traccia processed / errors / total
//! - `BatchStatus`: Stato finale del run
//!
//! ## Stati terminali:
//! - **CompletedClean**: Tutti i file processati senza errori
//! - **CompletedWithErrors**: Almeno un file fallito
//! - **NoTargetsFound**: Nessun thumbnail trovato
//! - **Cancelled**: Interrotto dall'operatore
//! - **InvalidInput**: Directory non valida, il batch non è mai partito
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:04] [=========>------------------------------] 12/50 (24%) thumbnail.png
//! ```
//!
//! ## Esempio:
//! ```rust,ignore
//! let progress = ProgressManager::new(total_files);
//! let mut summary = BatchSummary::new(total_files as usize);
//!
//! // Per ogni file processato:
//! summary.record(&result);
//! progress.log(&result.message);
//! progress.update("thumbnail.png");
//!
//! // Alla fine:
//! progress.finish(&summary.format_summary());
//! ```

use crate::image_processor::ProcessResult;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Manages progress reporting for a batch run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Print a log line above the bar
    pub fn log(&self, line: &str) {
        self.bar.println(line);
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Stop the bar where it is, keeping it on screen
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();

        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        spinner
    }
}

/// Running counters of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed_count: usize,
    pub error_count: usize,
    pub total: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &ProcessResult) {
        if result.succeeded {
            self.processed_count += 1;
        } else {
            self.error_count += 1;
        }
    }

    /// Files handled so far, successful or not
    pub fn handled(&self) -> usize {
        self.processed_count + self.error_count
    }

    pub fn status(&self) -> BatchStatus {
        if self.cancelled {
            BatchStatus::Cancelled
        } else if self.total == 0 {
            BatchStatus::NoTargetsFound
        } else if self.error_count > 0 {
            BatchStatus::CompletedWithErrors
        } else {
            BatchStatus::CompletedClean
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} | Errors: {} | Total: {}",
            self.processed_count, self.error_count, self.total
        )
    }
}

/// Terminal state of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchStatus {
    CompletedClean,
    CompletedWithErrors,
    NoTargetsFound,
    Cancelled,
    InvalidInput,
}

impl BatchStatus {
    /// Human-readable headline printed when the run ends
    pub fn headline(&self) -> &'static str {
        match self {
            Self::CompletedClean => "Completed: all thumbnails optimized successfully",
            Self::CompletedWithErrors => "Completed with errors",
            Self::NoTargetsFound => "No thumbnail files found",
            Self::Cancelled => "Cancelled: remaining files were left untouched",
            Self::InvalidInput => "Invalid input: select a valid directory",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CompletedClean | Self::NoTargetsFound => 0,
            Self::CompletedWithErrors => 1,
            Self::InvalidInput => 2,
            Self::Cancelled => 130,
        }
    }
}
