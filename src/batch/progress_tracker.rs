//! # Progress Tracking Module
//!
//! Consumatore degli eventi del batch lato presentazione.
//! Gestisce sia output JSON che progress bar tradizionale e stampa sempre uno
//! stato terminale esplicito.

use crate::{
    batch::runner::BatchEvent,
    error::ThumbnailError,
    json_output::JsonMessage,
    progress::{BatchStatus, BatchSummary, ProgressManager},
};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::{error, info};

const DECLINED_MESSAGE: &str = "no files were modified";

/// Renders batch events as a progress bar + log lines, or as JSON lines
pub struct ProgressTracker {
    json_output: bool,
    spinner: Option<ProgressBar>,
    progress: Option<ProgressManager>,
}

impl ProgressTracker {
    pub fn new(json_output: bool) -> Self {
        Self {
            json_output,
            spinner: None,
            progress: None,
        }
    }

    /// Handle one event coming from the worker
    pub fn handle(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::Scanning { root } => {
                info!("Searching for thumbnail files in {}", root.display());
                if !self.json_output {
                    self.spinner = Some(ProgressManager::spinner("Searching for thumbnail files..."));
                }
            }
            BatchEvent::NoTargets { root } => {
                self.clear_spinner();
                if self.json_output {
                    JsonMessage::NoTargets { root: root.clone() }.emit();
                }
            }
            BatchEvent::Started { root, total } => {
                self.clear_spinner();
                if self.json_output {
                    JsonMessage::Start {
                        root: root.clone(),
                        total_files: *total,
                    }
                    .emit();
                } else {
                    self.progress = Some(ProgressManager::new(*total as u64));
                }
            }
            BatchEvent::FileProcessed {
                index,
                total,
                result,
            } => {
                if self.json_output {
                    JsonMessage::file_complete(*index, *total, result).emit();
                } else if let Some(progress) = &self.progress {
                    progress.log(&result.message);
                    let name = result
                        .path
                        .parent()
                        .and_then(|parent| parent.file_name())
                        .unwrap_or_default()
                        .to_string_lossy();
                    progress.update(&format!("Processing {}/{} {}", index + 1, total, name));
                }
            }
            BatchEvent::Finished { summary } => {
                if let Some(progress) = self.progress.take() {
                    if summary.cancelled {
                        progress.abandon(&summary.format_summary());
                    } else {
                        progress.finish(&summary.format_summary());
                    }
                }
            }
        }
    }

    /// Print the terminal status for a finished batch and return it
    pub fn report(&mut self, outcome: &Result<BatchSummary, ThumbnailError>) -> BatchStatus {
        self.clear_spinner();

        match outcome {
            Ok(summary) => {
                let status = summary.status();
                info!("{} ({})", status.headline(), summary.format_summary());
                if self.json_output {
                    JsonMessage::complete(*summary).emit();
                } else {
                    println!("{}", status.headline());
                    println!("{}", summary.format_summary());
                }
                status
            }
            Err(e) => {
                let status = match e {
                    ThumbnailError::InvalidInput(_) => BatchStatus::InvalidInput,
                    _ => BatchStatus::CompletedWithErrors,
                };
                error!("{}", e);
                if self.json_output {
                    JsonMessage::Error {
                        status,
                        message: e.to_string(),
                    }
                    .emit();
                } else {
                    println!("{}: {}", status.headline(), e);
                }
                status
            }
        }
    }

    /// Report that the operator declined the overwrite
    pub fn declined(&self, root: &Path) {
        info!("Confirmation declined for {}", root.display());
        if self.json_output {
            JsonMessage::Declined {
                root: root.to_path_buf(),
                message: DECLINED_MESSAGE.to_string(),
            }
            .emit();
        } else {
            println!("Aborted: {}", DECLINED_MESSAGE);
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_mapping() {
        let mut tracker = ProgressTracker::new(true);

        let clean = BatchSummary {
            processed_count: 1,
            error_count: 0,
            total: 1,
            cancelled: false,
        };
        assert_eq!(tracker.report(&Ok(clean)), BatchStatus::CompletedClean);

        let invalid = Err(ThumbnailError::InvalidInput("nope".to_string()));
        assert_eq!(tracker.report(&invalid), BatchStatus::InvalidInput);

        let crashed = Err(ThumbnailError::Worker("panicked".to_string()));
        assert_eq!(tracker.report(&crashed), BatchStatus::CompletedWithErrors);
    }
}
