//! # Batch Runner
//!
//! Driver sequenziale: una scansione, poi un `process()` per file nell'ordine di
//! discovery. Ogni passo viene notificato all'osservatore tramite `BatchEvent`.
//!
//! - Un file fallito viene contato e il loop continua
//! - Il flag di cancellazione è controllato prima di ogni file; il file in corso
//!   non viene mai interrotto

use crate::{
    consent::OverwriteConsent,
    error::ThumbnailError,
    file_manager::FileManager,
    image_processor::{ProcessResult, ThumbnailProcessor},
    progress::BatchSummary,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared, advisory cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Returns `true` if it had already been requested.
    pub fn cancel(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Eventi emessi durante un batch run
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Scansione della directory radice in corso
    Scanning { root: PathBuf },
    /// Nessun thumbnail trovato, nessun file verrà toccato
    NoTargets { root: PathBuf },
    /// Scansione terminata, inizia l'elaborazione
    Started { root: PathBuf, total: usize },
    /// Un file è stato elaborato (`index` parte da 0)
    FileProcessed {
        index: usize,
        total: usize,
        result: ProcessResult,
    },
    /// Batch terminato (completato o cancellato)
    Finished { summary: BatchSummary },
}

/// Sequential scan-then-process driver
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    processor: ThumbnailProcessor,
    cancel: CancelFlag,
    follow_links: bool,
}

impl BatchRunner {
    pub fn new(processor: ThumbnailProcessor, cancel: CancelFlag) -> Self {
        Self {
            processor,
            cancel,
            follow_links: false,
        }
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Run one batch over `root`. Only directory validation errors are returned;
    /// per-file failures are counted in the summary.
    pub fn run<F>(
        &self,
        root: &Path,
        _consent: OverwriteConsent,
        mut on_event: F,
    ) -> Result<BatchSummary, ThumbnailError>
    where
        F: FnMut(BatchEvent),
    {
        on_event(BatchEvent::Scanning {
            root: root.to_path_buf(),
        });

        let thumbnails = FileManager::find_thumbnails(root, self.follow_links)?;
        let total = thumbnails.len();
        let mut summary = BatchSummary::new(total);

        if thumbnails.is_empty() {
            info!("No thumbnail files found in {}", root.display());
            on_event(BatchEvent::NoTargets {
                root: root.to_path_buf(),
            });
            on_event(BatchEvent::Finished { summary });
            return Ok(summary);
        }

        info!("Found {} thumbnail files to process", total);
        on_event(BatchEvent::Started {
            root: root.to_path_buf(),
            total,
        });

        for (index, path) in thumbnails.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(
                    "Batch cancelled after {} of {} files",
                    summary.handled(),
                    total
                );
                summary.cancelled = true;
                break;
            }

            debug!("Processing {}/{}: {}", index + 1, total, path.display());
            let result = self.processor.process(path);
            summary.record(&result);

            on_event(BatchEvent::FileProcessed {
                index,
                total,
                result,
            });
        }

        info!("Batch finished: {}", summary.format_summary());
        on_event(BatchEvent::Finished { summary });
        Ok(summary)
    }
}
