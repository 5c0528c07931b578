//! # Batch Worker
//!
//! Esegue il `BatchRunner` su un thread bloccante di tokio, così il front end resta
//! reattivo. Gli eventi viaggiano su un canale mpsc: il worker produce, il front end
//! consuma ed è l'unico proprietario dello stato della UI.

use crate::{
    batch::runner::{BatchEvent, BatchRunner, CancelFlag},
    consent::OverwriteConsent,
    error::ThumbnailError,
    progress::BatchSummary,
};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a batch running in the background
pub struct BatchHandle {
    pub events: mpsc::UnboundedReceiver<BatchEvent>,
    cancel: CancelFlag,
    join: JoinHandle<Result<BatchSummary, ThumbnailError>>,
}

impl BatchHandle {
    /// Flag to request cancellation; takes effect before the next file
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Wait for the worker to finish and return its summary
    pub async fn finish(self) -> Result<BatchSummary, ThumbnailError> {
        self.join
            .await
            .map_err(|e| ThumbnailError::Worker(e.to_string()))?
    }
}

/// Start `runner` over `root` on the blocking thread pool
pub fn spawn_batch(runner: BatchRunner, root: PathBuf, consent: OverwriteConsent) -> BatchHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let cancel = runner.cancel_flag().clone();

    let join = tokio::task::spawn_blocking(move || {
        debug!("Batch worker started for {}", root.display());
        runner.run(&root, consent, |event| {
            // Receiver dropped means nobody is listening anymore; keep processing
            let _ = tx.send(event);
        })
    });

    BatchHandle {
        events: rx,
        cancel,
        join,
    }
}
