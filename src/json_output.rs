//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico
//! (front end grafici, script, redirezione su file).
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento del batch
//! - Riusa `ProcessResult`, `BatchSummary` e `BatchStatus` senza duplicarne i campi
//!
//! ## Tipi di messaggi:
//! - `start`: Scansione completata, numero di file da processare
//! - `no_targets`: Nessun thumbnail trovato
//! - `file_complete`: Fine elaborazione di un file
//! - `complete`: Fine del batch con contatori e stato terminale
//! - `error`: Errore che impedisce l'avvio del batch
//! - `declined`: L'operatore ha rifiutato la conferma, nessun file modificato

use crate::image_processor::ProcessResult;
use crate::progress::{BatchStatus, BatchSummary};
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum JsonMessage<'a> {
    /// Inizio dell'elaborazione
    #[serde(rename = "start")]
    Start { root: PathBuf, total_files: usize },

    /// Nessun file da processare
    #[serde(rename = "no_targets")]
    NoTargets { root: PathBuf },

    /// Fine elaborazione di un file specifico
    #[serde(rename = "file_complete")]
    FileComplete {
        index: usize,
        total: usize,
        percentage: f64,
        #[serde(flatten)]
        result: &'a ProcessResult,
    },

    /// Batch terminato
    #[serde(rename = "complete")]
    Complete {
        status: BatchStatus,
        #[serde(flatten)]
        summary: BatchSummary,
    },

    /// Errore generale
    #[serde(rename = "error")]
    Error { status: BatchStatus, message: String },

    /// Conferma rifiutata
    #[serde(rename = "declined")]
    Declined { root: PathBuf, message: String },
}

impl<'a> JsonMessage<'a> {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di completamento file
    pub fn file_complete(index: usize, total: usize, result: &'a ProcessResult) -> Self {
        let percentage = if total > 0 {
            ((index + 1) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self::FileComplete {
            index,
            total,
            percentage,
            result,
        }
    }

    /// Crea un messaggio di completamento generale
    pub fn complete(summary: BatchSummary) -> Self {
        Self::Complete {
            status: summary.status(),
            summary,
        }
    }
}
