//! # Batch Module
//!
//! Modulo che separa le responsabilità del batch in sottomoduli:
//! - `runner`: Loop sequenziale scan + process con cancellazione cooperativa
//! - `worker`: Esecuzione del runner su un thread bloccante, eventi via canale
//! - `progress_tracker`: Consumatore degli eventi lato presentazione

pub mod progress_tracker;
pub mod runner;
pub mod worker;

pub use progress_tracker::ProgressTracker;
pub use runner::{BatchEvent, BatchRunner, CancelFlag};
pub use worker::{spawn_batch, BatchHandle};
