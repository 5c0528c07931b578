//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom della libreria.
//!
//! ## Responsabilità:
//! - Definisce `ThumbnailError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi, riportati tali e quali nel log per file
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `InvalidInput`: La directory radice non esiste o non è una directory
//! - `Decode`: Il file non può essere aperto o decodificato come immagine
//! - `TooSmall`: L'immagine dimezzata avrebbe larghezza o altezza zero
//! - `UnsupportedFormat`: Estensione diversa da png/jpg/jpeg
//! - `Encode`: L'immagine trasformata non può essere codificata
//! - `Io`: Errori di I/O durante la scrittura del file
//! - `Worker`: Il task in background è terminato in modo anomalo
//!
//! ## Propagazione:
//! Solo `InvalidInput` e `Worker` arrivano al chiamante del batch. Tutti gli altri
//! vengono contenuti dentro `ProcessResult` e contati come errori del singolo file.
//!
//! ## Esempio:
//! ```rust,ignore
//! if !root.is_dir() {
//!     return Err(ThumbnailError::InvalidInput(format!("not a directory: {}", root.display())));
//! }
//! ```

/// Custom error types for thumbnail processing
#[derive(thiserror::Error, Debug)]
pub enum ThumbnailError {
    #[error("Invalid input directory: {0}")]
    InvalidInput(String),

    #[error("Cannot decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Image too small to halve: {width}x{height} would become {new_width}x{new_height}")]
    TooSmall {
        width: u32,
        height: u32,
        new_width: u32,
        new_height: u32,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background worker failed: {0}")]
    Worker(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ThumbnailError = io.into();
        assert!(matches!(err, ThumbnailError::Io(_)));
        assert_eq!(err.to_string(), "IO error: denied");
    }

    #[test]
    fn test_too_small_message() {
        let err = ThumbnailError::TooSmall {
            width: 1,
            height: 1,
            new_width: 0,
            new_height: 0,
        };
        assert_eq!(
            err.to_string(),
            "Image too small to halve: 1x1 would become 0x0"
        );
    }
}
