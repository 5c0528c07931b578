//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri del front end
//! - Supporta caricamento configurazione da file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `assume_yes`: Salta la conferma interattiva (default: false)
//! - `json_output`: Output JSON line-delimited invece della progress bar (default: false)
//! - `follow_links`: Segue i symlink durante la scansione (default: false)
//! - `verbose`: Logging a livello DEBUG (default: false)
//!
//! Il rapporto di resize (1/2), il filtro (Lanczos3), il miglioramento post-resize e la
//! qualità JPEG (85) sono fissi e non configurabili.
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config::from_file(&Config::default_path()).await?;
//! let config = Config { json_output: true, ..config };
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the thumbnail optimizer front end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skip the destructive-overwrite confirmation prompt
    pub assume_yes: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
    /// Follow symbolic links while walking the directory tree
    pub follow_links: bool,
    /// Verbose logging
    pub verbose: bool,
}

impl Config {
    /// Default location of the config file: `<config dir>/thumb-optimizer/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thumb-optimizer").join("config.json"))
    }

    /// Load configuration from file, falling back to defaults when the file is missing
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }
}
