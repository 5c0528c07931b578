//! # Overwrite Consent Module
//!
//! Il batch sovrascrive i file originali senza backup: non può partire senza una
//! conferma esplicita dell'operatore.
//!
//! ## Responsabilità:
//! - `OverwriteConsent`: token richiesto da `BatchRunner::run`
//! - `confirm()`: prompt interattivo `[y/N]` con `dialoguer`, default "no"

use dialoguer::Confirm;
use std::path::Path;

/// Proof that the operator accepted the destructive, backup-less overwrite
#[derive(Debug, Clone, Copy)]
pub struct OverwriteConsent {
    _private: (),
}

impl OverwriteConsent {
    /// Grant consent without prompting (`--yes`, `assume_yes` in the config file)
    pub fn assumed() -> Self {
        Self { _private: () }
    }

    /// Turn the operator's answer into a consent token
    pub fn from_answer(accepted: bool) -> Option<Self> {
        accepted.then(Self::assumed)
    }
}

/// Warning shown before asking for confirmation
pub fn warning(root: &Path) -> String {
    format!(
        "WARNING: every thumbnail.png / thumbnail.jpg / thumbnail.jpeg under {} will be \
         halved and overwritten in place, WITHOUT BACKUP.",
        root.display()
    )
}

/// Ask the operator on the terminal. Declines unless they explicitly answer yes.
pub fn confirm(root: &Path) -> dialoguer::Result<Option<OverwriteConsent>> {
    eprintln!("{}", warning(root));

    let accepted = Confirm::new()
        .with_prompt("Continue?")
        .default(false)
        .interact()?;

    Ok(OverwriteConsent::from_answer(accepted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_answer() {
        assert!(OverwriteConsent::from_answer(true).is_some());
        assert!(OverwriteConsent::from_answer(false).is_none());
    }

    #[test]
    fn test_warning_names_root_and_risk() {
        let text = warning(Path::new("/site"));
        assert!(text.contains("/site"));
        assert!(text.contains("WITHOUT BACKUP"));
        assert!(text.contains("thumbnail.jpeg"));
    }
}
