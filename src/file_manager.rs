//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file thumbnail.
//!
//! ## Responsabilità:
//! - Validazione della directory radice scelta dall'operatore
//! - Discovery ricorsiva dei file thumbnail in tutte le sottocartelle
//! - Riconoscimento del nome file (case-insensitive)
//!
//! ## Nomi riconosciuti:
//! - `thumbnail.png`
//! - `thumbnail.jpg`
//! - `thumbnail.jpeg`
//!
//! ## Link simbolici:
//! Un symlink a un file con nome thumbnail viene sempre restituito; nelle directory
//! collegate si scende solo con `follow_links`.
//!
//! ## Ordine dei risultati:
//! L'ordine è quello prodotto dal walk del filesystem, non ordinato e non garantito
//! stabile tra piattaforme diverse.
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::find_thumbnails(Path::new("/path/to/site"), false)?;
//! for file in files {
//!     processor.process(&file);
//! }
//! ```

use crate::error::ThumbnailError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File names (lower-cased) treated as processing targets
pub const THUMBNAIL_NAMES: [&str; 3] = ["thumbnail.png", "thumbnail.jpg", "thumbnail.jpeg"];

/// Manages directory validation and thumbnail discovery
pub struct FileManager;

impl FileManager {
    /// Ensure `root` exists and is a directory
    pub fn validate_root(root: &Path) -> Result<(), ThumbnailError> {
        if !root.exists() {
            return Err(ThumbnailError::InvalidInput(format!(
                "directory does not exist: {}",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(ThumbnailError::InvalidInput(format!(
                "not a directory: {}",
                root.display()
            )));
        }
        Ok(())
    }

    /// Find every thumbnail file below `root`, at any depth
    pub fn find_thumbnails(root: &Path, follow_links: bool) -> Result<Vec<PathBuf>, ThumbnailError> {
        Self::validate_root(root)?;

        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Without follow_links a symlink keeps its own file type; accept it if it points to a file
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());

            if is_file && Self::is_thumbnail(entry.path()) {
                debug!("Found thumbnail: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Check if a path names a thumbnail file
    pub fn is_thumbnail(path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .map_or(false, |name| THUMBNAIL_NAMES.contains(&name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn test_is_thumbnail() {
        assert!(FileManager::is_thumbnail(Path::new("a/thumbnail.png")));
        assert!(FileManager::is_thumbnail(Path::new("a/THUMBNAIL.JPG")));
        assert!(FileManager::is_thumbnail(Path::new("Thumbnail.Jpeg")));
        assert!(!FileManager::is_thumbnail(Path::new("a/thumbnail.gif")));
        assert!(!FileManager::is_thumbnail(Path::new("a/thumbnail.png.bak")));
        assert!(!FileManager::is_thumbnail(Path::new("a/my_thumbnail.png")));
        assert!(!FileManager::is_thumbnail(Path::new("thumbnail")));
    }

    #[test]
    fn test_find_thumbnails_any_depth() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let expected: HashSet<PathBuf> = [
            touch(root, "thumbnail.png"),
            touch(root, "a/thumbnail.jpg"),
            touch(root, "a/b/c/d/THUMBNAIL.JPEG"),
            touch(root, "x/Thumbnail.Png"),
        ]
        .into_iter()
        .collect();

        touch(root, "a/photo.png");
        touch(root, "a/thumbnail.webp");
        touch(root, "a/b/thumbnail.png.old");
        fs::create_dir_all(root.join("d/thumbnail.png")).unwrap();

        let found: HashSet<PathBuf> = FileManager::find_thumbnails(root, false)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(found, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_thumbnails_includes_file_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let real = touch(root, "assets/real.png");
        let link = root.join("site/thumbnail.png");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let linked_dir = root.join("linked");
        std::os::unix::fs::symlink(root.join("site"), &linked_dir).unwrap();

        let found = FileManager::find_thumbnails(root, false).unwrap();
        assert_eq!(found, vec![link.clone()]);

        let found: HashSet<PathBuf> = FileManager::find_thumbnails(root, true)
            .unwrap()
            .into_iter()
            .collect();
        let expected: HashSet<PathBuf> =
            [link, linked_dir.join("thumbnail.png")].into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_find_thumbnails_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let found = FileManager::find_thumbnails(temp_dir.path(), false).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_thumbnails_invalid_root() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            FileManager::find_thumbnails(&missing, false),
            Err(ThumbnailError::InvalidInput(_))
        ));

        let file = touch(temp_dir.path(), "thumbnail.png");
        assert!(matches!(
            FileManager::find_thumbnails(&file, false),
            Err(ThumbnailError::InvalidInput(_))
        ));
    }
}
