//! Source directory discovery
//!
//! Lists the flat source directory (non-recursively) and sorts each image
//! file into accepted or skipped. Files without the source extension are
//! not images and are ignored entirely.

use std::fmt;
use std::path::PathBuf;

use crate::config::ImportConfig;

use super::importer::ImportError;

/// An image accepted for import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Full path of the source file
    pub path: PathBuf,
    pub file_name: String,
    /// File name with the extension removed, e.g. `food_apple`
    pub identifier: String,
}

/// Why an image file was not imported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name does not start with the configured prefix
    MissingPrefix,
    /// Name is not valid UTF-8 and cannot become an identifier
    NonUtf8Name,
}

/// An image file that was found but not imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub file_name: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            SkipReason::MissingPrefix => write!(f, "{}: missing prefix", self.file_name),
            SkipReason::NonUtf8Name => write!(f, "{}: name is not valid UTF-8", self.file_name),
        }
    }
}

/// Result of scanning the source directory, sorted by file name
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceScan {
    pub accepted: Vec<SourceImage>,
    pub skipped: Vec<SkippedEntry>,
}

/// Scan `config.source_dir` for importable images
pub fn scan_source(config: &ImportConfig) -> Result<SourceScan, ImportError> {
    let dir = &config.source_dir;
    let suffix = config.source_suffix();

    let read_dir = std::fs::read_dir(dir).map_err(|e| ImportError::io("list", dir, e))?;

    let mut files: Vec<_> = read_dir
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name())
        .collect();
    files.sort();

    let mut scan = SourceScan::default();

    for os_name in files {
        let Some(file_name) = os_name.to_str() else {
            let lossy = os_name.to_string_lossy();
            if lossy.ends_with(&suffix) {
                log::info!("Skipping {}: name is not valid UTF-8", lossy);
                scan.skipped.push(SkippedEntry {
                    file_name: lossy.into_owned(),
                    reason: SkipReason::NonUtf8Name,
                });
            }
            continue;
        };

        let Some(identifier) = file_name.strip_suffix(suffix.as_str()) else {
            continue;
        };

        if !file_name.starts_with(&config.prefix) {
            log::info!(
                "Skipping {}: Does not start with '{}'",
                file_name,
                config.prefix
            );
            scan.skipped.push(SkippedEntry {
                file_name: file_name.to_string(),
                reason: SkipReason::MissingPrefix,
            });
            continue;
        }

        scan.accepted.push(SourceImage {
            path: dir.join(file_name),
            file_name: file_name.to_string(),
            identifier: identifier.to_string(),
        });
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_source(files: &[&str]) -> (TempDir, ImportConfig) {
        let dir = TempDir::new().unwrap();
        for name in files {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let config = ImportConfig::new(dir.path(), dir.path().join("unused"));
        (dir, config)
    }

    #[test]
    fn test_accepts_prefixed_images_in_name_order() {
        let (_dir, config) = setup_source(&["food_pear.png", "food_apple.png"]);
        let scan = scan_source(&config).unwrap();

        let ids: Vec<_> = scan.accepted.iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["food_apple", "food_pear"]);
        assert_eq!(scan.accepted[0].file_name, "food_apple.png");
        assert!(scan.skipped.is_empty());
    }

    #[test]
    fn test_skips_unprefixed_images() {
        let (_dir, config) = setup_source(&["logo.png", "food_apple.png"]);
        let scan = scan_source(&config).unwrap();

        assert_eq!(scan.accepted.len(), 1);
        assert_eq!(
            scan.skipped,
            vec![SkippedEntry {
                file_name: "logo.png".to_string(),
                reason: SkipReason::MissingPrefix,
            }]
        );
    }

    #[test]
    fn test_ignores_other_extensions_and_directories() {
        let (dir, config) = setup_source(&["notes.txt", "food_apple.PNG", "food_menu.png.bak"]);
        std::fs::create_dir(dir.path().join("food_dir.png")).unwrap();

        let scan = scan_source(&config).unwrap();
        assert!(scan.accepted.is_empty());
        assert!(scan.skipped.is_empty());
    }

    #[test]
    fn test_does_not_recurse() {
        let (dir, config) = setup_source(&[]);
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("food_hidden.png"), b"x").unwrap();

        let scan = scan_source(&config).unwrap();
        assert!(scan.accepted.is_empty());
    }

    #[test]
    fn test_empty_prefix_accepts_everything() {
        let (_dir, mut config) = setup_source(&["logo.png"]);
        config.prefix.clear();

        let scan = scan_source(&config).unwrap();
        assert_eq!(scan.accepted[0].identifier, "logo");
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = TempDir::new().unwrap();
        let config = ImportConfig::new(dir.path().join("missing"), dir.path());

        let err = scan_source(&config).unwrap_err();
        assert!(matches!(err, ImportError::Filesystem { op: "list", .. }));
    }
}
