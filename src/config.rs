//! Import Configuration
//!
//! Everything the importer needs is passed in explicitly through
//! [`ImportConfig`]. Defaults match the iOS food catalog layout; a RON file
//! can override any of the naming options.
//!
//! ```text
//! (
//!     prefix: "food_",
//!     bundle_extension: "imageset",
//!     payload_filename: "image.png",
//!     density_tags: ["1x", "2x", "3x"],
//! )
//! ```

use std::path::{Path, PathBuf};

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DESCRIPTOR_FILE;

/// Source files must start with this to be imported
pub const DEFAULT_PREFIX: &str = "food_";

/// Extension (without dot) of the flat source images
pub const DEFAULT_SOURCE_EXTENSION: &str = "png";

/// Extension (without dot) of each bundle entry directory
pub const DEFAULT_BUNDLE_EXTENSION: &str = "imageset";

/// Canonical name the payload is copied to inside every entry
pub const DEFAULT_PAYLOAD_FILENAME: &str = "image.png";

/// Display densities listed in every descriptor
pub const DEFAULT_DENSITY_TAGS: &[&str] = &["1x", "2x", "3x"];

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("payload filename {0:?} must be a plain file name")]
    PayloadNotPlainName(String),

    #[error("payload filename must not be Contents.json")]
    PayloadIsDescriptor,

    #[error("density tag {0:?} is listed more than once")]
    DuplicateDensityTag(String),

    #[error("failed to read config {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Naming options that can be overridden from a RON file
///
/// Missing fields keep their current value. Values may be written bare,
/// without `Some(..)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportOptions {
    pub prefix: Option<String>,
    pub source_extension: Option<String>,
    pub bundle_extension: Option<String>,
    pub payload_filename: Option<String>,
    pub density_tags: Option<Vec<String>>,
}

impl ImportOptions {
    /// Parse options from RON text
    pub fn from_ron(text: &str) -> Result<Self, String> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(text)
            .map_err(|e| e.to_string())
    }
}

/// Full description of one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Directory scanned (non-recursively) for source images
    pub source_dir: PathBuf,
    /// Existing asset catalog directory that receives the bundle entries
    pub target_dir: PathBuf,
    /// Required file name prefix; an empty prefix accepts every file
    pub prefix: String,
    pub source_extension: String,
    pub bundle_extension: String,
    pub payload_filename: String,
    /// One descriptor variant is written per tag, in this order
    pub density_tags: Vec<String>,
}

impl ImportConfig {
    /// Create a config with the default catalog naming
    pub fn new(source_dir: impl Into<PathBuf>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            bundle_extension: DEFAULT_BUNDLE_EXTENSION.to_string(),
            payload_filename: DEFAULT_PAYLOAD_FILENAME.to_string(),
            density_tags: DEFAULT_DENSITY_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Apply every option that is set
    pub fn apply(&mut self, options: ImportOptions) {
        if let Some(prefix) = options.prefix {
            self.prefix = prefix;
        }
        if let Some(ext) = options.source_extension {
            self.source_extension = ext;
        }
        if let Some(ext) = options.bundle_extension {
            self.bundle_extension = ext;
        }
        if let Some(name) = options.payload_filename {
            self.payload_filename = name;
        }
        if let Some(tags) = options.density_tags {
            self.density_tags = tags;
        }
    }

    /// Read a RON options file and apply it
    pub fn load_overrides(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let options = ImportOptions::from_ron(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        self.apply(options);
        Ok(())
    }

    /// Check the naming options before anything touches the disk
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_extension.is_empty() {
            return Err(ConfigError::Empty { field: "source_extension" });
        }
        if self.bundle_extension.is_empty() {
            return Err(ConfigError::Empty { field: "bundle_extension" });
        }
        if self.payload_filename.is_empty() {
            return Err(ConfigError::Empty { field: "payload_filename" });
        }
        if self.payload_filename.contains(['/', '\\'])
            || self.payload_filename == "."
            || self.payload_filename == ".."
        {
            return Err(ConfigError::PayloadNotPlainName(self.payload_filename.clone()));
        }
        if self.payload_filename == DESCRIPTOR_FILE {
            return Err(ConfigError::PayloadIsDescriptor);
        }
        if self.density_tags.is_empty() {
            return Err(ConfigError::Empty { field: "density_tags" });
        }
        for (i, tag) in self.density_tags.iter().enumerate() {
            if tag.is_empty() {
                return Err(ConfigError::Empty { field: "density tag" });
            }
            if self.density_tags[..i].contains(tag) {
                return Err(ConfigError::DuplicateDensityTag(tag.clone()));
            }
        }
        Ok(())
    }

    /// Suffix (with dot) a source file name must end in
    pub fn source_suffix(&self) -> String {
        format!(".{}", self.source_extension)
    }

    /// Directory of the bundle entry for `identifier`
    pub fn entry_path(&self, identifier: &str) -> PathBuf {
        self.target_dir
            .join(format!("{}.{}", identifier, self.bundle_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::new("src", "dst");
        assert_eq!(config.prefix, "food_");
        assert_eq!(config.payload_filename, "image.png");
        assert_eq!(config.density_tags, vec!["1x", "2x", "3x"]);
        assert_eq!(config.source_suffix(), ".png");
        assert_eq!(
            config.entry_path("food_apple"),
            PathBuf::from("dst").join("food_apple.imageset")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_payload_must_be_plain_name() {
        let mut config = ImportConfig::new("src", "dst");
        config.payload_filename = "../escape.png".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::PayloadNotPlainName("../escape.png".to_string()))
        );

        config.payload_filename = "Contents.json".to_string();
        assert_eq!(config.validate(), Err(ConfigError::PayloadIsDescriptor));

        config.payload_filename.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty { field: "payload_filename" })
        );
    }

    #[test]
    fn test_density_tags_validated() {
        let mut config = ImportConfig::new("src", "dst");
        config.density_tags = vec!["1x".into(), "2x".into(), "1x".into()];
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateDensityTag("1x".to_string()))
        );

        config.density_tags.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::Empty { field: "density_tags" })
        );
    }

    #[test]
    fn test_empty_prefix_is_allowed() {
        let mut config = ImportConfig::new("src", "dst");
        config.prefix.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("import.ron");
        std::fs::write(
            &path,
            r#"(bundle_extension: "appiconset", density_tags: ["2x", "3x"])"#,
        )
        .unwrap();

        let mut config = ImportConfig::new("src", "dst");
        config.load_overrides(&path).unwrap();

        assert_eq!(config.bundle_extension, "appiconset");
        assert_eq!(config.density_tags, vec!["2x", "3x"]);
        // Untouched options keep their defaults
        assert_eq!(config.prefix, "food_");
        assert_eq!(config.payload_filename, "image.png");
    }

    #[test]
    fn test_load_overrides_rejects_unknown_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("import.ron");
        std::fs::write(&path, r#"(colour: "red")"#).unwrap();

        let mut config = ImportConfig::new("src", "dst");
        let err = config.load_overrides(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_overrides_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut config = ImportConfig::new("src", "dst");
        let err = config.load_overrides(&dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
