//! Bundle entry descriptor (`Contents.json`)

use serde::{Deserialize, Serialize};

/// File name of the descriptor inside every bundle entry
pub const DESCRIPTOR_FILE: &str = "Contents.json";

/// Device family every variant targets
pub const UNIVERSAL_IDIOM: &str = "universal";

const FORMAT_VERSION: u32 = 1;
const FORMAT_AUTHOR: &str = "xcode";

/// One display-density variant of an image
///
/// Field order matters: it is the key order written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub idiom: String,
    pub scale: String,
    pub filename: String,
}

/// Format version/author tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorInfo {
    pub version: u32,
    pub author: String,
}

impl Default for DescriptorInfo {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            author: FORMAT_AUTHOR.to_string(),
        }
    }
}

/// Descriptor listing the variants of one bundle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub images: Vec<Variant>,
    pub info: DescriptorInfo,
}

impl Descriptor {
    /// Build a descriptor with one universal variant per density tag,
    /// every variant pointing at `payload_filename`
    pub fn for_payload<S: AsRef<str>>(payload_filename: &str, density_tags: &[S]) -> Self {
        let images = density_tags
            .iter()
            .map(|scale| Variant {
                idiom: UNIVERSAL_IDIOM.to_string(),
                scale: scale.as_ref().to_string(),
                filename: payload_filename.to_string(),
            })
            .collect();

        Self {
            images,
            info: DescriptorInfo::default(),
        }
    }

    /// Render as 2-space indented JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse descriptor JSON
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Density tags in descriptor order
    pub fn scales(&self) -> Vec<&str> {
        self.images.iter().map(|v| v.scale.as_str()).collect()
    }
}
