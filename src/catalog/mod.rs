//! Asset Catalog Import
//!
//! Turns a flat directory of source images into asset catalog bundle entries.
//! Each accepted image becomes its own directory holding a copy of the image
//! under a canonical name plus a descriptor listing one variant per display
//! density, all aliasing the same payload.
//!
//! ## File Structure
//!
//! ```text
//! source_dir/
//! ├── food_apple.png
//! ├── food_pear.png
//! └── logo.png                  # skipped: no food_ prefix
//!
//! target_dir/                   # must already exist
//! ├── food_apple.imageset/
//! │   ├── image.png             # byte copy of food_apple.png
//! │   └── Contents.json         # 1x / 2x / 3x → image.png
//! └── food_pear.imageset/
//!     ├── image.png
//!     └── Contents.json
//! ```
//!
//! Entries are rebuilt from scratch on every run, so a stale file inside an
//! entry never survives a re-import.

mod descriptor;
mod importer;
mod source;

pub use descriptor::{Descriptor, DescriptorInfo, Variant, DESCRIPTOR_FILE};
pub use importer::{import, ImportError, ImportSummary};
pub use source::{scan_source, SkipReason, SkippedEntry, SourceImage, SourceScan};
