//! imageset-import: asset catalog importer for the food photography pipeline
//!
//! Copies flat `food_*.png` images into an Xcode asset catalog, one
//! `<name>.imageset` bundle entry per image with a `Contents.json`
//! descriptor covering every display density.

pub mod catalog;
pub mod config;

pub use catalog::{import, ImportError, ImportSummary};
pub use config::{ConfigError, ImportConfig, ImportOptions};
