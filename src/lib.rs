#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod models;

pub use asset_paths::{DetectionSettings, ImageExtensions, find_asset, normalize_key};
pub use catalog::Catalog;
pub use config::ResolverConfig;
pub use error::{CatalogError, ResolveError};
pub use library::{RitualMatch, SigilLibrary};
pub use models::{CandidateDirectory, RitualEntry};
