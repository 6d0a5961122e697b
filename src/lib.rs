#![forbid(unsafe_code)]
//! Binary localization resource toolkit for Rust.
//!
//! Reads and writes the two binary file formats used to ship localized text:
//! metadata descriptors (`.locmeta`) and resource dictionaries (`.locres`),
//! the latter across all four wire-format generations.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use locrescodec::{Codec, ResourceDictionary, ResourceVersion, traits::Parser};
//!
//! // Re-encode a resource file at the newest wire version
//! let mut dictionary = ResourceDictionary::read_from("en/Game.locres")?;
//! dictionary.version = ResourceVersion::LATEST;
//! dictionary.write_to("en/Game.locres")?;
//!
//! // Or manage a whole localization target
//! let mut codec = Codec::new();
//! codec.read_file_by_extension("Game.locmeta", None)?;
//! codec.read_file_by_extension("en/Game.locres", None)?;
//! codec.write_to_file()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Supported Formats
//!
//! - **`.locmeta`**: Metadata descriptors naming the native culture, its
//!   resource path, and (V1) the compiled cultures
//! - **`.locres`**: Resource dictionaries mapping (namespace, key) pairs to
//!   translations, in the Legacy, Compact, Optimized, and CityHash layouts
//!
//! # Features
//!
//! - ✨ Parse and write both formats, byte-compatible with the reference layouts
//! - 🦀 Idiomatic, modular, and ergonomic Rust API
//! - 🗜 Deduplicated string tables and name fingerprints handled transparently
//! - 📦 Designed for asset pipelines, CI/CD, and library integration
//! - 📖 Well-documented, robust error handling and extensible codebase

pub mod codec;
pub mod error;
pub mod formats;
pub mod hash;
pub mod stream;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Codec, LoadedMetadata, LocalizedResource, convert, infer_format_from_extension},
    error::Error,
    formats::FormatType,
    hash::{city_hash32, crc_hash32},
    types::{
        Entry, MetadataDescriptor, MetadataVersion, Namespace, ResourceDictionary,
        ResourceVersion,
    },
};
