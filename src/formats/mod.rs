//! The binary localization file formats supported by locrescodec.
//!
//! This module hosts one sub-module per format and the [`FormatType`] enum
//! for generic format handling across the crate.

pub mod locmeta;
pub mod locres;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

use crate::Error;

/// Represents the two supported file formats in a type-safe way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Resource dictionary files (`.locres`).
    Resource,
    /// Metadata descriptor files (`.locmeta`).
    Metadata,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// The format names double as the file extensions:
/// - `Resource` → `"locres"`
/// - `Metadata` → `"locmeta"`
///
/// # Example
/// ```rust
/// use locrescodec::formats::FormatType;
/// assert_eq!(FormatType::Resource.to_string(), "locres");
/// assert_eq!(FormatType::Metadata.to_string(), "locmeta");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Resource => write!(f, "locres"),
            FormatType::Metadata => write!(f, "locmeta"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts `"locres"` and `"locmeta"`, case-insensitively. Returns
/// [`crate::error::Error::InvalidExtension`] for anything else.
///
/// # Example
/// ```rust
/// use locrescodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("locres").unwrap(), FormatType::Resource);
/// assert_eq!(FormatType::from_str("locmeta").unwrap(), FormatType::Metadata);
/// assert!(FormatType::from_str("strings").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "locres" => Ok(FormatType::Resource),
            "locmeta" => Ok(FormatType::Metadata),
            other => Err(Error::InvalidExtension(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Resource => "locres",
            FormatType::Metadata => "locmeta",
        }
    }
}

/// Checks that a path carries the extension of the expected format. The check
/// is purely on the path, independent of the file's content or existence.
pub(crate) fn validate_extension<P: AsRef<Path>>(path: P, expected: FormatType) -> Result<(), Error> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    if extension == expected.extension() {
        Ok(())
    } else {
        Err(Error::InvalidExtension(extension.to_string()))
    }
}
