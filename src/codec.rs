//! This module provides the `Codec` struct and associated functionality for
//! reading, writing, caching, and loading the files of a localization target.
//! A target is one metadata descriptor plus one resource dictionary per
//! culture, conventionally laid out as `Game.locmeta` next to
//! `{culture}/Game.locres` directories.
//!
//! The `Codec` struct manages the loaded files, inferring the format from the
//! file extension and the culture from the path, and can write everything
//! back or cache the in-memory model to JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    formats::FormatType,
    traits::Parser,
    types::{MetadataDescriptor, ResourceDictionary, ResourceVersion},
};

/// One loaded resource dictionary together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocalizedResource {
    /// The file this dictionary was read from (and is written back to).
    pub path: PathBuf,

    /// The culture this dictionary holds translations for, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub culture: Option<String>,

    pub dictionary: ResourceDictionary,
}

/// The loaded metadata descriptor together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoadedMetadata {
    pub path: PathBuf,

    pub descriptor: MetadataDescriptor,
}

/// Represents the files of a localization target and provides methods to
/// read, write, cache, and load them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Codec {
    /// The loaded resource dictionaries, in load order.
    pub resources: Vec<LocalizedResource>,

    /// The loaded metadata descriptor, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub metadata: Option<LoadedMetadata>,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Codec {
            resources: Vec::new(),
            metadata: None,
        }
    }

    /// Returns an iterator over all loaded resources.
    pub fn iter(&self) -> std::slice::Iter<'_, LocalizedResource> {
        self.resources.iter()
    }

    /// Returns a mutable iterator over all loaded resources.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, LocalizedResource> {
        self.resources.iter_mut()
    }

    /// Finds a resource by its culture code, if present.
    pub fn get_by_culture(&self, culture: &str) -> Option<&LocalizedResource> {
        self.resources
            .iter()
            .find(|res| res.culture.as_deref() == Some(culture))
    }

    /// Finds a mutable resource by its culture code, if present.
    pub fn get_mut_by_culture(&mut self, culture: &str) -> Option<&mut LocalizedResource> {
        self.resources
            .iter_mut()
            .find(|res| res.culture.as_deref() == Some(culture))
    }

    /// Adds an already-loaded resource to the collection.
    pub fn add_resource(&mut self, resource: LocalizedResource) {
        self.resources.push(resource);
    }

    /// Reads a file by inferring its format from the file extension.
    /// For resource files, the culture is taken from `culture` when given,
    /// otherwise inferred from the path.
    ///
    /// # Parameters
    /// - `path`: Path to the `.locres` or `.locmeta` file.
    /// - `culture`: Optional culture code to use.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the file was successfully read, or an `Error` if the
    /// extension is unknown or decoding fails.
    pub fn read_file_by_extension<P: AsRef<Path>>(
        &mut self,
        path: P,
        culture: Option<String>,
    ) -> Result<(), Error> {
        match infer_format_from_extension(&path)? {
            FormatType::Resource => {
                let dictionary = ResourceDictionary::read_from(&path)?;
                let culture = culture.or_else(|| infer_culture_from_path(&path));
                self.resources.push(LocalizedResource {
                    path: path.as_ref().to_path_buf(),
                    culture,
                    dictionary,
                });
            }
            FormatType::Metadata => {
                let descriptor = MetadataDescriptor::read_from(&path)?;
                self.metadata = Some(LoadedMetadata {
                    path: path.as_ref().to_path_buf(),
                    descriptor,
                });
            }
        }
        Ok(())
    }

    /// Writes every loaded resource and the metadata descriptor back to the
    /// paths they were read from.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all writes succeed, or the first `Error` otherwise.
    pub fn write_to_file(&self) -> Result<(), Error> {
        for resource in &self.resources {
            resource.dictionary.write_to(&resource.path)?;
        }
        if let Some(metadata) = &self.metadata {
            metadata.descriptor.write_to(&metadata.path)?;
        }
        Ok(())
    }

    /// Caches the loaded collection to a JSON file.
    ///
    /// # Parameters
    /// - `path`: Destination file path for the cache.
    ///
    /// # Returns
    ///
    /// `Ok(())` if caching succeeds, or an `Error` if file I/O or
    /// serialization fails.
    pub fn cache_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        let mut writer = std::fs::File::create(path).map_err(Error::Io)?;
        serde_json::to_writer(&mut writer, self).map_err(Error::Parse)?;
        Ok(())
    }

    /// Loads a collection from a JSON cache file.
    ///
    /// # Parameters
    /// - `path`: Path to the JSON file written by [`Codec::cache_to_file`].
    ///
    /// # Returns
    ///
    /// `Ok(Codec)` with the cached collection, or an `Error` if loading or
    /// deserialization fails.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut reader = std::fs::File::open(path).map_err(Error::Io)?;
        let codec: Codec = serde_json::from_reader(&mut reader).map_err(Error::Parse)?;
        Ok(codec)
    }
}

/// Infers the format from a path's file extension.
///
/// # Example
/// ```rust
/// use locrescodec::{formats::FormatType, infer_format_from_extension};
/// assert_eq!(infer_format_from_extension("en/Game.locres").unwrap(), FormatType::Resource);
/// assert!(infer_format_from_extension("Game.strings").is_err());
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Result<FormatType, Error> {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some("locres") => Ok(FormatType::Resource),
        Some("locmeta") => Ok(FormatType::Metadata),
        extension => Err(Error::InvalidExtension(
            extension.unwrap_or_default().to_string(),
        )),
    }
}

/// Attempts to infer the culture from the file path.
///
/// Resource files conventionally live in a directory named after their
/// culture (`{culture}/Game.locres`), so the closest ancestor directory that
/// parses as a BCP 47 identifier wins.
///
/// # Parameters
/// - `path`: The file path to analyze.
///
/// # Returns
///
/// `Some(culture_code)` if a culture could be inferred, `None` otherwise.
fn infer_culture_from_path<P: AsRef<Path>>(path: &P) -> Option<String> {
    path.as_ref()
        .components()
        .rev()
        .skip(1) // the file name itself
        .find_map(|component| {
            let component = component.as_os_str().to_str()?;
            component
                .parse::<LanguageIdentifier>()
                .ok()
                .map(|_| component.to_string())
        })
}

/// Re-encode a resource file at a different wire version.
///
/// # Arguments
///
/// * `input` - The input `.locres` path.
/// * `output` - The output `.locres` path.
/// * `version` - The wire version to write.
///
/// # Errors
///
/// Returns an `Error` if reading, decoding, or writing fails.
///
/// # Example
///
/// ```rust,no_run
/// use locrescodec::{ResourceVersion, convert};
/// convert("en/Game.locres", "en/Game_upgraded.locres", ResourceVersion::LATEST)?;
/// # Ok::<(), locrescodec::Error>(())
/// ```
pub fn convert<P: AsRef<Path>>(
    input: P,
    output: P,
    version: ResourceVersion,
) -> Result<(), Error> {
    let mut dictionary = ResourceDictionary::read_from(input)?;
    dictionary.version = version;
    dictionary.write_to(output)
}
