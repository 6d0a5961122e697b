//! Core, format-agnostic types for locrescodec.
//! Decoders produce these; encoders serialize these.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// Wire-format generations of the resource dictionary file, oldest first.
///
/// Every generation is a strict superset of the one before it: `Compact`
/// introduces the header and the deduplicated string table, `Optimized` adds
/// name fingerprints, table reference counts, and a redundant total entry
/// count, and `CityHash` swaps the fingerprint function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceVersion {
    /// Headerless files with translations stored inline.
    Legacy,
    /// Header plus a shared string table referenced by index.
    Compact,
    /// CRC fingerprints on namespace and key records, ref-counted table.
    Optimized,
    /// Like `Optimized` but fingerprinted with CityHash.
    CityHash,
}

impl ResourceVersion {
    /// The newest wire format; what new files should be written as.
    pub const LATEST: ResourceVersion = ResourceVersion::CityHash;

    /// Parses a wire version byte. Values above 3 are not a known format.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(ResourceVersion::Legacy),
            1 => Some(ResourceVersion::Compact),
            2 => Some(ResourceVersion::Optimized),
            3 => Some(ResourceVersion::CityHash),
            _ => None,
        }
    }

    /// The byte stored in the file header for this version.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// True when files open with the magic, version byte, and table offset.
    pub(crate) fn has_header(self) -> bool {
        self >= ResourceVersion::Compact
    }

    /// True when translations are stored once in a table and referenced by index.
    pub(crate) fn has_string_table(self) -> bool {
        self >= ResourceVersion::Compact
    }

    /// True when namespace and key records carry a fingerprint, the string
    /// table carries reference counts, and the keys section opens with a
    /// running total of entries.
    pub(crate) fn has_entry_hashes(self) -> bool {
        self >= ResourceVersion::Optimized
    }

    /// Which fingerprint function this version stamps on names, if any.
    pub(crate) fn hash_kind(self) -> Option<HashKind> {
        match self {
            ResourceVersion::Legacy | ResourceVersion::Compact => None,
            ResourceVersion::Optimized => Some(HashKind::Crc),
            ResourceVersion::CityHash => Some(HashKind::City),
        }
    }
}

impl Display for ResourceVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceVersion::Legacy => write!(f, "legacy"),
            ResourceVersion::Compact => write!(f, "compact"),
            ResourceVersion::Optimized => write!(f, "optimized"),
            ResourceVersion::CityHash => write!(f, "cityhash"),
        }
    }
}

/// The fingerprint hash a wire format stamps on namespace and key records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HashKind {
    Crc,
    City,
}

/// Versions of the metadata descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataVersion {
    /// Native culture and resource path only.
    V0,
    /// V0 plus the list of cultures with compiled resources.
    V1,
}

impl MetadataVersion {
    /// Parses a descriptor version byte. Only `0` and `1` are defined.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(MetadataVersion::V0),
            1 => Some(MetadataVersion::V1),
            _ => None,
        }
    }

    /// The byte stored in the descriptor header for this version.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// The metadata descriptor for a localization target (a `.locmeta` file).
///
/// Names the culture the source text was authored in, where that culture's
/// resource file lives, and (from V1 on) which cultures have compiled
/// resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetadataDescriptor {
    pub version: MetadataVersion,

    /// The culture code the source text was authored in (e.g. "en").
    pub native_culture: String,

    /// Relative path of the native culture's resource file.
    pub native_resource_path: String,

    /// Cultures with compiled resources, in file order.
    /// `Some` only under V1; V0 files have no compiled-culture section at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub compiled_cultures: Option<Vec<String>>,
}

impl MetadataDescriptor {
    pub fn parse_native_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.native_culture.parse().ok()
    }

    /// Check whether a culture appears in the compiled-culture list.
    ///
    /// Comparison is by primary language subtag, so "en" matches "en-US".
    /// Always false for V0 descriptors, which carry no list.
    pub fn has_compiled_culture(&self, culture: &str) -> bool {
        let Ok(target) = culture.parse::<LanguageIdentifier>() else {
            return false;
        };
        self.compiled_cultures
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|compiled| {
                compiled
                    .parse::<LanguageIdentifier>()
                    .is_ok_and(|id| id.language == target.language)
            })
    }
}

/// A complete resource dictionary (corresponds to one `.locres` file).
///
/// Namespace iteration order is significant: it determines the byte layout on
/// write, and equals insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceDictionary {
    /// The wire format this dictionary was read from, or will be written as.
    pub version: ResourceVersion,

    /// Ordered list of all namespaces in this dictionary.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

impl ResourceDictionary {
    pub fn new(version: ResourceVersion) -> Self {
        ResourceDictionary {
            version,
            namespaces: Vec::new(),
        }
    }

    pub fn find_namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    pub fn find_namespace_mut(&mut self, name: &str) -> Option<&mut Namespace> {
        self.namespaces.iter_mut().find(|ns| ns.name == name)
    }

    /// Inserts a namespace, replacing any existing namespace with the same
    /// name in place (the original position is kept).
    pub fn insert_namespace(&mut self, namespace: Namespace) {
        match self.find_namespace_mut(&namespace.name) {
            Some(existing) => *existing = namespace,
            None => self.namespaces.push(namespace),
        }
    }

    /// Inserts an entry under `namespace`, creating the namespace on demand.
    /// An existing entry with the same key is replaced in place.
    pub fn insert_entry(&mut self, namespace: &str, entry: Entry) {
        match self.find_namespace_mut(namespace) {
            Some(existing) => existing.insert_entry(entry),
            None => {
                let mut created = Namespace::new(namespace);
                created.insert_entry(entry);
                self.namespaces.push(created);
            }
        }
    }

    pub fn find_translation(&self, namespace: &str, key: &str) -> Option<&str> {
        self.find_namespace(namespace)?
            .find_entry(key)
            .map(|entry| entry.translation.as_str())
    }

    /// Total number of entries across all namespaces.
    pub fn entry_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// A named group of localization keys within a resource dictionary.
///
/// Entry iteration order is significant for the same reason namespace order
/// is: it is the write order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Namespace {
    pub name: String,

    /// Ordered list of all entries in this namespace.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Namespace {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn find_entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn find_entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    /// Inserts an entry, replacing any existing entry with the same key in
    /// place (the original position is kept).
    pub fn insert_entry(&mut self, entry: Entry) {
        match self.find_entry_mut(&entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}

/// A single key→translation pair plus its carried-through source checksum.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    pub key: String,

    pub translation: String,

    /// Checksum of the source text this translation was made from. Opaque to
    /// the codec: carried through unchanged, never recomputed.
    pub source_hash: u32,
}

impl Entry {
    pub fn new(key: impl Into<String>, translation: impl Into<String>, source_hash: u32) -> Self {
        Entry {
            key: key.into(),
            translation: translation.into(),
            source_hash,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ key: {}, translation: {}, source_hash: {:#010x} }}",
            self.key, self.translation, self.source_hash
        )
    }
}
