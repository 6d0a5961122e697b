//! Support for the `.locres` resource dictionary format.
//!
//! One decoder covers all four wire generations. Modern files open with a
//! 16-byte magic, a version byte, and the offset of a deduplicated string
//! table near the end of the file; Legacy files have no header at all, so a
//! missing magic is the Legacy-detection signal rather than an error.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use log::{debug, trace};

use crate::{
    error::Error,
    formats::{self, FormatType},
    hash, stream,
    traits::Parser,
    types::{Entry, HashKind, Namespace, ResourceDictionary, ResourceVersion},
};

/// The 16 bytes a modern resource file opens with. Files that start with
/// anything else are Legacy payloads, not errors.
pub const MAGIC: [u8; 16] = [
    0x0E, 0x14, 0x74, 0x75, 0x67, 0x4A, 0x03, 0xFC, 0x4A, 0x15, 0x90, 0x9D, 0xC3, 0x37, 0x7F,
    0x1B,
];

/// Offset of the `u64` string-table offset inside the modern header.
const TABLE_OFFSET_POS: u64 = 17;

/// Offset of the first keys-section byte in a modern file.
const KEYS_SECTION_POS: u64 = 25;

impl Parser for ResourceDictionary {
    fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, Error> {
        let version = match read_header(reader)? {
            Some(version) => version,
            None => {
                debug!("no resource magic found, reading as legacy format");
                reader.seek(SeekFrom::Start(0))?;
                ResourceVersion::Legacy
            }
        };

        let string_table = if version.has_string_table() {
            let table_offset = stream::read_u64(reader)?;
            reader.seek(SeekFrom::Start(table_offset))?;
            let table = read_string_table(reader, version)?;
            reader.seek(SeekFrom::Start(KEYS_SECTION_POS))?;
            table
        } else {
            Vec::new()
        };

        if version.has_entry_hashes() {
            // Redundant running total of entries across all namespaces.
            stream::read_u32(reader)?;
        }

        let mut dictionary = ResourceDictionary::new(version);
        let namespace_count = stream::read_u32(reader)?;
        for _ in 0..namespace_count {
            if version.has_entry_hashes() {
                // Namespace name fingerprint; recomputed on write.
                stream::read_u32(reader)?;
            }
            let name = stream::read_string(reader)?;
            let mut namespace = Namespace::new(name);

            let key_count = stream::read_u32(reader)?;
            for _ in 0..key_count {
                if version.has_entry_hashes() {
                    // Key fingerprint; recomputed on write.
                    stream::read_u32(reader)?;
                }
                let key = stream::read_string(reader)?;
                let source_hash = stream::read_u32(reader)?;
                let translation = if version.has_string_table() {
                    let index = stream::read_u32(reader)?;
                    string_table
                        .get(index as usize)
                        .cloned()
                        .ok_or_else(|| {
                            Error::DataMismatch(format!(
                                "string table index {index} out of range ({} strings)",
                                string_table.len()
                            ))
                        })?
                } else {
                    stream::read_string(reader)?
                };
                namespace.insert_entry(Entry::new(key, translation, source_hash));
            }
            dictionary.insert_namespace(namespace);
        }

        debug!(
            "decoded {} dictionary: {} namespaces, {} entries",
            version,
            dictionary.namespaces.len(),
            dictionary.entry_count()
        );
        Ok(dictionary)
    }

    fn to_writer<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Error> {
        let version = self.version;
        if version.has_header() {
            writer.write_all(&MAGIC)?;
            stream::write_u8(writer, version.as_byte())?;
            // Placeholder, patched once the table offset is known.
            stream::write_u64(writer, 0)?;
        }

        // The deduplication table is built for every version, Legacy
        // included; the Legacy body simply never references it.
        let table = StringTable::build(self);

        if !version.has_string_table() {
            return write_legacy_body(self, writer);
        }

        if version.has_entry_hashes() {
            stream::write_u32(writer, self.entry_count() as u32)?;
        }
        stream::write_u32(writer, self.namespaces.len() as u32)?;
        for namespace in &self.namespaces {
            write_name_hash(writer, version, &namespace.name)?;
            stream::write_string(writer, &namespace.name, false)?;
            stream::write_u32(writer, namespace.entries.len() as u32)?;
            for entry in &namespace.entries {
                write_name_hash(writer, version, &entry.key)?;
                stream::write_string(writer, &entry.key, false)?;
                stream::write_u32(writer, entry.source_hash)?;
                stream::write_u32(writer, table.index_of(&entry.translation))?;
            }
        }

        let table_offset = writer.stream_position()?;
        writer.seek(SeekFrom::Start(TABLE_OFFSET_POS))?;
        stream::write_u64(writer, table_offset)?;
        writer.seek(SeekFrom::Start(table_offset))?;

        trace!("writing string table: {} unique strings", table.len());
        stream::write_u32(writer, table.len() as u32)?;
        for (text, references) in table.iter() {
            stream::write_string(writer, text, false)?;
            if version.has_entry_hashes() {
                stream::write_u32(writer, references)?;
            }
        }
        Ok(())
    }

    /// Override the default to guard on the `.locres` extension first.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        formats::validate_extension(&path, FormatType::Resource)?;
        let file = File::open(path).map_err(Error::Io)?;
        let mut reader = BufReader::new(file);
        Self::from_reader(&mut reader)
    }

    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        formats::validate_extension(&path, FormatType::Resource)?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(Error::Io)
    }
}

/// Reads the leading magic and version byte of a modern file.
///
/// Returns `None` when the stream is a Legacy payload: shorter than the
/// magic, or opening with other bytes. The caller rewinds in that case.
fn read_header<R: Read + Seek>(reader: &mut R) -> Result<Option<ResourceVersion>, Error> {
    let mut magic = [0u8; 16];
    match reader.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    }
    if magic != MAGIC {
        return Ok(None);
    }
    let version_byte = stream::read_u8(reader)?;
    let version =
        ResourceVersion::from_byte(version_byte).ok_or(Error::InvalidVersion(version_byte))?;
    Ok(Some(version))
}

/// Reads the index→string lookup table at the end of a modern file.
fn read_string_table(
    reader: &mut impl Read,
    version: ResourceVersion,
) -> Result<Vec<String>, Error> {
    let count = stream::read_u32(reader)?;
    trace!("reading string table: {count} strings");
    let mut table = Vec::new();
    for _ in 0..count {
        table.push(stream::read_string(reader)?);
        if version.has_entry_hashes() {
            // Reference count; informational only, rebuilt on write.
            stream::read_u32(reader)?;
        }
    }
    Ok(table)
}

/// Writes the headerless Legacy body: namespaces and entries inline, with
/// translations stored literally instead of through the table.
fn write_legacy_body<W: Write>(
    dictionary: &ResourceDictionary,
    writer: &mut W,
) -> Result<(), Error> {
    stream::write_u32(writer, dictionary.namespaces.len() as u32)?;
    for namespace in &dictionary.namespaces {
        // The reference layout always stores Legacy namespace names wide,
        // though keys and translations auto-select.
        stream::write_string(writer, &namespace.name, true)?;
        stream::write_u32(writer, namespace.entries.len() as u32)?;
        for entry in &namespace.entries {
            stream::write_string(writer, &entry.key, false)?;
            stream::write_u32(writer, entry.source_hash)?;
            stream::write_string(writer, &entry.translation, false)?;
        }
    }
    Ok(())
}

/// Writes the name fingerprint the version calls for, if any.
fn write_name_hash<W: Write>(
    writer: &mut W,
    version: ResourceVersion,
    name: &str,
) -> Result<(), Error> {
    match version.hash_kind() {
        Some(HashKind::Crc) => stream::write_u32(writer, hash::crc_hash32(name)),
        Some(HashKind::City) => stream::write_u32(writer, hash::city_hash32(name)),
        None => Ok(()),
    }
}

/// Write-time deduplication table: every distinct translation gets a
/// sequential index, in first-seen order, and an occurrence count.
struct StringTable<'a> {
    slots: Vec<(&'a str, u32)>,
    indices: HashMap<&'a str, u32>,
}

impl<'a> StringTable<'a> {
    fn build(dictionary: &'a ResourceDictionary) -> Self {
        let mut slots: Vec<(&'a str, u32)> = Vec::new();
        let mut indices = HashMap::new();
        for namespace in &dictionary.namespaces {
            for entry in &namespace.entries {
                let text = entry.translation.as_str();
                match indices.get(text) {
                    Some(&index) => slots[index as usize].1 += 1,
                    None => {
                        indices.insert(text, slots.len() as u32);
                        slots.push((text, 1));
                    }
                }
            }
        }
        StringTable { slots, indices }
    }

    /// Index assigned to `text`. Every translation in the dictionary was
    /// registered by `build`, so the lookup cannot miss.
    fn index_of(&self, text: &str) -> u32 {
        self.indices[text]
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&'a str, u32)> + '_ {
        self.slots.iter().copied()
    }
}
