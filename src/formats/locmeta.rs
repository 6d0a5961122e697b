//! Support for the `.locmeta` metadata descriptor format.
//!
//! The descriptor names the culture a localization target was authored in,
//! the path of that culture's resource file, and (from V1 on) the cultures
//! with compiled resources. Unlike the resource format, the magic here is
//! mandatory: a file that does not open with it is rejected.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, Write},
    path::Path,
};

use log::debug;

use crate::{
    error::Error,
    formats::{self, FormatType},
    stream,
    traits::Parser,
    types::{MetadataDescriptor, MetadataVersion},
};

/// The 16 bytes every metadata descriptor file opens with.
pub const MAGIC: [u8; 16] = [
    0x4F, 0xEE, 0x4C, 0xA1, 0x68, 0x48, 0x55, 0x83, 0x6C, 0x4C, 0x46, 0xBD, 0x70, 0xDA, 0x50,
    0x7C,
];

impl Parser for MetadataDescriptor {
    fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, Error> {
        let mut magic = [0u8; 16];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidFormat(
                "metadata descriptor magic mismatch".to_string(),
            ));
        }

        let version_byte = stream::read_u8(reader)?;
        let version =
            MetadataVersion::from_byte(version_byte).ok_or(Error::InvalidVersion(version_byte))?;

        let native_culture = stream::read_string(reader)?;
        let native_resource_path = stream::read_string(reader)?;
        let compiled_cultures = match version {
            MetadataVersion::V0 => None,
            MetadataVersion::V1 => Some(stream::read_string_list(reader)?),
        };

        debug!(
            "decoded {:?} metadata descriptor, native culture `{}`",
            version, native_culture
        );
        Ok(MetadataDescriptor {
            version,
            native_culture,
            native_resource_path,
            compiled_cultures,
        })
    }

    fn to_writer<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_all(&MAGIC)?;
        stream::write_u8(writer, self.version.as_byte())?;
        stream::write_string(writer, &self.native_culture, false)?;
        stream::write_string(writer, &self.native_resource_path, false)?;
        // V0 has no compiled-culture section at all, not even an empty list.
        if self.version == MetadataVersion::V1 {
            let cultures = self.compiled_cultures.as_deref().unwrap_or_default();
            stream::write_string_list(writer, cultures)?;
        }
        Ok(())
    }

    /// Override the default to guard on the `.locmeta` extension first.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        formats::validate_extension(&path, FormatType::Metadata)?;
        let file = File::open(path).map_err(Error::Io)?;
        let mut reader = BufReader::new(file);
        Self::from_reader(&mut reader)
    }

    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        formats::validate_extension(&path, FormatType::Metadata)?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(Error::Io)
    }
}
