//! Traits for format-agnostic decoding and encoding in locrescodec.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Cursor, Read, Seek, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for decoding and encoding one localization file.
///
/// Both formats are binary and the resource format back-patches an offset in
/// its header, so readers and writers must be seekable.
///
/// # Example
///
/// ```rust,no_run
/// use locrescodec::traits::Parser;
/// let dictionary = locrescodec::ResourceDictionary::read_from("en/Game.locres")?;
/// dictionary.write_to("en/Game_copy.locres")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Decode from any seekable reader.
    fn from_reader<R: Read + Seek>(reader: &mut R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Decode from a file path. The handle is scoped to this call.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut reader = BufReader::new(file);
        Self::from_reader(&mut reader)
    }

    /// Encode to any seekable writer.
    fn to_writer<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Error>;

    /// Encode to a file path. The destination is truncated first, so a
    /// failure partway through leaves a truncated file behind.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(Error::Io)
    }

    /// Decode from an in-memory byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(&mut Cursor::new(bytes))
    }
}
