//! Low-level byte stream primitives shared by both file formats.
//!
//! All integers are little-endian. Strings carry a signed 32-bit length
//! prefix: positive means that many UTF-8 bytes (including a trailing NUL),
//! negative means that many UTF-16LE code units (including a trailing NUL
//! unit), zero means the empty string with no payload. Trailing NULs are
//! stripped on decode.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use encoding_rs::UTF_16LE;

use crate::error::Error;

pub fn read_u8(reader: &mut impl Read) -> Result<u8, Error> {
    Ok(reader.read_u8()?)
}

pub fn read_u32(reader: &mut impl Read) -> Result<u32, Error> {
    Ok(reader.read_u32::<LittleEndian>()?)
}

pub fn read_i32(reader: &mut impl Read) -> Result<i32, Error> {
    Ok(reader.read_i32::<LittleEndian>()?)
}

pub fn read_u64(reader: &mut impl Read) -> Result<u64, Error> {
    Ok(reader.read_u64::<LittleEndian>()?)
}

pub fn write_u8(writer: &mut impl Write, value: u8) -> Result<(), Error> {
    Ok(writer.write_u8(value)?)
}

pub fn write_u32(writer: &mut impl Write, value: u32) -> Result<(), Error> {
    Ok(writer.write_u32::<LittleEndian>(value)?)
}

pub fn write_i32(writer: &mut impl Write, value: i32) -> Result<(), Error> {
    Ok(writer.write_i32::<LittleEndian>(value)?)
}

pub fn write_u64(writer: &mut impl Write, value: u64) -> Result<(), Error> {
    Ok(writer.write_u64::<LittleEndian>(value)?)
}

/// Reads a length-prefixed string in either encoding.
///
/// Fails on a truncated payload, on invalid UTF-8 in the narrow form, and on
/// malformed UTF-16 in the wide form (an odd payload, a lone low surrogate,
/// a high surrogate with no following low surrogate, or end of data
/// mid-pair).
pub fn read_string(reader: &mut impl Read) -> Result<String, Error> {
    let length = read_i32(reader)?;
    if length == 0 {
        return Ok(String::new());
    }
    if length > 0 {
        let mut buf = vec![0u8; length as usize];
        reader.read_exact(&mut buf)?;
        while buf.last() == Some(&0) {
            buf.pop();
        }
        String::from_utf8(buf).map_err(|e| Error::Unicode(e.to_string()))
    } else {
        let units = length.unsigned_abs() as usize;
        let mut buf = vec![0u8; units * 2];
        reader.read_exact(&mut buf)?;
        let decoded = UTF_16LE
            .decode_without_bom_handling_and_without_replacement(&buf)
            .ok_or_else(|| Error::Unicode("malformed UTF-16LE payload".to_string()))?;
        let mut text = decoded.into_owned();
        while text.ends_with('\0') {
            text.pop();
        }
        Ok(text)
    }
}

/// Writes a length-prefixed string.
///
/// The empty string is the bare `0` prefix. 7-bit ASCII content goes out in
/// the narrow UTF-8 form unless `force_wide` is set; everything else goes out
/// in the wide UTF-16LE form. Both forms append the trailing NUL the length
/// prefix accounts for.
pub fn write_string(writer: &mut impl Write, value: &str, force_wide: bool) -> Result<(), Error> {
    if value.is_empty() {
        return write_i32(writer, 0);
    }
    if !force_wide && value.is_ascii() {
        write_i32(writer, value.len() as i32 + 1)?;
        writer.write_all(value.as_bytes())?;
        write_u8(writer, 0)
    } else {
        let units: Vec<u16> = value.encode_utf16().collect();
        write_i32(writer, -(units.len() as i32 + 1))?;
        for unit in units {
            writer.write_u16::<LittleEndian>(unit)?;
        }
        Ok(writer.write_u16::<LittleEndian>(0)?)
    }
}

/// Reads a `u32`-counted list of strings.
pub fn read_string_list(reader: &mut impl Read) -> Result<Vec<String>, Error> {
    let count = read_u32(reader)?;
    let mut values = Vec::new();
    for _ in 0..count {
        values.push(read_string(reader)?);
    }
    Ok(values)
}

/// Writes a `u32`-counted list of strings, each in auto encoding.
pub fn write_string_list(writer: &mut impl Write, values: &[String]) -> Result<(), Error> {
    write_u32(writer, values.len() as u32)?;
    for value in values {
        write_string(writer, value, false)?;
    }
    Ok(())
}
