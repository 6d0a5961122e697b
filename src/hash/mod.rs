//! The two string hashes the resource wire formats fingerprint names with.
//!
//! Both operate on the UTF-16LE code units of the input, matching how the
//! file formats store wide text. Neither is cryptographic; they exist so a
//! reader can look up namespaces and keys by fingerprint without decoding
//! every name.

mod city;

use lazy_static::lazy_static;

lazy_static! {
    /// Table for the reflected CRC-32 polynomial `0xEDB88320`.
    static ref CRC_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            let mut crc = i as u32;
            for _ in 0..8 {
                crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
            }
            *slot = crc;
        }
        table
    };
}

/// Legacy-compatible checksum of `s`, used by the `Optimized` wire format.
///
/// A CRC-32 over the UTF-16LE code units: every unit feeds four bytes into
/// the register (low byte, high byte, then two zero bytes), with the usual
/// pre- and post-complement.
pub fn crc_hash32(s: &str) -> u32 {
    let mut crc = !0u32;
    for unit in s.encode_utf16() {
        for byte in [unit as u8, (unit >> 8) as u8, 0, 0] {
            crc = (crc >> 8) ^ CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize];
        }
    }
    !crc
}

/// Fingerprint of `s` used by the `CityHash` wire format.
///
/// CityHash64 of the UTF-16LE bytes, folded to 32 bits as `lo + hi * 23`.
pub fn city_hash32(s: &str) -> u32 {
    let mut bytes = Vec::with_capacity(s.len() * 2);
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let hash = city::city_hash_64(&bytes);
    (hash as u32).wrapping_add(((hash >> 32) as u32).wrapping_mul(23))
}
