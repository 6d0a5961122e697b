//! All error types for the locrescodec crate.
//!
//! These are returned from all fallible operations (decoding, encoding, caching, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid file extension `{0}`")]
    InvalidExtension(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("unsupported version {0}")]
    InvalidVersion(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed string data: {0}")]
    Unicode(String),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("cache error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_extension_error() {
        let error = Error::InvalidExtension("txt".to_string());
        assert_eq!(error.to_string(), "invalid file extension `txt`");
    }

    #[test]
    fn test_invalid_format_error() {
        let error = Error::InvalidFormat("magic mismatch".to_string());
        assert_eq!(error.to_string(), "invalid format: magic mismatch");
    }

    #[test]
    fn test_invalid_version_error() {
        let error = Error::InvalidVersion(9);
        assert_eq!(error.to_string(), "unsupported version 9");
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_unicode_error() {
        let error = Error::Unicode("lone surrogate".to_string());
        assert_eq!(error.to_string(), "malformed string data: lone surrogate");
    }

    #[test]
    fn test_data_mismatch_error() {
        let error = Error::DataMismatch("index out of range".to_string());
        assert_eq!(error.to_string(), "invalid data: index out of range");
    }

    #[test]
    fn test_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::Parse(json_error);
        assert!(error.to_string().contains("cache error"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidExtension("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidExtension"));
        assert!(debug.contains("test"));
    }
}
