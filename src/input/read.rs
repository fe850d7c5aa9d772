//! Reading payloads and JSON records from hex, files or stdin.

use crate::cli::InputSpec;
use crate::error::{Error, Result};
use crate::record::SIGNATURE;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

/// Read payload bytes from the specified source.
///
/// Files and stdin may hold the binary payload or its hex text.
pub fn read_input(spec: &InputSpec) -> Result<Vec<u8>> {
    match spec {
        InputSpec::Hex(hex_str) => Ok(hex::decode(hex_str)?),
        InputSpec::File(path) => payload_from_text(read_source(Some(path.as_path()))?),
        InputSpec::Stdin => payload_from_text(read_source(None)?),
    }
}

/// Read a JSON record from a file, or from stdin for `-`.
pub fn read_record_text(arg: &str) -> Result<String> {
    let path = (arg != "-").then(|| Path::new(arg));
    let bytes = read_source(path)?;
    String::from_utf8(bytes).map_err(|e| Error::IoError {
        path: path.map(Path::to_path_buf),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

/// Raw bytes of a file, or of stdin when there is no path.
fn read_source(path: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = path {
        return read_file(path);
    }

    // Nothing piped in, nothing to read
    if io::stdin().is_terminal() {
        return Err(Error::NoInput);
    }
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|e| Error::IoError {
            path: None,
            source: e,
        })?;
    Ok(buffer)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|e| Error::IoError {
        path: Some(path.to_path_buf()),
        source: e,
    })
}

/// A binary payload passes through; hex text (optionally `0x`) is decoded.
fn payload_from_text(buffer: Vec<u8>) -> Result<Vec<u8>> {
    // The signature is printable, so check for it before treating input as text
    if buffer.starts_with(&SIGNATURE) {
        return Ok(buffer);
    }

    let Ok(text) = std::str::from_utf8(&buffer) else {
        return Ok(buffer);
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::NoInput);
    }

    let hex_candidate = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if hex_candidate.chars().all(|c| c.is_ascii_hexdigit()) {
        hex::decode(hex_candidate).map_err(Error::from)
    } else {
        // Let the decoder report what is wrong with it
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_hex_argument() {
        let spec = InputSpec::Hex("4466547847".to_string());
        assert_eq!(read_input(&spec).unwrap(), b"DfTxG".to_vec());
    }

    #[test]
    fn test_invalid_hex_argument() {
        let spec = InputSpec::Hex("not_hex".to_string());
        assert!(matches!(read_input(&spec), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_payload_file_not_found() {
        let spec = InputSpec::File(PathBuf::from("/nonexistent/payload.bin"));
        assert!(matches!(read_input(&spec), Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_hex_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.hex");
        fs::write(&path, "0x4466547847\n").unwrap();
        let bytes = read_input(&InputSpec::File(path)).unwrap();
        assert_eq!(bytes, b"DfTxG".to_vec());
    }

    #[test]
    fn test_text_hex() {
        let input = b"4466547847".to_vec();
        assert_eq!(payload_from_text(input).unwrap(), b"DfTxG".to_vec());
    }

    #[test]
    fn test_text_hex_with_prefix_and_whitespace() {
        let input = b"  0x4466547847 \n".to_vec();
        assert_eq!(payload_from_text(input).unwrap(), b"DfTxG".to_vec());
    }

    #[test]
    fn test_binary_payload_passes_through() {
        let input = b"DfTxG\x03abc".to_vec();
        assert_eq!(payload_from_text(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_non_utf8_binary_passes_through() {
        let input = vec![0xff, 0xfe, 0x00];
        assert_eq!(payload_from_text(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_blank_text() {
        let result = payload_from_text(b"   ".to_vec());
        assert!(matches!(result, Err(Error::NoInput)));
    }

    #[test]
    fn test_odd_hex_text() {
        let result = payload_from_text(b"44665".to_vec());
        assert!(matches!(result, Err(Error::InvalidHex(_))));
    }

    #[test]
    fn test_record_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, r#"{"type":"setGovVariable","name":"x"}"#).unwrap();
        let text = read_record_text(path.to_str().unwrap()).unwrap();
        assert!(text.contains("setGovVariable"));
    }

    #[test]
    fn test_record_file_not_found() {
        let result = read_record_text("/nonexistent/record.json");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_record_not_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, [0xff, 0xfe]).unwrap();
        let result = read_record_text(path.to_str().unwrap());
        assert!(matches!(result, Err(Error::IoError { path: Some(_), .. })));
    }
}
