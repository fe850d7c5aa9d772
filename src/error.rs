//! Error types for dftx.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dftx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding, decoding or presenting a payload.
#[derive(Error, Debug)]
pub enum Error {
    /// A value the wire format requires was not set on the record.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A value was set but cannot be represented on the wire.
    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldType { field: &'static str, reason: String },

    /// The buffer ended before a fixed or length-prefixed read completed.
    #[error("Truncated buffer at offset {offset}: needed {needed} byte(s), {available} available")]
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The type tag is not in the dispatch table.
    #[error("Unknown custom transaction tag: 0x{0:02x}")]
    UnknownTag(u8),

    /// Scaling an amount by 10^8 does not fit in 64 bits.
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// The payload does not start with the `DfTx` signature.
    #[error("Bad signature: expected 'DfTx', found {}", hex::encode(.0))]
    BadSignature([u8; 4]),

    /// A length-prefixed text field is not UTF-8.
    #[error("Invalid string at offset {offset}: {source}")]
    InvalidString {
        offset: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The script model refused a script reference.
    #[error("Invalid script: {0}")]
    InvalidScript(String),

    /// No input was provided (no file, no stdin, no hex).
    #[error("No input provided. Use: dftx <file>, dftx <hex>, or pipe a payload to stdin")]
    NoInput,

    /// The specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" reading {}", p.display())).unwrap_or_default())]
    IoError {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Invalid hex input.
    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A JSON record is not valid JSON text.
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    /// Output formatting error.
    #[error("Format error: {0}")]
    FormatError(String),
}

impl Error {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Payload did not survive the codec (--check mode)
            Error::MissingField(_)
            | Error::InvalidFieldType { .. }
            | Error::TruncatedBuffer { .. }
            | Error::UnknownTag(_)
            | Error::AmountOverflow(_)
            | Error::BadSignature(_)
            | Error::InvalidString { .. }
            | Error::InvalidScript(_) => 1,
            Error::InvalidHex(_) => 2,
            Error::NoInput | Error::FileNotFound(_) | Error::IoError { .. } => 3,
            Error::InvalidRecord(_) => 4,
            Error::FormatError(_) => 5,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidFieldType {
            field,
            reason: reason.into(),
        }
    }
}
