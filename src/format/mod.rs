//! Output formatting module.

mod json;
mod pretty;
mod raw;

use crate::cli::Args;
use crate::error::Result;
use crate::record::Decoded;

pub use json::format_json;
pub use pretty::{format_pretty, format_tags};
pub use raw::format_raw;

/// Format a decoded payload according to the output flags.
///
/// `input` is the full byte string the record was decoded from, so the
/// formatters can show what was left unread.
pub fn format_output(decoded: &Decoded, input: &[u8], args: &Args) -> Result<String> {
    if args.json {
        format_json(decoded, input)
    } else if args.raw {
        format_raw(decoded, input)
    } else {
        format_pretty(decoded, input, args)
    }
}

/// Bytes past the decoded record.
pub(crate) fn trailing<'a>(decoded: &Decoded, input: &'a [u8]) -> &'a [u8] {
    input.get(decoded.consumed..).unwrap_or_default()
}
