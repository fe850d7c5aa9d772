//! CompactSize variable-length integers.
//!
//! | value range              | bytes on the wire      |
//! |--------------------------|------------------------|
//! | `0..=0xFC`               | the value itself       |
//! | `0xFD..=0xFFFF`          | `0xFD` then `u16` LE   |
//! | `0x1_0000..=0xFFFF_FFFF` | `0xFE` then `u32` LE   |
//! | larger                   | `0xFF` then `u64` LE   |

use crate::codec::{Reader, Writer};
use crate::error::Result;

const MARKER_U16: u8 = 0xFD;
const MARKER_U32: u8 = 0xFE;
const MARKER_U64: u8 = 0xFF;

/// Number of bytes `value` takes once encoded.
pub fn encoded_len(value: u64) -> usize {
    match value {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

/// Write `value` using the smallest width that holds it.
pub fn write(w: &mut Writer, value: u64) {
    match value {
        0..=0xFC => w.write_u8(value as u8),
        0xFD..=0xFFFF => {
            w.write_u8(MARKER_U16);
            w.write_u16_le(value as u16);
        }
        0x1_0000..=0xFFFF_FFFF => {
            w.write_u8(MARKER_U32);
            w.write_u32_le(value as u32);
        }
        _ => {
            w.write_u8(MARKER_U64);
            w.write_u64_le(value);
        }
    }
}

/// Read a varint of any width. Non-minimal encodings are accepted.
pub fn read(r: &mut Reader<'_>) -> Result<u64> {
    let first = r.read_u8()?;
    Ok(match first {
        MARKER_U16 => r.read_u16_le()? as u64,
        MARKER_U32 => r.read_u32_le()? as u64,
        MARKER_U64 => r.read_u64_le()?,
        n => n as u64,
    })
}
