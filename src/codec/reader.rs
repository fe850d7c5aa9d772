//! Bounds-checked cursor over an input payload.

use crate::codec::{Amount, varint};
use crate::error::{Error, Result};

/// Read cursor. Every read either consumes exactly the bytes it needs or
/// fails with [`Error::TruncatedBuffer`] and leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    /// Offset of the next unread byte, i.e. bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Unread tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Take the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::TruncatedBuffer {
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Fixed-width raw field, e.g. a 32-byte transaction id.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Little-endian `u16`.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Little-endian `u32`.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Little-endian `u64`.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// CompactSize varint of any width.
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        varint::read(self).inspect_err(|_| self.pos = start)
    }

    /// Varint length followed by that many bytes.
    pub fn read_lp_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.read_varint()?;
        // A length that does not fit in usize can never be satisfied either.
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        self.read_bytes(len).inspect_err(|_| self.pos = start)
    }

    /// Length-prefixed UTF-8 text. Fails with [`Error::InvalidString`]
    /// when the bytes are not UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let start = self.pos;
        let bytes = self.read_lp_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|source| {
            self.pos = start;
            Error::InvalidString {
                offset: start,
                source,
            }
        })
    }

    /// Fixed-point amount stored as `u64` units.
    pub fn read_amount(&mut self) -> Result<Amount> {
        Ok(Amount::from_units(self.read_u64_le()?))
    }

    /// Element count for a list. Fails early when even one byte per element
    /// cannot be present, so a corrupt count never drives a huge allocation.
    pub fn read_count(&mut self) -> Result<usize> {
        let start = self.pos;
        let count = self.read_varint()?;
        match usize::try_from(count) {
            Ok(n) if n <= self.remaining() => Ok(n),
            _ => {
                let available = self.remaining();
                self.pos = start;
                Err(Error::TruncatedBuffer {
                    offset: start,
                    needed: usize::try_from(count).unwrap_or(usize::MAX),
                    available,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u64() {
        let bytes = [49, 48, 47, 46, 45, 44, 43, 42];
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_u64_le().unwrap(), 3038570946151526449);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_read_u32() {
        let bytes = [45, 44, 43, 42];
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_u32_le().unwrap(), 707472429);
    }

    #[test]
    fn test_read_u64_short_buffer() {
        let bytes = [1, 2, 3, 4, 5, 6, 7];
        let mut r = Reader::new(&bytes);
        let err = r.read_u64_le().unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedBuffer {
                offset: 0,
                needed: 8,
                available: 7
            }
        ));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_read_string() {
        let bytes = [3, 97, 98, 99, 0xAA];
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_string().unwrap(), "abc");
        assert_eq!(r.rest(), &[0xAA]);
    }

    #[test]
    fn test_read_lp_bytes_short_body_restores_position() {
        let bytes = [5, 1, 2];
        let mut r = Reader::new(&bytes);
        assert!(matches!(
            r.read_lp_bytes(),
            Err(Error::TruncatedBuffer { needed: 5, .. })
        ));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_read_string_with_three_byte_prefix() {
        let text = "x".repeat(253);
        let mut w = crate::codec::Writer::new();
        w.write_str(&text);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..3], &[0xFD, 0xFD, 0x00]);

        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_string().unwrap(), text);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let bytes = [2, 0xC3, 0x28];
        let mut r = Reader::new(&bytes);
        assert!(matches!(
            r.read_string(),
            Err(Error::InvalidString { offset: 0, .. })
        ));
    }

    #[test]
    fn test_read_count_larger_than_buffer() {
        let bytes = [0xFE, 0xFF, 0xFF, 0xFF, 0x7F, 0x00];
        let mut r = Reader::new(&bytes);
        assert!(matches!(
            r.read_count(),
            Err(Error::TruncatedBuffer { offset: 0, .. })
        ));
    }
}
