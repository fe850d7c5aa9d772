//! Byte sink for payload encoding.

use crate::codec::{Amount, varint};

/// Growable output buffer. Writes cannot fail; anything that can be rejected
/// is checked on the record before the first byte goes in.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Writer {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The encoded payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Little-endian `u16`.
    pub fn write_u16_le(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Little-endian `u32`.
    pub fn write_u32_le(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Little-endian `u64`.
    pub fn write_u64_le(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// CompactSize varint, always in its shortest form.
    pub fn write_varint(&mut self, value: u64) {
        varint::write(self, value);
    }

    /// Raw bytes with no framing, for fixed-width fields.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Varint length followed by the bytes.
    pub fn write_lp_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    /// UTF-8 text as length-prefixed bytes.
    pub fn write_str(&mut self, s: &str) {
        self.write_lp_bytes(s.as_bytes());
    }

    /// Fixed-point amount as its `u64` count of 10^-8 units.
    pub fn write_amount(&mut self, amount: Amount) {
        self.write_u64_le(amount.units());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width_little_endian() {
        let mut w = Writer::new();
        w.write_u8(0x7d);
        w.write_u32_le(756980522);
        w.write_u64_le(0x0102030405060708);
        assert_eq!(
            w.into_bytes(),
            vec![0x7d, 42, 155, 30, 45, 8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let mut w = Writer::new();
        w.write_str("whoami");
        assert_eq!(w.into_bytes(), vec![6, 119, 104, 111, 97, 109, 105]);
    }

    #[test]
    fn test_empty_lp_bytes() {
        let mut w = Writer::new();
        w.write_lp_bytes(&[]);
        assert_eq!(w.into_bytes(), vec![0]);
    }

    #[test]
    fn test_amount_is_scaled_units() {
        let mut w = Writer::new();
        w.write_amount(Amount::from_units(550_000_000));
        assert_eq!(w.into_bytes(), 550_000_000u64.to_le_bytes().to_vec());
    }
}
