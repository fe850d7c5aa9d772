//! Opaque script references and the script-model seam.
//!
//! The codec never looks inside a script. It frames the bytes with a varint
//! length and leaves interpretation (address formats, network prefixes) to a
//! [`ScriptModel`] supplied by the caller.

use crate::codec::{Reader, Writer};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Network a payload is read for. Only the script model cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

/// Raw locking script or address bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ScriptRef(Vec<u8>);

impl ScriptRef {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        ScriptRef(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for ScriptRef {
    fn from(bytes: Vec<u8>) -> Self {
        ScriptRef(bytes)
    }
}

impl fmt::Display for ScriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ScriptRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ScriptRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s))
            .map(ScriptRef)
            .map_err(serde::de::Error::custom)
    }
}

/// Converts between wire bytes and script references.
///
/// Implementations can reject scripts that make no sense on `network`; the
/// codec surfaces that as [`Error::InvalidScript`].
pub trait ScriptModel: Sync {
    fn script_from_bytes(&self, bytes: &[u8], network: Network) -> Result<ScriptRef>;

    fn script_to_bytes(&self, script: &ScriptRef) -> Vec<u8> {
        script.as_bytes().to_vec()
    }
}

/// Passes script bytes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawScripts;

impl ScriptModel for RawScripts {
    fn script_from_bytes(&self, bytes: &[u8], _network: Network) -> Result<ScriptRef> {
        Ok(ScriptRef::new(bytes))
    }
}

/// Script reference framed as length-prefixed bytes.
pub fn write_script(w: &mut Writer, scripts: &dyn ScriptModel, script: &ScriptRef) {
    w.write_lp_bytes(&scripts.script_to_bytes(script));
}

pub fn read_script(
    r: &mut Reader<'_>,
    scripts: &dyn ScriptModel,
    network: Network,
) -> Result<ScriptRef> {
    let start = r.position();
    let bytes = r.read_lp_bytes()?;
    scripts.script_from_bytes(bytes, network).map_err(|e| {
        log::debug!("script at offset {start} rejected: {e}");
        match e {
            Error::InvalidScript(_) => e,
            other => Error::InvalidScript(other.to_string()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts only 22-byte P2WPKH scripts.
    struct WitnessOnly;

    impl ScriptModel for WitnessOnly {
        fn script_from_bytes(&self, bytes: &[u8], network: Network) -> Result<ScriptRef> {
            if bytes.len() == 22 && bytes[0] == 0x00 && bytes[1] == 0x14 {
                Ok(ScriptRef::new(bytes))
            } else {
                Err(Error::InvalidScript(format!(
                    "not a witness v0 key hash on {}",
                    network.as_str()
                )))
            }
        }
    }

    fn p2wpkh() -> ScriptRef {
        let mut bytes = vec![0x00, 0x14];
        bytes.extend_from_slice(&[0xAB; 20]);
        ScriptRef::new(bytes)
    }

    #[test]
    fn test_script_is_length_framed() {
        let mut w = Writer::new();
        write_script(&mut w, &RawScripts, &ScriptRef::new(vec![0x6a, 0x01]));
        assert_eq!(w.into_bytes(), vec![2, 0x6a, 0x01]);
    }

    #[test]
    fn test_read_script_through_raw_model() {
        let mut w = Writer::new();
        write_script(&mut w, &RawScripts, &p2wpkh());
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes);
        let script = read_script(&mut r, &RawScripts, Network::Testnet).unwrap();
        assert_eq!(script, p2wpkh());
        assert_eq!(r.position(), 23);
    }

    #[test]
    fn test_model_can_reject() {
        let bytes = [3, 0x51, 0x52, 0x53];
        let mut r = Reader::new(&bytes);
        let err = read_script(&mut r, &WitnessOnly, Network::Regtest).unwrap_err();
        assert!(matches!(err, Error::InvalidScript(msg) if msg.contains("regtest")));
    }

    #[test]
    fn test_long_script_takes_three_byte_prefix() {
        let script = ScriptRef::new(vec![0x51; 300]);
        let mut w = Writer::new();
        write_script(&mut w, &RawScripts, &script);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[..3], &[0xFD, 0x2C, 0x01]);
        assert_eq!(bytes.len(), 303);

        let mut r = Reader::new(&bytes);
        assert_eq!(read_script(&mut r, &RawScripts, Network::Mainnet).unwrap(), script);
        assert_eq!(r.position(), 303);
    }

    #[test]
    fn test_long_script_cut_inside_prefix() {
        let bytes = [0xFD, 0x2C];
        let mut r = Reader::new(&bytes);
        let err = read_script(&mut r, &RawScripts, Network::Mainnet).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedBuffer {
                offset: 1,
                needed: 2,
                available: 1
            }
        ));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_long_script_cut_inside_body() {
        let mut w = Writer::new();
        write_script(&mut w, &RawScripts, &ScriptRef::new(vec![0x51; 300]));
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes[..100]);
        let err = read_script(&mut r, &RawScripts, Network::Mainnet).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedBuffer {
                offset: 3,
                needed: 300,
                available: 97
            }
        ));
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_hex_serde() {
        let script = ScriptRef::new(vec![0x00, 0x14, 0xff]);
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(json, "\"0014ff\"");
        let back: ScriptRef = serde_json::from_str("\"0x0014ff\"").unwrap();
        assert_eq!(back, script);
    }
}
