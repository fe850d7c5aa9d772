//! JSON output formatting.

use crate::error::{Error, Result};
use crate::record::{CustomTx, Decoded};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    tag: String,
    record: &'a CustomTx,
    consumed: usize,
    trailing: String,
}

/// Format a decoded payload as JSON.
///
/// The `record` member is accepted back by `dftx encode`.
pub fn format_json(decoded: &Decoded, input: &[u8]) -> Result<String> {
    let report = Report {
        tag: decoded.record.tx_type().as_char().to_string(),
        record: &decoded.record,
        consumed: decoded.consumed,
        trailing: hex::encode(super::trailing(decoded, input)),
    };
    serde_json::to_string_pretty(&report).map_err(|e| Error::FormatError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{SetGovVariable, encode};

    #[test]
    fn test_format_record() {
        let tx: CustomTx = SetGovVariable {
            name: "LP_SPLITS".into(),
        }
        .into();
        let bytes = encode(&tx).unwrap();
        let decoded = crate::record::decode(&bytes).unwrap();

        let output = format_json(&decoded, &bytes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["tag"], "G");
        assert_eq!(value["record"]["type"], "setGovVariable");
        assert_eq!(value["record"]["name"], "LP_SPLITS");
        assert_eq!(value["consumed"], bytes.len());
        assert_eq!(value["trailing"], "");
    }

    #[test]
    fn test_format_trailing_bytes() {
        let tx: CustomTx = SetGovVariable { name: "x".into() }.into();
        let mut bytes = encode(&tx).unwrap();
        bytes.extend_from_slice(&[0xaa, 0xbb]);
        let decoded = crate::record::decode(&bytes).unwrap();

        let output = format_json(&decoded, &bytes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["trailing"], "aabb");
    }

    #[test]
    fn test_record_member_parses_back() {
        for tx in crate::record::fixtures::samples() {
            let bytes = encode(&tx).unwrap();
            let decoded = crate::record::decode(&bytes).unwrap();
            let output = format_json(&decoded, &bytes).unwrap();
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();
            let back: CustomTx = serde_json::from_value(value["record"].clone()).unwrap();
            assert_eq!(back, decoded.record);
        }
    }
}
