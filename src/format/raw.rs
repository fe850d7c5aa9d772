//! Raw hex breakdown of a payload.

use crate::error::Result;
use crate::record::{Decoded, HEADER_LEN, SIGNATURE};

/// Split the payload into signature, tag, body and trailing bytes.
pub fn format_raw(decoded: &Decoded, input: &[u8]) -> Result<String> {
    let tx_type = decoded.record.tx_type();
    let body = input.get(HEADER_LEN..decoded.consumed).unwrap_or_default();
    let trailing = super::trailing(decoded, input);

    let mut lines = vec![
        format!("signature  {}", hex::encode(SIGNATURE)),
        format!(
            "tag        {:02x}  ('{}' {})",
            tx_type.as_byte(),
            tx_type.as_char(),
            tx_type.name()
        ),
        format!("body       {}  ({} bytes)", hex::encode(body), body.len()),
    ];
    if !trailing.is_empty() {
        lines.push(format!(
            "trailing   {}  ({} bytes)",
            hex::encode(trailing),
            trailing.len()
        ));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CustomTx, SetGovVariable, decode, encode};

    #[test]
    fn test_breakdown() {
        let tx: CustomTx = SetGovVariable { name: "ab".into() }.into();
        let bytes = encode(&tx).unwrap();
        let output = format_raw(&decode(&bytes).unwrap(), &bytes).unwrap();

        assert!(output.contains("signature  44665478"));
        assert!(output.contains("tag        47  ('G' setGovVariable)"));
        assert!(output.contains("body       026162  (3 bytes)"));
        assert!(!output.contains("trailing"));
    }

    #[test]
    fn test_breakdown_with_trailing() {
        let tx: CustomTx = SetGovVariable { name: "ab".into() }.into();
        let mut bytes = encode(&tx).unwrap();
        bytes.push(0xff);
        let output = format_raw(&decode(&bytes).unwrap(), &bytes).unwrap();
        assert!(output.contains("trailing   ff  (1 bytes)"));
    }
}
