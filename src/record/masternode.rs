//! Masternode registration and resignation.

use super::{Codec, Record, TxType, hex_array};
use crate::codec::{Reader, Writer};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tag `C`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMasternode {
    pub operator_type: u8,
    /// Key hash of the operator, raw 20 bytes.
    #[serde(with = "hex_array")]
    pub operator_auth_address: [u8; 20],
}

impl Record for CreateMasternode {
    const TYPE: TxType = TxType::CreateMasternode;

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        w.write_u8(self.operator_type);
        w.write_bytes(&self.operator_auth_address);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(CreateMasternode {
            operator_type: r.read_u8()?,
            operator_auth_address: r.read_array()?,
        })
    }
}

/// Tag `R`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResignMasternode {
    /// Id of the masternode, raw 32 bytes in wire order.
    #[serde(with = "hex_array")]
    pub node_id: [u8; 32],
}

impl Record for ResignMasternode {
    const TYPE: TxType = TxType::ResignMasternode;

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        w.write_bytes(&self.node_id);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(ResignMasternode {
            node_id: r.read_array()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CustomTx, decode};

    #[test]
    fn test_create_masternode_layout() {
        let record = CreateMasternode {
            operator_type: 1,
            operator_auth_address: [0x11; 20],
        };
        let bytes = record.encode().unwrap();
        assert_eq!(bytes.len(), 4 + 1 + 1 + 20);
        assert_eq!(&bytes[..6], b"DfTxC\x01");
        assert_eq!(&bytes[6..], &[0x11; 20]);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.record, CustomTx::CreateMasternode(record));
        assert_eq!(decoded.consumed, bytes.len());
    }

    #[test]
    fn test_resign_masternode_keeps_byte_order() {
        let mut node_id = [0u8; 32];
        for (i, b) in node_id.iter_mut().enumerate() {
            *b = i as u8;
        }
        let record = ResignMasternode { node_id };
        let bytes = record.encode().unwrap();
        assert_eq!(&bytes[4..5], b"R");
        assert_eq!(&bytes[5..], &node_id);
        assert_eq!(
            decode(&bytes).unwrap().record,
            CustomTx::ResignMasternode(record)
        );
    }

    #[test]
    fn test_auth_address_json_is_hex() {
        let json = serde_json::json!({
            "operator_type": 4,
            "operator_auth_address": format!("0x{}", "ab".repeat(20)),
        });
        let record: CreateMasternode = serde_json::from_value(json).unwrap();
        assert_eq!(record.operator_auth_address, [0xAB; 20]);

        let short = serde_json::json!({
            "operator_type": 4,
            "operator_auth_address": "abab",
        });
        assert!(serde_json::from_value::<CreateMasternode>(short).is_err());
    }
}
