//! Token creation, minting and updates.

use super::{Codec, Record, TxType, hex_array};
use crate::codec::{BalanceMap, Reader, Writer};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tag `T`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateToken {
    pub symbol: String,
    pub name: String,
    pub decimal: u8,
    /// Plain count, not a fixed-point amount.
    pub limit: u64,
    pub flags: u8,
}

impl Record for CreateToken {
    const TYPE: TxType = TxType::CreateToken;

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        w.write_str(&self.symbol);
        w.write_str(&self.name);
        w.write_u8(self.decimal);
        w.write_u64_le(self.limit);
        w.write_u8(self.flags);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(CreateToken {
            symbol: r.read_string()?,
            name: r.read_string()?,
            decimal: r.read_u8()?,
            limit: r.read_u64_le()?,
            flags: r.read_u8()?,
        })
    }
}

/// Tag `M`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintToken {
    pub minted: BalanceMap,
}

impl Record for MintToken {
    const TYPE: TxType = TxType::MintToken;

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        self.minted.write(w);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(MintToken {
            minted: BalanceMap::read(r)?,
        })
    }
}

/// Tag `N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateToken {
    /// Creation transaction of the token, raw 32 bytes in wire order.
    #[serde(with = "hex_array")]
    pub token_tx: [u8; 32],
    pub is_dat: u8,
}

impl Record for UpdateToken {
    const TYPE: TxType = TxType::UpdateToken;

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        w.write_bytes(&self.token_tx);
        w.write_u8(self.is_dat);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(UpdateToken {
            token_tx: r.read_array()?,
            is_dat: r.read_u8()?,
        })
    }
}

/// Tag `n`.
///
/// Encoding appends `mintable`, `tradeable` and `is_dat` after `flags`;
/// decoding stops at `flags` and leaves those three unset. The two directions
/// are not inverses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTokenAny {
    #[serde(with = "hex_array")]
    pub token_tx: [u8; 32],
    pub symbol: String,
    pub name: String,
    pub decimal: u8,
    pub limit: u64,
    pub flags: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mintable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradeable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dat: Option<bool>,
}

impl UpdateTokenAny {
    /// The encode-only trailer, once all three values are present.
    fn trailer(&self) -> Result<[bool; 3]> {
        Ok([
            self.mintable.ok_or_else(|| Error::MissingField("mintable".into()))?,
            self.tradeable.ok_or_else(|| Error::MissingField("tradeable".into()))?,
            self.is_dat.ok_or_else(|| Error::MissingField("is_dat".into()))?,
        ])
    }
}

impl Record for UpdateTokenAny {
    const TYPE: TxType = TxType::UpdateTokenAny;

    fn check(&self) -> Result<()> {
        self.trailer().map(|_| ())
    }

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        w.write_bytes(&self.token_tx);
        w.write_str(&self.symbol);
        w.write_str(&self.name);
        w.write_u8(self.decimal);
        w.write_u64_le(self.limit);
        w.write_u8(self.flags);
        for flag in self.trailer()? {
            w.write_u8(u8::from(flag));
        }
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(UpdateTokenAny {
            token_tx: r.read_array()?,
            symbol: r.read_string()?,
            name: r.read_string()?,
            decimal: r.read_u8()?,
            limit: r.read_u64_le()?,
            flags: r.read_u8()?,
            mintable: None,
            tradeable: None,
            is_dat: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Amount;
    use crate::record::{CustomTx, decode};

    fn btc() -> CreateToken {
        CreateToken {
            symbol: "BTC".into(),
            name: "Bitcoin".into(),
            decimal: 8,
            limit: 0,
            flags: 1,
        }
    }

    fn update_any() -> UpdateTokenAny {
        UpdateTokenAny {
            token_tx: [0x42; 32],
            symbol: "DOGE".into(),
            name: "Dogecoin".into(),
            decimal: 8,
            limit: 21_000_000,
            flags: 3,
            mintable: Some(true),
            tradeable: Some(false),
            is_dat: Some(true),
        }
    }

    #[test]
    fn test_create_token_layout() {
        let bytes = btc().encode().unwrap();
        assert_eq!(bytes.len(), 27);
        assert_eq!(&bytes[..5], b"DfTxT");
        assert_eq!(bytes[5], 3);
        assert_eq!(&bytes[6..9], b"BTC");
        assert_eq!(bytes[9], 7);
        assert_eq!(&bytes[10..17], b"Bitcoin");
        assert_eq!(bytes[17], 8);
        assert_eq!(&bytes[18..26], &[0; 8]);
        assert_eq!(bytes[26], 1);

        assert_eq!(decode(&bytes).unwrap().record, CustomTx::CreateToken(btc()));
    }

    #[test]
    fn test_create_token_limit_is_unscaled() {
        let token = CreateToken { limit: 5, ..btc() };
        let bytes = token.encode().unwrap();
        assert_eq!(&bytes[18..26], &5u64.to_le_bytes());
    }

    #[test]
    fn test_mint_token_layout() {
        let mut minted = BalanceMap::new();
        minted.push(1, "5.5".parse::<Amount>().unwrap());
        let record = MintToken { minted };
        let bytes = record.encode().unwrap();

        let mut expected = b"DfTxM".to_vec();
        expected.extend_from_slice(&[1, 1]);
        expected.extend_from_slice(&550_000_000u64.to_le_bytes());
        assert_eq!(bytes, expected);
        assert_eq!(decode(&bytes).unwrap().record, CustomTx::MintToken(record));
    }

    #[test]
    fn test_update_token_round_trip() {
        let record = UpdateToken {
            token_tx: [0xEE; 32],
            is_dat: 1,
        };
        let bytes = record.encode().unwrap();
        assert_eq!(bytes.len(), 4 + 1 + 32 + 1);
        assert_eq!(decode(&bytes).unwrap().record, CustomTx::UpdateToken(record));
    }

    #[test]
    fn test_update_token_any_encode_writes_trailer() {
        let bytes = update_any().encode().unwrap();
        // signature, tag, txid, "DOGE", "Dogecoin", decimal, limit, flags, trailer
        assert_eq!(bytes.len(), 4 + 1 + 32 + 5 + 9 + 1 + 8 + 1 + 3);
        assert_eq!(&bytes[bytes.len() - 4..], &[3, 1, 0, 1]);
    }

    #[test]
    fn test_update_token_any_is_not_self_inverse() {
        let record = update_any();
        let bytes = record.encode().unwrap();
        let decoded = decode(&bytes).unwrap();

        // Decode stops before the trailer and leaves it unread.
        assert_eq!(decoded.consumed, bytes.len() - 3);
        let CustomTx::UpdateTokenAny(back) = decoded.record else {
            panic!("Expected UpdateTokenAny");
        };
        assert_ne!(back, record);
        assert_eq!(back.mintable, None);
        assert_eq!(back.tradeable, None);
        assert_eq!(back.is_dat, None);
        assert_eq!(
            back,
            UpdateTokenAny {
                mintable: None,
                tradeable: None,
                is_dat: None,
                ..record
            }
        );
    }

    #[test]
    fn test_update_token_any_missing_trailer_field() {
        let record = UpdateTokenAny {
            tradeable: None,
            ..update_any()
        };
        assert!(matches!(
            record.encode(),
            Err(Error::MissingField(field)) if field == "tradeable"
        ));
    }

    #[test]
    fn test_write_fields_refuses_unset_trailer() {
        let record = UpdateTokenAny {
            mintable: None,
            tradeable: None,
            is_dat: None,
            ..update_any()
        };
        let mut w = Writer::new();
        let result = record.write_fields(&mut w, &Codec::default());
        assert!(matches!(result, Err(Error::MissingField(field)) if field == "mintable"));
    }
}
