//! Liquidity pool management and swaps.

use super::{Codec, Record, TxType};
use crate::codec::{AccountMap, Amount, Reader, ScriptRef, TokenId, Writer};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tag `p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePoolPair {
    pub id_token_a: TokenId,
    pub id_token_b: TokenId,
    /// Fee fraction, `0.002` for 0.2%.
    pub commission: Amount,
    pub owner_address: ScriptRef,
    pub status: u8,
}

impl Record for CreatePoolPair {
    const TYPE: TxType = TxType::CreatePoolPair;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        w.write_varint(self.id_token_a);
        w.write_varint(self.id_token_b);
        w.write_amount(self.commission);
        codec.write_script(w, &self.owner_address);
        w.write_u8(self.status);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(CreatePoolPair {
            id_token_a: r.read_varint()?,
            id_token_b: r.read_varint()?,
            commission: r.read_amount()?,
            owner_address: codec.read_script(r)?,
            status: r.read_u8()?,
        })
    }
}

/// Tag `u`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePoolPair {
    pub pool_id: u32,
    pub status: u8,
    /// Raw integer, unlike the scaled commission of [`CreatePoolPair`].
    pub commission: u64,
    pub owner_address: ScriptRef,
}

impl Record for UpdatePoolPair {
    const TYPE: TxType = TxType::UpdatePoolPair;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        w.write_u32_le(self.pool_id);
        w.write_u8(self.status);
        w.write_u64_le(self.commission);
        codec.write_script(w, &self.owner_address);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(UpdatePoolPair {
            pool_id: r.read_u32_le()?,
            status: r.read_u8()?,
            commission: r.read_u64_le()?,
            owner_address: codec.read_script(r)?,
        })
    }
}

/// Price limit of a swap, as two fixed-point halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxPrice {
    pub integer: Amount,
    pub fraction: Amount,
}

/// Tag `s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSwap {
    pub from: ScriptRef,
    pub id_token_from: TokenId,
    pub amount_from: Amount,
    pub to: ScriptRef,
    pub id_token_to: TokenId,
    pub max_price: MaxPrice,
}

impl Record for PoolSwap {
    const TYPE: TxType = TxType::PoolSwap;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_script(w, &self.from);
        w.write_varint(self.id_token_from);
        w.write_amount(self.amount_from);
        codec.write_script(w, &self.to);
        w.write_varint(self.id_token_to);
        w.write_amount(self.max_price.integer);
        w.write_amount(self.max_price.fraction);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(PoolSwap {
            from: codec.read_script(r)?,
            id_token_from: r.read_varint()?,
            amount_from: r.read_amount()?,
            to: codec.read_script(r)?,
            id_token_to: r.read_varint()?,
            max_price: MaxPrice {
                integer: r.read_amount()?,
                fraction: r.read_amount()?,
            },
        })
    }
}

/// Tag `l`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPoolLiquidity {
    pub from: AccountMap,
    pub share_address: ScriptRef,
}

impl Record for AddPoolLiquidity {
    const TYPE: TxType = TxType::AddPoolLiquidity;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_accounts(w, &self.from);
        codec.write_script(w, &self.share_address);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(AddPoolLiquidity {
            from: codec.read_accounts(r)?,
            share_address: codec.read_script(r)?,
        })
    }
}

/// Tag `r`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovePoolLiquidity {
    pub from: ScriptRef,
    pub token_id: TokenId,
    pub value: Amount,
}

impl Record for RemovePoolLiquidity {
    const TYPE: TxType = TxType::RemovePoolLiquidity;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_script(w, &self.from);
        w.write_varint(self.token_id);
        w.write_amount(self.value);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(RemovePoolLiquidity {
            from: codec.read_script(r)?,
            token_id: r.read_varint()?,
            value: r.read_amount()?,
        })
    }
}
