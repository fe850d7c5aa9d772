//! Transfers between UTXOs and account balances.

use super::{Codec, Record, TxType};
use crate::codec::{AccountMap, BalanceMap, Reader, ScriptRef, Writer};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tag `U`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxosToAccount {
    pub to: AccountMap,
}

impl Record for UtxosToAccount {
    const TYPE: TxType = TxType::UtxosToAccount;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_accounts(w, &self.to);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(UtxosToAccount {
            to: codec.read_accounts(r)?,
        })
    }
}

/// Tag `b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountToUtxos {
    pub from: ScriptRef,
    pub balances: BalanceMap,
    /// Index of the first transaction output that receives the minted coins.
    pub minting_outputs_start: u32,
}

impl Record for AccountToUtxos {
    const TYPE: TxType = TxType::AccountToUtxos;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_script(w, &self.from);
        self.balances.write(w);
        w.write_u32_le(self.minting_outputs_start);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(AccountToUtxos {
            from: codec.read_script(r)?,
            balances: BalanceMap::read(r)?,
            minting_outputs_start: r.read_u32_le()?,
        })
    }
}

/// Tag `B`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountToAccount {
    pub from: ScriptRef,
    pub to: AccountMap,
}

impl Record for AccountToAccount {
    const TYPE: TxType = TxType::AccountToAccount;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_script(w, &self.from);
        codec.write_accounts(w, &self.to);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(AccountToAccount {
            from: codec.read_script(r)?,
            to: codec.read_accounts(r)?,
        })
    }
}

/// Tag `a`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnyAccountsToAccounts {
    pub from: AccountMap,
    pub to: AccountMap,
}

impl Record for AnyAccountsToAccounts {
    const TYPE: TxType = TxType::AnyAccountsToAccounts;

    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()> {
        codec.write_accounts(w, &self.from);
        codec.write_accounts(w, &self.to);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self> {
        Ok(AnyAccountsToAccounts {
            from: codec.read_accounts(r)?,
            to: codec.read_accounts(r)?,
        })
    }
}
