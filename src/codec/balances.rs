//! Token balance lists and per-account balance lists.
//!
//! Both are ordered sequences on the wire, varint count first. Order is kept
//! exactly as given and duplicate keys are passed through.

use crate::codec::script::{ScriptModel, ScriptRef, read_script, write_script};
use crate::codec::{Amount, Network, Reader, Writer};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Fungible token class id, varint on the wire.
pub type TokenId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub token: TokenId,
    pub amount: Amount,
}

impl TokenAmount {
    pub fn new(token: TokenId, amount: Amount) -> Self {
        TokenAmount { token, amount }
    }
}

/// `(token, amount)` pairs in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceMap(pub Vec<TokenAmount>);

impl BalanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: TokenId, amount: Amount) {
        self.0.push(TokenAmount::new(token, amount));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenAmount> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn write(&self, w: &mut Writer) {
        w.write_varint(self.0.len() as u64);
        for entry in &self.0 {
            w.write_varint(entry.token);
            w.write_amount(entry.amount);
        }
    }

    pub fn read(r: &mut Reader<'_>) -> Result<Self> {
        let count = r.read_count()?;
        log::trace!("balances: {count} entries at offset {}", r.position());
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let token = r.read_varint()?;
            let amount = r.read_amount()?;
            entries.push(TokenAmount { token, amount });
        }
        Ok(BalanceMap(entries))
    }
}

impl FromIterator<TokenAmount> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = TokenAmount>>(iter: I) -> Self {
        BalanceMap(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BalanceMap {
    type Item = &'a TokenAmount;
    type IntoIter = std::slice::Iter<'a, TokenAmount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalances {
    pub owner: ScriptRef,
    pub balances: BalanceMap,
}

/// `(owner script, balances)` pairs in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountMap(pub Vec<AccountBalances>);

impl AccountMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, owner: ScriptRef, balances: BalanceMap) {
        self.0.push(AccountBalances { owner, balances });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccountBalances> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn write(&self, w: &mut Writer, scripts: &dyn ScriptModel) {
        w.write_varint(self.0.len() as u64);
        for account in &self.0 {
            write_script(w, scripts, &account.owner);
            account.balances.write(w);
        }
    }

    pub fn read(r: &mut Reader<'_>, scripts: &dyn ScriptModel, network: Network) -> Result<Self> {
        let count = r.read_count()?;
        log::trace!("accounts: {count} entries at offset {}", r.position());
        let mut accounts = Vec::with_capacity(count);
        for _ in 0..count {
            let owner = read_script(r, scripts, network)?;
            let balances = BalanceMap::read(r)?;
            accounts.push(AccountBalances { owner, balances });
        }
        Ok(AccountMap(accounts))
    }
}

impl FromIterator<AccountBalances> for AccountMap {
    fn from_iter<I: IntoIterator<Item = AccountBalances>>(iter: I) -> Self {
        AccountMap(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AccountMap {
    type Item = &'a AccountBalances;
    type IntoIter = std::slice::Iter<'a, AccountBalances>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
