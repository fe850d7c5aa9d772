//! Custom transaction records and the tag dispatcher.
//!
//! A payload is `"DfTx" || tag || fields`. Each tag maps to exactly one
//! record type and one field layout; [`TxType`] is that table and
//! [`CustomTx`] is the closed union of records.

mod account;
mod governance;
mod masternode;
mod pool;
mod token;

pub use account::{AccountToAccount, AccountToUtxos, AnyAccountsToAccounts, UtxosToAccount};
pub use governance::SetGovVariable;
pub use masternode::{CreateMasternode, ResignMasternode};
pub use pool::{
    AddPoolLiquidity, CreatePoolPair, MaxPrice, PoolSwap, RemovePoolLiquidity, UpdatePoolPair,
};
pub use token::{CreateToken, MintToken, UpdateToken, UpdateTokenAny};

use crate::codec::{
    AccountMap, Network, RawScripts, Reader, ScriptModel, ScriptRef, Writer, read_script,
    write_script,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker at the start of every custom transaction payload.
pub const SIGNATURE: [u8; 4] = *b"DfTx";

/// Length of signature plus tag.
pub const HEADER_LEN: usize = SIGNATURE.len() + 1;

/// One-byte type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TxType {
    CreateMasternode = b'C',
    ResignMasternode = b'R',
    CreateToken = b'T',
    MintToken = b'M',
    UpdateToken = b'N',
    UpdateTokenAny = b'n',
    CreatePoolPair = b'p',
    UpdatePoolPair = b'u',
    PoolSwap = b's',
    AddPoolLiquidity = b'l',
    RemovePoolLiquidity = b'r',
    UtxosToAccount = b'U',
    AccountToUtxos = b'b',
    AccountToAccount = b'B',
    SetGovVariable = b'G',
    AnyAccountsToAccounts = b'a',
}

impl TxType {
    /// Every tag, in table order.
    pub const ALL: [TxType; 16] = [
        TxType::CreateMasternode,
        TxType::ResignMasternode,
        TxType::CreateToken,
        TxType::MintToken,
        TxType::UpdateToken,
        TxType::UpdateTokenAny,
        TxType::CreatePoolPair,
        TxType::UpdatePoolPair,
        TxType::PoolSwap,
        TxType::AddPoolLiquidity,
        TxType::RemovePoolLiquidity,
        TxType::UtxosToAccount,
        TxType::AccountToUtxos,
        TxType::AccountToAccount,
        TxType::SetGovVariable,
        TxType::AnyAccountsToAccounts,
    ];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    pub fn name(self) -> &'static str {
        match self {
            TxType::CreateMasternode => "createMasternode",
            TxType::ResignMasternode => "resignMasternode",
            TxType::CreateToken => "createToken",
            TxType::MintToken => "mintToken",
            TxType::UpdateToken => "updateToken",
            TxType::UpdateTokenAny => "updateTokenAny",
            TxType::CreatePoolPair => "createPoolPair",
            TxType::UpdatePoolPair => "updatePoolPair",
            TxType::PoolSwap => "poolSwap",
            TxType::AddPoolLiquidity => "addPoolLiquidity",
            TxType::RemovePoolLiquidity => "removePoolLiquidity",
            TxType::UtxosToAccount => "utxosToAccount",
            TxType::AccountToUtxos => "accountToUtxos",
            TxType::AccountToAccount => "accountToAccount",
            TxType::SetGovVariable => "setGovVariable",
            TxType::AnyAccountsToAccounts => "anyAccountsToAccounts",
        }
    }

    /// Field sequence after the tag, for help output.
    pub fn layout(self) -> &'static str {
        match self {
            TxType::CreateMasternode => "u8 operator_type, 20B operator_auth_address",
            TxType::ResignMasternode => "32B node_id",
            TxType::CreateToken => "str symbol, str name, u8 decimal, u64 limit, u8 flags",
            TxType::MintToken => "balances minted",
            TxType::UpdateToken => "32B token_tx, u8 is_dat",
            TxType::UpdateTokenAny => {
                "32B token_tx, str symbol, str name, u8 decimal, u64 limit, u8 flags \
                 [+ u8 mintable, u8 tradeable, u8 is_dat on encode]"
            }
            TxType::CreatePoolPair => {
                "varint id_token_a, varint id_token_b, amount commission, script owner_address, u8 status"
            }
            TxType::UpdatePoolPair => "u32 pool_id, u8 status, u64 commission, script owner_address",
            TxType::PoolSwap => {
                "script from, varint id_token_from, amount amount_from, script to, \
                 varint id_token_to, amount max_price.integer, amount max_price.fraction"
            }
            TxType::AddPoolLiquidity => "accounts from, script share_address",
            TxType::RemovePoolLiquidity => "script from, varint token_id, amount value",
            TxType::UtxosToAccount => "accounts to",
            TxType::AccountToUtxos => "script from, balances balances, u32 minting_outputs_start",
            TxType::AccountToAccount => "script from, accounts to",
            TxType::SetGovVariable => "str name",
            TxType::AnyAccountsToAccounts => "accounts from, accounts to",
        }
    }
}

impl TryFrom<u8> for TxType {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        TxType::ALL
            .into_iter()
            .find(|t| t.as_byte() == tag)
            .ok_or(Error::UnknownTag(tag))
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record with a fixed tag and field layout.
pub trait Record: Sized {
    const TYPE: TxType;

    /// Preconditions, checked before any byte is written.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Fields after the tag, in wire order.
    fn write_fields(&self, w: &mut Writer, codec: &Codec<'_>) -> Result<()>;

    fn read_fields(r: &mut Reader<'_>, codec: &Codec<'_>) -> Result<Self>;

    /// Full payload with the default codec.
    fn encode(&self) -> Result<Vec<u8>> {
        Codec::default().encode_record(self)
    }
}

/// Any custom transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CustomTx {
    CreateMasternode(CreateMasternode),
    ResignMasternode(ResignMasternode),
    CreateToken(CreateToken),
    MintToken(MintToken),
    UpdateToken(UpdateToken),
    UpdateTokenAny(UpdateTokenAny),
    CreatePoolPair(CreatePoolPair),
    UpdatePoolPair(UpdatePoolPair),
    PoolSwap(PoolSwap),
    AddPoolLiquidity(AddPoolLiquidity),
    RemovePoolLiquidity(RemovePoolLiquidity),
    UtxosToAccount(UtxosToAccount),
    AccountToUtxos(AccountToUtxos),
    AccountToAccount(AccountToAccount),
    SetGovVariable(SetGovVariable),
    AnyAccountsToAccounts(AnyAccountsToAccounts),
}

impl CustomTx {
    pub fn tx_type(&self) -> TxType {
        match self {
            CustomTx::CreateMasternode(_) => TxType::CreateMasternode,
            CustomTx::ResignMasternode(_) => TxType::ResignMasternode,
            CustomTx::CreateToken(_) => TxType::CreateToken,
            CustomTx::MintToken(_) => TxType::MintToken,
            CustomTx::UpdateToken(_) => TxType::UpdateToken,
            CustomTx::UpdateTokenAny(_) => TxType::UpdateTokenAny,
            CustomTx::CreatePoolPair(_) => TxType::CreatePoolPair,
            CustomTx::UpdatePoolPair(_) => TxType::UpdatePoolPair,
            CustomTx::PoolSwap(_) => TxType::PoolSwap,
            CustomTx::AddPoolLiquidity(_) => TxType::AddPoolLiquidity,
            CustomTx::RemovePoolLiquidity(_) => TxType::RemovePoolLiquidity,
            CustomTx::UtxosToAccount(_) => TxType::UtxosToAccount,
            CustomTx::AccountToUtxos(_) => TxType::AccountToUtxos,
            CustomTx::AccountToAccount(_) => TxType::AccountToAccount,
            CustomTx::SetGovVariable(_) => TxType::SetGovVariable,
            CustomTx::AnyAccountsToAccounts(_) => TxType::AnyAccountsToAccounts,
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for CustomTx {
                fn from(record: $variant) -> Self {
                    CustomTx::$variant(record)
                }
            }
        )*
    };
}

impl_from_record!(
    CreateMasternode,
    ResignMasternode,
    CreateToken,
    MintToken,
    UpdateToken,
    UpdateTokenAny,
    CreatePoolPair,
    UpdatePoolPair,
    PoolSwap,
    AddPoolLiquidity,
    RemovePoolLiquidity,
    UtxosToAccount,
    AccountToUtxos,
    AccountToAccount,
    SetGovVariable,
    AnyAccountsToAccounts,
);

/// A decoded record and how many input bytes it took, header included.
/// Anything past `consumed` belongs to the enclosing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub record: CustomTx,
    pub consumed: usize,
}

/// Encoder/decoder bound to a network and a script model.
///
/// Holds no state between calls; one codec can be shared across threads.
#[derive(Clone, Copy)]
pub struct Codec<'m> {
    network: Network,
    scripts: &'m dyn ScriptModel,
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Codec {
            network: Network::Mainnet,
            scripts: &RawScripts,
        }
    }
}

impl<'m> Codec<'m> {
    pub fn new(network: Network, scripts: &'m dyn ScriptModel) -> Self {
        Codec { network, scripts }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Signature, tag and fields of `tx`.
    pub fn encode(&self, tx: &CustomTx) -> Result<Vec<u8>> {
        match tx {
            CustomTx::CreateMasternode(r) => self.encode_record(r),
            CustomTx::ResignMasternode(r) => self.encode_record(r),
            CustomTx::CreateToken(r) => self.encode_record(r),
            CustomTx::MintToken(r) => self.encode_record(r),
            CustomTx::UpdateToken(r) => self.encode_record(r),
            CustomTx::UpdateTokenAny(r) => self.encode_record(r),
            CustomTx::CreatePoolPair(r) => self.encode_record(r),
            CustomTx::UpdatePoolPair(r) => self.encode_record(r),
            CustomTx::PoolSwap(r) => self.encode_record(r),
            CustomTx::AddPoolLiquidity(r) => self.encode_record(r),
            CustomTx::RemovePoolLiquidity(r) => self.encode_record(r),
            CustomTx::UtxosToAccount(r) => self.encode_record(r),
            CustomTx::AccountToUtxos(r) => self.encode_record(r),
            CustomTx::AccountToAccount(r) => self.encode_record(r),
            CustomTx::SetGovVariable(r) => self.encode_record(r),
            CustomTx::AnyAccountsToAccounts(r) => self.encode_record(r),
        }
    }

    pub fn encode_record<R: Record>(&self, record: &R) -> Result<Vec<u8>> {
        record.check()?;
        let mut w = Writer::with_capacity(64);
        w.write_bytes(&SIGNATURE);
        w.write_u8(R::TYPE.as_byte());
        record.write_fields(&mut w, self)?;
        log::debug!("encoded {} ({} bytes)", R::TYPE, w.len());
        Ok(w.into_bytes())
    }

    /// Decode a full payload starting at the signature.
    pub fn decode(&self, bytes: &[u8]) -> Result<Decoded> {
        let mut r = Reader::new(bytes);
        let signature: [u8; 4] = r.read_array()?;
        if signature != SIGNATURE {
            return Err(Error::BadSignature(signature));
        }
        let tx_type = TxType::try_from(r.read_u8()?)?;
        let record = self.decode_body(tx_type, &mut r)?;
        Ok(Decoded {
            record,
            consumed: r.position(),
        })
    }

    /// Decode the fields for `tx_type` with `r` positioned just past the tag.
    /// On success `r` sits after the last field; on failure it is not moved.
    pub fn decode_body(&self, tx_type: TxType, r: &mut Reader<'_>) -> Result<CustomTx> {
        log::debug!(
            "decoding {} at offset {} on {}",
            tx_type,
            r.position(),
            self.network.as_str()
        );
        let start = r.clone();
        let record = match tx_type {
            TxType::CreateMasternode => CreateMasternode::read_fields(r, self).map(Into::into),
            TxType::ResignMasternode => ResignMasternode::read_fields(r, self).map(Into::into),
            TxType::CreateToken => CreateToken::read_fields(r, self).map(Into::into),
            TxType::MintToken => MintToken::read_fields(r, self).map(Into::into),
            TxType::UpdateToken => UpdateToken::read_fields(r, self).map(Into::into),
            TxType::UpdateTokenAny => UpdateTokenAny::read_fields(r, self).map(Into::into),
            TxType::CreatePoolPair => CreatePoolPair::read_fields(r, self).map(Into::into),
            TxType::UpdatePoolPair => UpdatePoolPair::read_fields(r, self).map(Into::into),
            TxType::PoolSwap => PoolSwap::read_fields(r, self).map(Into::into),
            TxType::AddPoolLiquidity => AddPoolLiquidity::read_fields(r, self).map(Into::into),
            TxType::RemovePoolLiquidity => {
                RemovePoolLiquidity::read_fields(r, self).map(Into::into)
            }
            TxType::UtxosToAccount => UtxosToAccount::read_fields(r, self).map(Into::into),
            TxType::AccountToUtxos => AccountToUtxos::read_fields(r, self).map(Into::into),
            TxType::AccountToAccount => AccountToAccount::read_fields(r, self).map(Into::into),
            TxType::SetGovVariable => SetGovVariable::read_fields(r, self).map(Into::into),
            TxType::AnyAccountsToAccounts => {
                AnyAccountsToAccounts::read_fields(r, self).map(Into::into)
            }
        };
        if record.is_err() {
            *r = start;
        }
        record
    }

    pub(crate) fn write_script(&self, w: &mut Writer, script: &ScriptRef) {
        write_script(w, self.scripts, script);
    }

    pub(crate) fn read_script(&self, r: &mut Reader<'_>) -> Result<ScriptRef> {
        read_script(r, self.scripts, self.network)
    }

    pub(crate) fn write_accounts(&self, w: &mut Writer, accounts: &AccountMap) {
        accounts.write(w, self.scripts);
    }

    pub(crate) fn read_accounts(&self, r: &mut Reader<'_>) -> Result<AccountMap> {
        AccountMap::read(r, self.scripts, self.network)
    }
}

/// Encode with the default codec (mainnet, scripts passed through).
pub fn encode(tx: &CustomTx) -> Result<Vec<u8>> {
    Codec::default().encode(tx)
}

/// Decode with the default codec (mainnet, scripts passed through).
pub fn decode(bytes: &[u8]) -> Result<Decoded> {
    Codec::default().decode(bytes)
}

/// Build a record from its JSON form, the `record` member of `--json` output.
///
/// Text that is not JSON at all is [`Error::InvalidRecord`]. A JSON value
/// that does not describe a record fails with the codec kind for what is
/// wrong: [`Error::MissingField`], [`Error::AmountOverflow`], or
/// [`Error::InvalidFieldType`].
pub fn from_json(text: &str) -> Result<CustomTx> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    serde_json::from_value(value).map_err(|e| {
        log::debug!("record rejected: {e}");
        record_error(e.to_string())
    })
}

/// Recover the error kind from a serde message. Value errors carry no
/// position, so the message is exactly what the failing deserializer wrote.
fn record_error(message: String) -> Error {
    if let Some(rest) = message.strip_prefix("missing field `") {
        return Error::MissingField(rest.trim_end_matches('`').to_string());
    }
    let overflow = Error::AmountOverflow(String::new()).to_string();
    if let Some(rest) = message.strip_prefix(overflow.as_str()) {
        return Error::AmountOverflow(rest.to_string());
    }
    let bad_amount = Error::invalid("amount", "").to_string();
    if let Some(rest) = message.strip_prefix(bad_amount.as_str()) {
        return Error::invalid("amount", rest);
    }
    if message.starts_with("unknown variant") {
        return Error::invalid("type", message);
    }
    Error::invalid("record", message)
}

/// Hex serde for fixed-width raw byte fields.
pub(crate) mod hex_array {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|b: Vec<u8>| D::Error::custom(format!("expected {N} bytes, got {}", b.len())))
    }
}
