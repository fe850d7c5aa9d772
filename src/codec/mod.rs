//! Wire primitives shared by every custom transaction layout.

mod amount;
mod balances;
mod reader;
mod script;
pub mod varint;
mod writer;

pub use amount::{Amount, COIN, DECIMALS};
pub use balances::{AccountBalances, AccountMap, BalanceMap, TokenAmount, TokenId};
pub use reader::Reader;
pub use script::{Network, RawScripts, ScriptModel, ScriptRef, read_script, write_script};
pub use writer::Writer;
