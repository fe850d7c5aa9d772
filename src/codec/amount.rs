//! Fixed-point amounts with eight fractional digits.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of units in one whole coin.
pub const COIN: u64 = 100_000_000;

/// Fractional digits carried by an [`Amount`].
pub const DECIMALS: usize = 8;

/// Non-negative decimal value stored as an integer count of 10^-8 units,
/// which is exactly what goes on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(u64::MAX);

    /// Amount from raw 10^-8 units (the on-wire integer).
    pub const fn from_units(units: u64) -> Self {
        Amount(units)
    }

    /// Amount from a whole number of coins.
    pub fn from_coins(coins: u64) -> Result<Self> {
        coins
            .checked_mul(COIN)
            .map(Amount)
            .ok_or_else(|| Error::AmountOverflow(format!("{coins} * 10^8 exceeds u64")))
    }

    pub const fn units(self) -> u64 {
        self.0
    }

    pub const fn whole(self) -> u64 {
        self.0 / COIN
    }

    pub const fn fraction(self) -> u64 {
        self.0 % COIN
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:0width$}", self.whole(), self.fraction(), width = DECIMALS)
    }
}

/// Parses plain decimal notation: `"5"`, `"5.5"`, `"0.00000001"`.
impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(Error::invalid("amount", format!("negative value '{s}'")));
        }
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(Error::invalid("amount", "empty value"));
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid("amount", format!("not a decimal number '{s}'")));
        }
        if frac.len() > DECIMALS {
            return Err(Error::invalid(
                "amount",
                format!("more than {DECIMALS} fractional digits in '{s}'"),
            ));
        }

        let overflow = || Error::AmountOverflow(format!("'{s}' * 10^8 exceeds u64"));
        let whole_units = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| overflow())?
                .checked_mul(COIN)
                .ok_or_else(overflow)?
        };
        let frac_units = if frac.is_empty() {
            0
        } else {
            // Right-pad to eight digits: "5" -> 50000000.
            format!("{frac:0<DECIMALS$}")
                .parse::<u64>()
                .map_err(|_| Error::invalid("amount", format!("bad fraction in '{s}'")))?
        };
        whole_units
            .checked_add(frac_units)
            .map(Amount)
            .ok_or_else(overflow)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
