//! Governance variables.

use super::{Codec, Record, TxType};
use crate::codec::{Reader, Writer};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tag `G`. Only the variable name is framed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGovVariable {
    pub name: String,
}

impl Record for SetGovVariable {
    const TYPE: TxType = TxType::SetGovVariable;

    fn write_fields(&self, w: &mut Writer, _codec: &Codec<'_>) -> Result<()> {
        w.write_str(&self.name);
        Ok(())
    }

    fn read_fields(r: &mut Reader<'_>, _codec: &Codec<'_>) -> Result<Self> {
        Ok(SetGovVariable {
            name: r.read_string()?,
        })
    }
}
