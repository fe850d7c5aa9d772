//! dftx - codec and inspector for DfTx custom transaction payloads.
//!
//! A DfTx payload is the data an application-defined transaction carries:
//! the four-byte signature `DfTx`, a one-byte ASCII tag naming the record
//! kind, then that kind's fields in a fixed order.
//!
//! # Features
//!
//! - Encode and decode all sixteen record kinds (masternodes, tokens,
//!   pools, accounts, governance)
//! - Exact fixed-point amounts (units of 10^-8, never floats)
//! - Pluggable script model for address-script validation
//! - Decode from file, hex string, or stdin with auto-detection
//! - Pretty terminal output, JSON output, or a raw hex breakdown
//! - Build payloads from JSON records
//! - Validation mode with exit codes

pub mod cli;
pub mod codec;
pub mod error;
pub mod format;
pub mod input;
pub mod record;

pub use cli::Args;
pub use codec::{Network, RawScripts, ScriptModel};
pub use error::{Error, Result};
pub use record::{Codec, CustomTx, Decoded, TxType, decode, encode, from_json};

use cli::Command;
use format::{format_output, format_tags};
use input::{read_input, read_record_text};

/// Run dftx with the given arguments.
pub fn run(args: &Args) -> Result<()> {
    let codec = Codec::new(args.network, &RawScripts);

    match &args.command {
        Some(Command::Encode { record }) => {
            let text = read_record_text(record)?;
            let tx = from_json(&text)?;
            log::info!("encoding {} record", tx.tx_type().name());
            println!("{}", hex::encode(codec.encode(&tx)?));
        }

        Some(Command::Tags) => println!("{}", format_tags(args)),

        None => {
            let bytes = read_input(&args.input_spec())?;
            log::info!(
                "decoding {} byte payload on {}",
                bytes.len(),
                args.network.as_str()
            );
            let decoded = codec.decode(&bytes)?;

            // Check mode: the payload decoded, nothing to print
            if args.check {
                return Ok(());
            }

            println!("{}", format_output(&decoded, &bytes, args)?);
        }
    }

    Ok(())
}
