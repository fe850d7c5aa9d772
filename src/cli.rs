//! CLI argument parsing for dftx.

use crate::codec::Network;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and build DfTx custom transaction payloads.
///
/// Decodes the data payload of an application-defined transaction
/// (masternodes, tokens, pools, accounts, governance) into its typed fields.
#[derive(Parser, Debug)]
#[command(
    name = "dftx",
    version,
    about = "Inspect and build DfTx custom transaction payloads",
    after_help = r#"EXAMPLES:
    dftx 446654784703616263              Decode a hex payload (pretty)
    dftx payload.bin                     Decode a binary or hex file
    cat payload.hex | dftx               Read from stdin
    dftx 0x44665478... --json            JSON output
    dftx payload.bin --raw               Hex breakdown of the payload
    dftx payload.bin --check             Validate only (exit code)
    dftx encode record.json              Build a payload from a JSON record
    dftx tags                            List the custom transaction tags

ENVIRONMENT:
    DFTX_NETWORK   Default for --network (mainnet, testnet, regtest)"#
)]
pub struct Args {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Payload as hex (optionally 0x-prefixed) or a file path.
    /// Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Output as JSON.
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Output a hex breakdown of the payload.
    #[arg(long, short = 'r')]
    pub raw: bool,

    /// Validate only (exit code indicates result: 0=valid, 1=invalid).
    #[arg(long, short = 'c')]
    pub check: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Network handed to the script model.
    #[arg(long, value_enum, env = "DFTX_NETWORK", default_value_t = Network::Mainnet, global = true)]
    pub network: Network,

    /// Log to stderr; repeat for more detail (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a payload from a JSON record and print it as hex.
    ///
    /// The record is an object with a "type" field naming the kind
    /// (e.g. "createToken") plus that kind's fields.
    #[command(name = "encode")]
    Encode {
        /// JSON file, or "-" for stdin.
        #[arg(value_name = "RECORD")]
        record: String,
    },

    /// List every tag with its field layout.
    #[command(name = "tags")]
    Tags,
}

/// Specifies how to obtain input bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// Read from stdin.
    Stdin,
    /// Read from a file path.
    File(PathBuf),
    /// Parse hex string directly.
    Hex(String),
}

impl Args {
    /// Where the payload to decode comes from.
    pub fn input_spec(&self) -> InputSpec {
        match &self.input {
            None => InputSpec::Stdin,
            Some(s) if s == "-" => InputSpec::Stdin,
            Some(s) => InputSpec::detect(s),
        }
    }

    /// Log level for the -v count.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl InputSpec {
    /// Detect input type from a string argument.
    pub fn detect(s: &str) -> Self {
        if let Some(hex_str) = s.strip_prefix("0x") {
            return InputSpec::Hex(hex_str.to_string());
        }

        // Signature plus tag is already five bytes, so anything shorter
        // than ten hex digits is taken as a path.
        if s.len() >= 10 && s.len() % 2 == 0 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            return InputSpec::Hex(s.to_string());
        }

        InputSpec::File(PathBuf::from(s))
    }
}
