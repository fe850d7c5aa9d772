//! Pretty terminal output with colors and tables.

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::record::{Decoded, TxType};
use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table, presets};
use serde_json::Value as JsonValue;

/// Format a decoded payload as pretty terminal output.
pub fn format_pretty(decoded: &Decoded, input: &[u8], args: &Args) -> Result<String> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let tx_type = decoded.record.tx_type();
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n",
        tx_type.name().bold().cyan(),
        format!("('{}')", tx_type.as_char()).dimmed()
    ));
    output.push_str(&format!(
        "  {} {} bytes\n",
        "Consumed:".dimmed(),
        decoded.consumed
    ));
    let trailing = super::trailing(decoded, input);
    if !trailing.is_empty() {
        output.push_str(&format!(
            "  {} {}\n",
            "Trailing:".dimmed(),
            hex::encode(trailing).yellow()
        ));
    }
    output.push('\n');

    let json =
        serde_json::to_value(&decoded.record).map_err(|e| Error::FormatError(e.to_string()))?;
    let JsonValue::Object(fields) = json else {
        return Err(Error::FormatError("record is not an object".to_string()));
    };

    let mut table = new_table(&["Field", "Value"]);
    for (name, value) in fields.iter().filter(|(name, _)| name.as_str() != "type") {
        table.add_row(vec![Cell::new(name), Cell::new(render_value(value))]);
    }
    output.push_str(&table.to_string());
    Ok(output)
}

/// List every tag with its field layout.
pub fn format_tags(args: &Args) -> String {
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut table = new_table(&["Tag", "Hex", "Kind", "Fields"]);
    for tx_type in TxType::ALL {
        table.add_row(vec![
            Cell::new(tx_type.as_char()),
            Cell::new(format!("{:02x}", tx_type.as_byte())),
            Cell::new(tx_type.name()),
            Cell::new(tx_type.layout()),
        ]);
    }
    format!(
        "{} ({})\n{}",
        "Custom transaction tags".bold().cyan(),
        TxType::ALL.len(),
        table
    )
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Render one record field for the table.
///
/// Balance entries show as `amount@token`; account entries as
/// `owner: amount@token, ...`, one per line.
fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) if items.is_empty() => "(empty)".to_string(),
        JsonValue::Array(items) => items
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n"),
        JsonValue::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}: {}", k, render_value(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

fn render_entry(entry: &JsonValue) -> String {
    if let Some(balance) = render_balance(entry) {
        return balance;
    }
    match (entry.get("owner"), entry.get("balances")) {
        (Some(JsonValue::String(owner)), Some(JsonValue::Array(balances))) => {
            let rendered: Vec<String> = balances.iter().filter_map(render_balance).collect();
            format!("{}: {}", owner, rendered.join(", "))
        }
        _ => render_value(entry),
    }
}

fn render_balance(entry: &JsonValue) -> Option<String> {
    let token = entry.get("token")?.as_u64()?;
    let amount = entry.get("amount")?.as_str()?;
    Some(format!("{}@{}", amount, token))
}
