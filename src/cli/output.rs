//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{LunrdexArgs, OutputFormat};
use crate::document::Document;
use crate::error::Result;
use crate::index::IndexStats;

/// Result structure for a page upsert.
#[derive(Debug, Serialize)]
pub struct UpsertResult {
    pub index_file: String,
    pub id: String,
    pub replaced: bool,
    pub total_documents: usize,
}

/// Result structure for a page lookup.
#[derive(Debug, Serialize)]
pub struct DocumentResult {
    pub index_file: String,
    pub document: Document,
}

/// Result structure for index statistics.
#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub index_file: String,
    #[serde(flatten)]
    pub stats: IndexStats,
}

/// Output a command result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &LunrdexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &LunrdexArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print!("{}", format_human(&value, 0));
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LunrdexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Render a JSON value as indented `key: value` lines.
pub fn format_human(value: &serde_json::Value, indent: usize) -> String {
    use serde_json::Value;

    let pad = "  ".repeat(indent);
    let mut out = String::new();

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let label = key.replace('_', " ");
                match value {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format!("{pad}{label}:\n"));
                        out.push_str(&format_human(value, indent + 1));
                    }
                    _ => out.push_str(&format!("{pad}{label}: {}\n", scalar(value))),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        out.push_str(&format_human(item, indent));
                        out.push('\n');
                    }
                    _ => out.push_str(&format!("{pad}- {}\n", scalar(item))),
                }
            }
        }
        _ => out.push_str(&format!("{pad}{}\n", scalar(value))),
    }

    out
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
