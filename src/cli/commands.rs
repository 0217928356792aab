//! Command implementations for the lunrdex CLI.

use std::fs;

use log::info;

use crate::builder::IndexFile;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::Document;
use crate::error::{LunrdexError, Result};

/// Execute a CLI command.
pub fn execute_command(args: LunrdexArgs) -> Result<()> {
    match &args.command {
        Command::Upsert(upsert_args) => upsert_document(upsert_args.clone(), &args),
        Command::Get(get_args) => get_document(get_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Add or replace a page in an index file.
fn upsert_document(args: UpsertArgs, cli_args: &LunrdexArgs) -> Result<()> {
    let body = match (&args.body.body, &args.body.body_file) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => {
            if cli_args.verbosity() > 1 {
                println!("Reading body from: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        (None, None) => String::new(),
    };

    let doc = Document::new(args.id, args.title, args.keywords, body);
    let outcome = IndexFile::new(&args.index_file).upsert(&doc)?;
    info!("Upserted {} into {}", doc.id, args.index_file.display());

    let result = UpsertResult {
        index_file: args.index_file.display().to_string(),
        id: doc.id,
        replaced: outcome.replaced,
        total_documents: outcome.total_documents,
    };

    output_result("Page indexed", &result, cli_args)
}

/// Print a stored page.
fn get_document(args: GetArgs, cli_args: &LunrdexArgs) -> Result<()> {
    let index = existing_index_file(&args.index_file)?.load()?;

    let document = match index.get_doc(&args.id) {
        Some(doc) => doc.clone(),
        None if index.has_doc(&args.id) => {
            return Err(LunrdexError::other(format!(
                "Document {} is indexed but not stored",
                args.id
            )));
        }
        None => return Err(LunrdexError::not_found(format!("document {}", args.id))),
    };

    let result = DocumentResult {
        index_file: args.index_file.display().to_string(),
        document,
    };

    output_result("Stored page", &result, cli_args)
}

/// Show index statistics.
fn show_stats(args: StatsArgs, cli_args: &LunrdexArgs) -> Result<()> {
    let index = existing_index_file(&args.index_file)?.load()?;

    let result = StatsResult {
        index_file: args.index_file.display().to_string(),
        stats: index.stats(),
    };

    output_result("Index statistics", &result, cli_args)
}

fn existing_index_file(path: &std::path::Path) -> Result<IndexFile> {
    let file = IndexFile::new(path);
    if !file.exists() {
        return Err(LunrdexError::not_found(format!(
            "index file {}",
            path.display()
        )));
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> LunrdexArgs {
        LunrdexArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_upsert_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("index.json");
        let index_arg = index_path.to_str().unwrap();

        execute_command(parse(&[
            "lunrdex", "-q", "upsert", index_arg, "--id", "a.html", "--title", "Agent",
        ]))
        .unwrap();
        execute_command(parse(&["lunrdex", "-q", "get", index_arg, "a.html"])).unwrap();
        execute_command(parse(&["lunrdex", "-q", "-f", "json", "stats", index_arg])).unwrap();

        let index = IndexFile::new(&index_path).load().unwrap();
        assert_eq!(index.get_doc("a.html").unwrap().title, "Agent");
    }

    #[test]
    fn test_upsert_body_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("index.json");
        let body_path = temp_dir.path().join("body.txt");
        fs::write(&body_path, "Dragons breathe fire").unwrap();

        execute_command(parse(&[
            "lunrdex",
            "-q",
            "upsert",
            index_path.to_str().unwrap(),
            "--id",
            "d.html",
            "--body-file",
            body_path.to_str().unwrap(),
        ]))
        .unwrap();

        let index = IndexFile::new(&index_path).load().unwrap();
        assert_eq!(index.matching_refs("body", "dragon").unwrap(), vec!["d.html"]);
    }

    #[test]
    fn test_missing_index_file() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("missing.json");
        let index_arg = index_path.to_str().unwrap();

        assert!(execute_command(parse(&["lunrdex", "-q", "stats", index_arg])).is_err());
        assert!(execute_command(parse(&["lunrdex", "-q", "get", index_arg, "a"])).is_err());
        assert!(!index_path.exists());
    }

    #[test]
    fn test_get_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let index_path = temp_dir.path().join("index.json");
        IndexFile::new(&index_path)
            .upsert(&Document::new("a.html", "", "", ""))
            .unwrap();

        let err = execute_command(parse(&[
            "lunrdex",
            "-q",
            "get",
            index_path.to_str().unwrap(),
            "b.html",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("b.html"));
    }
}
