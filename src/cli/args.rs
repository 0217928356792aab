//! Command line argument parsing for the lunrdex CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// lunrdex - builds elasticlunr search indexes one page at a time
#[derive(Parser, Debug, Clone)]
#[command(name = "lunrdex")]
#[command(about = "Incrementally builds elasticlunr-compatible search indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LunrdexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LunrdexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a page to an index file, replacing any page with the same id
    Upsert(UpsertArgs),

    /// Print a stored page
    Get(GetArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for upserting a page
#[derive(Parser, Debug, Clone)]
pub struct UpsertArgs {
    /// Path to the index file (created if missing)
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Page id, typically its URL
    #[arg(long)]
    pub id: String,

    /// Page title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Page keywords
    #[arg(long, default_value = "")]
    pub keywords: String,

    #[command(flatten)]
    pub body: BodySource,
}

/// Where the page body comes from
#[derive(Args, Debug, Clone)]
#[group(multiple = false)]
pub struct BodySource {
    /// Page body text
    #[arg(long)]
    pub body: Option<String>,

    /// Read the page body from a file
    #[arg(long, value_name = "FILE")]
    pub body_file: Option<PathBuf>,
}

/// Arguments for printing a page
#[derive(Parser, Debug, Clone)]
pub struct GetArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Page id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_upsert_command() {
        let args = LunrdexArgs::try_parse_from([
            "lunrdex",
            "upsert",
            "public/search_index.json",
            "--id",
            "agent.html",
            "--title",
            "Agent",
            "--body",
            "The agent collects metrics.",
        ])
        .unwrap();

        if let Command::Upsert(upsert_args) = args.command {
            assert_eq!(
                upsert_args.index_file,
                PathBuf::from("public/search_index.json")
            );
            assert_eq!(upsert_args.id, "agent.html");
            assert_eq!(upsert_args.title, "Agent");
            assert_eq!(upsert_args.keywords, "");
            assert_eq!(
                upsert_args.body.body.as_deref(),
                Some("The agent collects metrics.")
            );
            assert!(upsert_args.body.body_file.is_none());
        } else {
            panic!("Expected Upsert command");
        }
    }

    #[test]
    fn test_body_and_body_file_conflict() {
        let result = LunrdexArgs::try_parse_from([
            "lunrdex",
            "upsert",
            "index.json",
            "--id",
            "a",
            "--body",
            "text",
            "--body-file",
            "body.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_upsert_requires_id() {
        let result = LunrdexArgs::try_parse_from(["lunrdex", "upsert", "index.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_command() {
        let args =
            LunrdexArgs::try_parse_from(["lunrdex", "get", "index.json", "agent.html"]).unwrap();

        if let Command::Get(get_args) = args.command {
            assert_eq!(get_args.index_file, PathBuf::from("index.json"));
            assert_eq!(get_args.id, "agent.html");
        } else {
            panic!("Expected Get command");
        }
    }

    #[test]
    fn test_global_options() {
        let args = LunrdexArgs::try_parse_from([
            "lunrdex", "-vv", "--format", "json", "--pretty", "stats", "index.json",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert!(matches!(args.command, Command::Stats(_)));
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            LunrdexArgs::try_parse_from(["lunrdex", "-v", "-q", "stats", "index.json"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = LunrdexArgs::try_parse_from(["lunrdex", "stats", "index.json"]).unwrap();
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
    }
}
