//! zotzen - pair citation records with archival deposits
//!
//! Command-line front end over zotzen-core: creates paired
//! (citation, deposit) records, inspects and repairs their linkage, and
//! pushes metadata and file attachments from the citation side into the
//! archive side.

mod orchestrator;
mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pair citation records with archival deposits.
#[derive(Parser, Debug)]
#[command(name = "zotzen", about = "Link a reference manager with a research-data repository")]
pub struct Cli {
    /// Create a new paired (citation, deposit) record
    #[arg(long)]
    pub new: bool,

    /// Title of the new citation record
    #[arg(long)]
    pub title: Option<String>,

    /// Path of an item JSON file for the new citation record
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Treat a bare item key as belonging to this group library
    #[arg(long)]
    pub group: Option<String>,

    /// Citation record reference: deep link, group:key, or bare key
    pub zot: Option<String>,

    /// Show the citation record and its linkage state
    #[arg(long)]
    pub show: bool,

    /// Open the citation and deposit links in the browser
    #[arg(long)]
    pub open: bool,

    /// Obtain the archive DOI, creating a deposit if none exists
    #[arg(long)]
    pub getdoi: bool,

    /// Path of the deposit creation template JSON
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Link to an explicit archive record (DOI or numeric record id)
    #[arg(long, value_name = "ID")]
    pub zen: Option<String>,

    /// Sync citation metadata into the archive record
    #[arg(long)]
    pub sync: bool,

    /// Push file attachments into the archive record
    #[arg(long)]
    pub push: bool,

    /// Attachment filename extension to push
    #[arg(long = "type", value_name = "EXT", default_value = "pdf")]
    pub attachment_type: String,

    /// Publish the archive record
    #[arg(long)]
    pub publish: bool,

    /// Interactively install credentials for both helpers
    #[arg(long)]
    pub install: bool,

    /// Dump raw failure details
    #[arg(long)]
    pub debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "zotzen=debug,zotzen_core=debug" } else { "zotzen=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = orchestrator::run(&cli) {
        eprintln!("Error: {err}");
        if cli.debug {
            eprintln!("{err:?}");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_invocation() {
        let cli = Cli::try_parse_from(["zotzen", "--new", "--title", "A Study", "--open"]).unwrap();
        assert!(cli.new);
        assert_eq!(cli.title.as_deref(), Some("A Study"));
        assert!(cli.open);
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_inspect_invocation() {
        let cli = Cli::try_parse_from([
            "zotzen",
            "2259720:ABCD1234",
            "--sync",
            "--push",
            "--type",
            "csv",
        ])
        .unwrap();
        assert_eq!(cli.zot.as_deref(), Some("2259720:ABCD1234"));
        assert!(cli.sync);
        assert!(cli.push);
        assert_eq!(cli.attachment_type, "csv");
    }

    #[test]
    fn test_attachment_type_defaults_to_pdf() {
        let cli = Cli::try_parse_from(["zotzen", "KEY", "--push"]).unwrap();
        assert_eq!(cli.attachment_type, "pdf");
    }

    #[test]
    fn test_parse_explicit_link() {
        let cli = Cli::try_parse_from(["zotzen", "KEY", "--zen", "10.5281/zenodo.123"]).unwrap();
        assert_eq!(cli.zen.as_deref(), Some("10.5281/zenodo.123"));
    }
}
