//! # Export Subcommand
//!
//! Re-exports the identities or the organizations of a document in the
//! exchange format. Identities require a full document; organizations are
//! read with the stream parser, so an organizations-only document works
//! too.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use roster_core::{Organization, Timestamp};
use roster_format::{export_identities, export_organizations, Document};

/// Arguments for the `roster export` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("kind").required(true).args(["identities", "orgs"])))]
pub struct ExportArgs {
    /// Document to export from.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Export unique identities with their identities and enrollments.
    #[arg(long)]
    pub identities: bool,

    /// Export organizations with their domains.
    #[arg(long)]
    pub orgs: bool,

    /// Only export unique identities having an identity from this source.
    #[arg(long, requires = "identities")]
    pub source: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,
}

/// Execute the export subcommand against stdout.
pub fn run_export(args: &ExportArgs) -> Result<u8> {
    run_export_to(args, &mut std::io::stdout().lock())
}

/// Execute the export subcommand, writing to `out` unless `--output` is set.
pub fn run_export_to(args: &ExportArgs, out: &mut impl Write) -> Result<u8> {
    let text = crate::read_input(&args.path)?;
    let time = Timestamp::now();

    let dump = if args.orgs {
        let parsed = roster_format::organizations(Some(&text))
            .collect::<roster_format::Result<Vec<Organization>>>();
        let organizations = match parsed {
            Ok(orgs) => orgs,
            Err(e) => return crate::report_invalid(out, &args.path, &e),
        };
        export_organizations(&organizations, time).context("failed to export organizations")?
    } else {
        let doc = match Document::parse(Some(&text)) {
            Ok(doc) => doc,
            Err(e) => return crate::report_invalid(out, &args.path, &e),
        };
        export_identities(doc.identities(), args.source.as_deref(), time)
            .context("failed to export identities")?
    };

    crate::emit_json(out, &dump, args.output.as_deref())?;
    Ok(crate::EXIT_OK)
}
