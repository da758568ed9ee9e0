//! # Load Subcommand
//!
//! Parses a full registry document and prints a summary, or with `--json`
//! the normalized document (sorted records, fresh `time` stamp).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use roster_core::Timestamp;
use roster_format::{export_identities, export_organizations, merge_dumps, Document};

/// Arguments for the `roster load` subcommand.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Registry document to load.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print the normalized document instead of a summary.
    #[arg(long)]
    pub json: bool,
}

/// Execute the load subcommand against stdout.
pub fn run_load(args: &LoadArgs) -> Result<u8> {
    run_load_to(args, &mut std::io::stdout().lock())
}

/// Execute the load subcommand, writing to `out`.
pub fn run_load_to(args: &LoadArgs, out: &mut impl Write) -> Result<u8> {
    let text = crate::read_input(&args.path)?;
    let doc = match Document::parse(Some(&text)) {
        Ok(doc) => doc,
        Err(e) => return crate::report_invalid(out, &args.path, &e),
    };

    if args.json {
        let time = Timestamp::now();
        let identities = export_identities(doc.identities(), None, time)
            .context("failed to export identities")?;
        let organizations = export_organizations(doc.organizations(), time)
            .context("failed to export organizations")?;
        let merged = merge_dumps(identities, organizations)
            .context("exporters produced an unexpected shape")?;
        crate::emit_json(out, &merged, None)?;
    } else {
        write_summary(out, &doc)?;
    }

    Ok(crate::EXIT_OK)
}

fn write_summary(out: &mut impl Write, doc: &Document) -> Result<()> {
    let uids = doc.identities();
    let identities: usize = uids.iter().map(|u| u.identities.len()).sum();
    let enrollments: usize = uids.iter().map(|u| u.enrollments.len()).sum();
    let domains: usize = doc.organizations().iter().map(|o| o.domains.len()).sum();

    writeln!(out, "Unique identities: {}", uids.len())?;
    writeln!(out, "Identities: {identities}")?;
    writeln!(out, "Enrollments: {enrollments}")?;
    writeln!(out, "Organizations: {}", doc.organizations().len())?;
    writeln!(out, "Domains: {domains}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const DOC: &str = r#"{
        "organizations": {
            "Example": [{"domain": "example.com", "is_top": true}],
            "Bitergia": []
        },
        "uidentities": {
            "b": {
                "uuid": "b",
                "identities": [{"id": "b", "name": "Jane Roe", "email": null, "username": null, "source": "scm"}],
                "enrollments": [{"organization": "Example", "start": "1900-01-01T00:00:00", "end": "2100-01-01T00:00:00"}]
            },
            "a": {"uuid": "a", "identities": [], "enrollments": []}
        }
    }"#;

    fn write_doc(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("registry.json");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn run(path: PathBuf, json: bool) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_load_to(&LoadArgs { path, json }, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn summary_counts_records() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(write_doc(dir.path(), DOC), false);
        assert_eq!(code, crate::EXIT_OK);
        assert_eq!(
            out,
            "Unique identities: 2\nIdentities: 1\nEnrollments: 1\nOrganizations: 2\nDomains: 1\n"
        );
    }

    #[test]
    fn json_output_is_normalized_and_reparses() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(write_doc(dir.path(), DOC), true);
        assert_eq!(code, crate::EXIT_OK);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let uuids: Vec<&String> = value["uidentities"].as_object().unwrap().keys().collect();
        assert_eq!(uuids, ["a", "b"]);
        assert!(value["time"].is_string());

        let reparsed: Document = out.parse().unwrap();
        assert_eq!(reparsed, Document::parse(Some(DOC)).unwrap());
    }

    #[test]
    fn invalid_document_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(write_doc(dir.path(), r#"{"organizations": {}}"#), false);
        assert_eq!(code, crate::EXIT_INVALID);
        assert!(out.starts_with("FAIL: "));
        assert!(out.ends_with("Attribute uidentities not found\n"));
    }

    #[test]
    fn empty_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(write_doc(dir.path(), ""), false);
        assert_eq!(code, crate::EXIT_INVALID);
        assert!(out.contains("stream cannot be empty or None"));
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = LoadArgs {
            path: dir.path().join("missing.json"),
            json: false,
        };
        assert!(run_load_to(&args, &mut Vec::new()).is_err());
    }
}
