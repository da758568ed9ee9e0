//! # Orgs Subcommand
//!
//! Streams the organizations of a document in source order, one line per
//! record, stopping at the first invalid record. With `--check` only the
//! structural pre-flight runs.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for the `roster orgs` subcommand.
#[derive(Args, Debug)]
pub struct OrgsArgs {
    /// Organizations (or full registry) document.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Only check that the document has an organizations section.
    #[arg(long)]
    pub check: bool,
}

/// Execute the orgs subcommand against stdout.
pub fn run_orgs(args: &OrgsArgs) -> Result<u8> {
    run_orgs_to(args, &mut std::io::stdout().lock())
}

/// Execute the orgs subcommand, writing to `out`.
pub fn run_orgs_to(args: &OrgsArgs, out: &mut impl Write) -> Result<u8> {
    let text = crate::read_input(&args.path)?;

    if args.check {
        return if roster_format::check(Some(&text)) {
            writeln!(out, "OK: {}", args.path.display())?;
            Ok(crate::EXIT_OK)
        } else {
            writeln!(out, "FAIL: {}: not an organizations document", args.path.display())?;
            Ok(crate::EXIT_INVALID)
        };
    }

    let mut count = 0usize;
    for org in roster_format::organizations(Some(&text)) {
        match org {
            Ok(org) => {
                count += 1;
                let plural = if org.domains.len() == 1 { "" } else { "s" };
                writeln!(out, "{} ({} domain{plural})", org.name, org.domains.len())?;
            }
            Err(e) => return crate::report_invalid(out, &args.path, &e),
        }
    }

    tracing::info!(organizations = count, "organizations streamed");
    Ok(crate::EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_doc(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("orgs.json");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn run(path: PathBuf, check: bool) -> (u8, String) {
        let mut out = Vec::new();
        let code = run_orgs_to(&OrgsArgs { path, check }, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn streams_in_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            dir.path(),
            r#"{"organizations": {
                "Unknown": [],
                "Example": [{"domain": "example.com", "is_top": true}],
                "Bitergia": [{"domain": "bitergia.com", "is_top": true}, {"domain": "bitergia.net", "is_top": true}]
            }}"#,
        );
        let (code, out) = run(path, false);
        assert_eq!(code, crate::EXIT_OK);
        assert_eq!(
            out,
            "Unknown (0 domains)\nExample (1 domain)\nBitergia (2 domains)\n"
        );
    }

    #[test]
    fn stops_at_first_invalid_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            dir.path(),
            r#"{"organizations": {
                "Unknown": [],
                "Example": [{"domain": "example.com", "is_top": "yes"}],
                "Bitergia": []
            }}"#,
        );
        let (code, out) = run(path, false);
        assert_eq!(code, crate::EXIT_INVALID);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Unknown (0 domains)");
        assert!(lines[1].ends_with("'is_top' must have a bool value"));
    }

    #[test]
    fn check_is_structural() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            dir.path(),
            r#"{"organizations": {"Example": [{"domain": "example.com"}]}}"#,
        );
        let (code, out) = run(path, true);
        assert_eq!(code, crate::EXIT_OK);
        assert!(out.starts_with("OK: "));
    }

    #[test]
    fn check_rejects_non_documents() {
        let dir = tempfile::tempdir().unwrap();
        let (code, out) = run(write_doc(dir.path(), "[]"), true);
        assert_eq!(code, crate::EXIT_INVALID);
        assert!(out.starts_with("FAIL: "));
    }
}
