//! # roster-cli — Command-Line Front End
//!
//! Provides the `roster` binary on top of [`roster_format`].
//!
//! ## Subcommands
//!
//! - `roster load` — Full document validation with a summary or a
//!   normalized JSON dump.
//! - `roster orgs` — Streams organizations in source order, or runs the
//!   structural pre-flight with `--check`.
//! - `roster export` — Re-exports identities or organizations.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | success |
//! | 1 | the input was rejected as an invalid document |
//! | 2 | operational failure (unreadable input, unwritable output, bad configuration) |
//!
//! Validation failures are reported as `FAIL:` lines on the command's
//! output; operational failures surface as errors from the handler.

pub mod config;
pub mod export;
pub mod load;
pub mod orgs;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use roster_core::InvalidFormatError;

/// Exit code for a successful run.
pub const EXIT_OK: u8 = 0;

/// Exit code for an input rejected by the parsers.
pub const EXIT_INVALID: u8 = 1;

/// Exit code for I/O and configuration failures.
pub const EXIT_OPERATIONAL: u8 = 2;

/// Read a document from disk.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Write a `FAIL:` line for a rejected document and return [`EXIT_INVALID`].
pub fn report_invalid(out: &mut impl Write, path: &Path, err: &InvalidFormatError) -> Result<u8> {
    tracing::debug!(path = %path.display(), error = ?err, "document rejected");
    writeln!(out, "FAIL: {}: {err}", path.display())?;
    Ok(EXIT_INVALID)
}

/// Pretty-print `value` followed by a newline, to a file or to `out`.
pub fn emit_json(out: &mut impl Write, value: &serde_json::Value, dest: Option<&Path>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    text.push('\n');
    match dest {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => out.write_all(text.as_bytes())?,
    }
    Ok(())
}
