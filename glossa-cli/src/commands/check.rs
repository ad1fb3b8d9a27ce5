//! Catalog check command
//!
//! Compares every language against a reference and reports missing keys,
//! shape conflicts and placeholder mismatches.

use colored::Colorize;
use glossa_i18n::{LanguageSet, check, check_against};
use std::io::Write;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Run the check. Fails with [`CliError::CheckFailed`] unless clean.
pub fn execute(dir: &Path, reference: Option<&str>, out: &mut impl Write) -> CliResult<()> {
    let languages = LanguageSet::load_from_dir(dir)?;
    let report = match reference {
        Some(reference) => check_against(&languages, reference)?,
        None => check(&languages),
    };

    writeln!(
        out,
        "{} keys across {} languages (reference: {})",
        report.total_keys(),
        languages.len(),
        report.reference().unwrap_or("-")
    )?;

    let mut total = 0;
    for (id, issues) in report.iter() {
        let coverage = report.coverage(id).unwrap_or(1.0) * 100.0;
        if issues.is_empty() {
            writeln!(out, "  {} {} ({:.1}%)", "✓".green(), id, coverage)?;
            continue;
        }

        total += issues.count();
        writeln!(
            out,
            "  {} {} ({:.1}%, {} issues)",
            "✗".red(),
            id.bold(),
            coverage,
            issues.count()
        )?;
        for key in &issues.missing {
            writeln!(out, "      {} {}", "missing".yellow(), key)?;
        }
        for key in &issues.shape_conflicts {
            writeln!(out, "      {} {}", "not a string".yellow(), key)?;
        }
        for mismatch in &issues.placeholder_mismatches {
            writeln!(
                out,
                "      {} {} uses {:?}, expected {:?}",
                "placeholders".yellow(),
                mismatch.key,
                mismatch.found,
                mismatch.expected
            )?;
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::CheckFailed(total))
    }
}
