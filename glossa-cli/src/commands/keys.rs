//! Key listing command
//!
//! Prints every dotted key a catalog defines.

use colored::Colorize;
use glossa_i18n::{I18nError, LanguageSet};
use std::io::Write;
use std::path::Path;

use crate::error::CliResult;

/// List keys for one language, or for every language when `language` is
/// `None`.
pub fn execute(
    dir: &Path,
    language: Option<&str>,
    with_values: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    let languages = LanguageSet::load_from_dir(dir)?;

    let selected: Vec<&str> = match language {
        Some(id) if languages.contains(id) => vec![id],
        Some(id) => return Err(I18nError::UnknownLanguage(id.to_string()).into()),
        None => languages.ids().collect(),
    };

    for id in selected {
        let Some(catalog) = languages.get(id) else {
            continue;
        };
        if language.is_none() {
            writeln!(out, "{}", format!("[{}]", id).bright_cyan().bold())?;
        }
        for (key, template) in catalog.flatten() {
            if with_values {
                writeln!(out, "{} = {}", key, template.dimmed())?;
            } else {
                writeln!(out, "{}", key)?;
            }
        }
    }

    Ok(())
}
