//! Render command
//!
//! Translates one key with string arguments, as an application would.

use glossa_i18n::{Scalar, Translator, TranslatorConfig};
use std::io::Write;

use crate::error::{CliError, CliResult};

pub fn execute(
    config: &TranslatorConfig,
    key: &str,
    args: &[String],
    strict: bool,
    out: &mut impl Write,
) -> CliResult<()> {
    let translator: Translator = Translator::from_config(config)?;

    if strict && !translator.has_key(key) {
        return Err(CliError::UnresolvedKey {
            key: key.to_string(),
            language: translator.current_language(),
        });
    }

    let args: Vec<Scalar> = args.iter().map(Scalar::from).collect();
    writeln!(out, "{}", translator.text(key, &args))?;
    Ok(())
}
