//! Translator
//!
//! Combines a [`LanguageSet`] with the resolver and the substitution engine.
//! Holds the active-language selection and the optional rich-content
//! composer.

use crate::catalog::Catalog;
use crate::config::TranslatorConfig;
use crate::language::LanguageSet;
use crate::resolve::{self, Resolved};
use crate::template::{Arg, ComposeFn, Scalar, Segment, Translation, substitute};
use crate::{I18nError, Result};
use parking_lot::RwLock;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Selection {
    id: Arc<str>,
    catalog: Arc<Catalog>,
}

/// Translation façade.
///
/// `R` is the rich-content type accepted as arguments and produced by the
/// composer. Text-only translators use the default, [`Infallible`].
///
/// The current-language selector can be changed through a shared reference
/// (single writer, many readers). Callers that need a different language for
/// a single call should use [`translate_in`](Self::translate_in) or
/// [`translate_with`](Self::translate_with) instead of switching it.
///
/// ```
/// use glossa_i18n::{Catalog, LanguageSet, Translator, t};
///
/// let languages = LanguageSet::new()
///     .with_language("en", Catalog::new().with_text("hello", "Hello, {0}!"))
///     .with_language("zh", Catalog::new().with_text("hello", "你好，{0}！"));
///
/// let translator: Translator = Translator::new(languages, "en").unwrap();
/// assert_eq!(t!(translator, "hello", "Ada"), "Hello, Ada!");
///
/// translator.set_language("zh").unwrap();
/// assert_eq!(t!(translator, "hello", "Ada"), "你好，Ada！");
/// ```
pub struct Translator<R = Infallible> {
    languages: LanguageSet,
    default_language: Arc<str>,
    current: RwLock<Selection>,
    composer: Option<Arc<ComposeFn<R>>>,
}

impl<R> Translator<R> {
    /// Create a translator with `default_language` selected.
    ///
    /// Fails if the set is empty or does not contain `default_language`.
    pub fn new(languages: LanguageSet, default_language: impl Into<String>) -> Result<Self> {
        let default_language: String = default_language.into();

        if languages.is_empty() {
            return Err(I18nError::EmptyLanguageSet);
        }
        let catalog = languages
            .get(&default_language)
            .cloned()
            .ok_or_else(|| I18nError::UnknownLanguage(default_language.clone()))?;

        let default_language: Arc<str> = Arc::from(default_language);
        Ok(Self {
            current: RwLock::new(Selection {
                id: Arc::clone(&default_language),
                catalog,
            }),
            languages,
            default_language,
            composer: None,
        })
    }

    /// Load catalogs and select languages as described by `config`.
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let languages = LanguageSet::load_from_dir(&config.catalog_dir)?;
        let translator = Self::new(languages, config.default_language.as_str())?;
        if let Some(language) = &config.language {
            translator.set_language(language)?;
        }

        glossa_log::info!(
            target: "glossa::translate",
            "translator ready: {} languages from {}, current `{}`",
            translator.languages.len(),
            config.catalog_dir.display(),
            translator.current_language()
        );
        Ok(translator)
    }

    /// Install the composer used when an argument is rich content.
    pub fn with_composer<F>(mut self, composer: F) -> Self
    where
        F: Fn(&[Segment<'_, R>]) -> R + Send + Sync + 'static,
    {
        self.composer = Some(Arc::new(composer));
        self
    }

    pub fn has_composer(&self) -> bool {
        self.composer.is_some()
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Identifier of the selected language.
    pub fn current_language(&self) -> String {
        self.current.read().id.to_string()
    }

    /// Catalog of the selected language.
    pub fn current_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read().catalog)
    }

    /// Select the language used by [`translate`](Self::translate).
    ///
    /// An unknown identifier leaves the selection unchanged.
    pub fn set_language(&self, id: &str) -> Result<()> {
        let (id, catalog) = self
            .languages
            .get(id)
            .map(|catalog| (Arc::<str>::from(id), Arc::clone(catalog)))
            .ok_or_else(|| I18nError::UnknownLanguage(id.to_string()))?;

        glossa_log::debug!(target: "glossa::translate", "switching language to `{}`", id);
        *self.current.write() = Selection { id, catalog };
        Ok(())
    }

    /// Select the default language again.
    pub fn reset_language(&self) {
        if let Some(catalog) = self.languages.get(&self.default_language) {
            *self.current.write() = Selection {
                id: Arc::clone(&self.default_language),
                catalog: Arc::clone(catalog),
            };
        }
    }

    /// Whether `key` resolves to a template in the selected language.
    pub fn has_key(&self, key: &str) -> bool {
        matches!(
            resolve::resolve(&self.current_catalog(), key),
            Resolved::Template(_)
        )
    }

    /// Translate `key` in the selected language.
    ///
    /// Unknown keys and keys naming a sub-tree are logged and produce empty
    /// text. The only error is [`I18nError::MissingComposer`]: a rich
    /// argument was supplied and no composer is installed.
    pub fn translate(&self, key: &str, args: &[Arg<R>]) -> Result<Translation<R>> {
        let Selection { id, catalog } = self.current.read().clone();
        self.render(&catalog, &id, key, args)
    }

    /// Translate `key` against an explicit catalog, leaving the selection
    /// untouched.
    pub fn translate_with(
        &self,
        catalog: &Catalog,
        key: &str,
        args: &[Arg<R>],
    ) -> Result<Translation<R>> {
        let label = self
            .languages
            .iter()
            .find(|(_, known)| std::ptr::eq(*known, catalog))
            .map_or("<external>", |(id, _)| id);
        self.render(catalog, label, key, args)
    }

    /// Translate `key` in another known language, leaving the selection
    /// untouched.
    pub fn translate_in(&self, language: &str, key: &str, args: &[Arg<R>]) -> Result<Translation<R>> {
        let catalog = self
            .languages
            .get(language)
            .ok_or_else(|| I18nError::UnknownLanguage(language.to_string()))?;
        self.render(catalog, language, key, args)
    }

    /// Translate with scalar arguments only; never needs a composer.
    pub fn text(&self, key: &str, args: &[Scalar]) -> String {
        let args: Vec<Arg<R>> = args.iter().cloned().map(Arg::Scalar).collect();
        self.translate(key, &args)
            .ok()
            .and_then(Translation::into_text)
            .unwrap_or_default()
    }

    fn render(
        &self,
        catalog: &Catalog,
        language: &str,
        key: &str,
        args: &[Arg<R>],
    ) -> Result<Translation<R>> {
        let template = match resolve::lookup(catalog, key, language) {
            Ok(template) => template,
            Err(err) => {
                glossa_log::error!(target: "glossa::translate", "{}", err);
                return Ok(Translation::default());
            }
        };

        substitute(template, args)
            .render(self.composer.as_deref())
            .ok_or_else(|| I18nError::MissingComposer {
                key: key.to_string(),
            })
    }
}

impl<R> fmt::Debug for Translator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("languages", &self.languages.ids().collect::<Vec<_>>())
            .field("default_language", &self.default_language)
            .field("current_language", &self.current_language())
            .field("has_composer", &self.has_composer())
            .finish_non_exhaustive()
    }
}
