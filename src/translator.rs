use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::interpolate::{Params, interpolate};
use crate::lazy::LazyString;
use crate::matcher::{Candidates, select_best_match};
use crate::store::CatalogStore;

#[derive(Debug, Default)]
struct TranslatorState {
    store: CatalogStore,
    // None is passthrough: every lookup returns the source text
    locale: Option<String>,
}

/// A translation context: registered catalogs plus the active locale.
///
/// Cloning a `Translator` yields another handle on the same context, so a
/// locale change through one handle is seen by every clone and by every
/// [`LazyString`] created from it. Independent contexts (one per request,
/// one per test) are built with [`Translator::new`].
///
/// ```
/// use stone_i18n::{Catalog, Params, Translator};
///
/// let mut fr = Catalog::new();
/// fr.with_message("Hello {name}", "Bonjour {name}");
///
/// let translator = Translator::new();
/// translator.add_catalogs([("fr", fr)]);
///
/// let greeting = translator.lazy_gettext_with("Hello {name}", Params::from([("name", "John")]));
/// assert_eq!(greeting, "Hello John");
///
/// translator.set_best_matching_locale(["fr_FR", "en"]);
/// assert_eq!(translator.locale().as_deref(), Some("fr"));
/// assert_eq!(greeting, "Bonjour John");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
    state: Arc<RwLock<TranslatorState>>,
}

impl Translator {
    pub fn new() -> Self {
        Translator::default()
    }

    // Writers never leave the state half-updated, so a poisoned lock is safe to reuse
    fn read(&self) -> RwLockReadGuard<'_, TranslatorState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TranslatorState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register catalogs, merging with catalogs already registered under the
    /// same locale key.
    pub fn add_catalogs<I, K>(&self, sources: I)
    where
        I: IntoIterator<Item = (K, Catalog)>,
        K: Into<String>,
    {
        // Drained before locking: the iterator may read from this translator
        let sources: Vec<(K, Catalog)> = sources.into_iter().collect();
        self.write().store.add_catalogs(sources);
    }

    pub fn add_catalog(&self, locale: impl Into<String>, catalog: Catalog) {
        self.write().store.add_catalog(locale, catalog);
    }

    /// Remove every catalog. The active locale is left untouched.
    pub fn clear_catalogs(&self) {
        self.write().store.clear_catalogs();
    }

    /// Registered locale keys in registration order.
    pub fn list_catalogs(&self) -> Vec<String> {
        self.read().store.list_catalogs()
    }

    /// A copy of the catalog registered under `locale`.
    pub fn catalog(&self, locale: &str) -> Option<Catalog> {
        self.read().store.get(locale).cloned()
    }

    /// The active locale key, `None` in passthrough mode.
    pub fn locale(&self) -> Option<String> {
        self.read().locale.clone()
    }

    /// Set the active locale key as given. `None` selects passthrough mode;
    /// a key without a registered catalog behaves the same way on lookup.
    pub fn set_locale(&self, locale: Option<&str>) {
        debug!("Active locale set to {:?}", locale);
        self.write().locale = locale.map(str::to_string);
    }

    /// Activate the registered locale that best matches `candidates` and
    /// return it. See [`crate::matcher`] for the rules.
    pub fn set_best_matching_locale(&self, candidates: impl Into<Candidates>) -> String {
        let mut state = self.write();
        let best = select_best_match(candidates, state.store.locales());
        debug!("Best matching locale is '{}'", best);
        state.locale = Some(best.clone());
        best
    }

    /// Translate `text` in the active locale.
    pub fn gettext(&self, text: &str) -> String {
        self.gettext_with(text, &Params::new())
    }

    /// Translate `text` in the active locale and fill its `{name}`
    /// placeholders from `params`. Untranslated text is interpolated as is.
    pub fn gettext_with(&self, text: &str, params: &Params) -> String {
        let state = self.read();
        let message = state
            .locale
            .as_deref()
            .and_then(|locale| state.store.lookup(locale, text, None));

        match message {
            Some(translated) => interpolate(translated, params).into_owned(),
            None => {
                trace!("No translation for '{}' in {:?}", text, state.locale);
                interpolate(text, params).into_owned()
            }
        }
    }

    /// Translate a message that has plural forms.
    ///
    /// The form is chosen by the active catalog's plural rule. Without a
    /// translation, `singular` is used when `n == 1` and `plural` otherwise.
    pub fn ngettext(&self, singular: &str, plural: &str, n: u64) -> String {
        self.ngettext_with(singular, plural, n, &Params::new())
    }

    /// Like [`Translator::ngettext`], filling placeholders from `params`.
    /// `{n}` expands to the count unless `params` defines `n`.
    pub fn ngettext_with(&self, singular: &str, plural: &str, n: u64, params: &Params) -> String {
        let mut params = params.clone();
        if !params.contains("n") {
            params.insert("n", n);
        }

        let state = self.read();
        let message = state
            .locale
            .as_deref()
            .and_then(|locale| state.store.lookup(locale, singular, Some(n)));

        match message {
            Some(translated) => interpolate(translated, &params).into_owned(),
            None => {
                trace!("No translation for '{}' in {:?}", singular, state.locale);
                let source = if n == 1 { singular } else { plural };
                interpolate(source, &params).into_owned()
            }
        }
    }

    /// A string that translates `text` each time it is read.
    pub fn lazy_gettext(&self, text: &str) -> LazyString {
        LazyString::new(self, text)
    }

    pub fn lazy_gettext_with(&self, text: &str, params: Params) -> LazyString {
        LazyString::with_params(self, text, params)
    }

    /// A plural string that translates each time it is read.
    pub fn lazy_ngettext(&self, singular: &str, plural: &str, n: u64) -> LazyString {
        LazyString::plural(self, singular, plural, n, Params::new())
    }

    pub fn lazy_ngettext_with(
        &self,
        singular: &str,
        plural: &str,
        n: u64,
        params: Params,
    ) -> LazyString {
        LazyString::plural(self, singular, plural, n, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plural::PluralRule;

    fn translator() -> Translator {
        let rule = PluralRule::parse("nplurals=2; plural=(n > 1);").unwrap();
        let mut fr = Catalog::with_plural_rule(rule);
        fr.with_message("Hello World", "Bonjour le monde")
            .with_message("Hello {name}", "Bonjour {name}")
            .with_forms(
                "{n} apple",
                vec!["{n} pomme".to_string(), "{n} pommes".to_string()],
            );

        let mut it = Catalog::new();
        it.with_message("Hello World", "Buongiorno il mondo")
            .with_message("Hello {name}", "Buongiorno {name}");

        let translator = Translator::new();
        translator.add_catalogs([("en", Catalog::new()), ("fr", fr), ("it", it)]);
        translator
    }

    #[test]
    fn test_initial_state_is_passthrough() {
        let translator = Translator::new();
        assert_eq!(translator.locale(), None);
        assert!(translator.list_catalogs().is_empty());
        assert_eq!(translator.gettext("Hello World"), "Hello World");
    }

    #[test]
    fn test_set_locale() {
        let translator = translator();
        translator.set_locale(Some("fr"));
        assert_eq!(translator.locale().as_deref(), Some("fr"));
        translator.set_locale(None);
        assert_eq!(translator.locale(), None);
    }

    #[test]
    fn test_gettext() {
        let translator = translator();
        for (locale, expected) in [
            (None, "Hello World"),
            (Some("xx"), "Hello World"),
            (Some("en"), "Hello World"),
            (Some("fr"), "Bonjour le monde"),
            (Some("it"), "Buongiorno il mondo"),
        ] {
            translator.set_locale(locale);
            assert_eq!(translator.gettext("Hello World"), expected, "locale {:?}", locale);
        }
    }

    #[test]
    fn test_gettext_with_params() {
        let translator = translator();
        let params = Params::from([("name", "John")]);
        for (locale, expected) in [
            (None, "Hello John"),
            (Some("xx"), "Hello John"),
            (Some("en"), "Hello John"),
            (Some("fr"), "Bonjour John"),
            (Some("it"), "Buongiorno John"),
        ] {
            translator.set_locale(locale);
            assert_eq!(
                translator.gettext_with("Hello {name}", &params),
                expected,
                "locale {:?}",
                locale
            );
        }
    }

    #[test]
    fn test_set_best_matching_locale() {
        let translator = translator();
        assert_eq!(translator.set_best_matching_locale("FR"), "fr");
        assert_eq!(translator.locale().as_deref(), Some("fr"));

        assert_eq!(translator.set_best_matching_locale(["xx", "it_IT"]), "it");
        assert_eq!(translator.gettext("Hello World"), "Buongiorno il mondo");

        assert_eq!(translator.set_best_matching_locale("foobarbaz"), "c");
        assert_eq!(translator.locale().as_deref(), Some("c"));
        assert_eq!(translator.gettext("Hello World"), "Hello World");
    }

    #[test]
    fn test_ngettext() {
        let translator = translator();

        translator.set_locale(None);
        assert_eq!(translator.ngettext("{n} apple", "{n} apples", 1), "1 apple");
        assert_eq!(translator.ngettext("{n} apple", "{n} apples", 0), "0 apples");
        assert_eq!(translator.ngettext("{n} apple", "{n} apples", 3), "3 apples");

        translator.set_locale(Some("fr"));
        assert_eq!(translator.ngettext("{n} apple", "{n} apples", 0), "0 pomme");
        assert_eq!(translator.ngettext("{n} apple", "{n} apples", 1), "1 pomme");
        assert_eq!(translator.ngettext("{n} apple", "{n} apples", 3), "3 pommes");
    }

    #[test]
    fn test_ngettext_explicit_n_param() {
        let translator = translator();
        let params = Params::from([("n", "many")]);
        assert_eq!(
            translator.ngettext_with("{n} apple", "{n} apples", 3, &params),
            "many apples"
        );
    }

    #[test]
    fn test_clones_share_state() {
        let translator = translator();
        let other = translator.clone();
        other.set_locale(Some("it"));
        assert_eq!(translator.gettext("Hello World"), "Buongiorno il mondo");

        other.clear_catalogs();
        assert!(translator.list_catalogs().is_empty());
        assert_eq!(translator.locale().as_deref(), Some("it"));
        assert_eq!(translator.gettext("Hello World"), "Hello World");
    }

    #[test]
    fn test_independent_contexts() {
        let first = translator();
        let second = translator();
        first.set_locale(Some("fr"));
        second.set_locale(Some("it"));
        assert_eq!(first.gettext("Hello World"), "Bonjour le monde");
        assert_eq!(second.gettext("Hello World"), "Buongiorno il mondo");
    }

    #[test]
    fn test_add_catalogs_from_iterator_reading_translator() {
        let translator = translator();
        translator.set_locale(Some("fr"));

        let sources = ["fr_CA", "fr_BE"].into_iter().map(|locale| {
            let mut catalog = Catalog::new();
            catalog.with_message("Hello World", &translator.gettext("Hello World"));
            (locale, catalog)
        });
        translator.add_catalogs(sources);

        translator.set_locale(Some("fr_BE"));
        assert_eq!(translator.gettext("Hello World"), "Bonjour le monde");
        assert_eq!(translator.list_catalogs(), vec!["en", "fr", "it", "fr_CA", "fr_BE"]);
    }

    #[test]
    fn test_catalog_copy() {
        let translator = translator();
        let fr = translator.catalog("fr").unwrap();
        assert_eq!(fr.get("Hello World"), Some("Bonjour le monde"));
        assert!(translator.catalog("de").is_none());
    }
}
