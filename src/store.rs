use std::collections::HashMap;

use tracing::debug;

use crate::catalog::{Catalog, merge_catalogs};

/// Catalogs keyed by the locale string they were registered under.
///
/// Keys are stored as given (`fr-be` stays `fr-be`); matching across
/// spellings is done by [`crate::matcher`]. Registration order is kept since
/// the matcher breaks ties with it.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    // Keyed by raw locale string
    // e.g. catalogs["fr"].get("Hello") = "Bonjour"
    //      catalogs["fr_FR"].get("Hello") = "Bonjour"
    //      catalogs["fr-be"].get("Hello") = "Bonjour"
    catalogs: HashMap<String, Catalog>,
    order: Vec<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        CatalogStore::default()
    }

    /// Register every `(locale, catalog)` pair, merging into catalogs that
    /// are already registered under the same key.
    pub fn add_catalogs<I, K>(&mut self, sources: I)
    where
        I: IntoIterator<Item = (K, Catalog)>,
        K: Into<String>,
    {
        for (locale, catalog) in sources {
            self.add_catalog(locale, catalog);
        }
    }

    pub fn add_catalog(&mut self, locale: impl Into<String>, catalog: Catalog) {
        let locale = locale.into();
        match self.catalogs.remove(&locale) {
            Some(existing) => {
                debug!(
                    "Merging {} messages into catalog '{}' ({} messages)",
                    catalog.len(),
                    locale,
                    existing.len()
                );
                self.catalogs.insert(locale, merge_catalogs(catalog, existing));
            }
            None => {
                debug!("Registering catalog '{}' ({} messages)", locale, catalog.len());
                self.order.push(locale.clone());
                self.catalogs.insert(locale, catalog);
            }
        }
    }

    pub fn clear_catalogs(&mut self) {
        debug!("Clearing {} catalogs", self.order.len());
        self.catalogs.clear();
        self.order.clear();
    }

    /// Registered locale keys, each once, in registration order.
    pub fn list_catalogs(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Registered locale keys without cloning.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.catalogs.contains_key(locale)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Translated form of `key` in the catalog registered as `locale`.
    ///
    /// `count` selects a plural form through the catalog's rule. Returns
    /// `None` when the locale or the key is not registered.
    pub fn lookup(&self, locale: &str, key: &str, count: Option<u64>) -> Option<&str> {
        self.catalogs.get(locale)?.lookup(key, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plural::PluralRule;

    fn catalog(messages: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (key, message) in messages {
            catalog.with_message(key, message);
        }
        catalog
    }

    #[test]
    fn test_add_and_lookup() {
        let mut store = CatalogStore::new();
        store.add_catalogs(vec![
            ("fr", catalog(&[("Hello", "Bonjour")])),
            ("it", catalog(&[("Hello", "Buongiorno")])),
        ]);

        assert_eq!(store.lookup("fr", "Hello", None), Some("Bonjour"));
        assert_eq!(store.lookup("it", "Hello", None), Some("Buongiorno"));
        assert_eq!(store.lookup("fr", "World", None), None);
        assert_eq!(store.lookup("de", "Hello", None), None);
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let mut store = CatalogStore::new();
        store.add_catalog("fr-be", catalog(&[("Hello", "Bonjour")]));
        assert!(store.contains("fr-be"));
        assert!(!store.contains("fr_BE"));
        assert_eq!(store.lookup("fr_BE", "Hello", None), None);
    }

    #[test]
    fn test_merge_on_repeated_registration() {
        let mut store = CatalogStore::new();
        store.add_catalogs([
            ("fr", catalog(&[("Hello", "Bonjour"), ("World", "Monde")])),
            ("it", catalog(&[("Hello", "Buongiorno")])),
        ]);
        store.add_catalogs([
            ("fr", catalog(&[("Hello", "Salut")])),
            ("en", catalog(&[("Hello", "Hi")])),
        ]);

        assert_eq!(store.lookup("fr", "Hello", None), Some("Salut"));
        assert_eq!(store.lookup("fr", "World", None), Some("Monde"));
        assert_eq!(store.lookup("it", "Hello", None), Some("Buongiorno"));
        assert_eq!(store.lookup("en", "Hello", None), Some("Hi"));
    }

    #[test]
    fn test_list_catalogs_has_each_key_once() {
        let mut store = CatalogStore::new();
        store.add_catalogs([("fr", Catalog::new()), ("en", Catalog::new())]);
        store.add_catalogs([("fr", Catalog::new()), ("it", Catalog::new())]);
        store.add_catalog("fr", Catalog::new());

        assert_eq!(store.list_catalogs(), vec!["fr", "en", "it"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_clear_catalogs() {
        let mut store = CatalogStore::new();
        store.add_catalog("fr", catalog(&[("Hello", "Bonjour")]));
        store.clear_catalogs();

        assert!(store.is_empty());
        assert!(store.list_catalogs().is_empty());
        assert_eq!(store.lookup("fr", "Hello", None), None);

        // Registration order restarts after a clear
        store.add_catalog("it", Catalog::new());
        store.add_catalog("fr", Catalog::new());
        assert_eq!(store.locales().collect::<Vec<_>>(), vec!["it", "fr"]);
    }

    #[test]
    fn test_plural_lookup() {
        let rule = PluralRule::parse("nplurals=2; plural=(n > 1);").unwrap();
        let mut fr = Catalog::with_plural_rule(rule);
        fr.with_forms("apple", vec!["pomme".to_string(), "pommes".to_string()]);
        let mut store = CatalogStore::new();
        store.add_catalog("fr", fr);

        assert_eq!(store.lookup("fr", "apple", Some(1)), Some("pomme"));
        assert_eq!(store.lookup("fr", "apple", Some(3)), Some("pommes"));
    }
}
