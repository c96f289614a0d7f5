//! A process-wide translation context.
//!
//! Applications that only need one active locale can use these functions
//! instead of passing a [`Translator`] around. They all act on the same
//! shared translator, returned by [`translator`].

use std::sync::LazyLock;

use crate::catalog::Catalog;
use crate::interpolate::Params;
use crate::lazy::LazyString;
use crate::matcher::Candidates;
use crate::translator::Translator;

static TRANSLATOR: LazyLock<Translator> = LazyLock::new(Translator::new);

/// Handle on the process-wide translator.
pub fn translator() -> Translator {
    TRANSLATOR.clone()
}

pub fn add_catalogs<I, K>(sources: I)
where
    I: IntoIterator<Item = (K, Catalog)>,
    K: Into<String>,
{
    TRANSLATOR.add_catalogs(sources);
}

pub fn clear_catalogs() {
    TRANSLATOR.clear_catalogs();
}

pub fn list_catalogs() -> Vec<String> {
    TRANSLATOR.list_catalogs()
}

pub fn get_locale() -> Option<String> {
    TRANSLATOR.locale()
}

pub fn set_locale(locale: Option<&str>) {
    TRANSLATOR.set_locale(locale);
}

pub fn set_best_matching_locale(candidates: impl Into<Candidates>) -> String {
    TRANSLATOR.set_best_matching_locale(candidates)
}

pub fn gettext(text: &str) -> String {
    TRANSLATOR.gettext(text)
}

pub fn gettext_with(text: &str, params: &Params) -> String {
    TRANSLATOR.gettext_with(text, params)
}

pub fn ngettext(singular: &str, plural: &str, n: u64) -> String {
    TRANSLATOR.ngettext(singular, plural, n)
}

pub fn ngettext_with(singular: &str, plural: &str, n: u64, params: &Params) -> String {
    TRANSLATOR.ngettext_with(singular, plural, n, params)
}

pub fn lazy_gettext(text: &str) -> LazyString {
    TRANSLATOR.lazy_gettext(text)
}

pub fn lazy_gettext_with(text: &str, params: Params) -> LazyString {
    TRANSLATOR.lazy_gettext_with(text, params)
}

pub fn lazy_ngettext(singular: &str, plural: &str, n: u64) -> LazyString {
    TRANSLATOR.lazy_ngettext(singular, plural, n)
}

pub fn lazy_ngettext_with(singular: &str, plural: &str, n: u64, params: Params) -> LazyString {
    TRANSLATOR.lazy_ngettext_with(singular, plural, n, params)
}
