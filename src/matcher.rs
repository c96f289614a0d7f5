//! Best-match selection of a registered locale.
//!
//! Candidates are tried in the order given. For each one, three tiers are
//! checked against the registered keys:
//!
//! 1. exact match, ignoring case and `_`/`-` (`fr_BE` finds `fr-be`)
//! 2. the candidate's bare language, when the candidate has a region
//!    (`de_LU` finds `de`)
//! 3. the first registered key sharing the candidate's language
//!    (`es` finds `es_ES` if it was registered before `es_AR`)
//!
//! The first candidate matching at any tier wins, even when a later
//! candidate would match more precisely. If none matches, the result is
//! [`FALLBACK_LOCALE`].

use tracing::{debug, trace};

use crate::locale::LocaleTag;

/// Returned when no candidate matches any registered locale.
pub const FALLBACK_LOCALE: &str = "c";

/// One locale string or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates(Vec<String>);

impl Candidates {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Candidates {
    fn from(candidate: &str) -> Self {
        Candidates(vec![candidate.to_string()])
    }
}

impl From<String> for Candidates {
    fn from(candidate: String) -> Self {
        Candidates(vec![candidate])
    }
}

impl From<&String> for Candidates {
    fn from(candidate: &String) -> Self {
        Candidates(vec![candidate.clone()])
    }
}

impl From<Vec<String>> for Candidates {
    fn from(candidates: Vec<String>) -> Self {
        Candidates(candidates)
    }
}

impl From<Vec<&str>> for Candidates {
    fn from(candidates: Vec<&str>) -> Self {
        Candidates(candidates.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Candidates {
    fn from(candidates: &[&str]) -> Self {
        Candidates(candidates.iter().map(|c| c.to_string()).collect())
    }
}

impl From<&[String]> for Candidates {
    fn from(candidates: &[String]) -> Self {
        Candidates(candidates.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for Candidates {
    fn from(candidates: [&str; N]) -> Self {
        Candidates(candidates.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<&[&str; N]> for Candidates {
    fn from(candidates: &[&str; N]) -> Self {
        Candidates(candidates.iter().map(|c| c.to_string()).collect())
    }
}

/// Pick the registered key that best serves `candidates`.
///
/// `available` must yield keys in registration order. The returned string is
/// the registered key exactly as it was registered, or `"c"`.
///
/// ```
/// use stone_i18n::matcher::select_best_match;
///
/// let available = ["fr", "fr_FR", "fr-be"];
/// assert_eq!(select_best_match("fr_fr", available), "fr_FR");
/// assert_eq!(select_best_match("fr_BE", available), "fr-be");
/// assert_eq!(select_best_match("xx", available), "c");
/// ```
pub fn select_best_match<'a, C, A>(candidates: C, available: A) -> String
where
    C: Into<Candidates>,
    A: IntoIterator<Item = &'a str>,
{
    let candidates = candidates.into();
    let available: Vec<LocaleTag> = available.into_iter().map(LocaleTag::parse).collect();

    for candidate in candidates.iter() {
        if let Some(found) = match_candidate(&LocaleTag::parse(candidate), &available) {
            return found.raw().to_string();
        }
    }

    debug!("No registered locale matches {:?}, using '{}'", candidates, FALLBACK_LOCALE);
    FALLBACK_LOCALE.to_string()
}

fn match_candidate<'t>(candidate: &LocaleTag, available: &'t [LocaleTag]) -> Option<&'t LocaleTag> {
    if let Some(found) = available.iter().find(|tag| tag.matches(candidate)) {
        trace!("'{}' matches '{}' exactly", candidate, found);
        return Some(found);
    }

    if candidate.has_region() {
        let bare = candidate.without_region();
        if let Some(found) = available.iter().find(|tag| tag.matches(&bare)) {
            trace!("'{}' matches '{}' without its region", candidate, found);
            return Some(found);
        }
    }

    let found = available.iter().find(|tag| tag.language_matches(candidate))?;
    trace!("'{}' matches '{}' by language", candidate, found);
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVAILABLE: [&str; 11] = [
        "en", "fr", "it", "fr_FR", "fr_ca", "fr-be", "pt_BR", "es_ES", "es_AR", "de", "foolang",
    ];

    fn best(candidates: impl Into<Candidates>) -> String {
        select_best_match(candidates, AVAILABLE)
    }

    #[test]
    fn test_single_string_and_list() {
        assert_eq!(best("fr"), "fr");
        assert_eq!(best(vec!["fr"]), "fr");
        assert_eq!(best(["fr"]), "fr");
        assert_eq!(best("fr".to_string()), "fr");
    }

    #[test]
    fn test_nothing_matches() {
        assert_eq!(best("foobarbaz"), FALLBACK_LOCALE);
        assert_eq!(best(["xxx"]), "c");
        assert_eq!(best(["xx", "yy_ZZ"]), "c");
        assert_eq!(best(Vec::<String>::new()), "c");
        assert_eq!(select_best_match("fr", Vec::<&str>::new()), "c");
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(best("fr"), "fr");
        assert_eq!(best("FR"), "fr");
        assert_eq!(best("fr_FR"), "fr_FR");
        assert_eq!(best("fr_fr"), "fr_FR");
        assert_eq!(best("fr-fr"), "fr_FR");
        assert_eq!(best("fr-be"), "fr-be");
        assert_eq!(best("fr_BE"), "fr-be");
        assert_eq!(best("FR-CA"), "fr_ca");
    }

    #[test]
    fn test_every_registered_key_matches_itself() {
        for key in AVAILABLE {
            assert_eq!(best(key), key);
            assert_eq!(best(key.to_uppercase()), key);
            assert_eq!(best(key.replace('_', "-")), key);
            assert_eq!(best(key.replace('-', "_")), key);
        }
    }

    #[test]
    fn test_language_without_region() {
        assert_eq!(best("it"), "it");
        assert_eq!(best("es"), "es_ES");
        assert_eq!(best("pt"), "pt_BR");
    }

    #[test]
    fn test_language_with_unregistered_region() {
        assert_eq!(best("de_LU"), "de");
        assert_eq!(best("pt_PT"), "pt_BR");
        assert_eq!(best("it-CH"), "it");
    }

    #[test]
    fn test_candidate_order_wins() {
        assert_eq!(best(["es", "es_AR", "fr_FR"]), "es_ES");
        assert_eq!(best(["es_AR", "es", "fr_FR"]), "es_AR");
        assert_eq!(best(["es", "fr_FR"]), "es_ES");
        assert_eq!(best(["xx", "fr_FR"]), "fr_FR");
    }

    #[test]
    fn test_language_tier_follows_registration_order() {
        assert_eq!(select_best_match("es", ["es_ES", "es_AR"]), "es_ES");
        assert_eq!(select_best_match("es", ["es_AR", "es_ES"]), "es_AR");
        assert_eq!(select_best_match(["es_AR", "es_ES"], ["es_ES", "es_AR"]), "es_AR");
    }

    #[test]
    fn test_region_dropped_before_language_scan() {
        // `de` is preferred over `de_AT` even though `de_AT` was registered first
        assert_eq!(select_best_match("de_LU", ["de_AT", "de"]), "de");
        assert_eq!(select_best_match("de", ["de_AT", "de"]), "de");
    }

    #[test]
    fn test_odd_locale_names() {
        assert_eq!(best(["foolang"]), "foolang");
        assert_eq!(best(""), "c");
        assert_eq!(best("_"), "c");
    }
}
