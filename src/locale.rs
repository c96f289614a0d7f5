/// A locale identifier split into language and optional region.
///
/// Parsing never fails. `fr`, `fr_FR`, `fr-fr` and `FR_fr` all describe the
/// same locale; the raw string is kept so a registered key can be returned
/// with its original spelling.
///
/// ```
/// use stone_i18n::LocaleTag;
///
/// let a = LocaleTag::parse("fr_BE");
/// let b = LocaleTag::parse("fr-be");
/// assert!(a.matches(&b));
/// assert_eq!(a.raw(), "fr_BE");
/// assert_eq!(b.raw(), "fr-be");
/// ```
#[derive(Debug, Clone)]
pub struct LocaleTag {
    raw: String,
    language: String,
    region: Option<String>,
}

impl LocaleTag {
    pub fn parse(raw: &str) -> Self {
        let (language, region) = match raw.split_once(['_', '-']) {
            Some((language, region)) if !language.is_empty() => {
                // Multi-part regions (`zh-hans-cn`) compare on a single separator
                let region = region.to_lowercase().replace('-', "_");
                let region = if region.is_empty() { None } else { Some(region) };
                (language.to_lowercase(), region)
            }
            _ => (raw.to_lowercase(), None),
        };

        LocaleTag {
            raw: raw.to_string(),
            language,
            region,
        }
    }

    /// The string this tag was parsed from, untouched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercased language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Lowercased region, if the tag carried one.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    /// Canonical comparison key: `language` or `language_region`.
    pub fn normalized(&self) -> String {
        match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// The same tag with its region dropped.
    pub fn without_region(&self) -> LocaleTag {
        LocaleTag {
            raw: self.language.clone(),
            language: self.language.clone(),
            region: None,
        }
    }

    /// Exact match: same language and same region, ignoring case and separator.
    /// A tag without region only matches another tag without region.
    pub fn matches(&self, other: &LocaleTag) -> bool {
        self.language == other.language && self.region == other.region
    }

    /// Same language, region ignored.
    pub fn language_matches(&self, other: &LocaleTag) -> bool {
        self.language == other.language
    }
}

impl PartialEq for LocaleTag {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for LocaleTag {}

impl std::hash::Hash for LocaleTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.language.hash(state);
        self.region.hash(state);
    }
}

impl std::fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for LocaleTag {
    fn from(raw: &str) -> Self {
        LocaleTag::parse(raw)
    }
}
