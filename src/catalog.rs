use std::collections::HashMap;
use std::sync::LazyLock;

use crate::plural::PluralRule;

static DEFAULT_RULE: LazyLock<PluralRule> = LazyLock::new(PluralRule::default);

/// Translations for one locale: a plural rule plus a message table.
///
/// Each message key maps to its translated forms. Index 0 is the singular
/// (or only) form, further indices follow the plural rule's order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    // None until a plural-forms header is declared
    plural_rule: Option<PluralRule>,
    messages: HashMap<String, Vec<String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn with_plural_rule(plural_rule: PluralRule) -> Self {
        Catalog {
            plural_rule: Some(plural_rule),
            messages: HashMap::new(),
        }
    }

    /// Add a message with a single form.
    pub fn with_message(&mut self, key: &str, message: &str) -> &mut Self {
        self.messages.insert(key.to_owned(), vec![message.to_owned()]);
        self
    }

    /// Add a message with all of its forms. Replaces any previous forms.
    pub fn with_forms(&mut self, key: &str, forms: Vec<String>) -> &mut Self {
        self.messages.insert(key.to_owned(), forms);
        self
    }

    /// The declared plural rule, or `nplurals=2; plural=(n != 1);`.
    pub fn plural_rule(&self) -> &PluralRule {
        self.plural_rule.as_ref().unwrap_or(&*DEFAULT_RULE)
    }

    pub fn has_plural_rule(&self) -> bool {
        self.plural_rule.is_some()
    }

    pub fn set_plural_rule(&mut self, plural_rule: PluralRule) {
        self.plural_rule = Some(plural_rule);
    }

    pub fn get_forms(&self, key: &str) -> Option<&[String]> {
        self.messages.get(key).map(Vec::as_slice)
    }

    pub fn get_messages(&self) -> &HashMap<String, Vec<String>> {
        &self.messages
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Singular form of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages
            .get(key)
            .and_then(|forms| forms.first())
            .map(String::as_str)
    }

    /// Form of `key` for `count`, or the singular form when no count is given.
    ///
    /// A message with a single form always yields that form. When the rule
    /// points past the end of the forms array, the singular form is used.
    pub fn lookup(&self, key: &str, count: Option<u64>) -> Option<&str> {
        let forms = self.messages.get(key)?;
        let index = match count {
            Some(n) if forms.len() > 1 => self.plural_rule().index(n),
            _ => 0,
        };
        forms.get(index).or_else(|| forms.first()).map(String::as_str)
    }
}

/// Merge `newer` on top of `older`.
///
/// The plural rule of `newer` wins when it declares one. A `newer` without a
/// rule keeps the rule of `older` instead of resetting it to the default
/// `nplurals=2; plural=(n != 1);`.
///
/// Every message key of `newer` replaces the whole forms array of `older`;
/// keys only present in `older` are kept.
pub fn merge_catalogs(newer: Catalog, older: Catalog) -> Catalog {
    let mut messages = older.messages;
    messages.extend(newer.messages);
    Catalog {
        plural_rule: newer.plural_rule.or(older.plural_rule),
        messages,
    }
}
