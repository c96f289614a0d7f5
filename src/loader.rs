use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use crate::plural::PluralRule;

/// Translated forms of one message as written in catalog JSON.
///
/// The usual shape is an array; a bare string is read as a single form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageForms {
    Single(String),
    Forms(Vec<String>),
}

impl MessageForms {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            MessageForms::Single(form) => vec![form],
            MessageForms::Forms(forms) => forms,
        }
    }
}

/// Catalog data for one locale as produced by catalog tooling.
///
/// ```json
/// {
///     "plural-forms": "nplurals=2; plural=(n > 1);",
///     "messages": {
///         "Hello": ["Bonjour"],
///         "{n} apple": ["{n} pomme", "{n} pommes"]
///     }
/// }
/// ```
///
/// Both fields are optional; `{}` is an empty catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(
        rename = "plural-forms",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub plural_forms: Option<String>,
    #[serde(default)]
    pub messages: HashMap<String, MessageForms>,
}

impl CatalogSource {
    /// Build the runtime catalog. The plural-forms header is parsed here,
    /// once.
    pub fn into_catalog(self) -> I18nResult<Catalog> {
        let mut catalog = match self.plural_forms.as_deref() {
            Some(header) => Catalog::with_plural_rule(PluralRule::parse(header)?),
            None => Catalog::new(),
        };
        for (key, forms) in self.messages {
            catalog.with_forms(&key, forms.into_vec());
        }
        Ok(catalog)
    }
}

/// Read a catalog set from JSON text.
///
/// The root must be an object keyed by locale. Locales are returned in
/// document order, which becomes their registration order.
///
/// ```
/// use stone_i18n::loader::catalogs_from_json_str;
///
/// let catalogs = catalogs_from_json_str(
///     r#"{"fr": {"messages": {"Hello": ["Bonjour"]}}, "de": {}}"#,
/// ).unwrap();
/// assert_eq!(catalogs[0].0, "fr");
/// assert_eq!(catalogs[0].1.get("Hello"), Some("Bonjour"));
/// assert_eq!(catalogs[1].0, "de");
/// ```
pub fn catalogs_from_json_str(json: &str) -> I18nResult<Vec<(String, Catalog)>> {
    let value: Value = serde_json::from_str(json)?;
    catalogs_from_value(value)
}

/// Read a catalog set from an already parsed JSON value.
pub fn catalogs_from_value(value: Value) -> I18nResult<Vec<(String, Catalog)>> {
    let Value::Object(locales) = value else {
        return Err(I18nError::InvalidCatalog(
            "root must be an object keyed by locale".to_string(),
        ));
    };

    let mut catalogs = Vec::with_capacity(locales.len());
    for (locale, data) in locales {
        let source: CatalogSource = serde_json::from_value(data)
            .map_err(|e| I18nError::InvalidCatalog(format!("locale '{}': {}", locale, e)))?;
        let catalog = source.into_catalog().map_err(|e| match e {
            I18nError::InvalidPluralForms(msg) => {
                I18nError::InvalidPluralForms(format!("locale '{}': {}", locale, msg))
            }
            other => other,
        })?;
        catalogs.push((locale, catalog));
    }

    Ok(catalogs)
}
