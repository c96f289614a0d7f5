//! Runtime internationalization with gettext-style catalogs.
//!
//! Catalogs are registered per locale key and merged when the same key is
//! registered again. The active locale is set directly or picked from a
//! list of candidate locales, and lookups fall back to the source text when
//! no translation exists.
//!
//! ```
//! use stone_i18n::{Params, Translator, loader::catalogs_from_json_str};
//!
//! let translator = Translator::new();
//! translator.add_catalogs(catalogs_from_json_str(r#"{
//!     "fr": {
//!         "plural-forms": "nplurals=2; plural=(n > 1);",
//!         "messages": {
//!             "Hello {name}": ["Bonjour {name}"],
//!             "{n} message": ["{n} message", "{n} messages"]
//!         }
//!     },
//!     "es_ES": {},
//!     "es_AR": {}
//! }"#).unwrap());
//!
//! assert_eq!(translator.set_best_matching_locale(["fr_BE", "en"]), "fr");
//! let params = Params::from([("name", "John")]);
//! assert_eq!(translator.gettext_with("Hello {name}", &params), "Bonjour John");
//! assert_eq!(translator.ngettext("{n} message", "{n} messages", 0), "0 message");
//!
//! assert_eq!(translator.set_best_matching_locale("es"), "es_ES");
//! assert_eq!(translator.set_best_matching_locale("ja"), "c");
//! assert_eq!(translator.gettext_with("Hello {name}", &params), "Hello John");
//! ```

pub mod catalog;
pub mod error;
pub mod global;
pub mod interpolate;
pub mod lazy;
pub mod loader;
pub mod locale;
pub mod matcher;
pub mod plural;
pub mod store;
pub mod translator;


// Re-export main types for convenient access
pub use catalog::{Catalog, merge_catalogs};
pub use error::{I18nError, I18nResult};
pub use interpolate::{Params, interpolate};
pub use lazy::{IntoStrPattern, LazyString, StrPattern};
pub use loader::{CatalogSource, catalogs_from_json_str, catalogs_from_value};
pub use locale::LocaleTag;
pub use matcher::{Candidates, FALLBACK_LOCALE, select_best_match};
pub use plural::PluralRule;
pub use store::CatalogStore;
pub use translator::Translator;
