/// Error types for catalog loading and plural rule parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// The `plural-forms` header could not be parsed
    InvalidPluralForms(String),
    /// Catalog data does not have the expected shape
    InvalidCatalog(String),
    /// Catalog text is not valid JSON
    Json(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::InvalidPluralForms(msg) => write!(f, "Invalid plural forms: {}", msg),
            I18nError::InvalidCatalog(msg) => write!(f, "Invalid catalog: {}", msg),
            I18nError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for I18nError {}

impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        I18nError::Json(err.to_string())
    }
}

/// Result type for i18n operations that can fail
pub type I18nResult<T> = Result<T, I18nError>;
