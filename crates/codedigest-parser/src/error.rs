use crate::language::Language;

/// A grammar or query could not be prepared for a language.
///
/// Never cached: the next request for the same language tries again.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load {language} grammar: {reason}")]
pub struct LanguageLoadError {
    pub language: Language,
    pub reason: String,
}

impl LanguageLoadError {
    pub fn new(language: Language, reason: impl Into<String>) -> Self {
        Self {
            language,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    LanguageLoad(#[from] LanguageLoadError),

    #[error("tree-sitter produced no syntax tree for {path}")]
    TreeBuild { path: String },
}

pub type Result<T> = std::result::Result<T, ParseError>;
