use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompanionError {
    #[error("Unsupported language. Choose from 'hi', 'fr', or 'es'.")]
    UnsupportedLanguage(String),
}
