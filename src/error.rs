// src/error.rs
use thiserror::Error;

/// Why the glossary has nothing to show. Causes are logged, never shown to
/// the reader; every variant means "no popup".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("course, module or lesson missing from page context")]
    MissingContext,
    #[error("glossary request failed: {0}")]
    Transport(String),
    #[error("glossary request returned HTTP {0}")]
    Status(u16),
    #[error("glossary document is not valid JSON: {0}")]
    Parse(String),
    #[error("course {0:?} not found in glossary")]
    MissingCourse(String),
    #[error("module {0:?} not found in glossary")]
    MissingModule(String),
    #[error("lesson {0:?} not found in glossary")]
    MissingLesson(String),
    #[error("lesson defines no terms")]
    NoTerms,
}

pub type GlossaryResult<T> = std::result::Result<T, Unavailable>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_cause() {
        assert_eq!(
            Unavailable::Status(404).to_string(),
            "glossary request returned HTTP 404"
        );
        assert_eq!(
            Unavailable::MissingLesson("L9".to_string()).to_string(),
            "lesson \"L9\" not found in glossary"
        );
    }
}
