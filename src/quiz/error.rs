use thiserror::Error;

use crate::quiz::templates::TemplateSet;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Quiz unavailable, bad configuration: {0}")]
    Config(String),

    #[error("Not enough data for {set} question {id}: needs {needed} {what}, found {available}")]
    InsufficientData {
        set: TemplateSet,
        id: u32,
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Artist data unavailable: {0}")]
    UpstreamData(String),

    #[error("Broken {set} question {id}: {reason}")]
    Invariant {
        set: TemplateSet,
        id: u32,
        reason: String,
    },
}

impl QuizError {
    /// Errors that only cost a single question, the rest of the quiz is still generated.
    pub fn is_skippable(&self) -> bool {
        matches!(self, QuizError::InsufficientData { .. })
    }
}
