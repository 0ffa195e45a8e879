pub mod config;
pub mod quiz;

pub use quiz::error::{QuizError, Result};
pub use quiz::synthesizer::{generate_quiz, Synthesizer};
pub use quiz::{Answer, AnswerValue, Question, Quiz};
