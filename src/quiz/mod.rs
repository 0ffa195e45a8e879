pub mod album;
pub mod artist;
pub mod catalog;
pub mod error;
pub mod facts;
pub mod numeric;
pub mod synthesizer;
pub mod templates;

use std::fmt;

use rand::seq::SliceRandom;
use rand::RngCore;

use error::{QuizError, Result};
use templates::TemplateSet;

pub const ARTIST_PLACEHOLDER: &str = "<artist>";
pub const ALBUM_PLACEHOLDER: &str = "<album>";
pub const FIRST_ALBUM_PLACEHOLDER: &str = "<album1>";
pub const SECOND_ALBUM_PLACEHOLDER: &str = "<album2>";

pub(crate) const PLACEHOLDERS: [&str; 4] = [
    ARTIST_PLACEHOLDER,
    ALBUM_PLACEHOLDER,
    FIRST_ALBUM_PLACEHOLDER,
    SECOND_ALBUM_PLACEHOLDER,
];

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    pub artist: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(artist: String, questions: Vec<Question>) -> Self {
        Self { artist, questions }
    }

    /// Counts the selections matching the correct answer of the question at the same position.
    pub fn score(&self, selections: &[AnswerValue]) -> usize {
        self.questions
            .iter()
            .zip(selections)
            .filter(|(question, selection)| question.is_correct(selection))
            .count()
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub set: TemplateSet,
    pub id: u32,
    pub text: String,
    pub answers: Vec<Answer>,
    /// Index of the slot holding the correct answer.
    pub correct: usize,
}

impl Question {
    pub fn new(set: TemplateSet, id: u32, text: String, slots: usize, correct: usize) -> Self {
        let answers = (0..slots)
            .map(|i| Answer::empty(i == correct))
            .collect();
        Self {
            set,
            id,
            text,
            answers,
            correct,
        }
    }

    /// Replaces every occurrence of `placeholder` in the question text.
    pub fn substitute(&mut self, placeholder: &str, value: &str) {
        if self.text.contains(placeholder) {
            self.text = self.text.replace(placeholder, value);
        }
    }

    /// Puts `correct` into the correct slot and the distractors, in order, into the others.
    pub fn fill(&mut self, correct: AnswerValue, distractors: Vec<AnswerValue>) -> Result<()> {
        if distractors.len() + 1 != self.answers.len() {
            return Err(self.broken(format!(
                "{} slots but {} values",
                self.answers.len(),
                distractors.len() + 1
            )));
        }

        let mut distractors = distractors.into_iter();
        for (i, answer) in self.answers.iter_mut().enumerate() {
            if i == self.correct {
                answer.value = Some(correct.clone());
            } else {
                answer.value = distractors.next();
            }
        }
        Ok(())
    }

    pub fn is_filled(&self) -> bool {
        self.answers.iter().all(|a| a.value.is_some())
    }

    pub fn correct_answer(&self) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|a| a.is_correct)
            .and_then(|a| a.value.as_ref())
    }

    pub fn is_correct(&self, selection: &AnswerValue) -> bool {
        self.correct_answer() == Some(selection)
    }

    /// Copy of the answers in random order, for display. The stored order is untouched.
    pub fn shuffled_answers(&self, rng: &mut dyn RngCore) -> Vec<Answer> {
        let mut answers = self.answers.clone();
        answers.shuffle(rng);
        answers
    }

    /// Checks what every emitted question must satisfy: all slots filled, exactly one
    /// correct slot, no repeated values and no placeholder left in the text.
    pub fn check(&self) -> Result<()> {
        let correct_slots = self.answers.iter().filter(|a| a.is_correct).count();
        if correct_slots != 1 {
            return Err(self.broken(format!("{} correct slots", correct_slots)));
        }
        if !self.answers.get(self.correct).is_some_and(|a| a.is_correct) {
            return Err(self.broken(format!("slot {} is not marked correct", self.correct)));
        }

        let mut seen: Vec<&AnswerValue> = Vec::with_capacity(self.answers.len());
        for (i, answer) in self.answers.iter().enumerate() {
            let Some(value) = answer.value.as_ref() else {
                return Err(self.broken(format!("slot {} is empty", i)));
            };
            if seen.contains(&value) {
                return Err(self.broken(format!("value {} appears twice", value)));
            }
            seen.push(value);
        }

        if let Some(placeholder) = PLACEHOLDERS.iter().find(|p| self.text.contains(**p)) {
            return Err(self.broken(format!("unresolved placeholder {}", placeholder)));
        }
        Ok(())
    }

    fn broken(&self, reason: String) -> QuizError {
        QuizError::Invariant {
            set: self.set,
            id: self.id,
            reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub value: Option<AnswerValue>,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(value: AnswerValue, is_correct: bool) -> Self {
        Self {
            value: Some(value),
            is_correct,
        }
    }

    pub fn empty(is_correct: bool) -> Self {
        Self {
            value: None,
            is_correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(true) => write!(f, "True"),
            AnswerValue::Bool(false) => write!(f, "False"),
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}
