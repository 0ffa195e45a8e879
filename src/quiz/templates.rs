use std::fmt;
use std::fs::File;
use std::path::Path;

use log::info;

use crate::quiz::error::{QuizError, Result};
use crate::quiz::{
    Question, ALBUM_PLACEHOLDER, ARTIST_PLACEHOLDER, FIRST_ALBUM_PLACEHOLDER, PLACEHOLDERS,
    SECOND_ALBUM_PLACEHOLDER,
};

const EMBEDDED_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSet {
    #[default]
    Artist,
    Album,
}

impl fmt::Display for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSet::Artist => write!(f, "artist"),
            TemplateSet::Album => write!(f, "album"),
        }
    }
}

// Slot layout of every question id the synthesizer knows how to answer.
// Ids missing here are loaded as-is and left unfilled.
const SLOT_COUNTS: [(TemplateSet, u32, usize); 9] = [
    (TemplateSet::Artist, 0, 4), // genre
    (TemplateSet::Artist, 1, 4), // most popular track
    (TemplateSet::Artist, 2, 2), // in your top tracks, true or false
    (TemplateSet::Artist, 3, 4), // album count
    (TemplateSet::Artist, 4, 4), // first album year
    (TemplateSet::Artist, 5, 4), // real song
    (TemplateSet::Album, 1, 2),  // which album came first
    (TemplateSet::Album, 3, 4),  // album release year
    (TemplateSet::Album, 4, 4),  // earliest of four albums
];

pub fn expected_slots(set: TemplateSet, id: u32) -> Option<usize> {
    SLOT_COUNTS
        .iter()
        .find(|(s, i, _)| *s == set && *i == id)
        .map(|(_, _, slots)| *slots)
}

/// Placeholders the handler for a known question id substitutes.
fn filled_placeholders(set: TemplateSet, id: u32) -> &'static [&'static str] {
    match (set, id) {
        (TemplateSet::Album, 1) => &[
            ARTIST_PLACEHOLDER,
            FIRST_ALBUM_PLACEHOLDER,
            SECOND_ALBUM_PLACEHOLDER,
        ],
        (TemplateSet::Album, 3) => &[ARTIST_PLACEHOLDER, ALBUM_PLACEHOLDER],
        _ => &[ARTIST_PLACEHOLDER],
    }
}

#[derive(Debug, serde::Deserialize)]
struct Definitions {
    #[serde(default)]
    artist_questions: Vec<Definition>,
    #[serde(default)]
    album_questions: Vec<Definition>,
}

#[derive(Debug, serde::Deserialize)]
struct Definition {
    id: Option<u32>,
    #[serde(default)]
    question: String,
    slots: usize,
    #[serde(default)]
    correct: usize,
}

/// The static question definitions. Every `load` hands out a fresh copy so filling
/// one quiz never leaks into the next.
#[derive(Debug, Clone, Default)]
pub struct QuestionTemplates {
    artist: Vec<Question>,
    album: Vec<Question>,
}

impl QuestionTemplates {
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_QUESTIONS)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            QuizError::Config(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        let definitions: Definitions = serde_json::from_reader(file).map_err(|e| {
            QuizError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })?;
        Self::from_definitions(definitions)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Definitions = serde_json::from_str(json)
            .map_err(|e| QuizError::Config(format!("Failed to parse question definitions: {}", e)))?;
        Self::from_definitions(definitions)
    }

    fn from_definitions(definitions: Definitions) -> Result<Self> {
        let templates = Self {
            artist: to_questions(TemplateSet::Artist, definitions.artist_questions)?,
            album: to_questions(TemplateSet::Album, definitions.album_questions)?,
        };
        if templates.artist.is_empty() && templates.album.is_empty() {
            return Err(QuizError::Config("No question definitions found".to_string()));
        }

        info!(
            "Loaded {} artist and {} album question templates",
            templates.artist.len(),
            templates.album.len()
        );
        Ok(templates)
    }

    pub fn load(&self, set: TemplateSet) -> Vec<Question> {
        match set {
            TemplateSet::Artist => self.artist.clone(),
            TemplateSet::Album => self.album.clone(),
        }
    }
}

fn to_questions(set: TemplateSet, definitions: Vec<Definition>) -> Result<Vec<Question>> {
    let mut questions: Vec<Question> = Vec::with_capacity(definitions.len());
    for (position, definition) in definitions.into_iter().enumerate() {
        let Some(id) = definition.id else {
            return Err(QuizError::Config(format!(
                "{} question #{} has no id",
                set, position
            )));
        };
        if questions.iter().any(|q| q.id == id) {
            return Err(QuizError::Config(format!("{} question {} is defined twice", set, id)));
        }
        if definition.question.trim().is_empty() {
            return Err(QuizError::Config(format!("{} question {} has no text", set, id)));
        }
        if let Some(slots) = expected_slots(set, id) {
            if definition.slots != slots {
                return Err(QuizError::Config(format!(
                    "{} question {} needs {} answer slots, found {}",
                    set, id, slots, definition.slots
                )));
            }

            let filled = filled_placeholders(set, id);
            let unfilled = PLACEHOLDERS
                .iter()
                .find(|p| definition.question.contains(**p) && !filled.contains(*p));
            if let Some(placeholder) = unfilled {
                return Err(QuizError::Config(format!(
                    "{} question {} uses {}, which it never fills",
                    set, id, placeholder
                )));
            }
        }
        if definition.slots < 2 || definition.correct >= definition.slots {
            return Err(QuizError::Config(format!(
                "{} question {} has correct slot {} out of {}",
                set, id, definition.correct, definition.slots
            )));
        }

        questions.push(Question::new(
            set,
            id,
            definition.question,
            definition.slots,
            definition.correct,
        ));
    }
    Ok(questions)
}
