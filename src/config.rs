use std::env;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::quiz::catalog::{self, Catalogs};
use crate::quiz::error::{QuizError, Result};
use crate::quiz::templates::QuestionTemplates;

pub const QUESTIONS_PATH_VAR: &str = "QUIZ_QUESTIONS_PATH";
pub const GENRES_PATH_VAR: &str = "QUIZ_GENRES_PATH";
pub const SONG_NAMES_PATH_VAR: &str = "QUIZ_SONG_NAMES_PATH";
pub const SEED_VAR: &str = "QUIZ_SEED";

/// Where the static quiz data comes from. Paths left unset fall back to the copies
/// compiled into the binary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizConfig {
    pub questions_path: Option<PathBuf>,
    pub genres_path: Option<PathBuf>,
    pub song_names_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl QuizConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        };

        let seed = match lookup(SEED_VAR) {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                QuizError::Config(format!("{} must be a number, got '{}'", SEED_VAR, value))
            })?),
            None => None,
        };

        Ok(Self {
            questions_path: path(QUESTIONS_PATH_VAR),
            genres_path: path(GENRES_PATH_VAR),
            song_names_path: path(SONG_NAMES_PATH_VAR),
            seed,
        })
    }

    pub fn templates(&self) -> Result<QuestionTemplates> {
        match &self.questions_path {
            Some(path) => QuestionTemplates::from_file(path),
            None => QuestionTemplates::embedded(),
        }
    }

    pub fn catalogs(&self) -> Result<Catalogs> {
        if self.genres_path.is_none() && self.song_names_path.is_none() {
            return Catalogs::embedded();
        }

        let embedded = Catalogs::embedded()?;
        let genres = match &self.genres_path {
            Some(path) => catalog::genres_from_file(path)?,
            None => embedded.genres,
        };
        let song_names = match &self.song_names_path {
            Some(path) => catalog::song_names_from_file(path)?,
            None => embedded.song_names,
        };
        Catalogs::new(genres, song_names)
    }

    /// Seeded when `QUIZ_SEED` is set so the same facts give the same quiz.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
