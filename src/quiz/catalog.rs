use std::fs::File;
use std::path::Path;

use log::info;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::quiz::error::{QuizError, Result};

const EMBEDDED_GENRES: &str = include_str!("../../data/genres.json");
const EMBEDDED_SONG_NAMES: &str = include_str!("../../data/song_names.json");

// One correct answer plus three decoys, and the correct one may be in the list
const MIN_ENTRIES: usize = 4;

#[derive(Debug, serde::Deserialize)]
struct GenreFile {
    music_genres: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SongNameFile {
    songs: Vec<String>,
}

/// Lookup tables the distractors are drawn from: real genre names and made-up song titles.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub genres: Vec<String>,
    pub song_names: Vec<String>,
}

impl Catalogs {
    pub fn new(genres: Vec<String>, song_names: Vec<String>) -> Result<Self> {
        let catalogs = Self {
            genres: clean("genre", genres)?,
            song_names: clean("song name", song_names)?,
        };
        info!(
            "Loaded {} genres and {} decoy song names",
            catalogs.genres.len(),
            catalogs.song_names.len()
        );
        Ok(catalogs)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_GENRES, EMBEDDED_SONG_NAMES)
    }

    pub fn from_json(genres: &str, song_names: &str) -> Result<Self> {
        let genres: GenreFile = serde_json::from_str(genres)
            .map_err(|e| QuizError::Config(format!("Failed to parse genre catalog: {}", e)))?;
        let song_names: SongNameFile = serde_json::from_str(song_names)
            .map_err(|e| QuizError::Config(format!("Failed to parse song name catalog: {}", e)))?;
        Self::new(genres.music_genres, song_names.songs)
    }

    /// `amount` random genres, none of them equal to `correct`.
    pub fn genre_decoys(&self, correct: &str, amount: usize, rng: &mut dyn RngCore) -> Vec<String> {
        pick_excluding(&self.genres, &[correct], amount, rng)
    }

    /// Up to `amount` random fake song titles, none of them equal to a title in `real`.
    pub fn song_decoys(&self, real: &[&str], amount: usize, rng: &mut dyn RngCore) -> Vec<String> {
        pick_excluding(&self.song_names, real, amount, rng)
    }
}

/// Genre names from a `{"music_genres": [...]}` file.
pub fn genres_from_file(path: &Path) -> Result<Vec<String>> {
    let file: GenreFile = read_json(path)?;
    Ok(file.music_genres)
}

/// Decoy song titles from a `{"songs": [...]}` file.
pub fn song_names_from_file(path: &Path) -> Result<Vec<String>> {
    let file: SongNameFile = read_json(path)?;
    Ok(file.songs)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| QuizError::Config(format!("Failed to open '{}': {}", path.display(), e)))?;
    serde_json::from_reader(file)
        .map_err(|e| QuizError::Config(format!("Failed to parse '{}': {}", path.display(), e)))
}

fn clean(what: &str, entries: Vec<String>) -> Result<Vec<String>> {
    let mut cleaned: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() || cleaned.iter().any(|e| e.eq_ignore_ascii_case(entry)) {
            continue;
        }
        cleaned.push(entry.to_string());
    }

    if cleaned.len() < MIN_ENTRIES {
        return Err(QuizError::Config(format!(
            "The {} catalog needs at least {} distinct entries, found {}",
            what,
            MIN_ENTRIES,
            cleaned.len()
        )));
    }
    Ok(cleaned)
}

fn pick_excluding(
    pool: &[String],
    excluded: &[&str],
    amount: usize,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let candidates = pool
        .iter()
        .filter(|entry| !excluded.iter().any(|e| entry.eq_ignore_ascii_case(e)))
        .collect::<Vec<_>>();
    candidates
        .choose_multiple(rng, amount)
        .map(|entry| entry.to_string())
        .collect()
}
