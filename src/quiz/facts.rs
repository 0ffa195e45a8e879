use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::quiz::error::{QuizError, Result};

/// Everything a quiz is built from, as fetched from the music catalog for one artist.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ArtistFacts {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Ranked by popularity, most popular first.
    #[serde(default)]
    pub top_tracks: Vec<Track>,
    #[serde(default)]
    pub albums: Albums,
    #[serde(default)]
    pub user_top_tracks: Option<Vec<UserTrack>>,
}

impl ArtistFacts {
    pub fn from_json(json: &str) -> Result<Self> {
        let facts: ArtistFacts = serde_json::from_str(json)
            .map_err(|e| QuizError::UpstreamData(format!("Malformed artist data: {}", e)))?;
        if facts.name.trim().is_empty() {
            return Err(QuizError::UpstreamData("Artist has no name".to_string()));
        }
        Ok(facts)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let mut json = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut json))
            .map_err(|e| {
                QuizError::UpstreamData(format!("Failed to read '{}': {}", path.display(), e))
            })?;
        Self::from_json(&json)
    }

    /// Whether any of the listener's top tracks credits this artist.
    /// `None` when no listening history came with the facts.
    pub fn in_user_top_tracks(&self) -> Option<bool> {
        let tracks = self.user_top_tracks.as_ref()?;
        let found = tracks
            .iter()
            .any(|track| track.artists.iter().any(|artist| artist.name == self.name));
        Some(found)
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub name: String,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UserTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistCredit>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ArtistCredit {
    pub name: String,
}

/// One page of the artist's albums. `total` counts all albums, `items` may hold fewer.
/// Items come newest first, so `items[total - 1]` is the first release.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Albums {
    pub total: u32,
    #[serde(default)]
    pub items: Vec<Album>,
}

impl Albums {
    pub fn first_release(&self) -> Option<&Album> {
        let index = (self.total as usize).checked_sub(1)?;
        self.items.get(index)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Album {
    pub name: String,
    pub release_date: ReleaseDate,
}

/// A zero-padded ISO 8601 date or date prefix: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
/// Because of the padding, comparing the strings orders releases chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ReleaseDate(String);

impl ReleaseDate {
    pub fn parse(date: &str) -> std::result::Result<Self, String> {
        let parts = date.split('-').collect::<Vec<_>>();
        let widths = [4, 2, 2];
        if parts.len() > widths.len() {
            return Err(format!("'{}' is not a YYYY-MM-DD date", date));
        }
        for (part, width) in parts.iter().zip(widths) {
            if part.len() != width || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(format!("'{}' is not a YYYY-MM-DD date", date));
            }
        }
        Ok(Self(date.to_string()))
    }

    pub fn year(&self) -> i64 {
        // `parse` guarantees four leading digits
        self.0[..4].parse().unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ReleaseDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let date = String::deserialize(deserializer)?;
        ReleaseDate::parse(&date).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTS: &str = r#"{
        "name": "Portishead",
        "genres": ["trip hop", "electronica"],
        "top_tracks": [{"name": "Glory Box"}, {"name": "Roads"}],
        "albums": {
            "total": 3,
            "items": [
                {"name": "Third", "release_date": "2008-04-28"},
                {"name": "Portishead", "release_date": "1997-09-29"},
                {"name": "Dummy", "release_date": "1994-08-22"}
            ]
        },
        "user_top_tracks": [
            {"name": "Teardrop", "artists": [{"name": "Massive Attack"}]},
            {"name": "Roads", "artists": [{"name": "Portishead"}]}
        ]
    }"#;

    #[test]
    fn test_parse_catalog_shaped_facts() {
        let facts = ArtistFacts::from_json(FACTS).unwrap();
        assert_eq!(facts.genres[0], "trip hop");
        assert_eq!(facts.top_tracks.len(), 2);
        assert_eq!(facts.albums.first_release().unwrap().name, "Dummy");
        assert_eq!(facts.albums.first_release().unwrap().release_date.year(), 1994);
        assert_eq!(facts.in_user_top_tracks(), Some(true));
    }

    #[test]
    fn test_missing_listening_history() {
        let facts = ArtistFacts::from_json(r#"{"name": "Portishead"}"#).unwrap();
        assert_eq!(facts.in_user_top_tracks(), None);
        assert!(facts.albums.first_release().is_none());
    }

    #[test]
    fn test_short_album_page_has_no_first_release() {
        let mut facts = ArtistFacts::from_json(FACTS).unwrap();
        facts.albums.total = 25;
        assert!(facts.albums.first_release().is_none());
    }

    #[test]
    fn test_release_dates_must_be_zero_padded() {
        assert!(ReleaseDate::parse("1994").is_ok());
        assert!(ReleaseDate::parse("1994-08").is_ok());
        assert!(ReleaseDate::parse("1994-08-22").is_ok());
        assert!(ReleaseDate::parse("1994-8-22").is_err());
        assert!(ReleaseDate::parse("94-08-22").is_err());
        assert!(ReleaseDate::parse("1994-08-22-01").is_err());
        assert!(ReleaseDate::parse("August 1994").is_err());

        let bad = r#"{"name": "X", "albums": {"total": 1, "items": [{"name": "A", "release_date": "1/2/1990"}]}}"#;
        assert!(matches!(ArtistFacts::from_json(bad), Err(QuizError::UpstreamData(_))));
    }

    #[test]
    fn test_album_needs_a_release_date() {
        let json = r#"{"name": "X", "albums": {"total": 1, "items": [{"name": "A"}]}}"#;
        assert!(matches!(ArtistFacts::from_json(json), Err(QuizError::UpstreamData(_))));

        let empty = r#"{"name": "X", "albums": {"total": 1, "items": [{"name": "A", "release_date": ""}]}}"#;
        assert!(matches!(ArtistFacts::from_json(empty), Err(QuizError::UpstreamData(_))));
    }

    #[test]
    fn test_release_dates_order_chronologically() {
        let older = ReleaseDate::parse("1985-06-01").unwrap();
        let newer = ReleaseDate::parse("1990-01-01").unwrap();
        assert!(older < newer);
        assert_eq!(older.as_str(), "1985-06-01");
    }

    #[test]
    fn test_nameless_artist_is_upstream_error() {
        assert!(matches!(
            ArtistFacts::from_json(r#"{"name": " "}"#),
            Err(QuizError::UpstreamData(_))
        ));
    }
}
