use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Genre names understood by the watchlist filter, with their TMDB ids
pub const GENRES: &[(&str, u32)] = &[
    ("action", 28),
    ("adventure", 12),
    ("animation", 16),
    ("comedy", 35),
    ("crime", 80),
    ("drama", 18),
    ("fantasy", 14),
    ("horror", 27),
    ("romance", 10749),
    ("sci-fi", 878),
    ("thriller", 53),
];

/// Looks up the numeric id for a genre name (case-insensitive)
pub fn genre_id(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    GENRES
        .iter()
        .find(|(genre, _)| *genre == name)
        .map(|(_, id)| *id)
}

/// Looks up the genre name for a numeric id
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(_, genre_id)| *genre_id == id)
        .map(|(name, _)| *name)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Movie record as served by the `/movies` endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub backdrop_path: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
}

impl Movie {
    /// Parsed release date, `None` when missing or malformed
    pub fn release_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d").ok()
    }

    pub fn has_genre(&self, genre_id: u32) -> bool {
        self.genre_ids.contains(&genre_id)
    }
}

/// Body of `GET /movies/recommendations`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecommendations {
    #[serde(default)]
    pub trending: Vec<Movie>,
    #[serde(default)]
    pub for_you: Vec<Movie>,
    #[serde(default)]
    pub by_genre: HashMap<String, Vec<Movie>>,
    #[serde(default)]
    pub new_releases: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct RateRequest {
    pub rating: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_lookup_is_case_insensitive() {
        assert_eq!(genre_id("Action"), Some(28));
        assert_eq!(genre_id("SCI-FI"), Some(878));
        assert_eq!(genre_id(" romance "), Some(10749));
        assert_eq!(genre_id("western"), None);
    }

    #[test]
    fn test_genre_name_lookup() {
        assert_eq!(genre_name(53), Some("thriller"));
        assert_eq!(genre_name(99), None);
    }

    #[test]
    fn test_release_date_parsing() {
        let json = r#"{"id": 1, "title": "Dune: Part Two", "release_date": "2024-03-01", "vote_average": 8.9, "genre_ids": [878, 12]}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.release_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(movie.has_genre(878));
        assert!(!movie.has_genre(28));
        assert_eq!(movie.runtime, None);
    }

    #[test]
    fn test_malformed_release_date() {
        let json = r#"{"id": 1, "title": "Unknown", "release_date": "soon"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release_date(), None);
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_recommendations_camel_case() {
        let json = r#"{"trending": [], "forYou": [{"id": 2, "title": "Oppenheimer"}], "byGenre": {"Drama": []}, "newReleases": []}"#;
        let recs: MovieRecommendations = serde_json::from_str(json).unwrap();
        assert_eq!(recs.for_you.len(), 1);
        assert!(recs.by_genre.contains_key("Drama"));
    }
}
