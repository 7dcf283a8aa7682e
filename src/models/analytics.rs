use serde::{Deserialize, Serialize};

/// Body of `GET /analytics/viewing-stats`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewingStats {
    pub total_movies_watched: u32,
    /// Minutes
    pub total_watch_time: u32,
    pub average_rating: f64,
    pub favorite_genres: Vec<GenreStats>,
    pub watching_streak: u32,
    pub monthly_activity: Vec<MonthlyActivity>,
    pub rating_distribution: Vec<RatingDistribution>,
    pub recent_activity: Vec<RecentActivity>,
}

impl ViewingStats {
    pub fn total_watch_hours(&self) -> f64 {
        f64::from(self.total_watch_time) / 60.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenreStats {
    pub genre: String,
    pub count: u32,
    pub percentage: f64,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    pub month: String,
    pub movies_watched: u32,
    pub hours_watched: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingDistribution {
    pub rating: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Watched,
    Rated,
    AddedToWatchlist,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: String,
    pub movie_title: String,
    pub action: ActivityAction,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// Body of `GET /analytics/comparison`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
    pub user_average: f64,
    pub global_average: f64,
    pub user_genre_preference: String,
    pub popular_genre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_activity_action_format() {
        let json = r#"{"id": "3", "movieTitle": "The Batman", "action": "added_to_watchlist", "timestamp": "2024-03-13T15:20:00Z"}"#;
        let activity: RecentActivity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.action, ActivityAction::AddedToWatchlist);
        assert_eq!(activity.rating, None);
    }

    #[test]
    fn test_comparison_stats_camel_case() {
        let json = r#"{"userAverage": 4.2, "globalAverage": 3.8, "userGenrePreference": "Sci-Fi", "popularGenre": "Action"}"#;
        let stats: ComparisonStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.user_genre_preference, "Sci-Fi");
        assert!(stats.user_average > stats.global_average);
    }
}
