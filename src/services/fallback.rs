//! Built-in data served when the API cannot be reached.

use std::collections::HashMap;

use crate::models::{
    ActivityAction, ComparisonStats, GenreStats, MonthlyActivity, Movie, MovieRecommendations,
    RatingDistribution, RecentActivity, ViewingStats,
};

#[allow(clippy::too_many_arguments)]
fn movie(
    id: u64,
    title: &str,
    overview: &str,
    slug: (&str, &str),
    release_date: &str,
    vote_average: f64,
    genre_ids: &[u32],
    runtime: u32,
    director: &str,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: overview.to_string(),
        poster_path: format!("/{}.png", slug.0),
        backdrop_path: format!("/{}.png", slug.1),
        release_date: release_date.to_string(),
        vote_average,
        genre_ids: genre_ids.to_vec(),
        genres: None,
        runtime: Some(runtime),
        director: Some(director.to_string()),
        cast: None,
    }
}

pub fn movies() -> Vec<Movie> {
    vec![
        movie(
            1,
            "Dune: Part Two",
            "Follow the mythic journey of Paul Atreides as he unites with Chani and the Fremen while on a path of revenge against the conspirators who destroyed his family.",
            ("dune-movie-poster-desert-sci-fi", "dune-desert-landscape-cinematic"),
            "2024-03-01",
            8.9,
            &[878, 12],
            166,
            "Denis Villeneuve",
        ),
        movie(
            2,
            "Oppenheimer",
            "The story of J. Robert Oppenheimer's role in the development of the atomic bomb during World War II.",
            ("oppenheimer-movie-poster-atomic-bomb", "atomic-explosion-dramatic-lighting"),
            "2023-07-21",
            8.7,
            &[36, 18],
            180,
            "Christopher Nolan",
        ),
        movie(
            3,
            "Spider-Man: Across the Spider-Verse",
            "After reuniting with Gwen Stacy, Brooklyn's full-time, friendly neighborhood Spider-Man is catapulted across the Multiverse.",
            ("spider-man-animated-multiverse-colorful", "spider-verse-multiverse-colorful-abstract"),
            "2023-06-02",
            9.1,
            &[16, 28, 12],
            140,
            "Joaquim Dos Santos",
        ),
        movie(
            4,
            "The Batman",
            "When a sadistic serial killer begins murdering key political figures in Gotham, Batman is forced to investigate the city's hidden corruption.",
            ("batman-dark-knight-movie-poster", "gotham-city-dark-batman-cityscape"),
            "2022-03-04",
            8.2,
            &[28, 80, 18],
            176,
            "Matt Reeves",
        ),
        movie(
            5,
            "Everything Everywhere All at Once",
            "An aging Chinese immigrant is swept up in an insane adventure, where she alone can save what's important to her by connecting with the lives she could have led.",
            ("everything-everywhere-all-at-once-multiverse-poste", "multiverse-chaos-colorful-abstract"),
            "2022-03-25",
            8.8,
            &[28, 12, 35],
            139,
            "Daniels",
        ),
    ]
}

fn pick(all: &[Movie], ids: &[u64]) -> Vec<Movie> {
    ids.iter()
        .filter_map(|id| all.iter().find(|m| m.id == *id).cloned())
        .collect()
}

pub fn recommendations() -> MovieRecommendations {
    let all = movies();

    let mut by_genre = HashMap::new();
    by_genre.insert("Action".to_string(), pick(&all, &[4, 5]));
    by_genre.insert("Sci-Fi".to_string(), pick(&all, &[1, 3]));
    by_genre.insert("Drama".to_string(), pick(&all, &[2, 5]));

    MovieRecommendations {
        trending: pick(&all, &[1, 2, 3]),
        for_you: pick(&all, &[4, 5, 1]),
        by_genre,
        new_releases: pick(&all, &[1, 2]),
    }
}

/// Trending and personal picks whose title contains `query` (case-insensitive)
pub fn search(query: &str) -> Vec<Movie> {
    let needle = query.to_lowercase();
    let recommendations = recommendations();
    recommendations
        .trending
        .into_iter()
        .chain(recommendations.for_you)
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

/// The movie with `id`, or the first known movie when there is none
pub fn details(id: u64) -> Movie {
    let mut all = movies();
    match all.iter().position(|m| m.id == id) {
        Some(index) => all.swap_remove(index),
        None => all.swap_remove(0),
    }
}

pub fn viewing_stats() -> ViewingStats {
    let genre = |genre: &str, count: u32, percentage: f64, average_rating: f64| GenreStats {
        genre: genre.to_string(),
        count,
        percentage,
        average_rating,
    };
    let month = |month: &str, movies_watched: u32| MonthlyActivity {
        month: month.to_string(),
        movies_watched,
        hours_watched: movies_watched * 2,
    };
    let activity = |id: &str,
                    title: &str,
                    action: ActivityAction,
                    timestamp: &str,
                    rating: Option<u8>| RecentActivity {
        id: id.to_string(),
        movie_title: title.to_string(),
        action,
        timestamp: timestamp.to_string(),
        rating,
    };

    ViewingStats {
        total_movies_watched: 127,
        total_watch_time: 15840,
        average_rating: 4.2,
        favorite_genres: vec![
            genre("Sci-Fi", 32, 25.2, 4.5),
            genre("Action", 28, 22.0, 4.1),
            genre("Drama", 24, 18.9, 4.3),
            genre("Comedy", 18, 14.2, 3.9),
            genre("Thriller", 15, 11.8, 4.2),
            genre("Horror", 10, 7.9, 3.7),
        ],
        watching_streak: 12,
        monthly_activity: vec![
            month("Jan", 8),
            month("Feb", 12),
            month("Mar", 15),
            month("Apr", 10),
            month("May", 18),
            month("Jun", 22),
            month("Jul", 20),
            month("Aug", 14),
            month("Sep", 8),
        ],
        rating_distribution: [(1, 2), (2, 5), (3, 18), (4, 45), (5, 57)]
            .into_iter()
            .map(|(rating, count)| RatingDistribution { rating, count })
            .collect(),
        recent_activity: vec![
            activity("1", "Dune: Part Two", ActivityAction::Watched, "2024-03-15T20:30:00Z", Some(5)),
            activity("2", "Oppenheimer", ActivityAction::Rated, "2024-03-14T18:45:00Z", Some(4)),
            activity("3", "The Batman", ActivityAction::AddedToWatchlist, "2024-03-13T15:20:00Z", None),
            activity(
                "4",
                "Everything Everywhere All at Once",
                ActivityAction::Watched,
                "2024-03-12T21:15:00Z",
                Some(5),
            ),
        ],
    }
}

pub fn comparison() -> ComparisonStats {
    ComparisonStats {
        user_average: 4.2,
        global_average: 3.8,
        user_genre_preference: "Sci-Fi".to_string(),
        popular_genre: "Action".to_string(),
    }
}
