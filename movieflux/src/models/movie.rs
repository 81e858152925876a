use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{GenreId, KeywordId, MovieId};
use crate::config::Preferences;

/// A catalog movie.
///
/// List endpoints return a subset of the fields; detail responses fill in
/// `genres`, `runtime`, `keywords`, `images` and friends. Credits responses
/// set `character` or `department`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub original_title: String,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub popularity: f32,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: i64,
    pub release_date: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub runtime: Option<i64>,
    pub status: Option<String>,
    #[serde(default)]
    pub video: bool,
    pub keywords: Option<MovieKeywords>,
    pub images: Option<MovieImages>,
    pub production_countries: Option<Vec<ProductionCountry>>,
    pub character: Option<String>,
    pub department: Option<String>,
}

impl Movie {
    /// A movie with only its id and titles set
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id,
            original_title: title.clone(),
            title,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            popularity: 0.0,
            vote_average: 0.0,
            vote_count: 0,
            release_date: None,
            genres: None,
            runtime: None,
            status: None,
            video: false,
            keywords: None,
            images: None,
            production_countries: None,
            character: None,
            department: None,
        }
    }

    /// Title to display, honoring the "always original title" preference
    pub fn user_title(&self, preferences: &Preferences) -> &str {
        if preferences.always_original_title {
            &self.original_title
        } else {
            &self.title
        }
    }

    /// Parsed `release_date`, if present and well formed
    pub fn release_day(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    /// Id reserved for the synthetic "Random" entry
    pub const RANDOM_ID: GenreId = -1;

    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The synthetic entry listed before every fetched genre
    pub fn random() -> Self {
        Self::new(Self::RANDOM_ID, "Random")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword {
    pub id: KeywordId,
    pub name: String,
}

/// `keywords` block appended to a movie detail response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieKeywords {
    pub keywords: Option<Vec<Keyword>>,
}

/// `images` block appended to a movie detail response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieImages {
    pub posters: Option<Vec<ImageData>>,
    pub backdrops: Option<Vec<ImageData>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub aspect_ratio: f32,
    pub file_path: String,
    pub height: i64,
    pub width: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub name: String,
    pub site: String,
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub content: String,
}

/// User-local facts about a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieUserMeta {
    /// When the movie first entered the wishlist or seenlist
    pub added_to_list: Option<DateTime<Utc>>,
}

/// Ranked lists shown in the movies menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoviesMenu {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
    Trending,
}

impl MoviesMenu {
    pub const ALL: [MoviesMenu; 5] = [
        MoviesMenu::Popular,
        MoviesMenu::TopRated,
        MoviesMenu::Upcoming,
        MoviesMenu::NowPlaying,
        MoviesMenu::Trending,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MoviesMenu::Popular => "Popular",
            MoviesMenu::TopRated => "Top Rated",
            MoviesMenu::Upcoming => "Upcoming",
            MoviesMenu::NowPlaying => "Now Playing",
            MoviesMenu::Trending => "Trending",
        }
    }
}

/// Orderings offered for movie lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoviesSort {
    ByReleaseDate,
    ByAddedDate,
    ByScore,
    ByPopularity,
}

impl MoviesSort {
    /// Value of the catalog's `sort_by` parameter for this ordering
    pub fn sort_by_api(&self) -> &'static str {
        match self {
            MoviesSort::ByReleaseDate => "release_date.desc",
            MoviesSort::ByAddedDate => "primary_release_date.desc",
            MoviesSort::ByScore => "vote_average.desc",
            MoviesSort::ByPopularity => "popularity.desc",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MoviesSort::ByReleaseDate => "by release date",
            MoviesSort::ByAddedDate => "by added date",
            MoviesSort::ByScore => "by rating",
            MoviesSort::ByPopularity => "by popularity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_title_respects_preference() {
        let mut movie = Movie::new(10, "Localized");
        movie.original_title = "Original".into();

        let mut preferences = Preferences::default();
        assert_eq!(movie.user_title(&preferences), "Localized");

        preferences.always_original_title = true;
        assert_eq!(movie.user_title(&preferences), "Original");
    }

    #[test]
    fn test_release_day_parses_or_is_absent() {
        let mut movie = Movie::new(1, "A");
        assert_eq!(movie.release_day(), None);

        movie.release_date = Some("2021-03-04".into());
        assert_eq!(movie.release_day(), NaiveDate::from_ymd_opt(2021, 3, 4));

        movie.release_date = Some("".into());
        assert_eq!(movie.release_day(), None);
    }

    #[test]
    fn test_sort_by_api_values() {
        assert_eq!(MoviesSort::ByReleaseDate.sort_by_api(), "release_date.desc");
        assert_eq!(
            MoviesSort::ByAddedDate.sort_by_api(),
            "primary_release_date.desc"
        );
        assert_eq!(MoviesSort::ByScore.sort_by_api(), "vote_average.desc");
        assert_eq!(MoviesSort::ByPopularity.sort_by_api(), "popularity.desc");
    }

    #[test]
    fn test_list_payload_decodes_without_detail_fields() {
        let json = r#"{"id":3,"title":"T","original_title":"O","popularity":1.5,"vote_average":8.0}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 3);
        assert_eq!(movie.overview, "");
        assert!(movie.genres.is_none());
        assert!(!movie.video);
    }
}
