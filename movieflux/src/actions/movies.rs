use chrono::{DateTime, Utc};
use movieflux_core::ActionSummary;

use crate::models::{
    CustomList, DiscoverFilter, Genre, Keyword, KeywordId, ListId, Movie, MovieId, MoviesMenu,
    PaginatedResponse, PeopleId, Review, Video,
};

/// Movies slice actions
#[derive(movieflux_macros::Action, Clone, Debug, PartialEq)]
#[action(category = "movies")]
pub enum MoviesAction {
    // ===== Listings =====
    /// Page of a menu list. Page 1 replaces the list, later pages append.
    SetMovieMenuList {
        page: u32,
        list: MoviesMenu,
        response: PaginatedResponse<Movie>,
    },
    /// Full movie detail, replacing the cached entity
    SetDetail { movie: MovieId, response: Movie },
    SetRecommended {
        movie: MovieId,
        response: PaginatedResponse<Movie>,
    },
    SetSimilar {
        movie: MovieId,
        response: PaginatedResponse<Movie>,
    },
    SetVideos {
        movie: MovieId,
        response: PaginatedResponse<Video>,
    },
    SetSearch {
        query: String,
        page: u32,
        response: PaginatedResponse<Movie>,
    },
    SetSearchKeyword {
        query: String,
        response: PaginatedResponse<Keyword>,
    },
    SetMovieForGenre {
        genre: Genre,
        page: u32,
        response: PaginatedResponse<Movie>,
    },
    SetMovieWithCrew {
        crew: PeopleId,
        response: PaginatedResponse<Movie>,
    },
    SetMovieWithKeyword {
        keyword: KeywordId,
        page: u32,
        response: PaginatedResponse<Movie>,
    },
    SetMovieReviews {
        movie: MovieId,
        response: PaginatedResponse<Review>,
    },
    SetGenres { genres: Vec<Genre> },
    /// Cache movies without indexing them in any list
    CacheMovies { movies: Vec<Movie> },
    /// Cache only the movies not already cached
    CacheMissingMovies { movies: Vec<Movie> },

    // ===== Wishlist / seenlist =====
    AddToWishlist { movie: MovieId, at: DateTime<Utc> },
    RemoveFromWishlist { movie: MovieId },
    AddToSeenlist { movie: MovieId, at: DateTime<Utc> },
    RemoveFromSeenlist { movie: MovieId },

    // ===== Random discover =====
    ResetRandomDiscover,
    SetRandomDiscover {
        filter: DiscoverFilter,
        response: PaginatedResponse<Movie>,
    },
    PushRandomDiscover { movie: MovieId },
    PopRandomDiscover,
    SaveDiscoverFilter { filter: DiscoverFilter },
    ClearSavedDiscoverFilters,

    // ===== Custom lists =====
    AddCustomList { list: CustomList },
    EditCustomList {
        list: ListId,
        title: Option<String>,
        cover: Option<MovieId>,
    },
    AddMovieToCustomList { list: ListId, movie: MovieId },
    AddMoviesToCustomList { list: ListId, movies: Vec<MovieId> },
    RemoveMovieFromCustomList { list: ListId, movie: MovieId },
    RemoveCustomList { list: ListId },
}

impl MoviesAction {
    /// Add to the wishlist, stamped now
    pub fn add_to_wishlist(movie: MovieId) -> Self {
        MoviesAction::AddToWishlist {
            movie,
            at: Utc::now(),
        }
    }

    /// Add to the seenlist, stamped now
    pub fn add_to_seenlist(movie: MovieId) -> Self {
        MoviesAction::AddToSeenlist {
            movie,
            at: Utc::now(),
        }
    }
}

/// Shows result counts instead of whole payloads
impl ActionSummary for MoviesAction {
    fn summary(&self) -> String {
        match self {
            MoviesAction::SetMovieMenuList {
                page,
                list,
                response,
            } => format!(
                "SetMovieMenuList {{ list: {:?}, page: {}, results: {} }}",
                list,
                page,
                response.results.len()
            ),
            MoviesAction::SetDetail { movie, .. } => format!("SetDetail {{ movie: {} }}", movie),
            MoviesAction::SetRecommended { movie, response }
            | MoviesAction::SetSimilar { movie, response } => format!(
                "{} {{ movie: {}, results: {} }}",
                movieflux_core::Action::name(self),
                movie,
                response.results.len()
            ),
            MoviesAction::SetVideos { movie, response } => format!(
                "SetVideos {{ movie: {}, results: {} }}",
                movie,
                response.results.len()
            ),
            MoviesAction::SetMovieReviews { movie, response } => format!(
                "SetMovieReviews {{ movie: {}, results: {} }}",
                movie,
                response.results.len()
            ),
            MoviesAction::SetSearch {
                query,
                page,
                response,
            } => format!(
                "SetSearch {{ query: {:?}, page: {}, results: {} }}",
                query,
                page,
                response.results.len()
            ),
            MoviesAction::SetSearchKeyword { query, response } => format!(
                "SetSearchKeyword {{ query: {:?}, results: {} }}",
                query,
                response.results.len()
            ),
            MoviesAction::SetMovieForGenre {
                genre,
                page,
                response,
            } => format!(
                "SetMovieForGenre {{ genre: {}, page: {}, results: {} }}",
                genre.id,
                page,
                response.results.len()
            ),
            MoviesAction::SetMovieWithCrew { crew, response } => format!(
                "SetMovieWithCrew {{ crew: {}, results: {} }}",
                crew,
                response.results.len()
            ),
            MoviesAction::SetMovieWithKeyword {
                keyword,
                page,
                response,
            } => format!(
                "SetMovieWithKeyword {{ keyword: {}, page: {}, results: {} }}",
                keyword,
                page,
                response.results.len()
            ),
            MoviesAction::SetRandomDiscover { response, .. } => format!(
                "SetRandomDiscover {{ results: {} }}",
                response.results.len()
            ),
            MoviesAction::SetGenres { genres } => {
                format!("SetGenres {{ count: {} }}", genres.len())
            }
            MoviesAction::CacheMovies { movies } => {
                format!("CacheMovies {{ count: {} }}", movies.len())
            }
            MoviesAction::CacheMissingMovies { movies } => {
                format!("CacheMissingMovies {{ count: {} }}", movies.len())
            }
            _ => format!("{:?}", self),
        }
    }
}
