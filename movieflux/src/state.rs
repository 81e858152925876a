//! Application state - single source of truth
//!
//! The state is split into independent slices. Each slice sits behind an
//! `Arc`, so a reduction that touches one slice shares the others with the
//! previous state instead of copying them.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::models::{
    CustomList, DiscoverFilter, Genre, GenreId, Keyword, KeywordId, ListId, Movie, MovieId,
    MovieUserMeta, MoviesMenu, People, PeopleId, Review, Video,
};

/// Maximum number of ids kept in the random discover queue
pub const DISCOVER_QUEUE_LIMIT: usize = 100;

/// Movies slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviesState {
    /// Entity cache, shared between states until a reduction writes to it
    pub movies: Arc<HashMap<MovieId, Movie>>,
    /// Ranked menu lists, in page order
    pub movies_list: HashMap<MoviesMenu, Vec<MovieId>>,
    pub recommended: HashMap<MovieId, Vec<MovieId>>,
    pub similar: HashMap<MovieId, Vec<MovieId>>,
    /// Search results per query, in page order
    pub search: HashMap<String, Vec<MovieId>>,
    pub search_keywords: HashMap<String, Vec<Keyword>>,
    pub movies_user_meta: HashMap<MovieId, MovieUserMeta>,
    /// Random discover queue, most recent first
    pub discover: Vec<MovieId>,
    /// Filter of the last random discover page
    pub discover_filter: Option<DiscoverFilter>,
    pub saved_discover_filters: Vec<DiscoverFilter>,
    pub wishlist: BTreeSet<MovieId>,
    pub seenlist: BTreeSet<MovieId>,
    pub with_genre: HashMap<GenreId, Vec<MovieId>>,
    pub with_keywords: HashMap<KeywordId, Vec<MovieId>>,
    pub with_crew: HashMap<PeopleId, Vec<MovieId>>,
    pub videos: HashMap<MovieId, Vec<Video>>,
    pub reviews: HashMap<MovieId, Vec<Review>>,
    pub custom_lists: HashMap<ListId, CustomList>,
    /// Genres, led by the synthetic "Random" entry once fetched
    pub genres: Vec<Genre>,
}

/// People slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeoplesState {
    /// Entity cache, shared between states until a reduction writes to it
    pub peoples: Arc<HashMap<PeopleId, People>>,
    /// Cast and crew ids of a movie
    pub peoples_movies: HashMap<MovieId, BTreeSet<PeopleId>>,
    pub search: HashMap<String, Vec<PeopleId>>,
    pub popular: Vec<PeopleId>,
    /// person → movie → character
    pub casts: HashMap<PeopleId, HashMap<MovieId, String>>,
    /// person → movie → department
    pub crews: HashMap<PeopleId, HashMap<MovieId, String>>,
    pub fan_club: BTreeSet<PeopleId>,
}

/// Whole application state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub movies: Arc<MoviesState>,
    pub people: Arc<PeoplesState>,
}

impl AppState {
    pub fn new(movies: MoviesState, people: PeoplesState) -> Self {
        Self {
            movies: Arc::new(movies),
            people: Arc::new(people),
        }
    }

    /// Cached movie by id
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.movies.get(&id)
    }

    /// Cached person by id
    pub fn person(&self, id: PeopleId) -> Option<&People> {
        self.people.peoples.get(&id)
    }
}
