//! Catalog payloads and user-local records
//!
//! Field names follow the catalog's JSON so payloads decode without
//! renaming. Ids are plain integers; the genre sentinel uses `-1`.

mod custom_list;
mod discover;
mod movie;
mod people;
mod response;

pub use custom_list::CustomList;
pub use discover::{DiscoverFilter, DISCOVER_SORTS};
pub use movie::{
    Genre, ImageData, Keyword, Movie, MovieImages, MovieKeywords, MovieUserMeta, MoviesMenu,
    MoviesSort, ProductionCountry, Review, Video,
};
pub use people::{CastResponse, KnownFor, People, PeopleCreditsResponse, PeopleImagesResponse};
pub use response::{GenresResponse, PaginatedResponse};

/// Movie identifier
pub type MovieId = i64;
/// Person identifier
pub type PeopleId = i64;
/// Genre identifier
pub type GenreId = i64;
/// Keyword identifier
pub type KeywordId = i64;
/// Custom list identifier
pub type ListId = i64;
