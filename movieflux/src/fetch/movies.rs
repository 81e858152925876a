//! Movie catalog requests

use super::{page_params, FetchRequest};
use crate::actions::{AppAction, MoviesAction};
use crate::api::{Endpoint, QueryParams};
use crate::config::Preferences;
use crate::models::{
    DiscoverFilter, Genre, GenresResponse, Keyword, KeywordId, Movie, MovieId, MoviesMenu,
    MoviesSort, PaginatedResponse, PeopleId, Review, Video,
};

fn movies(action: MoviesAction) -> Vec<AppAction> {
    vec![AppAction::Movies(action)]
}

/// One page of a menu list, in the preferred region
#[derive(Debug, Clone, PartialEq)]
pub struct MenuList {
    pub list: MoviesMenu,
    pub page: u32,
}

impl MenuList {
    pub fn new(list: MoviesMenu, page: u32) -> Self {
        Self { list, page }
    }
}

impl FetchRequest for MenuList {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchMoviesMenuList";

    fn endpoint(&self) -> Endpoint {
        self.list.into()
    }

    fn params(&self, preferences: &Preferences) -> QueryParams {
        let mut params = page_params(self.page);
        params.insert("region".into(), preferences.region.clone());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetMovieMenuList {
            page: self.page,
            list: self.list,
            response,
        })
    }
}

/// Full detail, with keywords and images appended
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub movie: MovieId,
}

impl FetchRequest for Detail {
    type Response = Movie;
    const NAME: &'static str = "FetchDetail";

    fn endpoint(&self) -> Endpoint {
        Endpoint::MovieDetail(self.movie)
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("append_to_response".into(), "keywords,images".into());
        params.insert("include_image_language".into(), "en,null".into());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetDetail {
            movie: self.movie,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommended {
    pub movie: MovieId,
}

impl FetchRequest for Recommended {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchRecommended";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Recommended(self.movie)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetRecommended {
            movie: self.movie,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Similar {
    pub movie: MovieId,
}

impl FetchRequest for Similar {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchSimilar";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Similar(self.movie)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetSimilar {
            movie: self.movie,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Videos {
    pub movie: MovieId,
}

impl FetchRequest for Videos {
    type Response = PaginatedResponse<Video>;
    const NAME: &'static str = "FetchVideos";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Videos(self.movie)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetVideos {
            movie: self.movie,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub query: String,
    pub page: u32,
}

impl Search {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }
}

impl FetchRequest for Search {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchSearch";

    fn endpoint(&self) -> Endpoint {
        Endpoint::SearchMovie
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = page_params(self.page);
        params.insert("query".into(), self.query.clone());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetSearch {
            query: self.query,
            page: self.page,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchKeyword {
    pub query: String,
}

impl FetchRequest for SearchKeyword {
    type Response = PaginatedResponse<Keyword>;
    const NAME: &'static str = "FetchSearchKeyword";

    fn endpoint(&self) -> Endpoint {
        Endpoint::SearchKeyword
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("query".into(), self.query.clone());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetSearchKeyword {
            query: self.query,
            response,
        })
    }
}

/// A page of a genre, ordered by `sort`
#[derive(Debug, Clone, PartialEq)]
pub struct ForGenre {
    pub genre: Genre,
    pub page: u32,
    pub sort: MoviesSort,
}

impl FetchRequest for ForGenre {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchMoviesGenre";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Discover
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = page_params(self.page);
        params.insert("with_genres".into(), self.genre.id.to_string());
        params.insert("sort_by".into(), self.sort.sort_by_api().into());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetMovieForGenre {
            genre: self.genre,
            page: self.page,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithCrew {
    pub crew: PeopleId,
}

impl FetchRequest for WithCrew {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchMovieWithCrew";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Discover
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("with_crew".into(), self.crew.to_string());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetMovieWithCrew {
            crew: self.crew,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithKeyword {
    pub keyword: KeywordId,
    pub page: u32,
}

impl FetchRequest for WithKeyword {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchMovieWithKeywords";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Discover
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = page_params(self.page);
        params.insert("with_keywords".into(), self.keyword.to_string());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetMovieWithKeyword {
            keyword: self.keyword,
            page: self.page,
            response,
        })
    }
}

/// A random page of the discover endpoint.
///
/// The filter is fixed when the request is built, so the dispatched
/// `SetRandomDiscover` records the filter that was actually queried.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomDiscover {
    pub filter: DiscoverFilter,
}

impl RandomDiscover {
    /// Query `filter`, or a fresh random filter when `None`
    pub fn new(filter: Option<DiscoverFilter>) -> Self {
        Self {
            filter: filter.unwrap_or_else(DiscoverFilter::random_filter),
        }
    }
}

impl FetchRequest for RandomDiscover {
    type Response = PaginatedResponse<Movie>;
    const NAME: &'static str = "FetchRandomDiscover";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Discover
    }

    fn params(&self, preferences: &Preferences) -> QueryParams {
        self.filter.to_params(&preferences.language)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetRandomDiscover {
            filter: self.filter,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reviews {
    pub movie: MovieId,
}

impl FetchRequest for Reviews {
    type Response = PaginatedResponse<Review>;
    const NAME: &'static str = "FetchMovieReviews";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Reviews(self.movie)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetMovieReviews {
            movie: self.movie,
            response,
        })
    }
}

/// Genre list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Genres;

impl FetchRequest for Genres {
    type Response = GenresResponse;
    const NAME: &'static str = "FetchGenres";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Genres
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        movies(MoviesAction::SetGenres {
            genres: response.genres,
        })
    }
}
