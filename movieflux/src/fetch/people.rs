//! People catalog requests

use super::{page_params, FetchRequest};
use crate::actions::{AppAction, MoviesAction, PeopleAction};
use crate::api::{Endpoint, QueryParams};
use crate::config::Preferences;
use crate::models::{
    CastResponse, Movie, MovieId, PaginatedResponse, People, PeopleCreditsResponse, PeopleId,
    PeopleImagesResponse,
};

fn people(action: PeopleAction) -> Vec<AppAction> {
    vec![AppAction::People(action)]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub people: PeopleId,
}

impl FetchRequest for Detail {
    type Response = People;
    const NAME: &'static str = "FetchPeopleDetail";

    fn endpoint(&self) -> Endpoint {
        Endpoint::PersonDetail(self.people)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        people(PeopleAction::SetDetail { person: response })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Images {
    pub people: PeopleId,
}

impl FetchRequest for Images {
    type Response = PeopleImagesResponse;
    const NAME: &'static str = "FetchPeopleImages";

    fn endpoint(&self) -> Endpoint {
        Endpoint::PersonImages(self.people)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        people(PeopleAction::SetImages {
            people: self.people,
            images: response.profiles,
        })
    }
}

/// Cast and crew of a movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCasts {
    pub movie: MovieId,
}

impl FetchRequest for MovieCasts {
    type Response = CastResponse;
    const NAME: &'static str = "FetchMovieCasts";

    fn endpoint(&self) -> Endpoint {
        Endpoint::Credits(self.movie)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        people(PeopleAction::SetMovieCasts {
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
    type Response = PaginatedResponse<People>;
    const NAME: &'static str = "FetchPeopleSearch";

    fn endpoint(&self) -> Endpoint {
        Endpoint::SearchPerson
    }

    fn params(&self, _preferences: &Preferences) -> QueryParams {
        let mut params = page_params(self.page);
        params.insert("query".into(), self.query.clone());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        people(PeopleAction::SetSearch {
            query: self.query,
            page: self.page,
            response,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popular {
    pub page: u32,
}

impl FetchRequest for Popular {
    type Response = PaginatedResponse<People>;
    const NAME: &'static str = "FetchPopularPeople";

    fn endpoint(&self) -> Endpoint {
        Endpoint::PopularPersons
    }

    fn params(&self, preferences: &Preferences) -> QueryParams {
        let mut params = page_params(self.page);
        params.insert("region".into(), preferences.region.clone());
        params
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        people(PeopleAction::SetPopular {
            page: self.page,
            response,
        })
    }
}

/// Movie credits of a person.
///
/// Credited movies missing from the cache are cached first, without the
/// person's role, so the ids recorded for the person resolve in the movie
/// cache. Movies already cached keep their details.
#[derive(Debug, Clone, PartialEq)]
pub struct Credits {
    pub people: PeopleId,
}

impl FetchRequest for Credits {
    type Response = PeopleCreditsResponse;
    const NAME: &'static str = "FetchPeopleCredits";

    fn endpoint(&self) -> Endpoint {
        Endpoint::PersonMovieCredits(self.people)
    }

    fn into_actions(self, response: Self::Response) -> Vec<AppAction> {
        let movies: Vec<_> = response
            .cast
            .iter()
            .chain(response.crew.iter())
            .flatten()
            .map(|credit| Movie {
                character: None,
                department: None,
                ..credit.clone()
            })
            .collect();

        vec![
            AppAction::Movies(MoviesAction::CacheMissingMovies { movies }),
            AppAction::People(PeopleAction::SetPeopleCredits {
                people: self.people,
                response,
            }),
        ]
    }
}
