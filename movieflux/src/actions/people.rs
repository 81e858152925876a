use movieflux_core::ActionSummary;

use crate::models::{
    CastResponse, ImageData, MovieId, PaginatedResponse, People, PeopleCreditsResponse, PeopleId,
};

/// People slice actions
#[derive(movieflux_macros::Action, Clone, Debug, PartialEq)]
#[action(category = "people")]
pub enum PeopleAction {
    /// Person detail, merged into the cached record
    SetDetail { person: People },
    /// Profile images of an already cached person
    SetImages {
        people: PeopleId,
        images: Vec<ImageData>,
    },
    SetMovieCasts {
        movie: MovieId,
        response: CastResponse,
    },
    SetSearch {
        query: String,
        page: u32,
        response: PaginatedResponse<People>,
    },
    SetPopular {
        page: u32,
        response: PaginatedResponse<People>,
    },
    SetPeopleCredits {
        people: PeopleId,
        response: PeopleCreditsResponse,
    },
    AddToFanClub { people: PeopleId },
    RemoveFromFanClub { people: PeopleId },
}

impl ActionSummary for PeopleAction {
    fn summary(&self) -> String {
        match self {
            PeopleAction::SetDetail { person } => {
                format!("SetDetail {{ person: {} }}", person.id)
            }
            PeopleAction::SetImages { people, images } => format!(
                "SetImages {{ people: {}, images: {} }}",
                people,
                images.len()
            ),
            PeopleAction::SetMovieCasts { movie, response } => format!(
                "SetMovieCasts {{ movie: {}, cast: {}, crew: {} }}",
                movie,
                response.cast.len(),
                response.crew.len()
            ),
            PeopleAction::SetSearch {
                query,
                page,
                response,
            } => format!(
                "SetSearch {{ query: {:?}, page: {}, results: {} }}",
                query,
                page,
                response.results.len()
            ),
            PeopleAction::SetPopular { page, response } => format!(
                "SetPopular {{ page: {}, results: {} }}",
                page,
                response.results.len()
            ),
            PeopleAction::SetPeopleCredits { people, response } => format!(
                "SetPeopleCredits {{ people: {}, cast: {}, crew: {} }}",
                people,
                response.cast.as_ref().map_or(0, Vec::len),
                response.crew.as_ref().map_or(0, Vec::len)
            ),
            _ => format!("{:?}", self),
        }
    }
}
