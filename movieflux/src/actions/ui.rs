use movieflux_core::ActionSummary;

use crate::models::{MovieId, PeopleId};

/// Navigation intents for the view layer.
///
/// No reducer owns this category, so dispatching one leaves the state
/// unchanged. Middleware and listeners still observe them.
#[derive(movieflux_macros::Action, Clone, Debug, PartialEq, Eq)]
#[action(category = "ui")]
pub enum UiAction {
    OpenMovieDetail { movie: MovieId },
    OpenPersonDetail { people: PeopleId },
    ScrollToTop,
}

impl ActionSummary for UiAction {}
