//! Actions, grouped by the slice that reduces them
//!
//! [`AppAction`] is the single action type of the store. Each variant wraps
//! the action enum of one domain and takes its name and category from it,
//! so logging and filtering see `SetGenres` in category `movies` rather than
//! the wrapper.

mod movies;
mod people;
mod ui;

use movieflux_core::{ActionSummary, Dispatchable};

pub use movies::MoviesAction;
pub use people::PeopleAction;
pub use ui::UiAction;

use crate::state::AppState;

/// Root action type
#[derive(movieflux_macros::Action, Clone, Debug, PartialEq)]
pub enum AppAction {
    #[action(delegate)]
    Movies(MoviesAction),
    #[action(delegate)]
    People(PeopleAction),
    #[action(delegate)]
    Ui(UiAction),
}

impl ActionSummary for AppAction {
    fn summary(&self) -> String {
        match self {
            AppAction::Movies(action) => action.summary(),
            AppAction::People(action) => action.summary(),
            AppAction::Ui(action) => action.summary(),
        }
    }
}

impl From<MoviesAction> for AppAction {
    fn from(action: MoviesAction) -> Self {
        AppAction::Movies(action)
    }
}

impl From<PeopleAction> for AppAction {
    fn from(action: PeopleAction) -> Self {
        AppAction::People(action)
    }
}

impl From<UiAction> for AppAction {
    fn from(action: UiAction) -> Self {
        AppAction::Ui(action)
    }
}

impl From<MoviesAction> for Dispatchable<AppState, AppAction> {
    fn from(action: MoviesAction) -> Self {
        Dispatchable::Plain(action.into())
    }
}

impl From<PeopleAction> for Dispatchable<AppState, AppAction> {
    fn from(action: PeopleAction) -> Self {
        Dispatchable::Plain(action.into())
    }
}

impl From<UiAction> for Dispatchable<AppState, AppAction> {
    fn from(action: UiAction) -> Self {
        Dispatchable::Plain(action.into())
    }
}
