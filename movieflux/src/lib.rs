//! movieflux: unidirectional state for a movie catalog client
//!
//! One [`Store`] holds the whole [`AppState`]. Views read immutable
//! snapshots and dispatch [`AppAction`]s; catalog requests are async
//! [`fetch`] actions that dispatch plain actions once the payload is decoded.
//!
//! # Example
//! ```ignore
//! use std::sync::Arc;
//! use movieflux::prelude::*;
//!
//! let env = Arc::new(Environment::from_env());
//! let mut runtime = movieflux::app::runtime_from_env();
//!
//! runtime.enqueue(env.fetch(fetch::movies::Genres));
//! runtime.enqueue(env.fetch(fetch::movies::MenuList::new(MoviesMenu::Popular, 1)));
//! runtime.settle(Duration::from_millis(200)).await;
//!
//! let state = runtime.state();
//! let popular = &state.movies.movies_list[&MoviesMenu::Popular];
//! ```

pub mod actions;
pub mod api;
pub mod app;
pub mod config;
pub mod fetch;
pub mod models;
pub mod reducers;
pub mod selectors;
pub mod state;

// Re-export everything from core
pub use movieflux_core::*;

// Re-export derive macros
pub use movieflux_macros::Action;

pub use actions::{AppAction, MoviesAction, PeopleAction, UiAction};
pub use state::{AppState, MoviesState, PeoplesState};

/// Prelude for convenient imports
pub mod prelude {
    // Runtime
    pub use movieflux_core::prelude::*;

    // Domain
    pub use crate::actions::{AppAction, MoviesAction, PeopleAction, UiAction};
    pub use crate::app::{build_store, AppDispatcher, AppRuntime, AppStore};
    pub use crate::config::Preferences;
    pub use crate::fetch::{self, Environment, FetchRequest};
    pub use crate::models::{Genre, Movie, MovieId, MoviesMenu, MoviesSort, People, PeopleId};
    pub use crate::selectors::sorted_movie_ids;
    pub use crate::state::{AppState, MoviesState, PeoplesState};
}
