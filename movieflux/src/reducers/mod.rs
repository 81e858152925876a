//! Reducers - pure functions: (state, action) -> state
//!
//! [`app_reducer`] is the store's root reducer. It hands each action to the
//! reducer of exactly one slice and rebuilds the state around the returned
//! slice; the other slices are shared with the previous state. Actions
//! without a slice reducer (`ui`) return the state unchanged.

mod movies;
mod people;

use std::sync::Arc;

pub use movies::movies_reducer;
pub use people::people_reducer;

use crate::actions::AppAction;
use crate::state::AppState;

/// Root reducer
pub fn app_reducer(state: &AppState, action: &AppAction) -> AppState {
    match action {
        AppAction::Movies(action) => AppState {
            movies: Arc::new(movies_reducer(&state.movies, action)),
            people: Arc::clone(&state.people),
        },
        AppAction::People(action) => AppState {
            movies: Arc::clone(&state.movies),
            people: Arc::new(people_reducer(&state.people, action)),
        },
        AppAction::Ui(_) => state.clone(),
    }
}

/// Page 1 (or 0) replaces `list`, later pages append without dedup.
pub(crate) fn apply_page<T>(list: &mut Vec<T>, page: u32, ids: impl IntoIterator<Item = T>) {
    if page <= 1 {
        list.clear();
    }
    list.extend(ids);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{MoviesAction, PeopleAction, UiAction};

    #[test]
    fn test_movies_action_only_replaces_movies_slice() {
        let state = AppState::default();
        let reduced = app_reducer(&state, &MoviesAction::add_to_wishlist(5).into());

        assert!(reduced.movies.wishlist.contains(&5));
        assert!(Arc::ptr_eq(&state.people, &reduced.people));
        assert!(!Arc::ptr_eq(&state.movies, &reduced.movies));
    }

    #[test]
    fn test_routes_movie_action_to_movies_slice() {
        let mut movies = crate::state::MoviesState::default();
        movies.seenlist.insert(5);
        let state = AppState::new(movies, Default::default());

        let reduced = app_reducer(&state, &MoviesAction::add_to_wishlist(5).into());

        assert!(reduced.movies.wishlist.contains(&5));
        assert!(!reduced.movies.seenlist.contains(&5));
    }

    #[test]
    fn test_routes_people_action_to_people_slice() {
        let state = AppState::default();
        let reduced = app_reducer(&state, &PeopleAction::AddToFanClub { people: 55 }.into());

        assert!(reduced.people.fan_club.contains(&55));
        assert!(Arc::ptr_eq(&state.movies, &reduced.movies));
    }

    #[test]
    fn test_action_without_slice_is_identity() {
        let state = app_reducer(
            &AppState::default(),
            &PeopleAction::AddToFanClub { people: 1 }.into(),
        );

        let reduced = app_reducer(&state, &UiAction::OpenMovieDetail { movie: 3 }.into());

        assert_eq!(reduced, state);
        assert!(Arc::ptr_eq(&state.movies, &reduced.movies));
        assert!(Arc::ptr_eq(&state.people, &reduced.people));
    }

    #[test]
    fn test_apply_page() {
        let mut list = vec![9];
        apply_page(&mut list, 1, [1, 2]);
        assert_eq!(list, vec![1, 2]);

        apply_page(&mut list, 2, [2, 3]);
        assert_eq!(list, vec![1, 2, 2, 3]);
    }
}
