//! Derived views over the state

use std::cmp::Ordering;

use chrono::Datelike;

use crate::models::{MovieId, MoviesSort};
use crate::state::MoviesState;

/// `ids` ordered by `sort`, highest first.
///
/// The sort is stable. Ids whose movie is not cached, or whose sort field is
/// missing or unparseable, go after every id that has a value.
pub fn sorted_movie_ids(ids: &[MovieId], sort: MoviesSort, state: &MoviesState) -> Vec<MovieId> {
    let mut keyed: Vec<(MovieId, Option<f64>)> = ids
        .iter()
        .map(|id| (*id, sort_key(*id, sort, state)))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| descending(*a, *b));
    keyed.into_iter().map(|(id, _)| id).collect()
}

fn sort_key(id: MovieId, sort: MoviesSort, state: &MoviesState) -> Option<f64> {
    match sort {
        MoviesSort::ByScore => state.movies.get(&id).map(|m| f64::from(m.vote_average)),
        MoviesSort::ByPopularity => state.movies.get(&id).map(|m| f64::from(m.popularity)),
        MoviesSort::ByReleaseDate => state
            .movies
            .get(&id)
            .and_then(|m| m.release_day())
            .map(|day| f64::from(day.num_days_from_ce())),
        MoviesSort::ByAddedDate => state
            .movies_user_meta
            .get(&id)
            .and_then(|meta| meta.added_to_list)
            .map(|at| at.timestamp_millis() as f64),
    }
}

fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
