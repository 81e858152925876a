use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::apply_page;
use crate::actions::MoviesAction;
use crate::models::{Genre, Movie, MovieId};
use crate::state::{MoviesState, DISCOVER_QUEUE_LIMIT};

/// Movies slice reducer
pub fn movies_reducer(state: &MoviesState, action: &MoviesAction) -> MoviesState {
    let mut state = state.clone();

    match action {
        // ===== Listings =====
        MoviesAction::SetMovieMenuList {
            page,
            list,
            response,
        } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            apply_page(state.movies_list.entry(*list).or_default(), *page, ids);
        }

        MoviesAction::SetDetail { movie, response } => {
            Arc::make_mut(&mut state.movies).insert(*movie, response.clone());
        }

        MoviesAction::SetRecommended { movie, response } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            state.recommended.insert(*movie, ids);
        }

        MoviesAction::SetSimilar { movie, response } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            state.similar.insert(*movie, ids);
        }

        MoviesAction::SetVideos { movie, response } => {
            state.videos.insert(*movie, response.results.clone());
        }

        MoviesAction::SetSearch {
            query,
            page,
            response,
        } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            apply_page(state.search.entry(query.clone()).or_default(), *page, ids);
        }

        MoviesAction::SetSearchKeyword { query, response } => {
            state
                .search_keywords
                .insert(query.clone(), response.results.clone());
        }

        MoviesAction::SetMovieForGenre {
            genre,
            page,
            response,
        } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            apply_page(state.with_genre.entry(genre.id).or_default(), *page, ids);
        }

        MoviesAction::SetMovieWithCrew { crew, response } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            state.with_crew.insert(*crew, ids);
        }

        MoviesAction::SetMovieWithKeyword {
            keyword,
            page,
            response,
        } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            apply_page(state.with_keywords.entry(*keyword).or_default(), *page, ids);
        }

        MoviesAction::SetMovieReviews { movie, response } => {
            state.reviews.insert(*movie, response.results.clone());
        }

        MoviesAction::SetGenres { genres } => {
            state.genres = std::iter::once(Genre::random())
                .chain(genres.iter().cloned())
                .collect();
        }

        MoviesAction::CacheMovies { movies } => {
            cache_movies(&mut state.movies, movies);
        }

        MoviesAction::CacheMissingMovies { movies } => {
            let missing: Vec<_> = movies
                .iter()
                .filter(|movie| !state.movies.contains_key(&movie.id))
                .collect();
            if !missing.is_empty() {
                let cache = Arc::make_mut(&mut state.movies);
                for movie in missing {
                    cache.entry(movie.id).or_insert_with(|| movie.clone());
                }
            }
        }

        // ===== Wishlist / seenlist =====
        MoviesAction::AddToWishlist { movie, at } => {
            state.seenlist.remove(movie);
            state.wishlist.insert(*movie);
            let meta = state.movies_user_meta.entry(*movie).or_default();
            meta.added_to_list.get_or_insert(*at);
        }

        MoviesAction::RemoveFromWishlist { movie } => {
            state.wishlist.remove(movie);
        }

        MoviesAction::AddToSeenlist { movie, at } => {
            state.wishlist.remove(movie);
            state.seenlist.insert(*movie);
            let meta = state.movies_user_meta.entry(*movie).or_default();
            meta.added_to_list.get_or_insert(*at);
        }

        MoviesAction::RemoveFromSeenlist { movie } => {
            state.seenlist.remove(movie);
        }

        // ===== Random discover =====
        MoviesAction::ResetRandomDiscover => {
            state.discover.clear();
            state.discover_filter = None;
        }

        MoviesAction::SetRandomDiscover { filter, response } => {
            let ids = cache_movies(&mut state.movies, &response.results);
            state.discover = prepend_unique(ids, &state.discover);
            state.discover_filter = Some(filter.clone());
        }

        MoviesAction::PushRandomDiscover { movie } => {
            state.discover = prepend_unique(vec![*movie], &state.discover);
        }

        MoviesAction::PopRandomDiscover => {
            if !state.discover.is_empty() {
                state.discover.remove(0);
            }
        }

        MoviesAction::SaveDiscoverFilter { filter } => {
            state.saved_discover_filters.push(filter.clone());
        }

        MoviesAction::ClearSavedDiscoverFilters => {
            state.saved_discover_filters.clear();
        }

        // ===== Custom lists =====
        MoviesAction::AddCustomList { list } => {
            state.custom_lists.insert(list.id, list.clone());
        }

        MoviesAction::EditCustomList { list, title, cover } => {
            if let Some(list) = state.custom_lists.get_mut(list) {
                if let Some(title) = title {
                    list.name = title.clone();
                }
                if let Some(cover) = cover {
                    list.cover = Some(*cover);
                }
            }
        }

        MoviesAction::AddMovieToCustomList { list, movie } => {
            if let Some(list) = state.custom_lists.get_mut(list) {
                list.movies.insert(*movie);
            }
        }

        MoviesAction::AddMoviesToCustomList { list, movies } => {
            if let Some(list) = state.custom_lists.get_mut(list) {
                list.movies.extend(movies.iter().copied());
            }
        }

        MoviesAction::RemoveMovieFromCustomList { list, movie } => {
            if let Some(list) = state.custom_lists.get_mut(list) {
                list.movies.remove(movie);
            }
        }

        MoviesAction::RemoveCustomList { list } => {
            state.custom_lists.remove(list);
        }
    }

    state
}

/// Insert every movie in full and return their ids in order
fn cache_movies(cache: &mut Arc<HashMap<MovieId, Movie>>, movies: &[Movie]) -> Vec<MovieId> {
    if movies.is_empty() {
        return Vec::new();
    }
    let cache = Arc::make_mut(cache);
    movies
        .iter()
        .map(|movie| {
            cache.insert(movie.id, movie.clone());
            movie.id
        })
        .collect()
}

/// `front` followed by the ids of `queue` not already in it, capped at the
/// queue limit by dropping from the tail.
fn prepend_unique(front: Vec<MovieId>, queue: &[MovieId]) -> Vec<MovieId> {
    let mut seen = HashSet::new();
    front
        .into_iter()
        .chain(queue.iter().copied())
        .filter(|id| seen.insert(*id))
        .take(DISCOVER_QUEUE_LIMIT)
        .collect()
}
