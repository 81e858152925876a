use std::collections::HashMap;
use std::sync::Arc;

use super::apply_page;
use crate::actions::PeopleAction;
use crate::models::{People, PeopleId};
use crate::state::PeoplesState;

/// People slice reducer
pub fn people_reducer(state: &PeoplesState, action: &PeopleAction) -> PeoplesState {
    let mut state = state.clone();

    match action {
        PeopleAction::SetDetail { person } => {
            merge_people(&mut state.peoples, std::slice::from_ref(person));
        }

        PeopleAction::SetImages { people, images } => {
            if state.peoples.contains_key(people) {
                if let Some(person) = Arc::make_mut(&mut state.peoples).get_mut(people) {
                    person.images = Some(images.clone());
                }
            }
        }

        PeopleAction::SetMovieCasts { movie, response } => {
            let mut ids = merge_people(&mut state.peoples, &response.cast);
            ids.extend(merge_people(&mut state.peoples, &response.crew));
            state.peoples_movies.insert(*movie, ids.into_iter().collect());
        }

        PeopleAction::SetSearch {
            query,
            page,
            response,
        } => {
            let ids = merge_people(&mut state.peoples, &response.results);
            apply_page(state.search.entry(query.clone()).or_default(), *page, ids);
        }

        PeopleAction::SetPopular { page, response } => {
            let ids = merge_people(&mut state.peoples, &response.results);
            apply_page(&mut state.popular, *page, ids);
        }

        PeopleAction::SetPeopleCredits { people, response } => {
            for movie in response.cast.iter().flatten() {
                if let Some(character) = &movie.character {
                    state
                        .casts
                        .entry(*people)
                        .or_default()
                        .insert(movie.id, character.clone());
                }
            }
            for movie in response.crew.iter().flatten() {
                if let Some(department) = &movie.department {
                    state
                        .crews
                        .entry(*people)
                        .or_default()
                        .insert(movie.id, department.clone());
                }
            }
        }

        PeopleAction::AddToFanClub { people } => {
            state.fan_club.insert(*people);
        }

        PeopleAction::RemoveFromFanClub { people } => {
            state.fan_club.remove(people);
        }
    }

    state
}

/// Merge each incoming person into the cache and return their ids in order
fn merge_people(
    cache: &mut Arc<HashMap<PeopleId, People>>,
    incoming: &[People],
) -> Vec<PeopleId> {
    if incoming.is_empty() {
        return Vec::new();
    }
    let cache = Arc::make_mut(cache);
    incoming
        .iter()
        .map(|person| {
            let merged = match cache.get(&person.id) {
                Some(cached) => cached.merged_with(person),
                None => person.clone(),
            };
            cache.insert(person.id, merged);
            person.id
        })
        .collect()
}
