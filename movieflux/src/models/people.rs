use serde::{Deserialize, Serialize};

use super::{ImageData, Movie, MovieId, PeopleId};

/// A cast or crew member.
///
/// Different endpoints fill different subsets of the optional fields, so a
/// cached person is updated with [`People::merged_with`] rather than
/// replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct People {
    pub id: PeopleId,
    pub name: String,
    pub character: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub known_for: Option<Vec<KnownFor>>,
    pub also_known_as: Option<Vec<String>>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub biography: Option<String>,
    pub popularity: Option<f32>,
    pub images: Option<Vec<ImageData>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownFor {
    pub id: MovieId,
    pub original_title: Option<String>,
    pub poster_path: Option<String>,
}

impl People {
    /// A person with only id and name set
    pub fn new(id: PeopleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            character: None,
            department: None,
            profile_path: None,
            known_for_department: None,
            known_for: None,
            also_known_as: None,
            birthday: None,
            deathday: None,
            place_of_birth: None,
            biography: None,
            popularity: None,
            images: None,
        }
    }

    /// Combine a cached record with a newer partial one.
    ///
    /// Every field present in `incoming` wins; absent fields keep the cached
    /// value. The name is always taken from `incoming`.
    pub fn merged_with(&self, incoming: &People) -> People {
        fn pick<T: Clone>(new: &Option<T>, old: &Option<T>) -> Option<T> {
            new.as_ref().or(old.as_ref()).cloned()
        }

        People {
            id: incoming.id,
            name: incoming.name.clone(),
            character: pick(&incoming.character, &self.character),
            department: pick(&incoming.department, &self.department),
            profile_path: pick(&incoming.profile_path, &self.profile_path),
            known_for_department: pick(&incoming.known_for_department, &self.known_for_department),
            known_for: pick(&incoming.known_for, &self.known_for),
            also_known_as: pick(&incoming.also_known_as, &self.also_known_as),
            birthday: pick(&incoming.birthday, &self.birthday),
            deathday: pick(&incoming.deathday, &self.deathday),
            place_of_birth: pick(&incoming.place_of_birth, &self.place_of_birth),
            biography: pick(&incoming.biography, &self.biography),
            popularity: pick(&incoming.popularity, &self.popularity),
            images: pick(&incoming.images, &self.images),
        }
    }

    /// Titles this person is known for, comma separated.
    pub fn known_for_text(&self) -> Option<String> {
        self.known_for.as_ref().map(|known_for| {
            known_for
                .iter()
                .filter_map(|movie| movie.original_title.as_deref())
                .collect::<Vec<_>>()
                .join(", ")
        })
    }
}

/// Payload of a movie's credits endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastResponse {
    pub id: MovieId,
    pub cast: Vec<People>,
    pub crew: Vec<People>,
}

/// Payload of a person's movie credits endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleCreditsResponse {
    pub cast: Option<Vec<Movie>>,
    pub crew: Option<Vec<Movie>>,
}

/// Payload of a person's images endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleImagesResponse {
    pub id: PeopleId,
    pub profiles: Vec<ImageData>,
}
