use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ListId, MovieId};

/// A user-defined movie list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomList {
    pub id: ListId,
    pub name: String,
    /// Movie whose backdrop illustrates the list
    pub cover: Option<MovieId>,
    pub movies: BTreeSet<MovieId>,
}

impl CustomList {
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cover: None,
            movies: BTreeSet::new(),
        }
    }
}
