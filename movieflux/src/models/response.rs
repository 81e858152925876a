use serde::{Deserialize, Serialize};

use super::Genre;

/// One page of a listing endpoint.
///
/// Some endpoints (videos, reviews) return `results` without paging
/// fields; those default to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// A single page holding `results`
    pub fn single_page(results: Vec<T>) -> Self {
        Self {
            page: 1,
            total_results: results.len() as u32,
            total_pages: 1,
            results,
        }
    }
}

/// Payload of the genre list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenresResponse {
    pub genres: Vec<Genre>,
}
