use chrono::{Datelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Genre, GenreId};
use crate::api::QueryParams;

/// Orderings the random discover picks from
pub const DISCOVER_SORTS: [&str; 4] = [
    "popularity.desc",
    "popularity.asc",
    "vote_average.asc",
    "vote_average.desc",
];

const FIRST_DISCOVER_YEAR: i32 = 1950;
const MAX_DISCOVER_PAGE: u32 = 20;

/// Criteria for the discover endpoint.
///
/// A release-date range (`start_year`..`end_year`) takes precedence over the
/// single `year` when both ends are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverFilter {
    pub year: i32,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub sort: String,
    pub genre: Option<GenreId>,
    pub region: Option<String>,
}

impl DiscoverFilter {
    /// A filter on a random year with a random ordering
    pub fn random_filter() -> Self {
        Self {
            year: Self::random_year(),
            start_year: None,
            end_year: None,
            sort: Self::random_sort().to_string(),
            genre: None,
            region: None,
        }
    }

    /// A year from 1950 up to, not including, the current one
    pub fn random_year() -> i32 {
        let current = Utc::now().year().max(FIRST_DISCOVER_YEAR + 1);
        rand::thread_rng().gen_range(FIRST_DISCOVER_YEAR..current)
    }

    pub fn random_sort() -> &'static str {
        DISCOVER_SORTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(DISCOVER_SORTS[0])
    }

    /// A page in `1..20`
    pub fn random_page() -> u32 {
        rand::thread_rng().gen_range(1..MAX_DISCOVER_PAGE)
    }

    fn range(&self) -> Option<(i32, i32)> {
        self.start_year.zip(self.end_year)
    }

    /// Query parameters for the discover endpoint. The page is random.
    pub fn to_params(&self, language: &str) -> QueryParams {
        let mut params = QueryParams::new();
        match self.range() {
            Some((start, end)) => {
                params.insert("primary_release_date.gte".into(), start.to_string());
                params.insert("primary_release_date.lte".into(), end.to_string());
            }
            None => {
                params.insert("year".into(), self.year.to_string());
            }
        }
        if let Some(genre) = self.genre {
            params.insert("with_genres".into(), genre.to_string());
        }
        if let Some(region) = &self.region {
            params.insert("region".into(), region.clone());
        }
        params.insert("page".into(), Self::random_page().to_string());
        params.insert("sort_by".into(), self.sort.clone());
        params.insert("language".into(), language.to_string());
        params
    }

    /// Short label such as `1990-1995 · Adventure · FR`
    pub fn to_text(&self, genres: &[Genre]) -> String {
        let mut parts = vec![match self.range() {
            Some((start, end)) => format!("{}-{}", start, end),
            None => self.year.to_string(),
        }];
        if let Some(name) = self
            .genre
            .and_then(|id| genres.iter().find(|genre| genre.id == id))
            .map(|genre| genre.name.clone())
        {
            parts.push(name);
        }
        if let Some(region) = &self.region {
            parts.push(region.clone());
        }
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(
        year: i32,
        range: Option<(i32, i32)>,
        genre: Option<GenreId>,
        region: Option<&str>,
    ) -> DiscoverFilter {
        DiscoverFilter {
            year,
            start_year: range.map(|r| r.0),
            end_year: range.map(|r| r.1),
            sort: "popularity.desc".into(),
            genre,
            region: region.map(str::to_string),
        }
    }

    #[test]
    fn test_params_use_year_without_range() {
        let params = filter(2001, None, Some(28), Some("US")).to_params("en-US");

        assert_eq!(params.get("year").map(String::as_str), Some("2001"));
        assert!(!params.contains_key("primary_release_date.gte"));
        assert!(!params.contains_key("primary_release_date.lte"));
        assert_eq!(params.get("with_genres").map(String::as_str), Some("28"));
        assert_eq!(params.get("region").map(String::as_str), Some("US"));
        assert_eq!(params.get("sort_by").map(String::as_str), Some("popularity.desc"));
        assert_eq!(params.get("language").map(String::as_str), Some("en-US"));
        assert!(params.contains_key("page"));
    }

    #[test]
    fn test_params_use_range_when_complete() {
        let mut with_range = filter(2020, Some((1990, 1999)), None, None);
        with_range.sort = "vote_average.desc".into();
        let params = with_range.to_params("en-US");

        assert_eq!(params.get("primary_release_date.gte").map(String::as_str), Some("1990"));
        assert_eq!(params.get("primary_release_date.lte").map(String::as_str), Some("1999"));
        assert!(!params.contains_key("year"));
        assert!(!params.contains_key("with_genres"));
        assert_eq!(params.get("sort_by").map(String::as_str), Some("vote_average.desc"));

        let mut half_range = filter(2020, None, None, None);
        half_range.start_year = Some(1990);
        assert_eq!(
            half_range.to_params("en-US").get("year").map(String::as_str),
            Some("2020")
        );
    }

    #[test]
    fn test_to_text_builds_label() {
        let genres = [Genre::new(12, "Adventure")];

        assert_eq!(
            filter(2005, Some((1990, 1995)), Some(12), Some("FR")).to_text(&genres),
            "1990-1995 · Adventure · FR"
        );
        assert_eq!(filter(2005, None, Some(99), None).to_text(&genres), "2005");
    }

    #[test]
    fn test_random_helpers_stay_in_domain() {
        for _ in 0..50 {
            let year = DiscoverFilter::random_year();
            assert!(year >= 1950 && year < Utc::now().year());

            assert!(DISCOVER_SORTS.contains(&DiscoverFilter::random_sort()));

            let page = DiscoverFilter::random_page();
            assert!((1..20).contains(&page));
        }

        let random = DiscoverFilter::random_filter();
        assert!(random.genre.is_none());
        assert!(random.start_year.is_none());
    }
}
