use crate::models::{MovieId, MoviesMenu, PeopleId};

/// Catalog resources, addressed relative to the API base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
    Trending,
    MovieDetail(MovieId),
    Recommended(MovieId),
    Similar(MovieId),
    Videos(MovieId),
    Credits(MovieId),
    Reviews(MovieId),
    SearchMovie,
    SearchKeyword,
    SearchPerson,
    PopularPersons,
    PersonDetail(PeopleId),
    PersonMovieCredits(PeopleId),
    PersonImages(PeopleId),
    Genres,
    Discover,
}

impl Endpoint {
    /// Path below the base URL, without a leading slash
    pub fn path(&self) -> String {
        match self {
            Endpoint::Popular => "movie/popular".into(),
            Endpoint::TopRated => "movie/top_rated".into(),
            Endpoint::Upcoming => "movie/upcoming".into(),
            Endpoint::NowPlaying => "movie/now_playing".into(),
            Endpoint::Trending => "trending/movie/day".into(),
            Endpoint::MovieDetail(movie) => format!("movie/{}", movie),
            Endpoint::Recommended(movie) => format!("movie/{}/recommendations", movie),
            Endpoint::Similar(movie) => format!("movie/{}/similar", movie),
            Endpoint::Videos(movie) => format!("movie/{}/videos", movie),
            Endpoint::Credits(movie) => format!("movie/{}/credits", movie),
            Endpoint::Reviews(movie) => format!("movie/{}/reviews", movie),
            Endpoint::SearchMovie => "search/movie".into(),
            Endpoint::SearchKeyword => "search/keyword".into(),
            Endpoint::SearchPerson => "search/person".into(),
            Endpoint::PopularPersons => "person/popular".into(),
            Endpoint::PersonDetail(people) => format!("person/{}", people),
            Endpoint::PersonMovieCredits(people) => format!("person/{}/movie_credits", people),
            Endpoint::PersonImages(people) => format!("person/{}/images", people),
            Endpoint::Genres => "genre/movie/list".into(),
            Endpoint::Discover => "discover/movie".into(),
        }
    }
}

impl From<MoviesMenu> for Endpoint {
    fn from(menu: MoviesMenu) -> Self {
        match menu {
            MoviesMenu::Popular => Endpoint::Popular,
            MoviesMenu::TopRated => Endpoint::TopRated,
            MoviesMenu::Upcoming => Endpoint::Upcoming,
            MoviesMenu::NowPlaying => Endpoint::NowPlaying,
            MoviesMenu::Trending => Endpoint::Trending,
        }
    }
}
