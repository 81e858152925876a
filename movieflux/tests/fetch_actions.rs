//! Async fetch actions against a mocked catalog session

use std::sync::Arc;
use std::time::Duration;

use movieflux::api::testing::{MockReply, MockSession};
use movieflux::api::{ApiClient, StaticApiKeyProvider};
use movieflux::config::{ApiConfig, Preferences};
use movieflux::fetch::{self, Environment, FetchRequest};
use movieflux::models::{Genre, MoviesMenu, MoviesSort};
use movieflux::{
    assert_category_emitted, assert_emitted, count_emitted, find_emitted, AppAction, AppState,
    AsyncAction, MoviesAction, PeopleAction, TestHarness,
};

const NO_DISPATCH_WINDOW: Duration = Duration::from_millis(200);

const MENU_PAGE: &str = r#"{"page":2,"total_results":1,"total_pages":1,"results":[
    {"id":20,"original_title":"Twenty","title":"Twenty","overview":"","popularity":1.0,
     "vote_average":5.0,"vote_count":1}
]}"#;

fn env(key: Option<&str>, session: Arc<MockSession>) -> Arc<Environment> {
    let keys = match key {
        Some(key) => StaticApiKeyProvider::new(key),
        None => StaticApiKeyProvider::missing(),
    };
    let preferences = Preferences {
        region: "FR".into(),
        ..Preferences::default()
    };
    let config = ApiConfig::default().with_preferences(&preferences);
    Arc::new(Environment::new(
        ApiClient::new(config, session, Arc::new(keys)),
        preferences,
    ))
}

fn query_value(session: &MockSession, name: &str) -> Option<String> {
    session
        .last_url()?
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

#[tokio::test]
async fn test_menu_list_dispatches_on_success() {
    let session = Arc::new(MockSession::replying(MockReply::json(MENU_PAGE)));
    let env = env(Some("test-key"), session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();

    harness
        .run(&env.fetch(fetch::movies::MenuList::new(MoviesMenu::Popular, 2)))
        .await;

    let actions = harness.drain_emitted();
    assert_eq!(count_emitted!(actions, AppAction::Movies(_)), 1);
    assert_emitted!(
        actions,
        AppAction::Movies(MoviesAction::SetMovieMenuList {
            page: 2,
            list: MoviesMenu::Popular,
            response,
        }) if response.results.iter().map(|m| m.id).eq([20])
    );
    assert_category_emitted!(actions, "movies");

    assert_eq!(session.calls(), 1);
    let url = session.last_url().unwrap();
    assert!(url.path().ends_with("/movie/popular"));
    assert_eq!(query_value(&session, "api_key").as_deref(), Some("test-key"));
    assert_eq!(query_value(&session, "page").as_deref(), Some("2"));
    assert_eq!(query_value(&session, "region").as_deref(), Some("FR"));
}

#[tokio::test]
async fn test_missing_key_dispatches_nothing() {
    let session = Arc::new(MockSession::replying(MockReply::json(MENU_PAGE)));
    let env = env(None, session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();

    harness
        .run(&env.fetch(fetch::movies::MenuList::new(MoviesMenu::Popular, 1)))
        .await;

    assert!(harness.stays_quiet_for(NO_DISPATCH_WINDOW).await);
    assert_eq!(session.calls(), 0);
}

#[tokio::test]
async fn test_transport_error_dispatches_nothing() {
    let session = Arc::new(MockSession::replying(MockReply::Transport("reset".into())));
    let env = env(Some("test-key"), session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();

    harness
        .run(&env.fetch(fetch::movies::MenuList::new(MoviesMenu::Upcoming, 1)))
        .await;

    assert!(harness.stays_quiet_for(NO_DISPATCH_WINDOW).await);
    assert_eq!(session.calls(), 1);
}

#[tokio::test]
async fn test_empty_response_dispatches_nothing() {
    let session = Arc::new(MockSession::replying(MockReply::NoResponse));
    let env = env(Some("test-key"), session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();

    harness.run(&env.fetch(fetch::movies::Genres)).await;

    assert!(harness.stays_quiet_for(NO_DISPATCH_WINDOW).await);
}

#[tokio::test]
async fn test_decode_error_dispatches_nothing() {
    let session = Arc::new(MockSession::replying(MockReply::json("not-json")));
    let env = env(Some("test-key"), session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();

    harness
        .run(&env.fetch(fetch::people::Detail { people: 3 }))
        .await;

    assert!(harness.stays_quiet_for(NO_DISPATCH_WINDOW).await);
}

#[tokio::test]
async fn test_genre_fetch_queries_discover() {
    let session = Arc::new(MockSession::replying(MockReply::json(MENU_PAGE)));
    let env = env(Some("test-key"), session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();
    let request = fetch::movies::ForGenre {
        genre: Genre::new(27, "Horror"),
        page: 1,
        sort: MoviesSort::ByPopularity,
    };

    harness.run(&env.fetch(request)).await;

    let actions = harness.drain_emitted();
    let found = find_emitted!(
        actions,
        AppAction::Movies(MoviesAction::SetMovieForGenre { .. })
    );
    assert!(found.is_some());
    assert!(session.last_url().unwrap().path().ends_with("/discover/movie"));
    assert_eq!(query_value(&session, "with_genres").as_deref(), Some("27"));
    assert_eq!(
        query_value(&session, "sort_by").as_deref(),
        Some("popularity.desc")
    );
}

#[tokio::test]
async fn test_people_images_dispatch_profiles() {
    let session = Arc::new(MockSession::replying(MockReply::json(
        r#"{"id":3,"profiles":[{"aspect_ratio":0.66,"file_path":"/p.jpg","height":750,"width":500}]}"#,
    )));
    let env = env(Some("test-key"), session.clone());
    let mut harness = TestHarness::<AppState, AppAction>::default();

    harness
        .run(&env.fetch(fetch::people::Images { people: 3 }))
        .await;

    let actions = harness.drain_category("people");
    assert_emitted!(
        actions,
        AppAction::People(PeopleAction::SetImages { people: 3, images }) if images.len() == 1
    );
}

#[test]
fn test_fetch_names() {
    let env = env(Some("test-key"), Arc::new(MockSession::new()));

    assert_eq!(env.fetch(fetch::movies::Genres).name(), "FetchGenres");
    assert_eq!(
        env.fetch(fetch::people::Credits { people: 1 }).name(),
        fetch::people::Credits::NAME
    );
}
