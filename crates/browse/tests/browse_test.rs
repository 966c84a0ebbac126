//! End-to-end tests over the bundled seed catalog: load, type into the
//! search box, submit, then browse the results.

use browse::{load_catalog, BrowseConfig, BrowseSession, SeedSource, View};
use discovery::{FilterState, SortBy};
use search::{QueryMatcher, SearchPanel};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_courses_view_over_seed_catalog() {
    let catalog = load_catalog(&SeedSource).await;
    let mut session = BrowseSession::courses(catalog, &BrowseConfig::default());
    assert_eq!(session.view(), View::Courses);
    assert_eq!(session.current_page().total_items, 24);
    assert_eq!(session.current_page().total_pages, 2);

    session.set_filters(
        FilterState::new()
            .with_category("Development")
            .with_rating(4.5)
            .with_sort(SortBy::HighestRated),
    );

    let page = session.current_page();
    let ids: Vec<&str> = page.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["crs-024", "crs-002", "crs-001", "crs-004", "crs-020"]);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test(start_paused = true)]
async fn test_search_box_to_results_view() {
    let config = BrowseConfig::default();
    let catalog = load_catalog(&SeedSource).await;

    let matcher = Arc::new(QueryMatcher::new(catalog.clone(), config.suggestion_limit.get()));
    let panel = SearchPanel::new(matcher, config.debounce);

    for text in ["d", "de", "des", "desi", "design"] {
        panel.input(text);
        tokio::time::sleep(Duration::from_millis(80)).await;
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    let snapshot = panel.snapshot();
    assert!(snapshot.open);
    assert_eq!(snapshot.executions, 1);
    let titles: Vec<&str> = snapshot.suggestions.courses.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["UI Design Foundations", "Design Systems at Scale", "Brand Identity Design"]
    );
    assert_eq!(snapshot.suggestions.categories, vec!["Design".to_string()]);

    let navigation = panel.submit().expect("non-empty query navigates");
    let session = BrowseSession::search(catalog, navigation.query, &config);

    let ids: Vec<&str> = session.current_page().items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["crs-013", "crs-022", "crs-012", "crs-011"]);
}

#[tokio::test]
async fn test_search_view_pages_of_nine() {
    let catalog = load_catalog(&SeedSource).await;
    let mut session = BrowseSession::search(catalog, "", &BrowseConfig::default());

    assert_eq!(session.current_page().total_pages, 3);
    assert!(session.go_to_page(3));
    assert_eq!(session.current_page().items.len(), 6);
    assert!(!session.next_page());

    session.set_query("noah");
    assert_eq!(session.page(), 1);
    assert_eq!(session.current_page().total_items, 4);
}
