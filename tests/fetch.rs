use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{http::StatusCode, routing::get, Router};
use pretty_assertions::assert_eq;
use reqwest::Url;

use booksearch::{
    connectivity::FixedProbe,
    fetch::{FetchTimeouts, HttpFetcher},
    query::QueryBuilder,
    traits::Fetcher,
    types::{Delivery, LoadOutcome},
    SearchError, SearchLoader,
};

const VOLUMES: &str = r#"{"items": [{"volumeInfo": {"title": "Dune", "authors": ["Frank Herbert"], "pageCount": 604}}]}"#;

async fn serve() -> SocketAddr {
    let app = Router::new()
        .route("/volumes", get(|| async { VOLUMES }))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
        )
        .route("/empty", get(|| async { "" }))
        .route("/blank", get(|| async { "  \n" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                VOLUMES
            }),
        );
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    addr
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(FetchTimeouts {
        connect: Duration::from_millis(500),
        read:    Duration::from_millis(500),
    })
    .unwrap()
}

#[tokio::test]
async fn success_returns_raw_body() {
    let addr = serve().await;
    let body = fetcher()
        .fetch(&format!("http://{addr}/volumes?q=dune&maxResults=10"))
        .await;
    assert_eq!(body, Ok(VOLUMES.to_string()));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let addr = serve().await;
    assert_eq!(
        fetcher().fetch(&format!("http://{addr}/missing")).await,
        Err(SearchError::HttpStatus(404))
    );
    assert_eq!(
        fetcher().fetch(&format!("http://{addr}/broken")).await,
        Err(SearchError::HttpStatus(500))
    );
}

#[tokio::test]
async fn empty_body_is_reported() {
    let addr = serve().await;
    assert_eq!(
        fetcher().fetch(&format!("http://{addr}/empty")).await,
        Err(SearchError::EmptyResponse)
    );
    assert_eq!(
        fetcher().fetch(&format!("http://{addr}/blank")).await,
        Err(SearchError::EmptyResponse)
    );
}

#[tokio::test]
async fn slow_server_times_out() {
    let addr = serve().await;
    let started = std::time::Instant::now();
    let result = fetcher().fetch(&format!("http://{addr}/slow")).await;
    assert!(matches!(result, Err(SearchError::NetworkFailure(_))));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn refused_connection_is_network_failure() {
    // Bind and immediately drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let result = fetcher().fetch(&format!("http://{addr}/volumes")).await;
    assert!(matches!(result, Err(SearchError::NetworkFailure(_))));
}

#[tokio::test]
async fn loader_runs_the_whole_pipeline() {
    let addr = serve().await;
    let base = Url::parse(&format!("http://{addr}/volumes")).unwrap();
    let mut loader = SearchLoader::new(
        QueryBuilder::new(base, 10),
        Arc::new(FixedProbe::new(true)),
        Arc::new(fetcher()),
        Vec::<Delivery>::new(),
    );

    loader.start_search("dune");
    loader.settle().await;

    assert_eq!(loader.sink().len(), 1);
    match &loader.sink()[0].outcome {
        LoadOutcome::Success(records) => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].title, "Dune");
            assert_eq!(records[0].author, "Frank Herbert");
            assert_eq!(records[0].page_count, 604);
        }
        LoadOutcome::Failure(e) => panic!("search failed: {e}"),
    }
}

#[tokio::test]
async fn loader_delivers_http_failures() {
    let addr = serve().await;
    let base = Url::parse(&format!("http://{addr}/missing")).unwrap();
    let mut loader = SearchLoader::new(
        QueryBuilder::new(base, 10),
        Arc::new(FixedProbe::new(true)),
        Arc::new(fetcher()),
        Vec::<Delivery>::new(),
    );

    loader.start_search("dune");
    loader.settle().await;

    assert_eq!(
        loader.sink()[0].outcome,
        LoadOutcome::Failure(SearchError::HttpStatus(404))
    );
}
