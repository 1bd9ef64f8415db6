use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use gallery_fetcher::roster::ImageId;
use gallery_fetcher::source::http_source::HttpSource;
use gallery_fetcher::source::traits::{FetchError, ImageSource};

async fn serve_card(Path(id): Path<String>) -> impl IntoResponse {
    if id == "10000.jpg" {
        (StatusCode::OK, b"IMG".to_vec()).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn start_server() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new().route("/cards/{id}", get(serve_card));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

#[tokio::test]
async fn test_fetch_success() {
    let (addr, _handle) = start_server().await;
    let source = HttpSource::new(
        format!("http://{}/cards", addr),
        Duration::from_secs(5),
    )
    .unwrap();

    let id = ImageId::parse("10000.jpg").unwrap();
    let bytes = source.fetch(&id).await.unwrap();
    assert_eq!(&bytes[..], b"IMG");
}

#[tokio::test]
async fn test_fetch_not_found() {
    let (addr, _handle) = start_server().await;
    // Trailing slash on the base URL is tolerated.
    let source = HttpSource::new(
        format!("http://{}/cards/", addr),
        Duration::from_secs(5),
    )
    .unwrap();

    let id = ImageId::parse("99999999.jpg").unwrap();
    match source.fetch(&id).await {
        Err(FetchError::Status(404)) => {}
        other => panic!("expected HTTP 404 failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind then drop to get a local port with nothing listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpSource::new(
        format!("http://{}/cards", addr),
        Duration::from_secs(2),
    )
    .unwrap();

    let id = ImageId::parse("10000.jpg").unwrap();
    match source.fetch(&id).await {
        Err(FetchError::Transport(_)) => {}
        other => panic!("expected transport failure, got {:?}", other),
    }
}
