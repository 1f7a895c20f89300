mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use state::AppState;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// The fetch-deck route, mounted under every path the web client has used.
fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/fetch-deck", get(routes::decks::fetch_deck))
        .route("/functions/fetch-deck", get(routes::decks::fetch_deck))
        .route("/.netlify/functions/fetch-deck", get(routes::decks::fetch_deck))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let importer = mtg_board_state::AsyncDeckImporter::builder()
        .build()
        .await
        .expect("Failed to initialize deck importer");
    let state = Arc::new(AppState { importer });

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    log::info!("Listening on http://{addr}");
    axum::serve(listener, app(state)).await.expect("server error");
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let importer = mtg_board_state::AsyncDeckImporter::builder()
            .build()
            .await
            .unwrap();
        app(Arc::new(AppState { importer }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_url_is_bad_request() {
        let (status, body) = get_json(test_app().await, "/api/fetch-deck").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing URL parameter");
    }

    #[tokio::test]
    async fn unsupported_site_is_bad_request() {
        let (status, body) = get_json(
            test_app().await,
            "/.netlify/functions/fetch-deck?url=https%3A%2F%2Ftappedout.net%2Fmtg-decks%2Fabc",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Unsupported site"));
    }

    #[tokio::test]
    async fn malformed_provider_url_is_bad_request() {
        let (status, body) = get_json(
            test_app().await,
            "/functions/fetch-deck?url=https%3A%2F%2Farchidekt.com%2Fdecks%2Fnot-a-number",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid Archidekt URL format");
    }
}
