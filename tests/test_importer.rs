//! Importer tests against mockito stub servers: direct provider fetches,
//! the CORS-proxy tier and the fetch-deck endpoint fallback.

mod common;

use mockito::Matcher;
use mtg_board_state::{BoardStateError, DeckImporter};
use std::time::Duration;

const MOXFIELD_URL: &str = "https://www.moxfield.com/decks/gFV123abc";
const ARCHIDEKT_URL: &str = "https://archidekt.com/decks/123456/krenko_goblins";

fn direct_importer(base: &str) -> DeckImporter {
    DeckImporter::builder()
        .registry(common::stub_registry(base))
        .cors_proxy(None)
        .timeout(Duration::from_secs(5))
        .build()
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn normalize_fetches_moxfield_with_browser_headers() {
    common::init_logger();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/decks/all/gFV123abc")
        .match_header("user-agent", Matcher::Regex("^Mozilla/5.0".into()))
        .match_header("accept", "application/json")
        .match_header("referer", "https://www.moxfield.com/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::moxfield_deck().to_string())
        .create();

    let payload = direct_importer(&server.url()).normalize(MOXFIELD_URL).unwrap();

    mock.assert();
    assert_eq!(payload.name, "Atraxa Superfriends");
    assert!(payload.list.starts_with("1 Sol Ring\n12 Island\n"));
    assert!(payload.list.ends_with("1 Atraxa, Praetors' Voice\n1 Sol Ring\n"));
}

#[test]
fn normalize_fetches_archidekt() {
    common::init_logger();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/decks/123456/")
        .match_header("referer", "https://archidekt.com/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::archidekt_deck().to_string())
        .create();

    let payload = direct_importer(&server.url()).normalize(ARCHIDEKT_URL).unwrap();

    mock.assert();
    assert_eq!(payload.name, "Krenko Goblins");
    assert_eq!(payload.list.lines().count(), 4);
}

#[test]
fn normalize_surfaces_upstream_status() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v2/decks/all/gFV123abc")
        .with_status(403)
        .create();

    let err = direct_importer(&server.url())
        .normalize(MOXFIELD_URL)
        .unwrap_err();
    match err {
        BoardStateError::Upstream { provider, status } => {
            assert_eq!(provider, "Moxfield");
            assert_eq!(status, 403);
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[test]
fn normalize_rejects_blank_and_unsupported_urls() {
    let importer = DeckImporter::default();
    assert!(matches!(
        importer.normalize("   ").unwrap_err(),
        BoardStateError::MissingParameter
    ));
    assert!(matches!(
        importer.normalize("https://tappedout.net/mtg-decks/x/").unwrap_err(),
        BoardStateError::UnsupportedProvider(_)
    ));
    assert!(matches!(
        importer.normalize("https://www.moxfield.com/").unwrap_err(),
        BoardStateError::InvalidUrlFormat { .. }
    ));
}

// ---------------------------------------------------------------------------
// import: proxy tier
// ---------------------------------------------------------------------------

#[test]
fn import_prefers_cors_proxy() {
    common::init_logger();
    let mut server = mockito::Server::new();
    let proxy = server
        .mock(
            "GET",
            Matcher::Regex(
                r"^/proxy\?https%3A%2F%2Fapi\.moxfield\.com%2Fv2%2Fdecks%2Fall%2FgFV123abc$".into(),
            ),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::moxfield_deck().to_string())
        .create();
    let endpoint = server.mock("GET", "/api/fetch-deck").expect(0).create();

    let importer = DeckImporter::builder()
        .cors_proxy(Some(format!("{}/proxy?", server.url()).as_str()))
        .fallback_endpoint(Some(format!("{}/api/fetch-deck", server.url()).as_str()))
        .build();
    let payload = importer.import(MOXFIELD_URL).unwrap();

    proxy.assert();
    endpoint.assert();
    assert_eq!(payload.name, "Atraxa Superfriends");
}

#[test]
fn import_falls_back_to_endpoint_when_proxy_fails() {
    common::init_logger();
    let mut server = mockito::Server::new();
    let proxy = server
        .mock("GET", Matcher::Regex(r"^/proxy\?".into()))
        .with_status(500)
        .create();
    let endpoint = server
        .mock("GET", "/api/fetch-deck")
        .match_query(Matcher::UrlEncoded("url".into(), ARCHIDEKT_URL.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"Krenko Goblins","list":"1 Krenko, Mob Boss\n30 Mountain\n"}"#)
        .create();

    let importer = DeckImporter::builder()
        .cors_proxy(Some(format!("{}/proxy?", server.url()).as_str()))
        .fallback_endpoint(Some(format!("{}/api/fetch-deck", server.url()).as_str()))
        .build();
    let payload = importer.import(ARCHIDEKT_URL).unwrap();

    proxy.assert();
    endpoint.assert();
    assert_eq!(payload.name, "Krenko Goblins");
    assert_eq!(payload.list, "1 Krenko, Mob Boss\n30 Mountain\n");
}

#[test]
fn import_falls_back_when_proxy_returns_garbage() {
    let mut server = mockito::Server::new();
    let _proxy = server
        .mock("GET", Matcher::Regex(r"^/proxy\?".into()))
        .with_status(200)
        .with_body("<html>blocked</html>")
        .create();
    let endpoint = server
        .mock("GET", "/api/fetch-deck")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"name":"Atraxa","list":"1 Sol Ring\n"}"#)
        .create();

    let importer = DeckImporter::builder()
        .cors_proxy(Some(format!("{}/proxy?", server.url()).as_str()))
        .fallback_endpoint(Some(format!("{}/api/fetch-deck", server.url()).as_str()))
        .build();
    let payload = importer.import(MOXFIELD_URL).unwrap();

    endpoint.assert();
    assert_eq!(payload.name, "Atraxa");
}

// ---------------------------------------------------------------------------
// import: endpoint tier
// ---------------------------------------------------------------------------

#[test]
fn import_without_endpoint_is_local_execution_restricted() {
    let mut server = mockito::Server::new();
    let _proxy = server
        .mock("GET", Matcher::Regex(r"^/proxy\?".into()))
        .with_status(502)
        .create();

    let importer = DeckImporter::builder()
        .cors_proxy(Some(format!("{}/proxy?", server.url()).as_str()))
        .build();
    let err = importer.import(MOXFIELD_URL).unwrap_err();
    assert!(matches!(err, BoardStateError::LocalExecutionRestricted));
}

#[test]
fn import_reports_endpoint_error_message() {
    let mut server = mockito::Server::new();
    let _endpoint = server
        .mock("GET", "/api/fetch-deck")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Moxfield API error: 403"}"#)
        .create();

    let importer = DeckImporter::builder()
        .cors_proxy(None)
        .fallback_endpoint(Some(format!("{}/api/fetch-deck", server.url()).as_str()))
        .build();
    let err = importer.import(MOXFIELD_URL).unwrap_err();
    match err {
        BoardStateError::Endpoint { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Moxfield API error: 403");
        }
        other => panic!("expected Endpoint, got {other:?}"),
    }
}

#[test]
fn import_reports_missing_endpoint_function() {
    let mut server = mockito::Server::new();
    let _endpoint = server
        .mock("GET", "/api/fetch-deck")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let importer = DeckImporter::builder()
        .cors_proxy(None)
        .fallback_endpoint(Some(format!("{}/api/fetch-deck", server.url()).as_str()))
        .build();
    let err = importer.import(MOXFIELD_URL).unwrap_err();
    assert_eq!(err.to_string(), "Fetch-deck function not found.");
}

#[test]
fn import_unsupported_site_goes_straight_to_endpoint() {
    let mut server = mockito::Server::new();
    let proxy = server
        .mock("GET", Matcher::Regex(r"^/proxy\?".into()))
        .expect(0)
        .create();
    let _endpoint = server
        .mock("GET", "/api/fetch-deck")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":"Unsupported site"}"#)
        .create();

    let importer = DeckImporter::builder()
        .cors_proxy(Some(format!("{}/proxy?", server.url()).as_str()))
        .fallback_endpoint(Some(format!("{}/api/fetch-deck", server.url()).as_str()))
        .build();
    let err = importer.import("https://tappedout.net/mtg-decks/x/").unwrap_err();

    proxy.assert();
    assert!(matches!(err, BoardStateError::Endpoint { status: 400, .. }));
}
