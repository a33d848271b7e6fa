//! Integration tests for CacheService over HTTP.
//!
//! Uses wiremock for the API and real stores underneath. Tests cover cache
//! hits after a remote read, status mapping, query escaping and persistence
//! across restarts.

use std::sync::Arc;
use std::time::Duration;

use dexcache::{CacheConfig, CacheService, DexError, HttpRemote, ManualClock, Origin};
use dexstore::{FileStore, FileStoreOptions, MemoryStore, Store};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pikachu() -> serde_json::Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
        "stats": [{"base_stat": 35, "stat": {"name": "hp", "url": ""}}],
        "abilities": [],
        "sprites": {"front_default": null}
    })
}

fn service(server: &MockServer, store: Arc<dyn Store>, clock: Arc<ManualClock>) -> CacheService {
    let config = CacheConfig::default()
        .with_base_url(server.uri())
        .with_request_timeout(Some(Duration::from_secs(5)));
    let remote = HttpRemote::new(&config).expect("failed to create remote");
    CacheService::new(config, store, Arc::new(remote), clock)
}

#[tokio::test]
async fn test_remote_then_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu()))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));

    let first = svc.fetch_pokemon("pikachu").await.expect("first fetch failed");
    let second = svc.fetch_pokemon("Pikachu").await.expect("second fetch failed");

    assert_eq!(first.origin, Origin::Remote);
    assert_eq!(second.origin, Origin::Cache);
    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn test_expired_entry_hits_remote_again() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu()))
        .expect(2)
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new(0));
    let svc = service(&server, Arc::new(MemoryStore::new()), clock.clone());

    svc.fetch_pokemon("pikachu").await.expect("fetch failed");
    clock.advance(300_000);
    let again = svc.fetch_pokemon("pikachu").await.expect("fetch failed");

    assert_eq!(again.origin, Origin::Remote);
}

#[tokio::test]
async fn test_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
    let err = svc.fetch_pokemon("missingno").await.unwrap_err();
    assert_eq!(err.exit_code(), 1);

    match err {
        DexError::NotFound { path, status } => {
            assert_eq!(path, "pokemon/missingno");
            assert_eq!(status, 404);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_5xx_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ability/overgrow"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
    let err = svc.fetch_ability("overgrow").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_non_json_body_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
    let err = svc.fetch_pokemon("pikachu").await.unwrap_err();
    assert!(matches!(err, DexError::Network { .. }));
}

#[tokio::test]
async fn test_name_index_query_string() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
    assert_eq!(svc.fetch_name_index().await.unwrap(), vec!["bulbasaur", "ivysaur"]);
    assert_eq!(svc.fetch_name_index().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_cache_survives_restart() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pikachu()))
        .expect(1)
        .mount(&server)
        .await;

    let clock = Arc::new(ManualClock::new(10_000));
    {
        let store = Arc::new(FileStore::open(dir.path(), FileStoreOptions::default()).unwrap());
        let svc = service(&server, store, clock.clone());
        let entity = svc.fetch_pokemon("pikachu").await.unwrap().data;
        svc.lists().toggle_favorite(&entity).unwrap();
    }

    let store = Arc::new(FileStore::open(dir.path(), FileStoreOptions::default()).unwrap());
    let svc = service(&server, store, clock);

    let fetched = svc.fetch_pokemon("pikachu").await.unwrap();
    assert_eq!(fetched.origin, Origin::Cache);
    assert!(svc.lists().is_favorite(25));
}

#[tokio::test]
async fn test_query_is_escaped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ability/mr%20mime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "mr-mime"})))
        .expect(1)
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStore::new()), Arc::new(ManualClock::new(0)));
    let fetched = svc.fetch_ability("Mr Mime").await.unwrap();
    assert_eq!(fetched.data.id, 1);
}
