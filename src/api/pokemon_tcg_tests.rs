//! Tests for the pokemontcg.io API client.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{
    fetch_card_by_id_from, fetch_image, search_cards_by_name_from,
    search_cards_by_pokedex_range_from, search_cards_by_set_from,
};
use crate::error::ApiError;

/// Helper: minimal card JSON the way the v2 API returns it.
fn card_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "supertype": "Pokémon",
        "number": "1",
        "rarity": "Common",
        "set": { "id": "sv1", "name": "Scarlet & Violet", "series": "Scarlet & Violet" },
        "images": {
            "small": format!("https://images.example.com/{}.png", id),
            "large": format!("https://images.example.com/{}_hires.png", id)
        }
    })
}

// ── fetch_card_by_id_from ────────────────────────────────────────────

#[tokio::test]
async fn fetch_card_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/sv1-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": card_json("sv1-1", "Pineco") })),
        )
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || fetch_card_by_id_from(&base_url, "sv1-1"))
        .await
        .unwrap();

    let card = result.unwrap().expect("card should be found");
    assert_eq!(card.id, "sv1-1");
    assert_eq!(card.name, "Pineco");
    assert_eq!(card.set_info.unwrap().id, "sv1");
}

#[tokio::test]
async fn fetch_card_not_found_is_none_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/does-not-exist"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "message": "The card could not be found.", "code": 404 }
        })))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result =
        tokio::task::spawn_blocking(move || fetch_card_by_id_from(&base_url, "does-not-exist"))
            .await
            .unwrap();

    assert!(result.unwrap().is_none());
}

#[tokio::test]
async fn fetch_card_server_error_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/sv1-1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || fetch_card_by_id_from(&base_url, "sv1-1"))
        .await
        .unwrap();

    match result {
        Err(ApiError::HttpStatus(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_card_malformed_body_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards/sv1-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || fetch_card_by_id_from(&base_url, "sv1-1"))
        .await
        .unwrap();

    assert!(result.is_err());
}

// ── searches ─────────────────────────────────────────────────────────

#[tokio::test]
async fn search_by_name_builds_name_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "name:pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [card_json("sv1-10", "Pikachu"), card_json("sv1-11", "Pikachu ex")]
        })))
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let cards =
        tokio::task::spawn_blocking(move || search_cards_by_name_from(&base_url, "pikachu"))
            .await
            .unwrap()
            .unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].name, "Pikachu");
}

#[tokio::test]
async fn search_by_set_builds_set_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "set.id:sv1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": [card_json("sv1-1", "Pineco")] })),
        )
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let cards = tokio::task::spawn_blocking(move || search_cards_by_set_from(&base_url, "sv1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "sv1-1");
}

#[tokio::test]
async fn search_by_pokedex_range_builds_range_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("q", "nationalPokedexNumbers:[1 TO 151]"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": [card_json("base1-44", "Bulbasaur")] })),
        )
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let cards =
        tokio::task::spawn_blocking(move || search_cards_by_pokedex_range_from(&base_url, 1, 151))
            .await
            .unwrap()
            .unwrap();

    assert_eq!(cards.len(), 1);
}

#[tokio::test]
async fn search_with_no_matches_returns_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cards"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
        )
        .mount(&mock_server)
        .await;

    let base_url = mock_server.uri();
    let cards =
        tokio::task::spawn_blocking(move || search_cards_by_name_from(&base_url, "zzzzz"))
            .await
            .unwrap()
            .unwrap();

    assert!(cards.is_empty());
}

// ── fetch_image ──────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_image_success() {
    let mock_server = MockServer::start().await;
    let image_bytes = vec![0x89, 0x50, 0x4E, 0x47]; // PNG magic bytes

    Mock::given(method("GET"))
        .and(path("/sv1-1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image_bytes.clone()))
        .mount(&mock_server)
        .await;

    let url = format!("{}/sv1-1.png", mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch_image(&url))
        .await
        .unwrap();

    assert_eq!(result.unwrap(), image_bytes);
}

#[tokio::test]
async fn fetch_image_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing.png", mock_server.uri());
    let result = tokio::task::spawn_blocking(move || fetch_image(&url))
        .await
        .unwrap();

    match result {
        Err(ApiError::HttpStatus(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HttpStatus error, got {:?}", other),
    }
}
