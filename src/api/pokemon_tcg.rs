use crate::error::{ApiError, ApiResult};
use crate::models::Card;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.pokemontcg.io/v2";
const USER_AGENT: &str = "card_binder/0.1";

/// Single-card response envelope: `{ "data": { ... } }`
#[derive(Debug, Deserialize)]
struct CardResponse {
    data: Card,
}

/// List response envelope: `{ "data": [ ... ] }`
#[derive(Debug, Deserialize)]
struct CardListResponse {
    #[serde(default)]
    data: Vec<Card>,
}

/// Optional API key, sent as `X-Api-Key` when present.
/// Anonymous requests work too, at a lower rate limit.
fn api_key() -> Option<String> {
    std::env::var("POKEMON_TCG_API_KEY").ok().filter(|k| !k.is_empty())
}

fn get(url: &str, query: Option<(&str, &str)>) -> ApiResult<reqwest::blocking::Response> {
    let mut request = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", USER_AGENT);
    if let Some(key) = api_key() {
        request = request.header("X-Api-Key", key);
    }
    if let Some((name, value)) = query {
        request = request.query(&[(name, value)]);
    }
    Ok(request.send()?)
}

/// Fetch a single card by its identifier (e.g. "sv1-1").
/// Returns `Ok(None)` when the catalog has no such card.
pub fn fetch_card_by_id(card_id: &str) -> ApiResult<Option<Card>> {
    fetch_card_by_id_from(API_BASE_URL, card_id)
}

/// Same as [`fetch_card_by_id`] with an explicit base URL, used in tests.
pub fn fetch_card_by_id_from(base_url: &str, card_id: &str) -> ApiResult<Option<Card>> {
    let url = format!("{}/cards/{}", base_url, card_id);
    log::info!("Fetching card: {}", url);

    let response = get(&url, None)?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        log::info!("Card not found: {}", card_id);
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status()));
    }
    let wrapper = response.json::<CardResponse>()?;
    Ok(Some(wrapper.data))
}

/// Run a card search with the API's Lucene-like query syntax.
fn search_cards(base_url: &str, query: &str) -> ApiResult<Vec<Card>> {
    let url = format!("{}/cards", base_url);
    log::info!("Searching cards: q={}", query);

    let response = get(&url, Some(("q", query)))?;
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status()));
    }
    let wrapper = response.json::<CardListResponse>()?;
    log::debug!("Search '{}' returned {} cards", query, wrapper.data.len());
    Ok(wrapper.data)
}

/// Search cards by (partial) name. An empty result list means "no matches".
pub fn search_cards_by_name(name: &str) -> ApiResult<Vec<Card>> {
    search_cards_by_name_from(API_BASE_URL, name)
}

pub fn search_cards_by_name_from(base_url: &str, name: &str) -> ApiResult<Vec<Card>> {
    search_cards(base_url, &format!("name:{}", name))
}

/// Search all cards belonging to a set (e.g. "sv1").
pub fn search_cards_by_set(set_id: &str) -> ApiResult<Vec<Card>> {
    search_cards_by_set_from(API_BASE_URL, set_id)
}

pub fn search_cards_by_set_from(base_url: &str, set_id: &str) -> ApiResult<Vec<Card>> {
    search_cards(base_url, &format!("set.id:{}", set_id))
}

/// Search cards by national Pokédex number range (inclusive).
pub fn search_cards_by_pokedex_range(start: u32, end: u32) -> ApiResult<Vec<Card>> {
    search_cards_by_pokedex_range_from(API_BASE_URL, start, end)
}

pub fn search_cards_by_pokedex_range_from(
    base_url: &str,
    start: u32,
    end: u32,
) -> ApiResult<Vec<Card>> {
    search_cards(
        base_url,
        &format!("nationalPokedexNumbers:[{} TO {}]", start, end),
    )
}

/// Fetch raw card image bytes
pub fn fetch_image(url: &str) -> ApiResult<Vec<u8>> {
    log::debug!("Fetching image: {}", url);

    let response = reqwest::blocking::Client::new()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()?;

    if response.status().is_success() {
        Ok(response.bytes()?.to_vec())
    } else {
        Err(ApiError::HttpStatus(response.status()))
    }
}

#[cfg(test)]
#[path = "pokemon_tcg_tests.rs"]
mod tests;
