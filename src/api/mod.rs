//! API client for the pokemontcg.io catalog service

pub mod pokemon_tcg;

pub use pokemon_tcg::{
    fetch_card_by_id, fetch_image, search_cards_by_name, search_cards_by_pokedex_range,
    search_cards_by_set,
};
