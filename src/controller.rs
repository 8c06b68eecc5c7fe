//! Fetch orchestration: validate input, check the response cache, go to the
//! network off-thread on a miss, cache the success, deliver to the UI.
//!
//! Card-by-id lookups and search results live in separate caches so an
//! identifier can never collide with a query string. "Not found" outcomes
//! are delivered but never cached; a later identical request asks the
//! network again.

use crate::api;
use crate::cache::ResponseCache;
use crate::dispatch::{GuardStamp, TaskHandle};
use crate::error::{ApiError, ApiResult};
use crate::models::Card;
use std::sync::Arc;

/// Remote catalog collaborator. Seam for tests; production goes over HTTP.
pub trait CardFetcher: Send + Sync {
    fn fetch_by_id(&self, card_id: &str) -> ApiResult<Option<Card>>;
    fn search_by_name(&self, name: &str) -> ApiResult<Vec<Card>>;
    fn search_by_set(&self, set_id: &str) -> ApiResult<Vec<Card>>;
    fn search_by_pokedex_range(&self, start: u32, end: u32) -> ApiResult<Vec<Card>>;
}

struct HttpCardFetcher;

impl CardFetcher for HttpCardFetcher {
    fn fetch_by_id(&self, card_id: &str) -> ApiResult<Option<Card>> {
        api::fetch_card_by_id(card_id)
    }

    fn search_by_name(&self, name: &str) -> ApiResult<Vec<Card>> {
        api::search_cards_by_name(name)
    }

    fn search_by_set(&self, set_id: &str) -> ApiResult<Vec<Card>> {
        api::search_cards_by_set(set_id)
    }

    fn search_by_pokedex_range(&self, start: u32, end: u32) -> ApiResult<Vec<Card>> {
        api::search_cards_by_pokedex_range(start, end)
    }
}

pub struct CardController {
    card_cache: Arc<ResponseCache<Card>>,
    search_cache: Arc<ResponseCache<Vec<Card>>>,
    fetcher: Arc<dyn CardFetcher>,
    tasks: TaskHandle,
}

impl CardController {
    pub fn new(tasks: TaskHandle) -> Self {
        Self::with_fetcher(tasks, Arc::new(HttpCardFetcher))
    }

    /// Controller with an injected fetch collaborator, used in tests
    pub fn with_fetcher(tasks: TaskHandle, fetcher: Arc<dyn CardFetcher>) -> Self {
        Self {
            card_cache: Arc::new(ResponseCache::new()),
            search_cache: Arc::new(ResponseCache::new()),
            fetcher,
            tasks,
        }
    }

    /// Look up a single card. A cache hit or invalid input completes
    /// synchronously on the calling (UI) thread; otherwise the fetch runs
    /// off-thread and `on_complete` fires at the next dispatcher poll.
    /// `Ok(None)` means the catalog has no such card.
    pub fn fetch_card_by_id<C>(&self, card_id: &str, stamp: GuardStamp, on_complete: C)
    where
        C: FnOnce(ApiResult<Option<Card>>) + Send + 'static,
    {
        let card_id = card_id.trim();
        if card_id.is_empty() {
            on_complete(Err(ApiError::InvalidInput("card id must not be empty".into())));
            return;
        }

        if let Some(card) = self.card_cache.get(card_id) {
            on_complete(Ok(Some(card)));
            return;
        }

        let cache = Arc::clone(&self.card_cache);
        let fetcher = Arc::clone(&self.fetcher);
        let id = card_id.to_string();
        self.tasks.run_guarded(
            stamp,
            move || {
                let result = fetcher.fetch_by_id(&id)?;
                if let Some(card) = &result {
                    cache.put(&id, card.clone());
                }
                Ok(result)
            },
            on_complete,
        );
    }

    pub fn search_by_name<C>(&self, name: &str, stamp: GuardStamp, on_complete: C)
    where
        C: FnOnce(ApiResult<Vec<Card>>) + Send + 'static,
    {
        let name = name.trim().to_string();
        if name.is_empty() {
            on_complete(Err(ApiError::InvalidInput("card name must not be empty".into())));
            return;
        }
        let fetcher = Arc::clone(&self.fetcher);
        let key = format!("name:{}", name);
        self.run_search(key, stamp, move || fetcher.search_by_name(&name), on_complete);
    }

    pub fn search_by_set<C>(&self, set_id: &str, stamp: GuardStamp, on_complete: C)
    where
        C: FnOnce(ApiResult<Vec<Card>>) + Send + 'static,
    {
        let set_id = set_id.trim().to_string();
        if set_id.is_empty() {
            on_complete(Err(ApiError::InvalidInput("set id must not be empty".into())));
            return;
        }
        let fetcher = Arc::clone(&self.fetcher);
        let key = format!("set.id:{}", set_id);
        self.run_search(key, stamp, move || fetcher.search_by_set(&set_id), on_complete);
    }

    pub fn search_by_pokedex_range<C>(
        &self,
        start: u32,
        end: u32,
        stamp: GuardStamp,
        on_complete: C,
    ) where
        C: FnOnce(ApiResult<Vec<Card>>) + Send + 'static,
    {
        if start == 0 || start > end {
            on_complete(Err(ApiError::InvalidInput(format!(
                "invalid Pokédex range {}-{}",
                start, end
            ))));
            return;
        }
        let fetcher = Arc::clone(&self.fetcher);
        let key = format!("pokedex:{}-{}", start, end);
        self.run_search(
            key,
            stamp,
            move || fetcher.search_by_pokedex_range(start, end),
            on_complete,
        );
    }

    /// Shared cache-then-fetch path for all search flavors.
    /// Empty result lists are a "nothing found" outcome and stay uncached.
    fn run_search<W, C>(&self, key: String, stamp: GuardStamp, work: W, on_complete: C)
    where
        W: FnOnce() -> ApiResult<Vec<Card>> + Send + 'static,
        C: FnOnce(ApiResult<Vec<Card>>) + Send + 'static,
    {
        if let Some(results) = self.search_cache.get(&key) {
            on_complete(Ok(results));
            return;
        }

        let cache = Arc::clone(&self.search_cache);
        self.tasks.run_guarded(
            stamp,
            move || {
                let results = work()?;
                if !results.is_empty() {
                    cache.put(&key, results.clone());
                }
                Ok(results)
            },
            on_complete,
        );
    }

    /// Explicit cache invalidation (diagnostics, test reset)
    pub fn clear_caches(&self) {
        self.card_cache.clear();
        self.search_cache.clear();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
