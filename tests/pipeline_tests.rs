use card_binder::controller::{CardController, CardFetcher};
use card_binder::dispatch::{Dispatcher, RequestGuard};
use card_binder::error::ApiResult;
use card_binder::lazy_list::LazyList;
use card_binder::models::{Card, ImageInfo, SetInfo};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// Helper to create test card data

fn create_test_card(id: &str, name: &str, dex: u32) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        supertype: Some("Pokémon".to_string()),
        subtypes: vec!["Basic".to_string()],
        types: vec!["Lightning".to_string()],
        number: Some("25".to_string()),
        rarity: Some("Common".to_string()),
        set_info: Some(SetInfo {
            id: "base1".to_string(),
            name: "Base Set".to_string(),
            series: Some("Base".to_string()),
        }),
        image_info: Some(ImageInfo {
            small: Some(format!("https://images.example.com/{}_small.png", id)),
            large: Some(format!("https://images.example.com/{}_large.png", id)),
        }),
        national_pokedex_numbers: vec![dex],
    }
}

struct FakeFetcher {
    search_calls: AtomicUsize,
    results: Vec<Card>,
}

impl FakeFetcher {
    fn returning(results: Vec<Card>) -> Arc<Self> {
        Arc::new(Self {
            search_calls: AtomicUsize::new(0),
            results,
        })
    }
}

impl CardFetcher for FakeFetcher {
    fn fetch_by_id(&self, card_id: &str) -> ApiResult<Option<Card>> {
        Ok(self.results.iter().find(|c| c.id == card_id).cloned())
    }

    fn search_by_name(&self, _name: &str) -> ApiResult<Vec<Card>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }

    fn search_by_set(&self, _set_id: &str) -> ApiResult<Vec<Card>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }

    fn search_by_pokedex_range(&self, start: u32, end: u32) -> ApiResult<Vec<Card>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .results
            .iter()
            .filter(|c| {
                c.national_pokedex_numbers
                    .iter()
                    .any(|&n| n >= start && n <= end)
            })
            .cloned()
            .collect())
    }
}

type Slot = Arc<Mutex<Option<ApiResult<Vec<Card>>>>>;

fn run_search_to_completion(
    dispatcher: &mut Dispatcher,
    controller: &CardController,
    guard: &RequestGuard,
    set_id: &str,
) -> ApiResult<Vec<Card>> {
    let slot: Slot = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&slot);
    controller.search_by_set(set_id, guard.stamp(), move |outcome| {
        *sink.lock().unwrap() = Some(outcome);
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        dispatcher.poll();
        if let Some(outcome) = slot.lock().unwrap().take() {
            return outcome;
        }
        assert!(Instant::now() < deadline, "search did not complete in time");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn search_results_flow_from_fetcher_through_cache_into_lazy_rows() {
    let cards: Vec<Card> = (0..12)
        .map(|i| create_test_card(&format!("base1-{}", i), &format!("Card {}", i), 25 + i))
        .collect();
    let fetcher = FakeFetcher::returning(cards);

    let mut dispatcher = Dispatcher::new();
    let controller = CardController::with_fetcher(dispatcher.handle(), fetcher.clone());
    let guard = RequestGuard::new();

    let results = run_search_to_completion(&mut dispatcher, &controller, &guard, "base1").unwrap();
    assert_eq!(results.len(), 12);
    assert_eq!(fetcher.search_calls.load(Ordering::SeqCst), 1);

    // Second identical search is served from the cache
    let again = run_search_to_completion(&mut dispatcher, &controller, &guard, "base1").unwrap();
    assert_eq!(again.len(), 12);
    assert_eq!(fetcher.search_calls.load(Ordering::SeqCst), 1);

    // Materialize presentation rows lazily from the cached results
    let list = LazyList::new(results, 5, dispatcher.handle(), |card: &Card| {
        card.name.clone()
    });
    assert_eq!(list.get(0).unwrap(), "Card 0");

    // get(0) is a batch boundary: slots 1..5 fill in the background
    let deadline = Instant::now() + Duration::from_secs(5);
    while !list.is_built(4) {
        assert!(Instant::now() < deadline, "prefetch did not complete in time");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(list.is_built(1));
    assert!(!list.is_built(5), "prefetch must stop at the batch end");
}

#[test]
fn cleared_caches_force_a_fresh_fetch() {
    let cards = vec![create_test_card("base1-0", "Pikachu", 25)];
    let fetcher = FakeFetcher::returning(cards);

    let mut dispatcher = Dispatcher::new();
    let controller = CardController::with_fetcher(dispatcher.handle(), fetcher.clone());
    let guard = RequestGuard::new();

    run_search_to_completion(&mut dispatcher, &controller, &guard, "base1").unwrap();
    controller.clear_caches();
    run_search_to_completion(&mut dispatcher, &controller, &guard, "base1").unwrap();

    assert_eq!(fetcher.search_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn pokedex_range_search_filters_and_validates() {
    let cards = vec![
        create_test_card("base1-0", "Bulbasaur", 1),
        create_test_card("base1-1", "Mew", 151),
        create_test_card("base1-2", "Chikorita", 152),
    ];
    let fetcher = FakeFetcher::returning(cards);

    let mut dispatcher = Dispatcher::new();
    let controller = CardController::with_fetcher(dispatcher.handle(), fetcher);
    let guard = RequestGuard::new();

    let slot: Slot = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&slot);
    controller.search_by_pokedex_range(1, 151, guard.stamp(), move |outcome| {
        *sink.lock().unwrap() = Some(outcome);
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    let results = loop {
        dispatcher.poll();
        if let Some(outcome) = slot.lock().unwrap().take() {
            break outcome.unwrap();
        }
        assert!(Instant::now() < deadline, "search did not complete in time");
        std::thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(results.len(), 2);

    // Degenerate range is rejected synchronously
    let rejected: Slot = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&rejected);
    controller.search_by_pokedex_range(10, 5, guard.stamp(), move |outcome| {
        *sink.lock().unwrap() = Some(outcome);
    });
    assert!(rejected.lock().unwrap().take().unwrap().is_err());
}
