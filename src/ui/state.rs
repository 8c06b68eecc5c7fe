use crate::cache::ImageLoader;
use crate::collection_db::CollectionDb;
use crate::controller::CardController;
use crate::dispatch::{Dispatcher, RequestGuard};
use crate::lazy_list::{LazyList, PREFETCH_BATCH};
use crate::models::Card;
use crate::ui::textures::TextureStore;
use std::sync::{Arc, Mutex};

#[derive(PartialEq, Clone, Copy)]
pub enum Screen {
    Welcome,
    SearchById,
    SearchByName,
    SearchBySet,
    SearchByPokedex,
    Collection,
}

/// Outcome slot written by a UI-thread continuation and read by the screen
/// on the next frame.
pub enum FetchStatus<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

pub type SharedSlot<T> = Arc<Mutex<FetchStatus<T>>>;

pub fn new_slot<T>() -> SharedSlot<T> {
    Arc::new(Mutex::new(FetchStatus::Idle))
}

/// Presentation row materialized lazily from a card record
pub struct CardRow {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub image_url: String,
}

impl CardRow {
    pub fn from_card(card: &Card) -> Self {
        let mut caption = card.set_caption();
        if let Some(rarity) = &card.rarity {
            caption = format!("{} · {}", caption, rarity);
        }
        Self {
            id: card.id.clone(),
            title: card.name.clone(),
            caption,
            image_url: card.small_image_url().unwrap_or("").to_string(),
        }
    }
}

pub type ResultList = LazyList<Card, CardRow>;

/// State shared by the three query-driven search screens
pub struct SearchState {
    pub query: String,
    pub guard: RequestGuard,
    pub outcome: SharedSlot<Vec<Card>>,
    pub results: Option<ResultList>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            guard: RequestGuard::new(),
            outcome: new_slot(),
            results: None,
            error: None,
            loading: false,
        }
    }
}

impl SearchState {
    /// Supersede any outstanding request and reset the outcome slot
    pub fn begin_request(&mut self) {
        self.guard.invalidate();
        self.outcome = new_slot();
        *self.outcome.lock().unwrap() = FetchStatus::Loading;
        self.results = None;
        self.error = None;
        self.loading = true;
    }

    /// Pull a finished outcome into screen-local state
    pub fn absorb_outcome(&mut self, dispatcher: &Dispatcher) {
        let status = {
            let mut slot = self.outcome.lock().unwrap();
            match &*slot {
                FetchStatus::Ready(_) | FetchStatus::Failed(_) => {
                    std::mem::replace(&mut *slot, FetchStatus::Idle)
                }
                _ => return,
            }
        };
        self.loading = false;
        match status {
            FetchStatus::Ready(cards) => {
                log::info!("Search returned {} cards", cards.len());
                self.results = Some(LazyList::new(
                    cards,
                    PREFETCH_BATCH,
                    dispatcher.handle(),
                    CardRow::from_card,
                ));
            }
            FetchStatus::Failed(message) => self.error = Some(message),
            _ => unreachable!(),
        }
    }
}

/// State for the Pokédex-range search screen, which takes two numeric
/// inputs instead of a single query string
#[derive(Default)]
pub struct PokedexSearchState {
    pub start_input: String,
    pub end_input: String,
    pub search: SearchState,
}

/// State for the single-card detail screen
pub struct DetailState {
    pub query: String,
    pub guard: RequestGuard,
    pub outcome: SharedSlot<Option<Card>>,
    pub card: Option<Card>,
    pub error: Option<String>,
    pub not_found: Option<String>,
    pub loading: bool,
}

impl Default for DetailState {
    fn default() -> Self {
        Self {
            query: String::new(),
            guard: RequestGuard::new(),
            outcome: new_slot(),
            card: None,
            error: None,
            not_found: None,
            loading: false,
        }
    }
}

impl DetailState {
    pub fn begin_request(&mut self) {
        self.guard.invalidate();
        self.outcome = new_slot();
        *self.outcome.lock().unwrap() = FetchStatus::Loading;
        self.card = None;
        self.error = None;
        self.not_found = None;
        self.loading = true;
    }

    pub fn absorb_outcome(&mut self) {
        let status = {
            let mut slot = self.outcome.lock().unwrap();
            match &*slot {
                FetchStatus::Ready(_) | FetchStatus::Failed(_) => {
                    std::mem::replace(&mut *slot, FetchStatus::Idle)
                }
                _ => return,
            }
        };
        self.loading = false;
        match status {
            FetchStatus::Ready(Some(card)) => {
                log::info!("Showing card {}", card.id);
                self.card = Some(card);
            }
            FetchStatus::Ready(None) => {
                self.not_found = Some(format!("No card found for ID '{}'", self.query.trim()));
            }
            FetchStatus::Failed(message) => self.error = Some(message),
            _ => unreachable!(),
        }
    }
}

/// State for the collection view
#[derive(Default)]
pub struct CollectionState {
    pub results: Option<ResultList>,
    pub dirty: bool,
}

pub struct AppState {
    pub current_screen: Screen,
    pub dispatcher: Dispatcher,
    pub loader: ImageLoader,
    pub controller: CardController,
    pub collection: Option<CollectionDb>,
    pub textures: TextureStore,
    pub search_by_id: DetailState,
    pub search_by_name: SearchState,
    pub search_by_set: SearchState,
    pub search_by_pokedex: PokedexSearchState,
    pub collection_view: CollectionState,
}

impl Default for AppState {
    fn default() -> Self {
        let dispatcher = Dispatcher::new();
        let controller = CardController::new(dispatcher.handle());
        let collection = match CollectionDb::open() {
            Ok(db) => Some(db),
            Err(e) => {
                log::error!("Failed to open collection database: {}", e);
                None
            }
        };
        Self {
            current_screen: Screen::Welcome,
            dispatcher,
            loader: ImageLoader::new(),
            controller,
            collection,
            textures: TextureStore::default(),
            search_by_id: DetailState::default(),
            search_by_name: SearchState::default(),
            search_by_set: SearchState::default(),
            search_by_pokedex: PokedexSearchState::default(),
            collection_view: CollectionState {
                dirty: true,
                ..Default::default()
            },
        }
    }
}
