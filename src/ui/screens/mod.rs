mod collection;
mod results;
mod search_by_id;
mod search_by_name;
mod search_by_pokedex;
mod search_by_set;
mod welcome;

pub use collection::CollectionScreen;
pub use search_by_id::SearchByIdScreen;
pub use search_by_name::SearchByNameScreen;
pub use search_by_pokedex::SearchByPokedexScreen;
pub use search_by_set::SearchBySetScreen;
pub use welcome::WelcomeScreen;

use crate::ui::state::{AppState, Screen};

/// Jump to the detail screen for a card picked from any result list
pub(crate) fn open_card_detail(state: &mut AppState, card_id: String) {
    state.search_by_id.query = card_id;
    state.current_screen = Screen::SearchById;
    SearchByIdScreen::start_lookup(state);
}
