use crate::ui::state::{AppState, Screen};
use eframe::egui;

pub struct WelcomeScreen;

impl WelcomeScreen {
    pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Card Binder");
            ui.label("Browse the Pokémon TCG catalog and track your collection");
            ui.add_space(30.0);

            let button_size = egui::vec2(220.0, 36.0);

            if ui
                .add_sized(button_size, egui::Button::new("Search by ID"))
                .clicked()
            {
                state.current_screen = Screen::SearchById;
            }
            ui.add_space(8.0);

            if ui
                .add_sized(button_size, egui::Button::new("Search by Name"))
                .clicked()
            {
                state.current_screen = Screen::SearchByName;
            }
            ui.add_space(8.0);

            if ui
                .add_sized(button_size, egui::Button::new("Search by Set"))
                .clicked()
            {
                state.current_screen = Screen::SearchBySet;
            }
            ui.add_space(8.0);

            if ui
                .add_sized(button_size, egui::Button::new("Search by Pokédex Number"))
                .clicked()
            {
                state.current_screen = Screen::SearchByPokedex;
            }
            ui.add_space(8.0);

            if ui
                .add_sized(button_size, egui::Button::new("View Collection"))
                .clicked()
            {
                state.collection_view.dirty = true;
                state.current_screen = Screen::Collection;
            }
        });
    }
}
