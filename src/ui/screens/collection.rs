use crate::lazy_list::{LazyList, PREFETCH_BATCH};
use crate::ui::screens::{open_card_detail, results};
use crate::ui::state::{AppState, CardRow, Screen};
use eframe::egui;

pub struct CollectionScreen;

impl CollectionScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        if state.collection_view.dirty {
            Self::reload(state);
        }

        let mut clicked_card = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Menu").clicked() {
                    state.current_screen = Screen::Welcome;
                }
                if ui.button("Refresh").clicked() {
                    state.collection_view.dirty = true;
                }
            });
            ui.add_space(10.0);

            ui.heading("My Collection");
            ui.add_space(10.0);

            if state.collection.is_none() {
                ui.colored_label(egui::Color32::LIGHT_RED, "Collection storage unavailable");
                return;
            }

            match &state.collection_view.results {
                Some(list) if !list.is_empty() => {
                    ui.label(format!("{} cards collected", list.len()));
                    ui.add_space(6.0);
                    clicked_card = results::show_result_list(
                        ctx,
                        ui,
                        &state.loader,
                        &state.textures,
                        list,
                    );
                }
                _ => {
                    ui.label("Your collection is empty. Cards you add from the detail view show up here.");
                }
            }
        });

        if let Some(card_id) = clicked_card {
            open_card_detail(state, card_id);
        }
    }

    fn reload(state: &mut AppState) {
        state.collection_view.dirty = false;
        let Some(db) = &state.collection else {
            return;
        };
        match db.find_all() {
            Ok(cards) => {
                log::info!("Loaded {} collected cards", cards.len());
                state.collection_view.results = Some(LazyList::new(
                    cards,
                    PREFETCH_BATCH,
                    state.dispatcher.handle(),
                    CardRow::from_card,
                ));
            }
            Err(e) => {
                log::error!("Failed to load collection: {}", e);
            }
        }
    }
}
