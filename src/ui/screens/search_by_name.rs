use crate::ui::screens::{open_card_detail, results};
use crate::ui::state::{AppState, FetchStatus, Screen};
use eframe::egui;
use std::sync::Arc;

pub struct SearchByNameScreen;

impl SearchByNameScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        state.search_by_name.absorb_outcome(&state.dispatcher);

        let mut clicked_card = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Menu").clicked() {
                    state.search_by_name.guard.invalidate();
                    state.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Search by Name");
            ui.add_space(10.0);

            let mut go = false;
            ui.horizontal(|ui| {
                ui.label("Card name:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_by_name.query)
                        .desired_width(220.0)
                        .hint_text("e.g. Pikachu"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    go = true;
                }
                if ui.button("Search").clicked() {
                    go = true;
                }
            });
            if go {
                Self::start_search(state);
            }

            ui.add_space(10.0);

            if state.search_by_name.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Searching...");
                });
            }
            if let Some(error) = &state.search_by_name.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }

            if let Some(list) = &state.search_by_name.results {
                if list.is_empty() {
                    ui.label("No cards matched that name.");
                } else {
                    ui.label(format!("{} cards found", list.len()));
                    ui.add_space(6.0);
                    clicked_card = results::show_result_list(
                        ctx,
                        ui,
                        &state.loader,
                        &state.textures,
                        list,
                    );
                }
            }
        });

        if let Some(card_id) = clicked_card {
            open_card_detail(state, card_id);
        }
    }

    fn start_search(state: &mut AppState) {
        let search = &mut state.search_by_name;
        if search.query.trim().is_empty() {
            search.error = Some("Please enter a card name.".to_string());
            return;
        }
        search.begin_request();

        let slot = Arc::clone(&search.outcome);
        state
            .controller
            .search_by_name(&search.query, search.guard.stamp(), move |outcome| {
                *slot.lock().unwrap() = match outcome {
                    Ok(cards) => FetchStatus::Ready(cards),
                    Err(e) => FetchStatus::Failed(e.to_string()),
                };
            });
    }
}
