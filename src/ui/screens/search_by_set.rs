use crate::ui::screens::{open_card_detail, results};
use crate::ui::state::{AppState, FetchStatus, Screen};
use eframe::egui;
use std::sync::Arc;

pub struct SearchBySetScreen;

impl SearchBySetScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        state.search_by_set.absorb_outcome(&state.dispatcher);

        let mut clicked_card = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Menu").clicked() {
                    state.search_by_set.guard.invalidate();
                    state.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Search by Set");
            ui.add_space(10.0);

            let mut go = false;
            ui.horizontal(|ui| {
                ui.label("Set ID:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_by_set.query)
                        .desired_width(220.0)
                        .hint_text("e.g. sv1"),
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

            if state.search_by_set.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Searching...");
                });
            }
            if let Some(error) = &state.search_by_set.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }

            if let Some(list) = &state.search_by_set.results {
                if list.is_empty() {
                    ui.label("No cards found in that set.");
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
        let search = &mut state.search_by_set;
        if search.query.trim().is_empty() {
            search.error = Some("Please enter a set ID.".to_string());
            return;
        }
        search.begin_request();

        let slot = Arc::clone(&search.outcome);
        state
            .controller
            .search_by_set(&search.query, search.guard.stamp(), move |outcome| {
                *slot.lock().unwrap() = match outcome {
                    Ok(cards) => FetchStatus::Ready(cards),
                    Err(e) => FetchStatus::Failed(e.to_string()),
                };
            });
    }
}
