use crate::ui::screens::{open_card_detail, results};
use crate::ui::state::{AppState, FetchStatus, Screen};
use eframe::egui;
use std::sync::Arc;

pub struct SearchByPokedexScreen;

impl SearchByPokedexScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        state.search_by_pokedex.search.absorb_outcome(&state.dispatcher);

        let mut clicked_card = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Menu").clicked() {
                    state.search_by_pokedex.search.guard.invalidate();
                    state.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Search by Pokédex Number");
            ui.add_space(10.0);

            let mut go = false;
            ui.horizontal(|ui| {
                ui.label("From:");
                ui.add(
                    egui::TextEdit::singleline(&mut state.search_by_pokedex.start_input)
                        .desired_width(70.0)
                        .hint_text("1"),
                );
                ui.label("to:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_by_pokedex.end_input)
                        .desired_width(70.0)
                        .hint_text("151"),
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

            if state.search_by_pokedex.search.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Searching...");
                });
            }
            if let Some(error) = &state.search_by_pokedex.search.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }

            if let Some(list) = &state.search_by_pokedex.search.results {
                if list.is_empty() {
                    ui.label("No cards found in that range.");
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
        let pokedex = &mut state.search_by_pokedex;

        let start = match pokedex.start_input.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                pokedex.search.error = Some("Start must be a positive number.".to_string());
                return;
            }
        };
        let end = match pokedex.end_input.trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                pokedex.search.error = Some("End must be a positive number.".to_string());
                return;
            }
        };

        pokedex.search.begin_request();
        pokedex.search.query = format!("{}-{}", start, end);

        let slot = Arc::clone(&pokedex.search.outcome);
        state.controller.search_by_pokedex_range(
            start,
            end,
            pokedex.search.guard.stamp(),
            move |outcome| {
                *slot.lock().unwrap() = match outcome {
                    Ok(cards) => FetchStatus::Ready(cards),
                    Err(e) => FetchStatus::Failed(e.to_string()),
                };
            },
        );
    }
}
