use crate::ui::state::{AppState, FetchStatus, Screen};
use eframe::egui;
use std::sync::Arc;

pub struct SearchByIdScreen;

impl SearchByIdScreen {
    pub fn show(ctx: &egui::Context, state: &mut AppState) {
        state.search_by_id.absorb_outcome();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Menu").clicked() {
                    state.search_by_id.guard.invalidate();
                    state.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Search by Card ID");
            ui.add_space(10.0);

            let mut go = false;
            ui.horizontal(|ui| {
                ui.label("Card ID:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search_by_id.query)
                        .desired_width(220.0)
                        .hint_text("e.g. sv1-1"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    go = true;
                }
                if ui.button("Go").clicked() {
                    go = true;
                }
            });
            if go {
                Self::start_lookup(state);
            }

            ui.add_space(10.0);

            if state.search_by_id.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading card data...");
                });
            }
            if let Some(error) = &state.search_by_id.error {
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
            if let Some(message) = &state.search_by_id.not_found {
                ui.label(message.clone());
            }

            if state.search_by_id.card.is_some() {
                Self::show_card_detail(ctx, ui, state);
            }
        });
    }

    /// Kick off (or re-kick) the lookup for the current query
    pub fn start_lookup(state: &mut AppState) {
        let detail = &mut state.search_by_id;
        if detail.query.trim().is_empty() {
            detail.error = Some("Please enter a card ID.".to_string());
            return;
        }
        detail.begin_request();

        let slot = Arc::clone(&detail.outcome);
        state
            .controller
            .fetch_card_by_id(&detail.query, detail.guard.stamp(), move |outcome| {
                *slot.lock().unwrap() = match outcome {
                    Ok(card) => FetchStatus::Ready(card),
                    Err(e) => FetchStatus::Failed(e.to_string()),
                };
            });
    }

    fn show_card_detail(ctx: &egui::Context, ui: &mut egui::Ui, state: &mut AppState) {
        let Some(card) = state.search_by_id.card.clone() else {
            return;
        };

        ui.separator();
        ui.horizontal_top(|ui| {
            // Card image at detail size, height-bound with derived width
            let image_url = card.large_image_url().unwrap_or("");
            match state
                .textures
                .request(ctx, &state.loader, image_url, None, Some(360))
            {
                Some(texture) => {
                    let size = egui::vec2(texture.size()[0] as f32, texture.size()[1] as f32);
                    ui.image((texture.id(), size));
                }
                None => {
                    ui.add_sized(
                        [260.0, 360.0],
                        egui::Label::new(egui::RichText::new("Loading image...").weak()),
                    );
                }
            }

            ui.add_space(16.0);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&card.name).size(20.0).strong());
                if let Some(supertype) = &card.supertype {
                    let mut line = supertype.clone();
                    if !card.subtypes.is_empty() {
                        line = format!("{} · {}", line, card.subtypes.join(", "));
                    }
                    ui.label(line);
                }
                if !card.types.is_empty() {
                    ui.label(format!("Types: {}", card.types.join(", ")));
                }
                ui.label(card.set_caption());
                if let Some(rarity) = &card.rarity {
                    ui.label(format!("Rarity: {}", rarity));
                }
                if !card.national_pokedex_numbers.is_empty() {
                    let numbers: Vec<String> = card
                        .national_pokedex_numbers
                        .iter()
                        .map(|n| n.to_string())
                        .collect();
                    ui.label(format!("Pokédex: {}", numbers.join(", ")));
                }

                ui.add_space(12.0);
                Self::show_collect_toggle(ui, state, &card);
            });
        });
    }

    fn show_collect_toggle(ui: &mut egui::Ui, state: &mut AppState, card: &crate::models::Card) {
        let Some(db) = &state.collection else {
            ui.colored_label(egui::Color32::LIGHT_RED, "Collection storage unavailable");
            return;
        };

        match db.exists(&card.id) {
            Ok(true) => {
                ui.label("✔ In your collection");
                if ui.button("Remove from collection").clicked() {
                    if let Err(e) = db.delete_by_id(&card.id) {
                        log::error!("Failed to remove {}: {}", card.id, e);
                    }
                    state.collection_view.dirty = true;
                }
            }
            Ok(false) => {
                if ui.button("Add to collection").clicked() {
                    if let Err(e) = db.save(card) {
                        log::error!("Failed to save {}: {}", card.id, e);
                    }
                    state.collection_view.dirty = true;
                }
            }
            Err(e) => {
                ui.colored_label(
                    egui::Color32::LIGHT_RED,
                    format!("Collection lookup failed: {}", e),
                );
            }
        }
    }
}
