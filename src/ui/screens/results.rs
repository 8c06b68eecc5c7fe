//! Shared rendering for lazily-materialized card result lists.

use crate::cache::ImageLoader;
use crate::ui::state::ResultList;
use crate::ui::textures::TextureStore;
use eframe::egui;

const ROW_HEIGHT: f32 = 92.0;
const THUMB_WIDTH: u32 = 60;

/// Renders the list with only the visible rows materialized.
/// Returns the id of a card the user clicked, if any.
pub fn show_result_list(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    loader: &ImageLoader,
    textures: &TextureStore,
    list: &ResultList,
) -> Option<String> {
    let mut clicked = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, ROW_HEIGHT, list.len(), |ui, row_range| {
            for index in row_range {
                let row = match list.get(index) {
                    Ok(row) => row,
                    Err(e) => {
                        log::error!("Failed to materialize row {}: {}", index, e);
                        continue;
                    }
                };

                ui.horizontal(|ui| {
                    match textures.request(ctx, loader, &row.image_url, Some(THUMB_WIDTH), None) {
                        Some(texture) => {
                            let size = egui::vec2(
                                texture.size()[0] as f32,
                                texture.size()[1] as f32,
                            );
                            ui.image((texture.id(), size));
                        }
                        None => {
                            ui.add_sized(
                                [THUMB_WIDTH as f32, ROW_HEIGHT - 12.0],
                                egui::Label::new(egui::RichText::new("…").weak()),
                            );
                        }
                    }

                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&row.title).size(16.0).strong());
                        ui.label(egui::RichText::new(&row.caption).weak());
                        if ui.button("View").clicked() {
                            clicked = Some(row.id.clone());
                        }
                    });
                });
                ui.separator();
            }
        });

    clicked
}
