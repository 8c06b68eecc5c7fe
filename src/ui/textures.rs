//! Bridges decoded images from the loader to egui textures.
//!
//! The loader's callbacks run on the UI thread (during its `poll`), so
//! texture creation is safe here. Both successful loads and the error
//! placeholder become textures, keyed by the same `(url, size)` key the
//! loader caches under, so a finished key is never re-requested frame
//! after frame.

use crate::cache::{ImageKey, ImageLoader};
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct TextureStore {
    textures: Arc<Mutex<HashMap<ImageKey, egui::TextureHandle>>>,
    requested: Arc<Mutex<HashSet<ImageKey>>>,
}

impl TextureStore {
    /// Returns the texture for `url` at the given size, requesting a load on
    /// first sight. `None` means the image is still on its way (or the URL
    /// is empty); callers draw their own loading placeholder.
    pub fn request(
        &self,
        ctx: &egui::Context,
        loader: &ImageLoader,
        url: &str,
        target_width: Option<u32>,
        target_height: Option<u32>,
    ) -> Option<egui::TextureHandle> {
        if url.is_empty() {
            return None;
        }
        let key = ImageKey::new(url, target_width, target_height);
        if let Some(handle) = self.textures.lock().unwrap().get(&key) {
            return Some(handle.clone());
        }
        if !self.requested.lock().unwrap().insert(key.clone()) {
            return None; // already in flight
        }

        let store = self.clone();
        let ctx = ctx.clone();
        let callback_key = key.clone();
        loader.load_async(url, target_width, target_height, move |outcome| {
            let image = outcome.image();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            let handle = ctx.load_texture(
                callback_key.url.clone(),
                color_image,
                egui::TextureOptions::LINEAR,
            );
            store
                .textures
                .lock()
                .unwrap()
                .insert(callback_key.clone(), handle);
            store.requested.lock().unwrap().remove(&callback_key);
            ctx.request_repaint();
        });

        // A cache hit delivers synchronously, so the texture may already
        // be there
        self.textures.lock().unwrap().get(&key).cloned()
    }
}
