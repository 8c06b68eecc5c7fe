//! De-duplicating, bounded-concurrency card image loader.
//!
//! Images are fetched and decoded off the UI thread by a small fixed pool of
//! workers, scaled to the requested size, and cached by `(url, size)`.
//! Concurrent requests for the same key collapse into a single fetch whose
//! result fans out to every waiting callback. Callbacks are queued on a
//! channel and run on the UI thread when [`ImageLoader::poll`] drains it
//! each frame. Failures are never cached, so a later request retries.

use crate::error::{ApiError, ApiResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use image::imageops::FilterType;
use image::RgbaImage;
use lazy_static::lazy_static;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::Semaphore;

/// Fixed number of concurrent image fetches. Small on purpose: enough to
/// hide network latency, not enough to saturate the API or flood the UI
/// loop with completions.
pub const IMAGE_WORKERS: usize = 3;

/// Decoded, pre-scaled image shared by every view displaying it
pub type SharedImage = Arc<RgbaImage>;

/// Cache key: same URL at two different target sizes is two entries.
/// A `None` dimension means "derive from the other, preserving aspect ratio";
/// both `None` keeps the original size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageKey {
    pub url: String,
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
}

impl ImageKey {
    pub fn new(url: &str, target_width: Option<u32>, target_height: Option<u32>) -> Self {
        Self {
            url: url.to_string(),
            target_width,
            target_height,
        }
    }
}

/// What a load callback receives. `Failed` carries the error placeholder so
/// consumers always have something to draw.
#[derive(Clone)]
pub enum LoadOutcome {
    Loaded(SharedImage),
    Failed(SharedImage),
}

impl LoadOutcome {
    pub fn image(&self) -> &SharedImage {
        match self {
            LoadOutcome::Loaded(img) | LoadOutcome::Failed(img) => img,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

type LoadCallback = Box<dyn FnOnce(LoadOutcome) + Send>;

lazy_static! {
    static ref LOADING_PLACEHOLDER: SharedImage =
        Arc::new(RgbaImage::from_pixel(100, 100, image::Rgba([200, 200, 200, 255])));
    static ref ERROR_PLACEHOLDER: SharedImage =
        Arc::new(RgbaImage::from_pixel(100, 100, image::Rgba([140, 110, 110, 255])));
}

/// Placeholder shown while a load is in flight
pub fn loading_placeholder() -> SharedImage {
    Arc::clone(&LOADING_PLACEHOLDER)
}

/// Placeholder delivered when a load fails or the URL is empty
pub fn error_placeholder() -> SharedImage {
    Arc::clone(&ERROR_PLACEHOLDER)
}

/// Fetches raw image bytes. Seam for tests; production uses HTTP.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> ApiResult<Vec<u8>>;
}

struct HttpImageFetcher;

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> ApiResult<Vec<u8>> {
        crate::api::fetch_image(url)
    }
}

struct Completion {
    key: ImageKey,
    result: ApiResult<SharedImage>,
}

/// Asynchronous image loader with request collapsing.
/// Owned by UI state; `poll` must run on the UI thread.
pub struct ImageLoader {
    cache: Arc<DashMap<ImageKey, SharedImage>>,
    /// In-flight keys with their waiting callbacks. An entry exists exactly
    /// while one worker owns the fetch for that key.
    pending: DashMap<ImageKey, Vec<LoadCallback>>,
    fetcher: Arc<dyn ImageFetcher>,
    runtime: Runtime,
    semaphore: Arc<Semaphore>,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpImageFetcher))
    }

    /// Loader with an injected fetcher, used in tests
    pub fn with_fetcher(fetcher: Arc<dyn ImageFetcher>) -> Self {
        let (tx, rx) = unbounded_channel();
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");
        Self {
            cache: Arc::new(DashMap::new()),
            pending: DashMap::new(),
            fetcher,
            runtime,
            semaphore: Arc::new(Semaphore::new(IMAGE_WORKERS)),
            completion_tx: tx,
            completion_rx: rx,
        }
    }

    /// Request an image at a target size.
    ///
    /// Returns a placeholder (or the cached image) immediately; the
    /// authoritative value always arrives through `on_loaded`. For an empty
    /// URL or a cached key the callback runs synchronously on the calling
    /// thread; otherwise it runs at a later `poll`. Submission never blocks.
    pub fn load_async<C>(
        &self,
        url: &str,
        target_width: Option<u32>,
        target_height: Option<u32>,
        on_loaded: C,
    ) -> SharedImage
    where
        C: FnOnce(LoadOutcome) + Send + 'static,
    {
        if url.is_empty() {
            on_loaded(LoadOutcome::Failed(error_placeholder()));
            return error_placeholder();
        }

        let key = ImageKey::new(url, target_width, target_height);

        if let Some(cached) = self.cache.get(&key) {
            let image = Arc::clone(&cached);
            drop(cached);
            on_loaded(LoadOutcome::Loaded(Arc::clone(&image)));
            return image;
        }

        // The entry lock makes "check pending + register waiter" atomic, so
        // two callers can never both spawn work for the same key.
        let mut spawn_needed = false;
        match self.pending.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                log::debug!("Attaching to in-flight load for {}", key.url);
                occupied.get_mut().push(Box::new(on_loaded));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(vec![Box::new(on_loaded)]);
                spawn_needed = true;
            }
        }
        if spawn_needed {
            self.spawn_fetch(key);
        }

        loading_placeholder()
    }

    fn spawn_fetch(&self, key: ImageKey) {
        log::debug!("Spawning image fetch for {}", key.url);
        let fetcher = Arc::clone(&self.fetcher);
        let cache = Arc::clone(&self.cache);
        let semaphore = Arc::clone(&self.semaphore);
        let tx = self.completion_tx.clone();

        self.runtime.spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return, // loader dropped
            };

            let work_key = key.clone();
            let work_fetcher = Arc::clone(&fetcher);
            let result =
                match tokio::task::spawn_blocking(move || fetch_and_scale(&*work_fetcher, &work_key))
                    .await
                {
                    Ok(result) => result,
                    Err(join_error) => Err(ApiError::TaskFailed(join_error.to_string())),
                };

            // Cache successes immediately so later requests hit even before
            // the UI drains the completion. Failures are never cached.
            if let Ok(image) = &result {
                cache.insert(key.clone(), Arc::clone(image));
            }
            let _ = tx.send(Completion { key, result });
        });
    }

    /// Drain finished loads, invoking every waiting callback on the calling
    /// thread. All callbacks attached to one key receive the same outcome.
    /// Returns the number of callbacks invoked.
    pub fn poll(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(Completion { key, result }) = self.completion_rx.try_recv() {
            let waiters = self
                .pending
                .remove(&key)
                .map(|(_, callbacks)| callbacks)
                .unwrap_or_default();

            let outcome = match result {
                Ok(image) => LoadOutcome::Loaded(image),
                Err(e) => {
                    log::warn!("Image load failed for {}: {}", key.url, e);
                    LoadOutcome::Failed(error_placeholder())
                }
            };

            for callback in waiters {
                callback(outcome.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// True while any load is still in flight
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drops all cached decoded images. In-flight work is unaffected and
    /// repopulates the cache when it completes.
    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}

/// Blocking fetch + decode + scale, run on a worker thread
fn fetch_and_scale(fetcher: &dyn ImageFetcher, key: &ImageKey) -> ApiResult<SharedImage> {
    let bytes = fetcher.fetch(&key.url)?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|e| ApiError::Image(format!("{}: {}", key.url, e)))?
        .to_rgba8();

    let (width, height) = target_dimensions(
        rgba.width(),
        rgba.height(),
        key.target_width,
        key.target_height,
    );
    let scaled = if (width, height) == (rgba.width(), rgba.height()) {
        rgba
    } else {
        image::imageops::resize(&rgba, width, height, FilterType::Lanczos3)
    };

    Ok(Arc::new(scaled))
}

/// Resolves the target size. A missing dimension is derived from the other
/// one preserving aspect ratio; both missing keeps the original size.
fn target_dimensions(
    orig_width: u32,
    orig_height: u32,
    target_width: Option<u32>,
    target_height: Option<u32>,
) -> (u32, u32) {
    match (target_width, target_height) {
        (Some(w), Some(h)) => (w.max(1), h.max(1)),
        (Some(w), None) => {
            let h = (w as f64 * orig_height as f64 / orig_width as f64).round() as u32;
            (w.max(1), h.max(1))
        }
        (None, Some(h)) => {
            let w = (h as f64 * orig_width as f64 / orig_height as f64).round() as u32;
            (w.max(1), h.max(1))
        }
        (None, None) => (orig_width, orig_height),
    }
}

#[cfg(test)]
#[path = "image_loader_tests.rs"]
mod tests;
