//! Caching layer for API responses and decoded card images

pub mod image_loader;
pub mod response_cache;

pub use image_loader::{
    error_placeholder, loading_placeholder, ImageKey, ImageLoader, LoadOutcome, SharedImage,
};
pub use response_cache::ResponseCache;
