pub mod api;
pub mod cache;
pub mod collection_db;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod lazy_list;
pub mod models;
pub mod ui;

// Re-export commonly used items
pub use cache::{ImageKey, ImageLoader, LoadOutcome, ResponseCache};
pub use collection_db::CollectionDb;
pub use controller::CardController;
pub use dispatch::{Dispatcher, RequestGuard, TaskHandle};
pub use error::{ApiError, ApiResult};
pub use lazy_list::LazyList;
pub use models::{Card, ImageInfo, SetInfo};
