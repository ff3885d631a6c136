//! HTTP handlers for pr0sauce-web

pub mod health;
pub mod item;
pub mod ui;

pub use health::health_routes;
pub use item::get_item;
pub use ui::{lookup_redirect, serve_index, serve_item_page};
