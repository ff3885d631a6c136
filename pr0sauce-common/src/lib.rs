//! # pr0sauce Common Library
//!
//! Shared code for the pr0sauce web view:
//! - Item record model returned by the GraphQL backend
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::ItemRecord;
