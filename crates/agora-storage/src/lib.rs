//! Storage abstraction for the agora club platform.
//!
//! Backend crates (e.g., agora-store-memory) implement the [`Store`] /
//! [`StoreTxn`] traits so the governance engine doesn't depend on any
//! specific database engine or schema details.

use thiserror::Error;

mod store;
mod types;

pub use store::*;
pub use types::*;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
