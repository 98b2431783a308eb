//! flexgrab-core - Core types for the flexgrab block-grabbing client.

pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, TransportError};
pub use models::{Block, BlockPreference, UserRecord};
pub use types::ApiBaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
