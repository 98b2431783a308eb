//! Validated value types.

mod api_url;

pub use api_url::{ApiBaseUrl, DEFAULT_API_URL};
