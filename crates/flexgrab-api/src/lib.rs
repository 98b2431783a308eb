//! flexgrab-api - Typed HTTP client for the block-grabbing service.
//!
//! The [`ApiClient`] executes single authenticated JSON request/response
//! cycles and normalizes every failure mode into the closed taxonomy in
//! [`flexgrab_core::Error`]. It holds the process-wide bearer token but
//! no other state; callers own what a successful response means.

mod client;
mod descriptor;
pub mod wire;

pub use client::ApiClient;
pub use descriptor::{HttpMethod, RequestDescriptor};
pub use wire::{Envelope, require_success};
