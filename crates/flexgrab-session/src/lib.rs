//! flexgrab-session - Observable session state for the flexgrab client.
//!
//! [`SessionStore`] is the single source of truth for "who is logged in"
//! and "are Amazon credentials linked", kept consistent with the
//! [`ApiClient`](flexgrab_api::ApiClient) bearer token and with the
//! persisted credential blob. Every mutation is pushed synchronously to
//! all subscribed observers.

mod storage;
mod store;

pub use storage::{CredentialStorage, StorageError};
pub use store::{SessionSnapshot, SessionStore, SubscriptionId};
