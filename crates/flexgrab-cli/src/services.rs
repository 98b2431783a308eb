//! Composition root.
//!
//! The libraries take their collaborators by constructor injection;
//! this is the one place the concrete API client, credential storage,
//! and session store are wired together. Exactly one of each exists per
//! process, enforced by ownership here rather than by globals.

use anyhow::{Context, Result};

use flexgrab_api::ApiClient;
use flexgrab_core::ApiBaseUrl;
use flexgrab_session::{CredentialStorage, SessionStore};

pub struct Services {
    pub api: ApiClient,
    pub session: SessionStore,
}

impl Services {
    /// Build the service graph for the given base address.
    ///
    /// Constructing the session store restores any persisted session,
    /// so commands issued afterwards are already authenticated when a
    /// valid credential blob exists.
    pub fn init(api_url: &str) -> Result<Self> {
        let base = ApiBaseUrl::new(api_url).context("Invalid API base URL")?;
        let api = ApiClient::new(base);
        let storage = CredentialStorage::open_default().context("Failed to open credential storage")?;
        let session = SessionStore::new(api.clone(), storage);

        Ok(Self { api, session })
    }
}
