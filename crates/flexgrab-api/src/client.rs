//! The authenticated JSON request executor.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use flexgrab_core::{ApiBaseUrl, BlockPreference, Error, Result, TransportError};

use crate::descriptor::RequestDescriptor;
use crate::wire::{
    AmazonCredentialsRequest, BlocksResponse, GrabberResponse, LocationsResponse, LoginRequest,
    LoginResponse, PreferenceResponse,
};

/// Endpoint for email/password login.
const LOGIN: &str = "/auth/login";

/// Endpoint for triggering a server-side Amazon login with stored credentials.
const AMAZON_LOGIN: &str = "/auth/amazon-login";

/// Endpoint for linking Amazon credentials to the account.
const AMAZON_CREDENTIALS: &str = "/auth/amazon-credentials";

/// Endpoint for the preference collection.
const PREFERENCES: &str = "/blocks/preferences";

/// Endpoint for currently offered blocks.
const AVAILABLE_BLOCKS: &str = "/blocks/available";

/// Endpoint for starting the grabbing agent.
const START_GRABBER: &str = "/blocks/start-grabber";

/// Endpoint for stopping the grabbing agent.
const STOP_GRABBER: &str = "/blocks/stop-grabber";

/// Endpoint for the known warehouse locations.
const LOCATIONS: &str = "/blocks/locations";

/// Uniform timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the block-grabbing API.
///
/// Stateless with respect to in-flight calls: concurrent [`execute`]
/// calls are independent and may complete in any order. The one piece
/// of shared state is the current bearer token, which is read at
/// call-issue time; [`set_token`] and [`clear_token`] take effect for
/// the next issued call and never retroactively.
///
/// The client never retries, never caches, and never converts a
/// `success = false` envelope into an error; callers own both
/// decisions.
///
/// [`execute`]: ApiClient::execute
/// [`set_token`]: ApiClient::set_token
/// [`clear_token`]: ApiClient::clear_token
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: ApiBaseUrl,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new client for the given base address.
    pub fn new(base: ApiBaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("flexgrab/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the base address this client is configured for.
    pub fn base(&self) -> &ApiBaseUrl {
        &self.base
    }

    /// Set the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().expect("token lock poisoned");
        *guard = Some(token.into());
    }

    /// Clear the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_token(&self) {
        let mut guard = self.token.write().expect("token lock poisoned");
        *guard = None;
    }

    /// Returns a copy of the current bearer token, if any.
    pub fn current_token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    /// Execute a single request/response cycle.
    ///
    /// The path is resolved against the base address before any I/O;
    /// failures there surface as [`Error::InvalidEndpoint`] without
    /// touching the network. Body serialization failures are local I/O
    /// failures ([`Error::Transport`]) and the request is never sent.
    /// A response that arrives but does not parse as `R` is
    /// [`Error::Decode`] — an API contract mismatch, kept distinct from
    /// network trouble. The body is decoded regardless of HTTP status;
    /// the server encodes outcomes in its `{success, message}` envelope.
    #[instrument(skip(self, descriptor), fields(method = descriptor.method.as_str(), path = %descriptor.path))]
    pub async fn execute<B, R>(&self, descriptor: &RequestDescriptor<B>) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(&descriptor.path)?;
        // Token snapshot at call-issue time; later mutations do not
        // affect this request.
        let token = self.current_token();

        let payload = match &descriptor.body {
            Some(body) => Some(serde_json::to_vec(body).map_err(|e| TransportError::Body {
                message: e.to_string(),
            })?),
            None => None,
        };

        debug!("issuing API request");

        let mut request = self
            .client
            .request(descriptor.method.into(), url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "API response");

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::Decode {
            message: e.to_string(),
        })
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Authenticate with email and password.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest { email, password };
        self.execute(&RequestDescriptor::post(LOGIN, request)).await
    }

    /// Ask the server to log into Amazon with the stored credentials.
    pub async fn amazon_login(&self) -> Result<LoginResponse> {
        self.execute(&RequestDescriptor::post_empty(AMAZON_LOGIN))
            .await
    }

    /// Store Amazon credentials on the account.
    #[instrument(skip(self, amazon_password))]
    pub async fn save_amazon_credentials(
        &self,
        amazon_email: &str,
        amazon_password: &str,
    ) -> Result<LoginResponse> {
        let request = AmazonCredentialsRequest {
            amazon_email,
            amazon_password,
        };
        self.execute(&RequestDescriptor::post(AMAZON_CREDENTIALS, request))
            .await
    }

    // ========================================================================
    // Block Preferences
    // ========================================================================

    /// List the account's block preferences.
    pub async fn list_preferences(&self) -> Result<PreferenceResponse> {
        self.execute(&RequestDescriptor::get(PREFERENCES)).await
    }

    /// Create a new block preference.
    #[instrument(skip(self, preference), fields(name = %preference.name))]
    pub async fn create_preference(
        &self,
        preference: &BlockPreference,
    ) -> Result<PreferenceResponse> {
        self.execute(&RequestDescriptor::post(PREFERENCES, preference))
            .await
    }

    /// Update an existing block preference.
    #[instrument(skip(self, preference))]
    pub async fn update_preference(
        &self,
        id: &str,
        preference: &BlockPreference,
    ) -> Result<PreferenceResponse> {
        let path = format!("{}/{}", PREFERENCES, id);
        self.execute(&RequestDescriptor::patch(path, preference))
            .await
    }

    /// Delete a block preference.
    #[instrument(skip(self))]
    pub async fn delete_preference(&self, id: &str) -> Result<PreferenceResponse> {
        let path = format!("{}/{}", PREFERENCES, id);
        self.execute(&RequestDescriptor::delete(path)).await
    }

    // ========================================================================
    // Blocks and the grabbing agent
    // ========================================================================

    /// List currently offered blocks.
    pub async fn available_blocks(&self) -> Result<BlocksResponse> {
        self.execute(&RequestDescriptor::get(AVAILABLE_BLOCKS)).await
    }

    /// Accept a single offered block.
    #[instrument(skip(self))]
    pub async fn accept_block(&self, id: &str) -> Result<GrabberResponse> {
        let path = format!("/blocks/accept/{}", id);
        self.execute(&RequestDescriptor::post_empty(path)).await
    }

    /// Start the server-side grabbing agent.
    pub async fn start_grabber(&self) -> Result<GrabberResponse> {
        self.execute(&RequestDescriptor::post_empty(START_GRABBER))
            .await
    }

    /// Stop the server-side grabbing agent.
    pub async fn stop_grabber(&self) -> Result<GrabberResponse> {
        self.execute(&RequestDescriptor::post_empty(STOP_GRABBER))
            .await
    }

    /// List known warehouse locations.
    pub async fn locations(&self) -> Result<LocationsResponse> {
        self.execute(&RequestDescriptor::get(LOCATIONS)).await
    }
}

/// Classify a reqwest failure into the transport taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: REQUEST_TIMEOUT.as_millis() as u64,
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_mutators_take_effect_immediately() {
        let client = ApiClient::new(ApiBaseUrl::default());
        assert_eq!(client.current_token(), None);

        client.set_token("T1");
        assert_eq!(client.current_token().as_deref(), Some("T1"));

        client.set_token("T2");
        assert_eq!(client.current_token().as_deref(), Some("T2"));

        client.clear_token();
        assert_eq!(client.current_token(), None);
    }

    #[test]
    fn clones_share_the_token() {
        let client = ApiClient::new(ApiBaseUrl::default());
        let clone = client.clone();
        client.set_token("T1");
        assert_eq!(clone.current_token().as_deref(), Some("T1"));
    }
}
