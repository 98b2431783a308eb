//! Wire request and response types.
//!
//! Every response body from the service is a `{success, message?, ...}`
//! envelope. `success = false` is a *remote rejection*, not a transport
//! error; [`require_success`] converts it at the call site.

use serde::{Deserialize, Serialize};

use flexgrab_core::{Block, BlockPreference, Error, UserRecord};

/// Request body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for `POST /auth/amazon-credentials`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonCredentialsRequest<'a> {
    pub amazon_email: &'a str,
    pub amazon_password: &'a str,
}

/// Response from the authentication endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: Option<UserRecord>,
    pub token: Option<String>,
    pub message: Option<String>,
}

/// Response from the preference endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferenceResponse {
    pub success: bool,
    pub preferences: Option<Vec<BlockPreference>>,
    pub message: Option<String>,
}

/// Response from `GET /blocks/available`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlocksResponse {
    pub success: bool,
    pub blocks: Option<Vec<Block>>,
    pub message: Option<String>,
}

/// Response from the grabber control and block-accept endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GrabberResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Response from `GET /blocks/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    pub success: bool,
    pub locations: Option<Vec<String>>,
    pub message: Option<String>,
}

/// Common view over the `{success, message?}` envelope.
pub trait Envelope {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(impl Envelope for $ty {
            fn success(&self) -> bool {
                self.success
            }

            fn message(&self) -> Option<&str> {
                self.message.as_deref()
            }
        })+
    };
}

impl_envelope!(
    LoginResponse,
    PreferenceResponse,
    BlocksResponse,
    GrabberResponse,
    LocationsResponse,
);

/// Fallback message when the server rejects without one.
const REJECTED_WITHOUT_MESSAGE: &str = "request rejected by server";

/// Convert a `success = false` envelope into [`Error::Rejected`].
///
/// The request client itself never performs this conversion; callers
/// decide whether a rejection is an error or ordinary view state.
pub fn require_success<T: Envelope>(response: T) -> Result<T, Error> {
    if response.success() {
        Ok(response)
    } else {
        let message = response
            .message()
            .unwrap_or(REJECTED_WITHOUT_MESSAGE)
            .to_string();
        Err(Error::Rejected { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_success_passes_successful_envelopes() {
        let resp = GrabberResponse {
            success: true,
            message: None,
        };
        assert!(require_success(resp).is_ok());
    }

    #[test]
    fn require_success_surfaces_server_message() {
        let resp = GrabberResponse {
            success: false,
            message: Some("grabber already running".to_string()),
        };
        let err = require_success(resp).unwrap_err();
        assert_eq!(err.to_string(), "grabber already running");
    }

    #[test]
    fn require_success_has_fallback_message() {
        let resp = GrabberResponse {
            success: false,
            message: None,
        };
        let err = require_success(resp).unwrap_err();
        assert_eq!(err.to_string(), REJECTED_WITHOUT_MESSAGE);
    }

    #[test]
    fn amazon_credentials_request_is_camel_case() {
        let req = AmazonCredentialsRequest {
            amazon_email: "flex@x.com",
            amazon_password: "p",
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["amazonEmail"], "flex@x.com");
        assert_eq!(value["amazonPassword"], "p");
    }

    #[test]
    fn login_response_tolerates_missing_payload() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"success": false, "message": "bad credentials"}"#,
        )
        .unwrap();
        assert!(!resp.success);
        assert!(resp.user.is_none());
        assert_eq!(resp.message.as_deref(), Some("bad credentials"));
    }
}
