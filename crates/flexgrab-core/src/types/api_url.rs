//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// The default base address of the block-grabbing service.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// A validated base URL for the block-grabbing API.
///
/// All request paths are resolved against this address by plain
/// concatenation, so `/auth/login` against
/// `http://localhost:3000/api` yields
/// `http://localhost:3000/api/auth/login` (the `/api` prefix is kept,
/// unlike `Url::join` semantics for absolute paths).
///
/// # Example
///
/// ```
/// use flexgrab_core::ApiBaseUrl;
///
/// let base = ApiBaseUrl::new("http://localhost:3000/api").unwrap();
/// let url = base.endpoint_url("/auth/login").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:3000/api/auth/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL is not an absolute
    /// HTTP(S) URL with a host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|_| Error::InvalidEndpoint {
            path: s.to_string(),
        })?;

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(Error::InvalidEndpoint {
                path: s.to_string(),
            });
        }
        if url.host_str().is_none() {
            return Err(Error::InvalidEndpoint {
                path: s.to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Resolve a relative API path against this base address.
    ///
    /// Paths must begin with `/`. Resolution failures are reported
    /// before any network I/O as [`Error::InvalidEndpoint`].
    pub fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        if !path.starts_with('/') {
            return Err(Error::InvalidEndpoint {
                path: path.to_string(),
            });
        }

        let base = self.0.as_str().trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path)).map_err(|_| Error::InvalidEndpoint {
            path: path.to_string(),
        })
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl Default for ApiBaseUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiBaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiBaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiBaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiBaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
