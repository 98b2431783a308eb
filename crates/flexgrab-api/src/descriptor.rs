//! Per-call request descriptors.

use serde::Serialize;

/// HTTP methods accepted by the block-grabbing API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Description of a single request: relative path, method, and an
/// optional JSON body. Constructed per call and not retained.
#[derive(Debug)]
pub struct RequestDescriptor<B: Serialize = ()> {
    pub path: String,
    pub method: HttpMethod,
    pub body: Option<B>,
}

impl RequestDescriptor<()> {
    /// A GET request with no body.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            body: None,
        }
    }

    /// A POST request with no body.
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            body: None,
        }
    }

    /// A DELETE request with no body.
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Delete,
            body: None,
        }
    }
}

impl<B: Serialize> RequestDescriptor<B> {
    /// A POST request carrying a JSON body.
    pub fn post(path: impl Into<String>, body: B) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            body: Some(body),
        }
    }

    /// A PATCH request carrying a JSON body.
    pub fn patch(path: impl Into<String>, body: B) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Patch,
            body: Some(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_strings() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }

    #[test]
    fn constructors_set_method_and_body() {
        let get = RequestDescriptor::get("/blocks/available");
        assert_eq!(get.method, HttpMethod::Get);
        assert!(get.body.is_none());

        let post = RequestDescriptor::post("/auth/login", serde_json::json!({"a": 1}));
        assert_eq!(post.method, HttpMethod::Post);
        assert!(post.body.is_some());
    }
}
