//! Request descriptors: one value per logical HTTP call.
//!
//! A descriptor carries the endpoint, the method, and (optionally) a JSON
//! payload. It is a plain value with no behavior of its own; the transport
//! client in [`crate::net::client`] interprets it.

use reqwest::Url;
use serde::Serialize;

/// HTTP methods the catalog API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Only these methods carry a request body; a payload attached to any
    /// other method is ignored at send time.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A request body captured at construction and serialized at send time.
///
/// Serialization is deferred so that a failing `Serialize` impl surfaces
/// through the completion channel as an encoding error instead of forcing a
/// fallible constructor on every descriptor.
pub struct JsonPayload {
    encoder: Box<dyn Fn() -> Result<Vec<u8>, serde_json::Error> + Send + Sync>,
}

impl JsonPayload {
    pub fn new<B: Serialize + Send + Sync + 'static>(body: B) -> Self {
        JsonPayload {
            encoder: Box::new(move || serde_json::to_vec(&body)),
        }
    }

    /// Serializes the captured body to JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        (self.encoder)()
    }
}

impl std::fmt::Debug for JsonPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JsonPayload")
    }
}

/// Describes one logical HTTP call. Immutable once constructed.
///
/// The endpoint is `None` when URL composition failed; the transport client
/// reports that as a configuration error rather than dropping the call.
#[derive(Debug)]
pub struct Request {
    pub endpoint: Option<Url>,
    pub method: HttpMethod,
    pub payload: Option<JsonPayload>,
}

impl Request {
    pub fn new(method: HttpMethod, url: impl AsRef<str>) -> Self {
        Request {
            endpoint: Url::parse(url.as_ref()).ok(),
            method,
            payload: None,
        }
    }

    pub fn get(url: impl AsRef<str>) -> Self {
        Request::new(HttpMethod::Get, url)
    }

    /// Attaches a JSON body. The value is serialized when the request is sent.
    pub fn with_json<B: Serialize + Send + Sync + 'static>(mut self, body: B) -> Self {
        self.payload = Some(JsonPayload::new(body));
        self
    }
}
