//! Transport client: executes a request descriptor, decodes a typed JSON
//! payload, and delivers the result exactly once on a caller-chosen
//! execution context.
//!
//! Every failure maps to exactly one [`NetworkError`] kind and travels the
//! same completion channel as success; the client never panics a caller.
//! `send` returns a [`CancelHandle`]; cancelling before delivery is claimed
//! suppresses the completion entirely.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use tokio::task::AbortHandle;
use uuid::Uuid;

use super::context::ExecutionContext;
use super::error::NetworkError;
use super::request::Request;

/// Matches the fetch timeout the catalog app used for in-cell loads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Delivery state machine. A completion is delivered only by the task that
/// wins the Pending -> Delivered claim; `cancel` wins by claiming
/// Pending -> Cancelled first.
const PENDING: u8 = 0;
const DELIVERED: u8 = 1;
const CANCELLED: u8 = 2;

/// Handle to one in-flight `send` call.
///
/// `cancel` suppresses the completion if it has not yet been claimed;
/// after delivery starts it has no effect. Dropping the handle does NOT
/// cancel, so fire-and-forget callers may simply discard it.
pub struct CancelHandle {
    state: Arc<AtomicU8>,
    abort: AbortHandle,
}

impl CancelHandle {
    pub fn cancel(&self) {
        if self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            // The claim is what guarantees suppression; aborting just stops
            // wasted network work early.
            self.abort.abort();
        }
    }
}

/// HTTP transport client. Cheap to clone via the inner reqwest client;
/// knows nothing about domain payload shapes.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Builds a client with the given request timeout. A timed-out call
    /// surfaces as `NetworkError::Transport`; there is no automatic retry.
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Configuration(format!("HTTP client build failed: {e}")))?;
        Ok(HttpClient { inner })
    }

    /// Executes `request` asynchronously and decodes the response body as `T`.
    ///
    /// Non-blocking: one tokio task per call. `on_complete` runs exactly once
    /// via `deliver_on`, with either the decoded payload or one
    /// [`NetworkError`]. If the returned handle is cancelled first, it never
    /// runs at all.
    pub fn send<T, F>(
        &self,
        request: Request,
        deliver_on: Arc<dyn ExecutionContext>,
        on_complete: F,
    ) -> CancelHandle
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, NetworkError>) + Send + 'static,
    {
        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] {} {}",
            request.method.as_str(),
            request
                .endpoint
                .as_ref()
                .map(|u| u.as_str())
                .unwrap_or("<invalid endpoint>"),
        );

        let state = Arc::new(AtomicU8::new(PENDING));
        let task_state = state.clone();
        let client = self.inner.clone();

        let task = tokio::spawn(async move {
            let result = perform::<T>(&client, request, request_id).await;
            if let Err(ref e) = result {
                warn!("[{request_id}] failed: {e}");
            }
            // Claim delivery; losing the claim means cancel() got there first.
            if task_state
                .compare_exchange(PENDING, DELIVERED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                deliver_on.run(Box::new(move || on_complete(result)));
            } else {
                debug!("[{request_id}] completion suppressed by cancellation");
            }
        });

        CancelHandle {
            state,
            abort: task.abort_handle(),
        }
    }
}

/// One call, start to finish: validate, encode, issue, status-check, decode.
async fn perform<T: DeserializeOwned>(
    client: &reqwest::Client,
    request: Request,
    request_id: Uuid,
) -> Result<T, NetworkError> {
    let url = request
        .endpoint
        .ok_or_else(|| NetworkError::Configuration("request has no valid endpoint".to_string()))?;

    let mut builder = client.request(request.method.into(), url);
    if let Some(payload) = &request.payload {
        if request.method.allows_body() {
            let bytes = payload
                .encode()
                .map_err(|e| NetworkError::Encoding(format!("body serialization failed: {e}")))?;
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        } else {
            debug!(
                "[{request_id}] payload ignored for bodyless method {}",
                request.method.as_str()
            );
        }
    }

    // The only suspension point: the network round trip.
    let response = builder
        .send()
        .await
        .map_err(|e| NetworkError::Transport(e.to_string()))?;

    let status = response.status();
    debug!("[{request_id}] response status: {status}");

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(NetworkError::Http {
            status: status.as_u16(),
            message: snippet(&body, 200),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| NetworkError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| NetworkError::Decoding(e.to_string()))
}

/// Bounds an error body for log/diagnostic use.
fn snippet(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(limit).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_bounds_long_bodies() {
        let long = "x".repeat(500);
        let s = snippet(&long, 200);
        assert_eq!(s.chars().count(), 201);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn test_snippet_keeps_short_bodies() {
        assert_eq!(snippet("not found", 200), "not found");
    }

    #[tokio::test]
    async fn test_cancel_claims_before_delivery() {
        let task = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        });
        let handle = CancelHandle {
            state: Arc::new(AtomicU8::new(PENDING)),
            abort: task.abort_handle(),
        };
        handle.cancel();
        assert_eq!(handle.state.load(Ordering::Acquire), CANCELLED);
        // Cancelling twice is harmless.
        handle.cancel();
        assert_eq!(handle.state.load(Ordering::Acquire), CANCELLED);
    }

    #[tokio::test]
    async fn test_cancel_after_delivery_claim_is_noop() {
        let task = tokio::spawn(async {});
        let handle = CancelHandle {
            state: Arc::new(AtomicU8::new(DELIVERED)),
            abort: task.abort_handle(),
        };
        handle.cancel();
        assert_eq!(handle.state.load(Ordering::Acquire), DELIVERED);
    }
}
