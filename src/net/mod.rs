pub mod client;
pub mod context;
pub mod error;
pub mod request;

pub use client::{CancelHandle, DEFAULT_TIMEOUT, HttpClient};
pub use context::{ExecutionContext, InlineContext, Job, QueueContext};
pub use error::NetworkError;
pub use request::{HttpMethod, JsonPayload, Request};
