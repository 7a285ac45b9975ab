//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::ser::Serializer;

use crate::loader::Cancellable;

/// A fetch handle that records whether it was cancelled.
#[derive(Clone)]
pub struct ProbeHandle {
    cancelled: Arc<AtomicBool>,
}

impl ProbeHandle {
    pub fn new() -> Self {
        ProbeHandle {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Cancellable for ProbeHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// A body whose serialization always fails, for exercising the encoding
/// error path.
pub struct FailingBody;

impl Serialize for FailingBody {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("this body never serializes"))
    }
}
