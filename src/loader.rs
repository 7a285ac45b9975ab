//! Staleness-guarded loading for recyclable consumer slots.
//!
//! A reusable cell that fires a fetch can be recycled before the fetch
//! lands. [`SlotLoader`] guards against that: each request records an
//! identity token, and a completion only applies if its token still matches
//! the slot's current one. Superseding a pending request cancels it first,
//! so a result for an abandoned identity is suppressed by cancellation and,
//! should it race through anyway, by the token comparison.
//!
//! The loader is single-owner (`&mut self`) by construction; nothing here
//! locks. The owner drains completions on its own context and feeds them to
//! [`SlotLoader::on_complete`].

use log::{debug, warn};

use crate::net::{CancelHandle, NetworkError};

/// The seam between the loader and whatever issues fetches. The transport
/// client's [`CancelHandle`] is the production implementation; tests use
/// probe handles that record cancellation.
pub trait Cancellable {
    fn cancel(&self);
}

impl Cancellable for CancelHandle {
    fn cancel(&self) {
        CancelHandle::cancel(self);
    }
}

/// One recyclable consumer slot.
///
/// `I` is the identity token (an image URL, an item id, anything comparable
/// and cloneable), `V` the consumer-visible value; `None` is the placeholder
/// state.
pub struct SlotLoader<I, V, H = CancelHandle>
where
    I: PartialEq + Clone,
    H: Cancellable,
{
    token: Option<I>,
    pending: Option<H>,
    value: Option<V>,
}

impl<I, V, H> SlotLoader<I, V, H>
where
    I: PartialEq + Clone,
    H: Cancellable,
{
    pub fn new() -> Self {
        SlotLoader {
            token: None,
            pending: None,
            value: None,
        }
    }

    /// Requests a load for `identity`. `start` must issue the fetch and
    /// return its handle; completions come back through [`Self::on_complete`]
    /// carrying the same identity.
    ///
    /// Requesting an identity that is already pending is a no-op: no second
    /// fetch is issued. Requesting a different identity cancels the pending
    /// fetch first, so its result can never apply.
    pub fn request<F>(&mut self, identity: I, start: F)
    where
        F: FnOnce(I) -> H,
    {
        if self.pending.is_some() && self.token.as_ref() == Some(&identity) {
            debug!("load already pending for this identity; ignoring duplicate request");
            return;
        }
        if let Some(prior) = self.pending.take() {
            prior.cancel();
        }
        self.token = Some(identity.clone());
        self.pending = Some(start(identity));
    }

    /// Applies a completed fetch, unless the slot has moved on.
    ///
    /// A token that no longer matches means the slot was reset or re-targeted
    /// after this fetch was issued; the result is discarded without touching
    /// the visible value or the currently pending fetch.
    pub fn on_complete(&mut self, token: &I, result: Result<V, NetworkError>) {
        if self.token.as_ref() != Some(token) {
            debug!("discarding stale completion for a superseded identity");
            return;
        }
        self.pending = None;
        match result {
            Ok(value) => self.value = Some(value),
            Err(e) => {
                warn!("slot load failed, falling back to placeholder: {e}");
                self.value = None;
            }
        }
    }

    /// Prepares the slot for reuse: cancels any outstanding fetch, forgets
    /// the token, and clears the visible value back to the placeholder.
    /// Call this whenever the slot is about to represent a different item.
    pub fn reset(&mut self) {
        if let Some(prior) = self.pending.take() {
            prior.cancel();
        }
        self.token = None;
        self.value = None;
    }

    /// The consumer-visible value; `None` is the placeholder state.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<I, V, H> Default for SlotLoader<I, V, H>
where
    I: PartialEq + Clone,
    H: Cancellable,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ProbeHandle;

    fn transport_err() -> NetworkError {
        NetworkError::Transport("connection reset".to_string())
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut slot: SlotLoader<u32, &str, ProbeHandle> = SlotLoader::new();
        let first = ProbeHandle::new();
        let second = ProbeHandle::new();

        slot.request(1, |_| first.clone());
        slot.request(2, |_| second.clone());

        // Superseding cancelled the first fetch.
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        // The first fetch races in anyway; it must not apply.
        slot.on_complete(&1, Ok("stale"));
        assert_eq!(slot.value(), None);
        assert!(slot.is_pending());

        slot.on_complete(&2, Ok("fresh"));
        assert_eq!(slot.value(), Some(&"fresh"));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_same_identity_request_is_idempotent() {
        let mut slot: SlotLoader<u32, &str, ProbeHandle> = SlotLoader::new();
        let handle = ProbeHandle::new();
        let mut starts = 0;

        slot.request(1, |_| {
            starts += 1;
            handle.clone()
        });
        slot.request(1, |_| {
            starts += 1;
            handle.clone()
        });

        assert_eq!(starts, 1);
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn test_failure_applies_placeholder() {
        let mut slot: SlotLoader<u32, &str, ProbeHandle> = SlotLoader::new();
        slot.request(1, |_| ProbeHandle::new());
        slot.on_complete(&1, Ok("loaded"));
        assert_eq!(slot.value(), Some(&"loaded"));

        // A later fetch for a new identity fails: back to placeholder.
        slot.request(2, |_| ProbeHandle::new());
        slot.on_complete(&2, Err(transport_err()));
        assert_eq!(slot.value(), None);
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_reset_cancels_and_clears() {
        let mut slot: SlotLoader<u32, &str, ProbeHandle> = SlotLoader::new();
        let handle = ProbeHandle::new();
        slot.request(1, |_| handle.clone());
        slot.reset();

        assert!(handle.is_cancelled());
        assert_eq!(slot.value(), None);
        assert!(!slot.is_pending());

        // The old fetch completing after reset must not resurrect anything.
        slot.on_complete(&1, Ok("late"));
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn test_refetch_after_completion_issues_new_fetch() {
        let mut slot: SlotLoader<u32, &str, ProbeHandle> = SlotLoader::new();
        let mut starts = 0;

        slot.request(1, |_| {
            starts += 1;
            ProbeHandle::new()
        });
        slot.on_complete(&1, Ok("v1"));

        // Not pending anymore, so the same identity starts a fresh fetch.
        slot.request(1, |_| {
            starts += 1;
            ProbeHandle::new()
        });
        assert_eq!(starts, 2);
        assert!(slot.is_pending());
    }

    #[test]
    fn test_completion_without_request_is_ignored() {
        let mut slot: SlotLoader<u32, &str, ProbeHandle> = SlotLoader::new();
        slot.on_complete(&7, Ok("nobody asked"));
        assert_eq!(slot.value(), None);
    }
}
