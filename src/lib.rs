//! Vitrine: the typed network core of a catalog-browsing client.
//!
//! Request descriptors, a cancellable exactly-once transport client, a
//! closed error taxonomy, catalog domain services, and the staleness-guarded
//! slot loader recyclable cells use for image fetches.

pub mod catalog;
pub mod config;
pub mod loader;
pub mod net;

#[cfg(test)]
pub mod test_support;
