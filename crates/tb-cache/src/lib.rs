//! # tb-cache
//!
//! Client-side cache over the task board API.
//!
//! [`QueryCache`] keeps one entry per key with deduplicated fetches,
//! staleness tracking and optimistic writes that roll back on failure.
//! [`QueryClient`] holds a cache per collection and wires every API
//! mutation to the keys it invalidates.

pub mod query_cache;
pub mod client;
pub mod events;

pub use client::{QueryClient, TaskListKey};
pub use events::ClientEvent;
pub use query_cache::QueryCache;
