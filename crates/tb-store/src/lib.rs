//! # tb-store
//!
//! In-memory store for Taskboard RS.
//!
//! The store owns five ordered collections and their id sequences. It is
//! created explicitly and handed to the services that use it, so every
//! test can work against its own isolated instance.

pub mod table;
pub mod sequence;
pub mod fixtures;
pub mod store;

pub use sequence::{IdSequence, Sequences};
pub use store::{Collections, Store};
pub use table::Table;
