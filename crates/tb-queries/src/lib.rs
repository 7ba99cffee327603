//! # tb-queries
//!
//! Filtering and grouping used by the task board and user screens.
//!
//! Filters are plain values that can be built in code or decoded from a
//! query string. Every criterion is optional; set criteria combine with AND.

pub mod filters;
pub mod board;

pub use board::{Board, Column};
pub use filters::{AssigneeFilter, TaskFilter, UserFilter};
