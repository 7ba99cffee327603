//! # tb-contracts
//!
//! Validation contracts for Taskboard RS.
//!
//! Contracts check a fully merged entity before it is committed to the
//! store. Every mock API mutation runs its entity through the matching
//! contract; a failing contract leaves the store untouched.

pub mod base;
pub mod schema;
pub mod users;
pub mod projects;
pub mod tasks;
pub mod task_links;

pub use base::*;
pub use projects::ProjectContract;
pub use task_links::TaskLinkContract;
pub use tasks::TaskContract;
pub use users::UserContract;
