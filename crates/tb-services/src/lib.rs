//! # tb-services
//!
//! Mock API for Taskboard RS.
//!
//! The synchronous services in this crate implement every operation against
//! a [`tb_store::Store`]. [`MockApi`] wraps them behind the async
//! [`TaskBoardApi`] trait and waits out a configurable [`Latency`] before
//! each call, standing in for a remote backend.

pub mod latency;
pub mod teams;
pub mod users;
pub mod projects;
pub mod tasks;
pub mod task_links;
pub mod stats;
pub mod api;

pub use api::{MockApi, TaskBoardApi};
#[cfg(feature = "mock")]
pub use api::MockTaskBoardApi;
pub use latency::Latency;
pub use projects::ProjectService;
pub use stats::StatsService;
pub use task_links::TaskLinkService;
pub use tasks::TaskService;
pub use teams::TeamService;
pub use users::UserService;
