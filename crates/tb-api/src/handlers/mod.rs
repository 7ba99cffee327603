//! API handlers

pub mod teams;
pub mod users;
pub mod tasks;
pub mod task_links;
pub mod projects;
pub mod stats;
