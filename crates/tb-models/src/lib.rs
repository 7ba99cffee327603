//! # tb-models
//!
//! Domain models for Taskboard RS.
//!
//! This crate contains the entity structs held by the store, the input types
//! accepted by create operations, and the patch types accepted by updates.
//! Each entity implements the core traits from `tb-core`.

pub use tb_core::traits::{Entity, Id, Identifiable};

pub mod user;
pub mod team;
pub mod project;
pub mod task;
pub mod task_link;
pub mod stats;

pub use user::{NewUser, User, UserPatch, UserRole};
pub use team::Team;
pub use project::{NewProject, Project, ProjectPatch};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use task_link::{LinkedTask, TaskLink};
pub use stats::{MemberPerformance, Stats, StatsSummary, TasksDistribution, TeamEfficiency, TeamPerformance};

/// Error returned when parsing an enum from its wire name fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} {:?}, expected one of: {}",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}
