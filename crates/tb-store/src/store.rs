//! Store

use parking_lot::RwLock;
use tb_core::config::MockConfig;
use tb_core::result::TbResult;
use tb_models::{Project, Task, TaskLink, Team, User};
use tracing::debug;

use crate::fixtures;
use crate::sequence::Sequences;
use crate::table::Table;

/// The authoritative collections and their sequences
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub teams: Table<Team>,
    pub users: Table<User>,
    pub projects: Table<Project>,
    pub tasks: Table<Task>,
    pub task_links: Table<TaskLink>,
    pub sequences: Sequences,
}

/// Shared handle over [`Collections`].
///
/// Access goes through [`Store::read`] and [`Store::write`]. The closure runs
/// under the lock and must not await; a mutation either runs to completion
/// inside one `write` call or does not happen, so readers never see a
/// half-applied change.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<Collections>,
}

impl Store {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store loaded with the seed fixtures
    pub fn seeded() -> TbResult<Self> {
        let collections = fixtures::load()?;
        debug!(
            teams = collections.teams.len(),
            users = collections.users.len(),
            projects = collections.projects.len(),
            tasks = collections.tasks.len(),
            task_links = collections.task_links.len(),
            "Loaded seed fixtures"
        );
        Ok(Self::from_collections(collections))
    }

    pub fn from_config(config: &MockConfig) -> TbResult<Self> {
        if config.seed_fixtures {
            Self::seeded()
        } else {
            Ok(Self::empty())
        }
    }

    pub fn from_collections(collections: Collections) -> Self {
        Self {
            inner: RwLock::new(collections),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Collections {
        self.inner.read().clone()
    }
}
