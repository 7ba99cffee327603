//! Task link operations
//!
//! Links are stored in the direction they were created. Reads are
//! normalized so the queried task is always the source.

use chrono::Utc;
use tb_contracts::TaskLinkContract;
use tb_core::result::{OrNotFound, TbResult};
use tb_core::traits::Id;
use tb_models::{LinkedTask, TaskLink};
use tb_store::Store;
use tracing::{debug, info, warn};

pub struct TaskLinkService<'a> {
    store: &'a Store,
    contract: TaskLinkContract,
}

impl<'a> TaskLinkService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            contract: TaskLinkContract::new(),
        }
    }

    /// Links touching `task_id`, each oriented with `task_id` as source
    pub fn list_for_task(&self, task_id: Id) -> Vec<TaskLink> {
        debug!(task_id, "Loading task links");
        self.store.read(|c| {
            c.task_links
                .iter()
                .filter(|link| link.involves(task_id))
                .map(|link| link.oriented_from(task_id))
                .collect()
        })
    }

    /// Links of `task_id` resolved to the task on the other end. Links whose
    /// other task no longer exists are skipped.
    pub fn linked_tasks(&self, task_id: Id) -> Vec<LinkedTask> {
        self.store.read(|c| {
            c.task_links
                .iter()
                .filter(|link| link.involves(task_id))
                .map(|link| link.oriented_from(task_id))
                .filter_map(|link| {
                    c.tasks.find(link.linked_task_id).cloned().map(|task| LinkedTask { link, task })
                })
                .collect()
        })
    }

    pub fn create(&self, source_task_id: Id, linked_task_id: Id) -> TbResult<TaskLink> {
        let created_at = Utc::now();
        self.store.write(|c| {
            if let Err(violation) =
                self.contract
                    .validate_new(source_task_id, linked_task_id, c.task_links.iter())
            {
                warn!(source_task_id, linked_task_id, %violation, "Rejected task link");
                return Err(violation.into());
            }

            let link = TaskLink {
                id: c.sequences.task_links.next_id(),
                source_task_id,
                linked_task_id,
                created_at,
            };
            c.task_links.insert(link.clone());
            info!(link_id = link.id, source_task_id, linked_task_id, "Task link created");
            Ok(link)
        })
    }

    /// Removing a link removes it from both tasks' view
    pub fn delete(&self, link_id: Id) -> TbResult<()> {
        self.store
            .write(|c| c.task_links.remove(link_id))
            .or_not_found::<TaskLink>(link_id)?;
        info!(link_id, "Task link deleted");
        Ok(())
    }
}
