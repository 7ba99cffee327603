//! Task operations

use chrono::Utc;
use tb_contracts::{Contract, TaskContract};
use tb_core::result::{OrNotFound, TbResult};
use tb_core::traits::Id;
use tb_models::{NewTask, Task, TaskPatch};
use tb_store::Store;
use tracing::{debug, info, warn};

pub struct TaskService<'a> {
    store: &'a Store,
    contract: TaskContract,
}

impl<'a> TaskService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            contract: TaskContract::new(),
        }
    }

    /// All tasks, or only those of `team_id`
    pub fn list(&self, team_id: Option<Id>) -> Vec<Task> {
        match team_id {
            Some(team_id) => self.store.read(|c| c.tasks.filter(|t| t.team_id == Some(team_id))),
            None => self.store.read(|c| c.tasks.all()),
        }
    }

    pub fn list_by_project(&self, project_id: Id) -> Vec<Task> {
        self.store
            .read(|c| c.tasks.filter(|t| t.project_id == Some(project_id)))
    }

    pub fn find(&self, id: Id) -> TbResult<Task> {
        debug!(task_id = id, "Loading task");
        self.store.read(|c| c.tasks.find(id).cloned()).or_not_found::<Task>(id)
    }

    pub fn create(&self, input: NewTask) -> TbResult<Task> {
        let mut candidate = input.into_task(0, Utc::now());
        if let Err(errors) = self.contract.validate(&candidate) {
            warn!(errors = %errors, "Rejected new task");
            return Err(errors.into());
        }

        let task = self.store.write(|c| {
            candidate.id = c.sequences.tasks.next_id();
            c.tasks.insert(candidate.clone());
            candidate
        });
        info!(
            task_id = task.id,
            team_id = ?task.team_id,
            project_id = ?task.project_id,
            status = %task.status,
            "Task created"
        );
        Ok(task)
    }

    /// Merge `patch` into the task. A status change stamps `started_at` or
    /// `completed_at` if they are still unset.
    pub fn update(&self, id: Id, patch: TaskPatch) -> TbResult<Task> {
        let now = Utc::now();
        self.store.write(|c| {
            let current = c.tasks.find(id).or_not_found::<Task>(id)?;
            let previous_status = current.status;
            let merged = patch.apply_to(current, now);
            if let Err(errors) = self.contract.validate(&merged) {
                warn!(task_id = id, errors = %errors, "Rejected task update");
                return Err(errors.into());
            }
            c.tasks.replace(merged.clone());
            if merged.status != previous_status {
                info!(task_id = id, from = %previous_status, to = %merged.status, "Task moved");
            } else {
                info!(task_id = id, "Task updated");
            }
            Ok(merged)
        })
    }

    /// Remove the task. Links that point at it are kept.
    pub fn delete(&self, id: Id) -> TbResult<()> {
        self.store
            .write(|c| c.tasks.remove(id))
            .or_not_found::<Task>(id)?;
        info!(task_id = id, "Task deleted");
        Ok(())
    }
}
