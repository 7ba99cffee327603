//! Project operations

use chrono::Utc;
use tb_contracts::{Contract, ProjectContract};
use tb_core::result::{OrNotFound, TbResult};
use tb_core::traits::Id;
use tb_models::{NewProject, Project, ProjectPatch};
use tb_store::Store;
use tracing::{debug, info, warn};

pub struct ProjectService<'a> {
    store: &'a Store,
    contract: ProjectContract,
}

impl<'a> ProjectService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            contract: ProjectContract::new(),
        }
    }

    pub fn list(&self) -> Vec<Project> {
        self.store.read(|c| c.projects.all())
    }

    pub fn find(&self, id: Id) -> TbResult<Project> {
        debug!(project_id = id, "Loading project");
        self.store
            .read(|c| c.projects.find(id).cloned())
            .or_not_found::<Project>(id)
    }

    /// New projects are active and stamped with the call time
    pub fn create(&self, input: NewProject) -> TbResult<Project> {
        let mut candidate = input.into_project(0, Utc::now());
        if let Err(errors) = self.contract.validate(&candidate) {
            warn!(errors = %errors, "Rejected new project");
            return Err(errors.into());
        }

        let project = self.store.write(|c| {
            candidate.id = c.sequences.projects.next_id();
            c.projects.insert(candidate.clone());
            candidate
        });
        info!(project_id = project.id, team_id = ?project.team_id, "Project created");
        Ok(project)
    }

    pub fn update(&self, id: Id, patch: ProjectPatch) -> TbResult<Project> {
        self.store.write(|c| {
            let current = c.projects.find(id).or_not_found::<Project>(id)?;
            let merged = patch.apply_to(current);
            if let Err(errors) = self.contract.validate(&merged) {
                warn!(project_id = id, errors = %errors, "Rejected project update");
                return Err(errors.into());
            }
            c.projects.replace(merged.clone());
            info!(project_id = id, "Project updated");
            Ok(merged)
        })
    }

    /// Hard delete. Tasks of the project are left in place.
    pub fn delete(&self, id: Id) -> TbResult<()> {
        self.store
            .write(|c| c.projects.remove(id))
            .or_not_found::<Project>(id)?;
        info!(project_id = id, "Project deleted");
        Ok(())
    }
}
