//! Async mock API
//!
//! [`TaskBoardApi`] is the boundary the client cache and the HTTP layer
//! talk to. [`MockApi`] implements it over an in-memory [`Store`], waiting
//! out the configured [`Latency`] before touching the store. The store lock
//! is only taken after the wait, so a read issued while a write is still
//! waiting sees the state from before that write.

use async_trait::async_trait;
use std::sync::Arc;
use tb_core::result::TbResult;
use tb_core::traits::Id;
use tb_models::{
    LinkedTask, NewProject, NewTask, NewUser, Project, ProjectPatch, Stats, StatsSummary, Task,
    TaskLink, TaskPatch, Team, User, UserPatch,
};
use tb_store::Store;

use crate::latency::Latency;
use crate::projects::ProjectService;
use crate::stats::StatsService;
use crate::task_links::TaskLinkService;
use crate::tasks::TaskService;
use crate::teams::TeamService;
use crate::users::UserService;

#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait TaskBoardApi: Send + Sync {
    async fn fetch_teams(&self) -> TbResult<Vec<Team>>;
    async fn fetch_team_by_slug(&self, slug: String) -> TbResult<Team>;

    async fn fetch_users(&self) -> TbResult<Vec<User>>;
    async fn fetch_user(&self, id: Id) -> TbResult<User>;
    async fn create_user(&self, input: NewUser) -> TbResult<User>;
    async fn update_user(&self, id: Id, patch: UserPatch) -> TbResult<User>;
    async fn delete_user(&self, id: Id) -> TbResult<()>;

    /// All tasks, or only those whose `team_id` equals `team_id`
    async fn fetch_tasks(&self, team_id: Option<Id>) -> TbResult<Vec<Task>>;
    async fn fetch_tasks_by_project(&self, project_id: Id) -> TbResult<Vec<Task>>;
    async fn fetch_task(&self, id: Id) -> TbResult<Task>;
    async fn create_task(&self, input: NewTask) -> TbResult<Task>;
    async fn update_task(&self, id: Id, patch: TaskPatch) -> TbResult<Task>;
    async fn delete_task(&self, id: Id) -> TbResult<()>;

    async fn fetch_projects(&self) -> TbResult<Vec<Project>>;
    async fn fetch_project(&self, id: Id) -> TbResult<Project>;
    async fn create_project(&self, input: NewProject) -> TbResult<Project>;
    async fn update_project(&self, id: Id, patch: ProjectPatch) -> TbResult<Project>;
    async fn delete_project(&self, id: Id) -> TbResult<()>;

    async fn fetch_task_links(&self, task_id: Id) -> TbResult<Vec<TaskLink>>;
    async fn fetch_linked_tasks(&self, task_id: Id) -> TbResult<Vec<LinkedTask>>;
    async fn create_task_link(&self, source_task_id: Id, linked_task_id: Id) -> TbResult<TaskLink>;
    async fn delete_task_link(&self, link_id: Id) -> TbResult<()>;

    async fn fetch_stats(&self) -> TbResult<Stats>;
    async fn fetch_stats_summary(&self) -> TbResult<StatsSummary>;
}

/// In-memory backend with simulated latency
#[derive(Debug, Clone)]
pub struct MockApi {
    store: Arc<Store>,
    latency: Latency,
}

impl MockApi {
    pub fn new(store: Arc<Store>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// Zero-latency API over `store`
    pub fn immediate(store: Store) -> Self {
        Self::new(Arc::new(store), Latency::none())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }
}

#[async_trait]
impl TaskBoardApi for MockApi {
    async fn fetch_teams(&self) -> TbResult<Vec<Team>> {
        self.latency.wait().await;
        Ok(TeamService::new(&self.store).list())
    }

    async fn fetch_team_by_slug(&self, slug: String) -> TbResult<Team> {
        self.latency.wait().await;
        TeamService::new(&self.store).find_by_slug(&slug)
    }

    async fn fetch_users(&self) -> TbResult<Vec<User>> {
        self.latency.wait().await;
        Ok(UserService::new(&self.store).list())
    }

    async fn fetch_user(&self, id: Id) -> TbResult<User> {
        self.latency.wait().await;
        UserService::new(&self.store).find(id)
    }

    async fn create_user(&self, input: NewUser) -> TbResult<User> {
        self.latency.wait().await;
        UserService::new(&self.store).create(input)
    }

    async fn update_user(&self, id: Id, patch: UserPatch) -> TbResult<User> {
        self.latency.wait().await;
        UserService::new(&self.store).update(id, patch)
    }

    async fn delete_user(&self, id: Id) -> TbResult<()> {
        self.latency.wait().await;
        UserService::new(&self.store).delete(id)
    }

    async fn fetch_tasks(&self, team_id: Option<Id>) -> TbResult<Vec<Task>> {
        self.latency.wait().await;
        Ok(TaskService::new(&self.store).list(team_id))
    }

    async fn fetch_tasks_by_project(&self, project_id: Id) -> TbResult<Vec<Task>> {
        self.latency.wait().await;
        Ok(TaskService::new(&self.store).list_by_project(project_id))
    }

    async fn fetch_task(&self, id: Id) -> TbResult<Task> {
        self.latency.wait().await;
        TaskService::new(&self.store).find(id)
    }

    async fn create_task(&self, input: NewTask) -> TbResult<Task> {
        self.latency.wait().await;
        TaskService::new(&self.store).create(input)
    }

    async fn update_task(&self, id: Id, patch: TaskPatch) -> TbResult<Task> {
        self.latency.wait().await;
        TaskService::new(&self.store).update(id, patch)
    }

    async fn delete_task(&self, id: Id) -> TbResult<()> {
        self.latency.wait().await;
        TaskService::new(&self.store).delete(id)
    }

    async fn fetch_projects(&self) -> TbResult<Vec<Project>> {
        self.latency.wait().await;
        Ok(ProjectService::new(&self.store).list())
    }

    async fn fetch_project(&self, id: Id) -> TbResult<Project> {
        self.latency.wait().await;
        ProjectService::new(&self.store).find(id)
    }

    async fn create_project(&self, input: NewProject) -> TbResult<Project> {
        self.latency.wait().await;
        ProjectService::new(&self.store).create(input)
    }

    async fn update_project(&self, id: Id, patch: ProjectPatch) -> TbResult<Project> {
        self.latency.wait().await;
        ProjectService::new(&self.store).update(id, patch)
    }

    async fn delete_project(&self, id: Id) -> TbResult<()> {
        self.latency.wait().await;
        ProjectService::new(&self.store).delete(id)
    }

    async fn fetch_task_links(&self, task_id: Id) -> TbResult<Vec<TaskLink>> {
        self.latency.wait().await;
        Ok(TaskLinkService::new(&self.store).list_for_task(task_id))
    }

    async fn fetch_linked_tasks(&self, task_id: Id) -> TbResult<Vec<LinkedTask>> {
        self.latency.wait().await;
        Ok(TaskLinkService::new(&self.store).linked_tasks(task_id))
    }

    async fn create_task_link(&self, source_task_id: Id, linked_task_id: Id) -> TbResult<TaskLink> {
        self.latency.wait().await;
        TaskLinkService::new(&self.store).create(source_task_id, linked_task_id)
    }

    async fn delete_task_link(&self, link_id: Id) -> TbResult<()> {
        self.latency.wait().await;
        TaskLinkService::new(&self.store).delete(link_id)
    }

    async fn fetch_stats(&self) -> TbResult<Stats> {
        self.latency.wait().await;
        Ok(StatsService::new(&self.store).compute())
    }

    async fn fetch_stats_summary(&self) -> TbResult<StatsSummary> {
        self.latency.wait().await;
        Ok(StatsService::new(&self.store).summary())
    }
}
