//! Query client
//!
//! Mirrors what the screens need from the API: cached reads per
//! collection and mutations that invalidate the keys they affect. Every
//! mutation publishes a [`ClientEvent`] for the notification area.

use std::sync::Arc;
use tb_core::error::TbError;
use tb_core::result::TbResult;
use tb_core::traits::Id;
use tb_models::{
    NewProject, NewTask, NewUser, Project, ProjectPatch, Stats, Task, TaskLink, TaskPatch,
    TaskStatus, Team, User, UserPatch,
};
use tb_services::TaskBoardApi;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::events::ClientEvent;
use crate::query_cache::QueryCache;

const EVENT_CAPACITY: usize = 64;

/// Key of a cached task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskListKey {
    All,
    Team(Id),
    Project(Id),
}

impl TaskListKey {
    /// Key used by `fetch_tasks(team_id)`
    pub fn for_team(team_id: Option<Id>) -> Self {
        team_id.map_or(Self::All, Self::Team)
    }
}

pub struct QueryClient<A: TaskBoardApi + 'static> {
    api: Arc<A>,
    teams: QueryCache<(), Vec<Team>>,
    users: QueryCache<(), Vec<User>>,
    tasks: QueryCache<TaskListKey, Vec<Task>>,
    projects: QueryCache<(), Vec<Project>>,
    project: QueryCache<Id, Project>,
    task_links: QueryCache<Id, Vec<TaskLink>>,
    stats: QueryCache<(), Stats>,
    events: broadcast::Sender<ClientEvent>,
}

impl<A: TaskBoardApi + 'static> QueryClient<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            teams: QueryCache::new(),
            users: QueryCache::new(),
            tasks: QueryCache::new(),
            projects: QueryCache::new(),
            project: QueryCache::new(),
            task_links: QueryCache::new(),
            stats: QueryCache::new(),
            events,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Receiver for mutation notices
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Currently cached list for `key`, if any
    pub fn cached_tasks(&self, key: TaskListKey) -> Option<Vec<Task>> {
        self.tasks.data(&key)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn teams(&self) -> TbResult<Vec<Team>> {
        let api = Arc::clone(&self.api);
        self.teams.fetch((), move || async move { api.fetch_teams().await }).await
    }

    /// Resolve a team slug from the cached team list
    pub async fn team_by_slug(&self, slug: &str) -> TbResult<Team> {
        self.teams()
            .await?
            .into_iter()
            .find(|team| team.slug == slug)
            .ok_or_else(|| TbError::NotFound {
                entity: "Team",
                field: "slug",
                value: slug.to_string(),
            })
    }

    pub async fn users(&self) -> TbResult<Vec<User>> {
        let api = Arc::clone(&self.api);
        self.users.fetch((), move || async move { api.fetch_users().await }).await
    }

    pub async fn tasks(&self, team_id: Option<Id>) -> TbResult<Vec<Task>> {
        let api = Arc::clone(&self.api);
        self.tasks
            .fetch(TaskListKey::for_team(team_id), move || async move {
                api.fetch_tasks(team_id).await
            })
            .await
    }

    pub async fn project_tasks(&self, project_id: Id) -> TbResult<Vec<Task>> {
        let api = Arc::clone(&self.api);
        self.tasks
            .fetch(TaskListKey::Project(project_id), move || async move {
                api.fetch_tasks_by_project(project_id).await
            })
            .await
    }

    pub async fn projects(&self) -> TbResult<Vec<Project>> {
        let api = Arc::clone(&self.api);
        self.projects.fetch((), move || async move { api.fetch_projects().await }).await
    }

    pub async fn project(&self, id: Id) -> TbResult<Project> {
        let api = Arc::clone(&self.api);
        self.project.fetch(id, move || async move { api.fetch_project(id).await }).await
    }

    pub async fn task_links(&self, task_id: Id) -> TbResult<Vec<TaskLink>> {
        let api = Arc::clone(&self.api);
        self.task_links
            .fetch(task_id, move || async move { api.fetch_task_links(task_id).await })
            .await
    }

    pub async fn stats(&self) -> TbResult<Stats> {
        let api = Arc::clone(&self.api);
        self.stats.fetch((), move || async move { api.fetch_stats().await }).await
    }

    // ------------------------------------------------------------------
    // Task mutations
    // ------------------------------------------------------------------

    pub async fn create_task(&self, input: NewTask) -> TbResult<Task> {
        let result = self.api.create_task(input).await;
        if result.is_ok() {
            self.invalidate_task_views();
        }
        self.notify(&result, "Task created", "Failed to create task");
        result
    }

    /// Update a task, showing the change in the `key` list right away.
    ///
    /// The cached list under `key` is patched before the call. If the call
    /// fails the list is restored to how it was just before the patch.
    /// Requests already running for the other task lists are dropped, since
    /// they may have read the task before this update.
    pub async fn update_task(&self, key: TaskListKey, id: Id, patch: TaskPatch) -> TbResult<Task> {
        self.tasks.cancel_where(|other| *other != key);
        let preview = patch.clone();
        let result = self
            .tasks
            .mutate_optimistic(
                key,
                move |tasks| {
                    tasks
                        .iter()
                        .map(|task| if task.id == id { preview.preview(task) } else { task.clone() })
                        .collect()
                },
                self.api.update_task(id, patch),
            )
            .await;

        if let Ok(ref task) = result {
            info!(task_id = task.id, status = %task.status, "Task update confirmed");
            self.invalidate_task_views();
        }
        self.notify(&result, "Task updated", "Failed to update task");
        result
    }

    /// Move a task to another kanban column
    pub async fn move_task(&self, key: TaskListKey, id: Id, status: TaskStatus) -> TbResult<Task> {
        self.update_task(key, id, TaskPatch::status(status)).await
    }

    pub async fn delete_task(&self, id: Id) -> TbResult<()> {
        let result = self.api.delete_task(id).await;
        if result.is_ok() {
            self.invalidate_task_views();
            self.task_links.invalidate_all();
        }
        self.notify(&result, "Task deleted", "Failed to delete task");
        result
    }

    // ------------------------------------------------------------------
    // Task links
    // ------------------------------------------------------------------

    pub async fn create_task_link(&self, source_task_id: Id, linked_task_id: Id) -> TbResult<TaskLink> {
        let result = self.api.create_task_link(source_task_id, linked_task_id).await;
        if result.is_ok() {
            self.task_links
                .invalidate_where(|task_id| *task_id == source_task_id || *task_id == linked_task_id);
        }
        self.notify(&result, "Tasks linked", "Failed to link tasks");
        result
    }

    pub async fn delete_task_link(&self, link_id: Id) -> TbResult<()> {
        let result = self.api.delete_task_link(link_id).await;
        if result.is_ok() {
            self.task_links.invalidate_all();
        }
        self.notify(&result, "Link removed", "Failed to remove link");
        result
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn create_user(&self, input: NewUser) -> TbResult<User> {
        let result = self.api.create_user(input).await;
        if result.is_ok() {
            self.users.invalidate(&());
        }
        self.notify(&result, "User created", "Failed to create user");
        result
    }

    pub async fn update_user(&self, id: Id, patch: UserPatch) -> TbResult<User> {
        let result = self.api.update_user(id, patch).await;
        if result.is_ok() {
            self.users.invalidate(&());
            self.stats.invalidate(&());
        }
        self.notify(&result, "User updated", "Failed to update user");
        result
    }

    pub async fn delete_user(&self, id: Id) -> TbResult<()> {
        let result = self.api.delete_user(id).await;
        if result.is_ok() {
            self.users.invalidate(&());
            self.stats.invalidate(&());
        }
        self.notify(&result, "User deleted", "Failed to delete user");
        result
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    pub async fn create_project(&self, input: NewProject) -> TbResult<Project> {
        let result = self.api.create_project(input).await;
        if result.is_ok() {
            self.projects.invalidate(&());
        }
        self.notify(&result, "Project created", "Failed to create project");
        result
    }

    pub async fn update_project(&self, id: Id, patch: ProjectPatch) -> TbResult<Project> {
        let result = self.api.update_project(id, patch).await;
        if result.is_ok() {
            self.projects.invalidate(&());
            self.project.invalidate(&id);
        }
        self.notify(&result, "Project updated", "Failed to update project");
        result
    }

    pub async fn delete_project(&self, id: Id) -> TbResult<()> {
        let result = self.api.delete_project(id).await;
        if result.is_ok() {
            self.projects.invalidate(&());
            self.project.remove(&id);
        }
        self.notify(&result, "Project deleted", "Failed to delete project");
        result
    }

    fn invalidate_task_views(&self) {
        self.tasks.invalidate_all();
        self.stats.invalidate(&());
    }

    fn notify<T>(&self, result: &TbResult<T>, success: &str, failure: &str) {
        let event = match result {
            Ok(_) => ClientEvent::Success(success.to_string()),
            Err(err) => ClientEvent::Failure(format!("{}: {}", failure, err)),
        };
        debug!(event = ?event, "Publishing client event");
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;
    use tb_services::{Latency, MockApi, MockTaskBoardApi};
    use tb_store::Store;

    fn client() -> QueryClient<MockApi> {
        QueryClient::new(Arc::new(MockApi::immediate(Store::seeded().unwrap())))
    }

    fn sample_task(id: Id, status: TaskStatus) -> Task {
        NewTask::new(format!("Task {}", id), 1)
            .with_team(1)
            .with_status(status)
            .into_task(id, Utc::now())
    }

    #[tokio::test]
    async fn test_tasks_are_cached_per_key() {
        let client = client();
        assert_eq!(client.tasks(Some(1)).await.unwrap().len(), 5);
        assert_eq!(client.tasks(None).await.unwrap().len(), 18);
        assert_eq!(client.project_tasks(3).await.unwrap().len(), 3);

        client.api().delete_task(1).await.unwrap();
        assert_eq!(client.tasks(Some(1)).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_task_reconciles_server_stamps() {
        let client = client();
        let key = TaskListKey::Team(5);
        client.tasks(Some(5)).await.unwrap();

        let mut events = client.subscribe();
        let task = client.move_task(key, 2, TaskStatus::Done).await.unwrap();
        assert!(task.completed_at.is_some());
        assert_eq!(events.recv().await.unwrap(), ClientEvent::Success("Task updated".to_string()));

        let tasks = client.tasks(Some(5)).await.unwrap();
        let refreshed = tasks.iter().find(|t| t.id == 2).unwrap();
        assert_eq!(refreshed.completed_at, task.completed_at);
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back_and_reports() {
        let mut api = MockTaskBoardApi::new();
        let seeded = vec![sample_task(1, TaskStatus::New), sample_task(2, TaskStatus::Issue)];
        let listed = seeded.clone();
        api.expect_fetch_tasks()
            .times(1)
            .returning(move |_| Ok(listed.clone()));
        api.expect_update_task()
            .times(1)
            .returning(|id, _| Err(TbError::not_found("Task", id)));

        let client = QueryClient::new(Arc::new(api));
        let mut events = client.subscribe();
        client.tasks(Some(1)).await.unwrap();

        let err = client
            .move_task(TaskListKey::Team(1), 2, TaskStatus::Done)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(client.cached_tasks(TaskListKey::Team(1)), Some(seeded));
        let event = events.recv().await.unwrap();
        assert!(event.is_failure());
        assert!(event.message().starts_with("Failed to update task"));
    }

    #[tokio::test]
    async fn test_rollback_uses_pre_write_snapshot() {
        let mut api = MockTaskBoardApi::new();
        api.expect_update_task()
            .returning(|_, _| Err(TbError::Internal("backend unavailable".to_string())));

        let client = QueryClient::new(Arc::new(api));
        let key = TaskListKey::Team(1);
        let snapshot = vec![sample_task(1, TaskStatus::New)];
        client.tasks.set_data(key, snapshot.clone());

        let other = TaskListKey::Team(2);
        client.tasks.set_data(other, vec![sample_task(7, TaskStatus::Docs)]);

        assert!(client.move_task(key, 1, TaskStatus::InProgress).await.is_err());
        assert_eq!(client.cached_tasks(key), Some(snapshot));
        assert_eq!(client.cached_tasks(other).map(|t| t.len()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_drops_refetch_of_other_lists() {
        let store = Arc::new(Store::seeded().unwrap());
        let api = MockApi::new(store, Latency::fixed(Duration::from_millis(100)));
        let client = Arc::new(QueryClient::new(Arc::new(api)));
        let before = client.tasks(None).await.unwrap();
        client.tasks(Some(1)).await.unwrap();
        client.invalidate_task_views();

        let refetch = {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.tasks(None).await })
        };
        tokio::task::yield_now().await;

        client
            .move_task(TaskListKey::Team(1), 1, TaskStatus::Done)
            .await
            .unwrap();

        assert_eq!(refetch.await.unwrap().unwrap(), before);
        assert_eq!(client.cached_tasks(TaskListKey::All), Some(before));

        let all = client.tasks(None).await.unwrap();
        assert_eq!(all.iter().find(|t| t.id == 1).unwrap().status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn test_create_task_invalidates_lists_and_stats() {
        let client = client();
        client.tasks(Some(1)).await.unwrap();
        let before = client.stats().await.unwrap();

        client.create_task(NewTask::new("Story highlights", 1).with_team(1)).await.unwrap();

        assert_eq!(client.tasks(Some(1)).await.unwrap().len(), 6);
        assert_eq!(client.stats().await.unwrap().total_tasks(), before.total_tasks() + 1);
    }

    #[tokio::test]
    async fn test_link_mutations_refresh_both_sides() {
        let client = client();
        assert!(client.task_links(3).await.unwrap().is_empty());
        assert!(client.task_links(4).await.unwrap().is_empty());

        let link = client.create_task_link(3, 4).await.unwrap();
        assert_eq!(client.task_links(4).await.unwrap()[0].source_task_id, 4);

        client.delete_task_link(link.id).await.unwrap();
        assert!(client.task_links(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rule_violation_is_published() {
        let client = client();
        let mut events = client.subscribe();
        assert!(client.create_task_link(5, 5).await.is_err());

        let event = events.recv().await.unwrap();
        assert!(event.is_failure());
        assert!(event.message().contains("cannot link a task to itself"));
    }

    #[tokio::test]
    async fn test_team_by_slug() {
        let client = client();
        assert_eq!(client.team_by_slug("content").await.unwrap().id, 5);
        assert!(client.team_by_slug("sales").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_user_and_project_mutations() {
        let client = client();
        assert_eq!(client.users().await.unwrap().len(), 15);
        client
            .update_user(7, UserPatch::new().with_status(true))
            .await
            .unwrap();
        let users = client.users().await.unwrap();
        assert!(users.iter().find(|u| u.id == 7).unwrap().status);

        assert_eq!(client.project(1).await.unwrap().name, "Academy website");
        client
            .update_project(1, ProjectPatch::new().with_name("Academy portal"))
            .await
            .unwrap();
        assert_eq!(client.project(1).await.unwrap().name, "Academy portal");

        client.delete_project(1).await.unwrap();
        assert!(client.project(1).await.unwrap_err().is_not_found());
        assert_eq!(client.projects().await.unwrap().len(), 3);
    }
}
