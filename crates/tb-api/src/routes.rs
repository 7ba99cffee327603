//! API routes

use axum::{
    routing::{delete, get},
    Router,
};
use serde::Serialize;

use crate::extractors::AppState;
use crate::handlers::{projects, stats, task_links, tasks, teams, users};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_root))
        .nest("/teams", teams_router())
        .nest("/users", users_router())
        .nest("/tasks", tasks_router())
        .nest("/task_links", task_links_router())
        .nest("/projects", projects_router())
        .nest("/stats", stats_router())
}

fn teams_router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams))
        .route("/:slug", get(teams::get_team))
        .route("/:slug/board", get(teams::get_team_board))
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

fn tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/:id",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/:id/links",
            get(task_links::list_task_links).post(task_links::create_task_link),
        )
        .route("/:id/linked", get(task_links::list_linked_tasks))
}

fn task_links_router() -> Router<AppState> {
    Router::new().route("/:id", delete(task_links::delete_task_link))
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::create_project))
        .route(
            "/:id",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/:id/tasks", get(projects::list_project_tasks))
}

fn stats_router() -> Router<AppState> {
    Router::new()
        .route("/", get(stats::get_stats))
        .route("/summary", get(stats::get_stats_summary))
}

async fn api_root() -> axum::Json<ApiRoot> {
    axum::Json(ApiRoot {
        type_name: "Root".into(),
        instance_name: "Taskboard RS".into(),
    })
}

#[derive(Serialize)]
struct ApiRoot {
    #[serde(rename = "_type")]
    type_name: String,
    #[serde(rename = "instanceName")]
    instance_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tb_services::MockApi;
    use tb_store::Store;
    use tower::ServiceExt;

    fn app() -> Router {
        let store = Store::seeded().expect("seed data loads");
        router().with_state(AppState::mock(MockApi::immediate(store)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    #[tokio::test]
    async fn test_api_root() {
        let (status, body) = get_json(&app(), "/api").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["instanceName"], "Taskboard RS");
    }

    #[tokio::test]
    async fn test_teams() {
        let app = app();
        let (status, body) = get_json(&app, "/api/teams").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);

        let (status, body) = get_json(&app, "/api/teams/tech").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 3);

        let (status, body) = get_json(&app, "/api/teams/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorIdentifier"], "urn:taskboard:api:errors:NotFound");
    }

    #[tokio::test]
    async fn test_team_board() {
        let app = app();
        let (status, body) = get_json(&app, "/api/teams/design/board").await;
        assert_eq!(status, StatusCode::OK);
        let columns = body["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 6);
        assert_eq!(columns[0]["status"], "new");
        assert_eq!(columns[0]["tasks"].as_array().unwrap().len(), 4);

        let (_, body) = get_json(&app, "/api/teams/design/board?assignee=unassigned").await;
        let ids: Vec<i64> = body["columns"][0]["tasks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![7, 16]);
    }

    #[tokio::test]
    async fn test_list_tasks_with_filters() {
        let app = app();
        let (_, body) = get_json(&app, "/api/tasks").await;
        assert_eq!(body.as_array().unwrap().len(), 18);

        let (status, body) = get_json(&app, "/api/tasks?team_id=3&status=issue").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![4, 18]);
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let app = app();
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "Write FAQ", "created_by": 1, "team_id": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 19);
        assert_eq!(created["status"], "new");

        let (status, updated) = send(
            &app,
            Method::PATCH,
            "/api/tasks/19",
            Some(json!({"status": "in_progress"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "in_progress");
        assert!(updated["started_at"].is_string());

        let (status, _) = send(&app, Method::DELETE, "/api/tasks/19", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = get_json(&app, "/api/tasks/19").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_bodies() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({"title": "  ", "created_by": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errorIdentifier"],
            "urn:taskboard:api:errors:PropertyConstraintViolation"
        );

        let (status, body) = send(&app, Method::POST, "/api/tasks", Some(json!({"title": "x"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap().contains("created_by"));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_task_links() {
        let app = app();
        let (_, body) = get_json(&app, "/api/tasks/7/links").await;
        assert_eq!(body[0]["source_task_id"], 7);
        assert_eq!(body[0]["linked_task_id"], 1);

        let (_, body) = get_json(&app, "/api/tasks/1/linked").await;
        assert_eq!(body[0]["task"]["id"], 7);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/tasks/3/links",
            Some(json!({"linked_task_id": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errorIdentifier"], "urn:taskboard:api:errors:RuleViolation");

        let (status, link) = send(
            &app,
            Method::POST,
            "/api/tasks/3/links",
            Some(json!({"linked_task_id": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(link["id"], 3);

        let (status, _) = send(&app, Method::DELETE, "/api/task_links/3", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_users() {
        let app = app();
        let (_, body) = get_json(&app, "/api/users?search=ahmed").await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (_, body) = get_json(&app, "/api/users?team_id=4").await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![5, 13]);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"name": "Dina Farouk", "email": "dina@example.com", "role": "volunteer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 16);
        assert_eq!(body["status"], true);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"name": "Dina", "email": "dina@example.com", "role": "owner"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap().starts_with("role 'owner'"));

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/users/16",
            Some(json!({"teams": [2]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["teams"], json!([2]));
    }

    #[tokio::test]
    async fn test_projects() {
        let app = app();
        let (_, body) = get_json(&app, "/api/projects/1").await;
        assert_eq!(body["name"], "Academy website");

        let (_, body) = get_json(&app, "/api/projects/3/tasks").await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/projects",
            Some(json!({"name": "ab", "created_by": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/projects/1",
            Some(json!({"active": false})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["active"], false);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = app();
        let (status, body) = get_json(&app, "/api/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tasks_distribution"]["new"], 4);

        let (status, body) = get_json(&app, "/api/stats/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_tasks"], 18);
        assert_eq!(body["completed_tasks"], 2);
    }
}
