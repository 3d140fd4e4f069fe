//! HTTP end-to-end tests: the real router and handlers on an ephemeral port,
//! backed by the in-memory repository.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use models::todo_item::Model;
use server::routes::{self, AppState};
use service::{MemoryTodoRepository, ServiceError, TodoRepository, TodoService};

struct TestApp {
    base_url: String,
    repo: Arc<MemoryTodoRepository>,
}

async fn serve(repo: Arc<dyn TodoRepository>) -> anyhow::Result<String> {
    let state = AppState {
        todos: Arc::new(TodoService::new(repo)),
    };
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(format!("http://{}", addr))
}

async fn start_app() -> anyhow::Result<TestApp> {
    let repo = Arc::new(MemoryTodoRepository::new());
    let base_url = serve(repo.clone()).await?;
    Ok(TestApp { base_url, repo })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn item(description: &str, is_completed: bool) -> Model {
    Model {
        id: Uuid::new_v4(),
        description: description.into(),
        is_completed,
    }
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = start_app().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn list_returns_active_items_only() -> anyhow::Result<()> {
    let app = start_app().await?;
    let active = item("buy milk", false);
    let done = item("water plants", true);
    app.repo.seed(vec![active.clone(), done]).await;

    let res = client()
        .get(format!("{}/api/todo-items", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let items = res.json::<Vec<Model>>().await?;
    assert_eq!(items, vec![active]);
    Ok(())
}

#[tokio::test]
async fn get_returns_stored_item_including_completed() -> anyhow::Result<()> {
    let app = start_app().await?;
    let done = item("water plants", true);
    app.repo.seed(vec![done.clone()]).await;

    let res = client()
        .get(format!("{}/api/todo-items/{}", app.base_url, done.id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Model>().await?, done);
    Ok(())
}

#[tokio::test]
async fn get_missing_item_is_404_with_empty_body() -> anyhow::Result<()> {
    let app = start_app().await?;
    let res = client()
        .get(format!("{}/api/todo-items/{}", app.base_url, Uuid::new_v4()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn post_creates_item_with_location_header() -> anyhow::Result<()> {
    let app = start_app().await?;
    let res = client()
        .post(format!("{}/api/todo-items", app.base_url))
        .json(&json!({ "description": "buy milk" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("location header")
        .to_str()?
        .to_string();
    let created = res.json::<Model>().await?;
    assert_eq!(location, format!("/api/todo-items/{}", created.id));
    assert_eq!(created.description, "buy milk");
    assert!(!created.is_completed);
    assert_ne!(created.id, Uuid::nil());

    // Location resolves to the created item
    let res = client()
        .get(format!("{}{}", app.base_url, location))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Model>().await?, created);
    Ok(())
}

#[tokio::test]
async fn post_without_description_is_rejected() -> anyhow::Result<()> {
    let app = start_app().await?;
    for body in [json!({}), json!({ "description": "" }), json!({ "description": "   " })] {
        let res = client()
            .post(format!("{}/api/todo-items", app.base_url))
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err = res.json::<serde_json::Value>().await?;
        assert_eq!(err["error"], "Description is required");
    }
    Ok(())
}

#[tokio::test]
async fn post_duplicate_description_is_rejected_case_insensitively() -> anyhow::Result<()> {
    let app = start_app().await?;
    app.repo.seed(vec![item("Walk the dog", false)]).await;

    let res = client()
        .post(format!("{}/api/todo-items", app.base_url))
        .json(&json!({ "description": "walk the DOG" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err = res.json::<serde_json::Value>().await?;
    assert_eq!(err["error"], "Description already exists");
    Ok(())
}

#[tokio::test]
async fn post_duplicate_of_completed_item_is_allowed() -> anyhow::Result<()> {
    let app = start_app().await?;
    app.repo.seed(vec![item("walk the dog", true)]).await;

    let res = client()
        .post(format!("{}/api/todo-items", app.base_url))
        .json(&json!({ "description": "walk the dog" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn put_with_mismatched_ids_is_400() -> anyhow::Result<()> {
    let app = start_app().await?;
    let existing = item("buy milk", false);
    app.repo.seed(vec![existing.clone()]).await;

    let body = Model {
        id: Uuid::new_v4(),
        description: "something else".into(),
        is_completed: true,
    };
    let res = client()
        .put(format!("{}/api/todo-items/{}", app.base_url, existing.id))
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn put_replaces_item_and_returns_204() -> anyhow::Result<()> {
    let app = start_app().await?;
    let existing = item("buy milk", false);
    app.repo.seed(vec![existing.clone()]).await;

    let replacement = Model {
        id: existing.id,
        description: "buy oat milk".into(),
        is_completed: true,
    };
    let res = client()
        .put(format!("{}/api/todo-items/{}", app.base_url, existing.id))
        .json(&replacement)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await?.is_empty());

    let res = client()
        .get(format!("{}/api/todo-items/{}", app.base_url, existing.id))
        .send()
        .await?;
    assert_eq!(res.json::<Model>().await?, replacement);
    Ok(())
}

#[tokio::test]
async fn put_on_missing_item_is_404() -> anyhow::Result<()> {
    let app = start_app().await?;
    let ghost = item("never existed", false);
    let res = client()
        .put(format!("{}/api/todo-items/{}", app.base_url, ghost.id))
        .json(&ghost)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

/// Repository double simulating a write race: the update conflicts while the
/// row is still present, which the API deliberately does not recover from.
struct RacingRepo;

#[async_trait]
impl TodoRepository for RacingRepo {
    async fn list_active(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(vec![])
    }
    async fn get(&self, _id: Uuid) -> Result<Option<Model>, ServiceError> {
        Ok(None)
    }
    async fn insert(&self, _item: &Model) -> Result<u64, ServiceError> {
        Ok(1)
    }
    async fn update_full(&self, id: Uuid, _item: &Model) -> Result<u64, ServiceError> {
        Err(ServiceError::Conflict(id))
    }
    async fn exists_by_id(&self, _id: Uuid) -> Result<bool, ServiceError> {
        Ok(true)
    }
    async fn exists_by_description(&self, _description: &str) -> Result<bool, ServiceError> {
        Ok(false)
    }
}

#[tokio::test]
async fn put_conflict_with_row_present_is_500() -> anyhow::Result<()> {
    let base_url = serve(Arc::new(RacingRepo)).await?;
    let body = item("contested", false);
    let res = client()
        .put(format!("{}/api/todo-items/{}", base_url, body.id))
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}
