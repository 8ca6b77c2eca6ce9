//! REST API over the notes store.

use anyhow::{anyhow, Result};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

mod errors;
mod routes;

pub use errors::ApiError;

use crate::api::NOTES_PATH;
use crate::db::Database;

/// Shared handler state. The connection mutex serializes all store access.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Run `f` against the store on the blocking pool while holding the
    /// connection lock.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let db = db.lock().map_err(|_| anyhow!("database lock poisoned"))?;
            f(&db)
        })
        .await?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            NOTES_PATH,
            get(routes::list_notes).post(routes::create_note),
        )
        .route(
            &format!("{}/:id", NOTES_PATH),
            get(routes::get_note)
                .patch(routes::update_note)
                .delete(routes::delete_note),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    db: Database,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let app = router(AppState::new(db));
    info!("Listening on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Note};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn app() -> (AppState, Router) {
        let state = AppState::new(Database::open_memory().unwrap());
        (state.clone(), router(state))
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let (_, app) = app();

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "title": "Hi", "content": "World", "category": "Sely", "isFavorite": false })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["id"].is_string());
        assert!(created["createdAt"].is_string());
        let id = created["id"].as_str().unwrap().to_string();
        let uri = format!("/api/notes/{}", id);

        let (status, updated) =
            send(&app, Method::PATCH, &uri, Some(json!({ "isFavorite": true }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["isFavorite"], true);
        assert_eq!(updated["title"], "Hi");
        assert_eq!(updated["content"], "World");
        assert_eq!(updated["category"], "Sely");
        assert_eq!(updated["createdAt"], created["createdAt"]);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Note not found");
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let (_, app) = app();

        let (_, created) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "title": "  Grüße ", "content": "line one\nline two", "category": "Heyo" })),
        )
        .await;
        let note: Note = serde_json::from_value(created).unwrap();
        assert!(!note.is_favorite);

        let (status, fetched) = send(&app, Method::GET, &format!("/api/notes/{}", note.id), None).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Note = serde_json::from_value(fetched).unwrap();
        assert_eq!(fetched, note);
        assert_eq!(fetched.title, "  Grüße ");
        assert_eq!(fetched.category, Some(Category::Heyo));
    }

    #[tokio::test]
    async fn test_list_notes() {
        let (_, app) = app();

        let (status, body) = send(&app, Method::GET, "/api/notes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        for title in ["a", "b"] {
            send(&app, Method::POST, "/api/notes", Some(json!({ "title": title, "content": "x" }))).await;
        }

        let (_, body) = send(&app, Method::GET, "/api/notes", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields_without_touching_store() {
        let (state, app) = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "title": "", "content": "World" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid data");
        assert_eq!(body["details"][0]["path"], json!(["title"]));
        assert_eq!(body["details"][0]["code"], "too_small");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "title": "Hi", "content": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(state.with_db(|db| db.get_all_notes()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let (_, app) = app();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/notes")
                    .header("content-type", "application/json")
                    .body(Body::from("{\"title\":"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (_, app) = app();
        let uri = format!("/api/notes/{}", uuid::Uuid::new_v4());

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "isFavorite": true }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Note not found");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/api/notes/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_patch_validates_each_present_field() {
        let (_, app) = app();
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "title": "Hi", "content": "World" })),
        )
        .await;
        let uri = format!("/api/notes/{}", created["id"].as_str().unwrap());

        let (status, body) =
            send(&app, Method::PATCH, &uri, Some(json!({ "category": "Nobody" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["code"], "invalid_enum_value");

        let (status, body) =
            send(&app, Method::PATCH, &uri, Some(json!({ "category": "Heyo" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "Heyo");

        let (status, body) =
            send(&app, Method::PATCH, &uri, Some(json!({ "category": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["category"].is_null());
        assert_eq!(body["title"], "Hi");
    }

    #[tokio::test]
    async fn test_store_calls_run_off_the_async_thread() {
        let (state, _) = app();
        let caller = std::thread::current().id();
        let worker = state
            .with_db(|_| Ok(std::thread::current().id()))
            .await
            .unwrap();
        assert_ne!(caller, worker);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let (state, app) = app();
        state
            .with_db(|db| Ok(db.conn().execute_batch("DROP TABLE notes")?))
            .await
            .unwrap();

        let (status, body) = send(&app, Method::GET, "/api/notes", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch notes" }));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({ "title": "Hi", "content": "World" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create note");
    }
}
