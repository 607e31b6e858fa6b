//! Contact Form Server
//!
//! Accepts contact form submissions over HTTP, stores them in memory or in
//! an embedded SQLite database, and serves an admin listing plus a JSON dump.

mod extractors;
mod handlers;
mod render;
mod services;
mod settings;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use settings::{Settings, StoreBackend};
use services::SubmissionService;
use storage::{MemoryStore, SqliteStore, SubmissionStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub submissions: Arc<SubmissionService>,
}

impl AppState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            submissions: Arc::new(SubmissionService::new(store)),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Contact Form Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}:{}, store={:?}",
        settings.host, settings.port, settings.store
    );

    let store = open_store(&settings).await?;
    let app = build_router(AppState::new(store));

    let addr = settings.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn open_store(settings: &Settings) -> Result<Arc<dyn SubmissionStore>> {
    match settings.store {
        StoreBackend::Memory => {
            info!("Using in-memory submission store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::open(&settings.database_path)
                .await
                .with_context(|| {
                    format!("Failed to open SQLite database at {}", settings.database_path)
                })?;
            info!("SQLite submission store ready at: {}", settings.database_path);
            Ok(Arc::new(store))
        }
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::contact::form))
        .route("/contact", post(handlers::contact::submit))
        .route("/admin", get(handlers::admin::list))
        .route("/api/submissions", get(handlers::api::submissions))
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use contact_types::{ContactEntry, RawContactForm};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    /// Memory store whose appends can be made to fail
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    #[async_trait]
    impl SubmissionStore for FlakyStore {
        async fn append(&self, raw: RawContactForm) -> storage::Result<ContactEntry> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StorageError::Database(sqlx::Error::PoolClosed));
            }
            self.inner.append(raw).await
        }

        async fn list(&self) -> storage::Result<Vec<ContactEntry>> {
            self.inner.list().await
        }

        fn backend(&self) -> &'static str {
            "flaky"
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/contact")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn submissions(app: &Router) -> Vec<serde_json::Value> {
        let response = app.clone().oneshot(get_request("/api/submissions")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())));

        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<form"));
    }

    #[tokio::test]
    async fn test_submit_then_list() {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())));

        let response = app
            .clone()
            .oneshot(post_form("firstName=+Ada+&mailingList=on&company=Analytical+Engines"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Thanks, Ada!"));

        let entries = submissions(&app).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["firstName"], "Ada");
        assert_eq!(entries[0]["mailingList"], true);
        assert_eq!(entries[0]["format"], "html");
        assert_eq!(entries[0]["company"], "Analytical Engines");
        assert!(entries[0]["createdAt"].is_i64());

        let response = app.oneshot(get_request("/admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Submissions (1)"));
        assert!(html.contains("Analytical Engines"));
    }

    #[tokio::test]
    async fn test_json_submission_and_newest_first() {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())));

        for name in ["first", "second"] {
            let request = Request::builder()
                .method("POST")
                .uri("/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    r#"{{"firstName":"{}","mailingList":true,"format":"text"}}"#,
                    name
                )))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let entries = submissions(&app).await;
        assert_eq!(entries[0]["firstName"], "second");
        assert_eq!(entries[1]["firstName"], "first");
        assert_eq!(entries[0]["format"], "text");
        assert!(entries[0]["createdAt"].as_i64() >= entries[1]["createdAt"].as_i64());
    }

    #[tokio::test]
    async fn test_non_string_json_fields_default() {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())));

        for body in [
            r#"{"format":5}"#,
            r#"{"format":["text"]}"#,
            r#"{"format":true}"#,
            r#"{"firstName":5,"format":{"kind":"text"}}"#,
        ] {
            let request = Request::builder()
                .method("POST")
                .uri("/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "body {}", body);
        }

        let entries = submissions(&app).await;
        assert_eq!(entries.len(), 4);
        for entry in &entries {
            assert_eq!(entry["format"], "html");
            assert_eq!(entry["firstName"], "");
        }
    }

    #[tokio::test]
    async fn test_storage_error_is_500_and_nothing_stored() {
        let store = Arc::new(FlakyStore {
            inner: MemoryStore::new(),
            failing: AtomicBool::new(false),
        });
        let app = build_router(AppState::new(store.clone()));

        let response = app.clone().oneshot(post_form("firstName=Ada")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let before = submissions(&app).await;

        store.failing.store(true, Ordering::SeqCst);
        let response = app.clone().oneshot(post_form("firstName=Eve")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "internal_error");

        assert_eq!(submissions(&app).await, before);
    }

    #[tokio::test]
    async fn test_unsupported_body_rejected() {
        let app = build_router(AppState::new(Arc::new(MemoryStore::new())));

        let request = Request::builder()
            .method("POST")
            .uri("/contact")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("firstName=Ada"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(submissions(&app).await.is_empty());
    }

    #[tokio::test]
    async fn test_sqlite_backed_router() {
        let store = SqliteStore::in_memory().await.unwrap();
        let app = build_router(AppState::new(Arc::new(store)));

        let response = app
            .clone()
            .oneshot(post_form("email=+ada%40example.com+&format=text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let entries = submissions(&app).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["email"], "ada@example.com");
        assert_eq!(entries[0]["format"], "text");
        assert_eq!(entries[0]["id"], 1);

        let response = app.oneshot(get_request("/health")).await.unwrap();
        let health: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["store"], "sqlite");
    }

    #[tokio::test]
    async fn test_open_store_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            host: "127.0.0.1".to_string(),
            port: 0,
            store: StoreBackend::Sqlite,
            database_path: dir.path().join("contacts.db").to_string_lossy().to_string(),
        };

        let store = open_store(&settings).await.unwrap();
        assert_eq!(store.backend(), "sqlite");

        let settings = Settings {
            store: StoreBackend::Memory,
            ..settings
        };
        assert_eq!(open_store(&settings).await.unwrap().backend(), "memory");
    }
}
