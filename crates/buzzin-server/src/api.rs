use std::sync::{Arc, Mutex};

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, State},
    http::{header, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use buzzin_shared::constants::API_BASE_PATH;
use buzzin_shared::protocol::{ApiMessage, CreateLinkRequest, DeleteAck, ErrorBody, HealthStatus};
use buzzin_shared::Link;
use buzzin_store::Database;

use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Run one store call under the lock on the blocking thread pool.
    async fn with_db<T, F>(&self, op: F) -> Result<T, ServerError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> buzzin_store::Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || -> Result<T, ServerError> {
            let db = db
                .lock()
                .map_err(|e| ServerError::Internal(format!("Store lock poisoned: {e}")))?;
            Ok(op(&db)?)
        })
        .await
        .map_err(|e| ServerError::Internal(format!("Store task failed: {e}")))?
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    // A known path with an unsupported method gets the same JSON 404 as an
    // unknown path.
    // GET takes a userId in the trailing segment, DELETE a link id.
    let api = Router::new()
        .route("/health", get(health_check).fallback(not_found))
        .route("/links", post(create_link).fallback(not_found))
        .route(
            "/links/:key",
            get(list_links).delete(delete_link).fallback(not_found),
        );

    Router::new()
        .route("/", get(root).fallback(not_found))
        .nest(API_BASE_PATH, api)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<ApiMessage> {
    Json(ApiMessage {
        message: "Buzzin API server is running".to_string(),
    })
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "Server is running".to_string(),
    })
}

async fn list_links(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Link>>, ServerError> {
    let links = {
        let user_id = user_id.clone();
        state.with_db(move |db| db.links_for_user(&user_id)).await?
    };
    debug!(user_id = %user_id, count = links.len(), "Listed links");
    Ok(Json(links))
}

async fn create_link(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Link>), ServerError> {
    let Json(req) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let new_link = req.validate()?;

    let link = state.with_db(move |db| db.insert_link(&new_link)).await?;

    info!(
        id = %link.id,
        user_id = %link.user_id,
        platform = %link.platform,
        "Link created"
    );

    Ok((StatusCode::CREATED, Json(link)))
}

async fn delete_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ServerError> {
    // Ids are UUIDs; anything else cannot match a record and is acknowledged
    // like any other missing id.
    let existed = match Uuid::parse_str(&id) {
        Ok(uuid) => state.with_db(move |db| db.delete_link(uuid)).await?,
        Err(_) => false,
    };

    info!(id = %id, existed, "Link delete acknowledged");

    Ok(Json(DeleteAck::deleted()))
}

async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> (StatusCode, Json<ErrorBody>) {
    debug!(%method, path = uri.path(), "Route not found");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Route not found".to_string(),
            path: Some(uri.path().to_string()),
        }),
    )
}

pub async fn serve<F>(
    state: AppState,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    info!(addr = %listener.local_addr()?, "Starting HTTP API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
