//! HTTP transport implementation.
//!
//! REST endpoints over the catalog:
//!
//! | Method | Path                  | Purpose                          |
//! |--------|-----------------------|----------------------------------|
//! | GET    | `/tools`              | list/search/filter/sort tools    |
//! | POST   | `/tools`              | create a tool                    |
//! | GET    | `/tool/{id}`          | fetch one tool                   |
//! | GET    | `/tools/{id}/reviews` | list reviews for a tool          |
//! | POST   | `/tools/{id}/reviews` | create a review for a tool       |
//! | GET    | `/health`             | boot-time store connectivity     |

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::extract::{JsonBody, QueryParams};
use super::{HttpConfig, TransportError, TransportResult};
use crate::core::{CatalogServer, Error};
use crate::domains::reviews::{CreateReviewRequest, Review};
use crate::domains::tools::{CreateToolRequest, Tool, ToolListParams};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Body of `POST /tools`.
#[derive(Debug, Serialize)]
struct ToolCreated {
    message: &'static str,
    id: String,
}

/// Body of `POST /tools/{id}/reviews`.
#[derive(Debug, Serialize)]
struct ReviewCreated {
    message: &'static str,
    review_id: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: CatalogServer) -> TransportResult<()> {
        let addr = self.address();

        let mut app = build_router(server);

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Tools:   GET|POST /tools, GET /tool/{{id}}");
        info!("  → Reviews: GET|POST /tools/{{id}}/reviews");
        info!("  → Health:  GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the catalog router around a server.
pub fn build_router(server: CatalogServer) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/tools", get(list_tools).post(create_tool))
        .route("/tool/{id}", get(get_tool))
        .route("/tools/{id}/reviews", get(list_reviews).post(create_review))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Root handler - provides API info.
async fn root_handler(State(server): State<CatalogServer>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": server.name(),
        "version": server.version(),
        "environment": server.config().environment.as_str(),
        "endpoints": {
            "tools": "GET|POST /tools",
            "tool": "GET /tool/{id}",
            "reviews": "GET|POST /tools/{id}/reviews",
            "health": "GET /health"
        }
    }))
}

/// Health check endpoint.
async fn health_check(State(server): State<CatalogServer>) -> impl IntoResponse {
    let report = server.health();
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

#[instrument(skip_all)]
async fn list_tools(
    State(server): State<CatalogServer>,
    QueryParams(params): QueryParams<ToolListParams>,
) -> Result<Json<Vec<Tool>>, Error> {
    let tools = server.tools()?.list(&params).await?;
    Ok(Json(tools))
}

#[instrument(skip(server))]
async fn get_tool(
    State(server): State<CatalogServer>,
    Path(id): Path<String>,
) -> Result<Json<Tool>, Error> {
    let tool = server.tools()?.get(&id).await?;
    Ok(Json(tool))
}

#[instrument(skip_all)]
async fn create_tool(
    State(server): State<CatalogServer>,
    JsonBody(request): JsonBody<CreateToolRequest>,
) -> Result<impl IntoResponse, Error> {
    let id = server.tools()?.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ToolCreated {
            message: "Tool added successfully!",
            id: id.to_hex(),
        }),
    ))
}

#[instrument(skip(server))]
async fn list_reviews(
    State(server): State<CatalogServer>,
    Path(tool_id): Path<String>,
) -> Result<Json<Vec<Review>>, Error> {
    let reviews = server.reviews()?.list(&tool_id).await?;
    Ok(Json(reviews))
}

#[instrument(skip(server, request))]
async fn create_review(
    State(server): State<CatalogServer>,
    Path(tool_id): Path<String>,
    JsonBody(request): JsonBody<CreateReviewRequest>,
) -> Result<impl IntoResponse, Error> {
    let id = server.reviews()?.create(&tool_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewCreated {
            message: "Review added successfully",
            review_id: id.to_hex(),
        }),
    ))
}
