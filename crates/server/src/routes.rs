use axum::{
    extract::Request,
    http::{uri::PathAndQuery, Uri},
    routing::get,
    Json, Router,
};
use tower::{util::MapRequest, Layer};
use tower::util::MapRequestLayer;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::cards::{self, BASE_PATH};
use crate::openapi::ApiDoc;
use crate::state::ServerState;

/// Router wrapped with the case-insensitive path rewrite; this is what gets served.
pub type App = MapRequest<Router, fn(Request) -> Request>;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: health, card CRUD and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(BASE_PATH, get(cards::list).post(cards::create))
        .route(&format!("{}/:id", BASE_PATH), get(cards::get).put(cards::update).delete(cards::delete));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}

/// Routing runs after `Router` layers, so the rewrite has to wrap the whole router.
pub fn build_app(state: ServerState, cors: CorsLayer) -> App {
    MapRequestLayer::new(lowercase_api_prefix as fn(Request) -> Request).layer(build_router(state, cors))
}

/// Rewrite `/API/Cards...` to `/api/cards...` and drop one trailing `/`.
/// Only paths under the base path are touched.
pub fn lowercase_api_prefix(mut req: Request) -> Request {
    if let Some(uri) = normalize_prefix(req.uri()) {
        *req.uri_mut() = uri;
    }
    req
}

fn normalize_prefix(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    let head = path.get(..BASE_PATH.len())?;
    if !head.eq_ignore_ascii_case(BASE_PATH) {
        return None;
    }
    let full = &path[BASE_PATH.len()..];
    if !(full.is_empty() || full.starts_with('/')) {
        return None;
    }
    let rest = full.strip_suffix('/').unwrap_or(full);
    if head == BASE_PATH && rest == full {
        return None;
    }
    let rewritten = match uri.query() {
        Some(q) => format!("{}{}?{}", BASE_PATH, rest, q),
        None => format!("{}{}", BASE_PATH, rest),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(rewritten).ok()?);
    Uri::from_parts(parts).ok()
}
