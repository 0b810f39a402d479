// Gallery Catalog - Admin API Server
// Read-only JSON surface over the loaded catalogs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use gallery_catalog::{
    Catalog, CatalogEntity, CatalogView, EntityKind, ExportProfile, Gallery, VERSION,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state
#[derive(Clone)]
struct AppState {
    gallery: Arc<Mutex<Gallery>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<Vec<serde_json::Value>> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: vec![],
            error: Some(message.into()),
        }
    }
}

/// One page of a filtered collection listing
#[derive(Serialize)]
struct ListResponse {
    kind: String,
    term: String,
    page: usize,
    page_size: usize,
    filtered: usize,
    has_more: bool,
    records: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct ListParams {
    q: Option<String>,
    page: Option<usize>,
}

/// Filter and paginate one catalog the same way the interactive console
/// does: term applied up front, pages revealed one at a time
fn list_records<E: CatalogEntity>(catalog: &Catalog<E>, params: &ListParams) -> ListResponse {
    let mut view = CatalogView::new();
    if let Some(term) = &params.q {
        view.set_search_term(term, Instant::now());
        view.flush_search();
    }

    let target = params.page.unwrap_or(1).max(1);
    while view.page() < target && view.has_more(catalog.records()) {
        view.load_more();
    }

    let records: Vec<serde_json::Value> = view
        .visible_slice(catalog.records())
        .into_iter()
        .map(|session| session.entity().export_record(ExportProfile::Internal))
        .collect();

    ListResponse {
        kind: E::KIND.plural().to_string(),
        term: view.term().to_string(),
        page: view.page(),
        page_size: view.page_size(),
        filtered: view.filtered_count(catalog.records()),
        has_more: view.has_more(catalog.records()),
        records,
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(VERSION))
}

/// GET /api/:kind?q=&page= - List one collection, filtered and paginated
async fn list_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let gallery = state.gallery.lock().unwrap();

    match EntityKind::from_plural(&kind) {
        Some(EntityKind::Artwork) => (
            StatusCode::OK,
            Json(ApiResponse::ok(list_records(&gallery.artworks, &params))),
        )
            .into_response(),
        Some(EntityKind::Exhibition) => (
            StatusCode::OK,
            Json(ApiResponse::ok(list_records(&gallery.exhibitions, &params))),
        )
            .into_response(),
        Some(EntityKind::Lecture) => (
            StatusCode::OK,
            Json(ApiResponse::ok(list_records(&gallery.lectures, &params))),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!("Unknown collection: {}", kind))),
        )
            .into_response(),
    }
}

/// GET /api/:kind/export/:profile - Full projection for one collection
async fn export_kind(
    State(state): State<AppState>,
    Path((kind, profile)): Path<(String, String)>,
) -> impl IntoResponse {
    let gallery = state.gallery.lock().unwrap();

    match (
        EntityKind::from_plural(&kind),
        ExportProfile::from_name(&profile),
    ) {
        (Some(kind), Some(profile)) => {
            let records = match kind {
                EntityKind::Artwork => gallery.artworks.export_view(profile),
                EntityKind::Exhibition => gallery.exhibitions.export_view(profile),
                EntityKind::Lecture => gallery.lectures.export_view(profile),
            };
            (StatusCode::OK, Json(ApiResponse::ok(records))).into_response()
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!(
                "Unknown collection or profile: {}/{}",
                kind, profile
            ))),
        )
            .into_response(),
    }
}

/// GET /data/:file - Raw internal projection named like the fixture files,
/// e.g. /data/artworks.json
async fn data_file(State(state): State<AppState>, Path(file): Path<String>) -> impl IntoResponse {
    let gallery = state.gallery.lock().unwrap();

    let stem = file.strip_suffix(".json").unwrap_or(file.as_str());
    match EntityKind::from_plural(stem) {
        Some(EntityKind::Artwork) => {
            Json(gallery.artworks.export_view(ExportProfile::Internal)).into_response()
        }
        Some(EntityKind::Exhibition) => {
            Json(gallery.exhibitions.export_view(ExportProfile::Internal)).into_response()
        }
        Some(EntityKind::Lecture) => {
            Json(gallery.lectures.export_view(ExportProfile::Internal)).into_response()
        }
        None => (StatusCode::NOT_FOUND, format!("No such file: {}", file)).into_response(),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🌐 Gallery Catalog v{} - Admin API Server", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Load fixtures
    let data_dir = std::env::var("GALLERY_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    println!("\n📂 Loading fixtures from {}/ ...", data_dir);

    let mut gallery = Gallery::new();
    for summary in gallery.load_dir(std::path::Path::new(&data_dir)) {
        match &summary.error {
            None => println!("✓ {}: {} records", summary.kind.plural(), summary.loaded),
            Some(err) => println!("⚠️  {}: starting empty ({})", summary.kind.plural(), err),
        }
    }
    println!("✓ Total entities: {}", gallery.total_entities());

    // Create shared state
    let state = AppState {
        gallery: Arc::new(Mutex::new(gallery)),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/:kind", get(list_kind))
        .route("/:kind/export/:profile", get(export_kind))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/data/:file", get(data_file))
        .nest("/api", api_routes)
        .nest_service("/exports", ServeDir::new("exports"))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = std::env::var("GALLERY_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API:     http://{}/api/artworks", addr);
    println!("   Exports: http://{}/api/artworks/export/external", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
