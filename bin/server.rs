// BaZi Calculator - Web Server
// REST API with Axum mirroring the original page's endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use bazi_calculator::{compatibility, Chart, CompatibilityReport, GeoDataset, Subject, REGIONS_URL};

/// Shared application state
#[derive(Clone)]
struct AppState {
    regions: Arc<GeoDataset>,
}

/// One subject as submitted by the form
#[derive(Debug, Clone, Deserialize)]
struct ChartRequest {
    #[serde(default)]
    name: String,
    #[serde(default = "default_relationship")]
    relationship: String,
    /// YYYY-MM-DD
    date: Option<String>,
    /// HH:MM
    time: Option<String>,
    /// {province, city, district}, optional
    #[serde(default)]
    location: serde_json::Value,
}

fn default_relationship() -> String {
    "本人".to_string()
}

#[derive(Deserialize)]
struct CompatibilityRequest {
    subjects: Vec<ChartRequest>,
}

#[derive(Serialize)]
struct CompatibilityResponse {
    charts: Vec<Chart>,
    report: CompatibilityReport,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message.to_string() }),
        )
    }
}

/// Parse the request's separate date and time fields.
///
/// Missing date or missing time blocks computation; the engine itself is
/// never called with an incomplete input.
fn parse_request_datetime(request: &ChartRequest) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(request.date.as_deref()?, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(request.time.as_deref()?, "%H:%M").ok()?;
    Some(date.and_time(time))
}

fn compute_from_request(request: &ChartRequest) -> Option<Chart> {
    let dt = parse_request_datetime(request)?;
    Some(Chart::compute(dt).with_subject(Subject {
        name: request.name.clone(),
        relationship: request.relationship.clone(),
        location: request.location.clone(),
        datetime: dt.format("%Y-%m-%d %H:%M").to_string(),
    }))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "version": bazi_calculator::VERSION }))
}

/// POST /api/chart - Compute one chart
async fn calculate_chart(Json(request): Json<ChartRequest>) -> impl IntoResponse {
    match compute_from_request(&request) {
        Some(chart) => (StatusCode::OK, Json(chart)).into_response(),
        None => ErrorResponse::bad_request("Invalid date/time format").into_response(),
    }
}

/// POST /api/compatibility - Compute charts for 2+ subjects and compare
async fn calculate_compatibility(
    Json(request): Json<CompatibilityRequest>,
) -> impl IntoResponse {
    let charts: Vec<Chart> = request
        .subjects
        .iter()
        .filter_map(compute_from_request)
        .collect();

    match compatibility(&charts) {
        Some(report) => {
            (StatusCode::OK, Json(CompatibilityResponse { charts, report })).into_response()
        }
        None => {
            ErrorResponse::bad_request("Compatibility needs at least 2 valid subjects")
                .into_response()
        }
    }
}

/// GET /api/regions - Province/city/district dataset for the location picker
async fn get_regions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.regions.as_ref().clone())
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🀄 BaZi Calculator - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Location data is optional metadata: a failed fetch degrades to the
    // embedded subset and never blocks chart computation.
    println!("Loading regions dataset...");
    let regions = GeoDataset::load_or_embedded(REGIONS_URL).await;
    println!("✓ Regions loaded: {} provinces", regions.provinces.len());

    let state = AppState {
        regions: Arc::new(regions),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/chart", post(calculate_chart))
        .route("/compatibility", post(calculate_compatibility))
        .route("/regions", get(get_regions))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/chart");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
