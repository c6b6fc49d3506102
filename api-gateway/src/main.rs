//! HaulHub API Gateway
//!
//! Quote previews over HTTP for the job-creation form, the pricing preview
//! widget and the escrow funding flow:
//! - Regions: supported markets and their tariffs
//! - Quotes: price = ⌈(base + distance + weight) × rush × (1 - eco)⌉₀.₅

mod config;

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use haulhub_common::{
    measure_from_json, HaulHubError, InputField, InvalidInputError, PriceQuote, RegionTariff,
    TripRequest,
};
use haulhub_pricing::{PricingEngine, QuoteSummary, TariffTable};
use serde::{Deserialize, Serialize};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::config::GatewayConfig;

// ============ STATE ============

#[derive(Clone)]
struct AppState {
    engine: Arc<PricingEngine>,
    quote_validity: chrono::Duration,
}

// ============ REQUEST TYPES ============

/// Quote request as sent by forms and the escrow flow.
///
/// Measurements are kept as raw values so that a missing or non-numeric
/// field is reported by name instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest {
    region: Option<String>,
    distance: Option<serde_json::Value>,
    weight: Option<serde_json::Value>,
    is_rush: Option<bool>,
    vehicle_type: Option<String>,
}

impl QuoteRequest {
    fn into_trip(self) -> Result<TripRequest, InvalidInputError> {
        let distance = measure_from_json(InputField::Distance, self.distance.as_ref())?;
        let weight = measure_from_json(InputField::Weight, self.weight.as_ref())?;

        Ok(
            TripRequest::new(self.region.unwrap_or_default(), distance, weight)
                .with_rush(self.is_rush.unwrap_or(false))
                .with_vehicle(self.vehicle_type.unwrap_or_default()),
        )
    }
}

// ============ RESPONSE TYPES ============

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    quote_id: uuid::Uuid,
    quote: PriceQuote,
    display: QuoteSummary,
    computed_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionSummary {
    code: String,
    name: String,
    currency_code: String,
    currency_symbol: String,
    distance_unit: String,
    weight_unit: String,
}

impl From<&RegionTariff> for RegionSummary {
    fn from(tariff: &RegionTariff) -> Self {
        Self {
            code: tariff.region_code.clone(),
            name: tariff.region_name.clone(),
            currency_code: tariff.currency_code.clone(),
            currency_symbol: tariff.currency_symbol.clone(),
            distance_unit: tariff.distance_unit().to_string(),
            weight_unit: tariff.weight_unit().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<InputField>,
    message: String,
}

enum ApiError {
    InvalidInput(InvalidInputError),
    BadRequest(String),
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<InvalidInputError> for ApiError {
    fn from(err: InvalidInputError) -> Self {
        ApiError::InvalidInput(err)
    }
}

impl From<HaulHubError> for ApiError {
    fn from(err: HaulHubError) -> Self {
        match err {
            HaulHubError::InvalidInput(err) => ApiError::InvalidInput(err),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(err) => {
                warn!(field = %err.field(), "Rejected quote request: {}", err);
                let body = ErrorBody {
                    error: "invalid_input",
                    field: Some(err.field()),
                    message: err.to_string(),
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::BadRequest(message) => {
                warn!("Rejected malformed quote request: {}", message);
                let body = ErrorBody {
                    error: "invalid_request",
                    field: None,
                    message,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Internal(message) => {
                error!("Quote failed: {}", message);
                let body = ErrorBody {
                    error: "internal",
                    field: None,
                    message: "internal error".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

// ============ HANDLERS ============

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "tariffVersion": state.engine.tariffs().version(),
        "regions": state.engine.tariffs().len(),
    }))
}

async fn list_regions(State(state): State<AppState>) -> Json<Vec<RegionSummary>> {
    Json(
        state
            .engine
            .tariffs()
            .regions()
            .into_iter()
            .map(RegionSummary::from)
            .collect(),
    )
}

/// Unknown codes return the fallback tariff, mirroring quote pricing
async fn get_region(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Json<RegionTariff> {
    Json(state.engine.get_tariff(&code).clone())
}

async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Json(req) = payload?;
    issue_quote(&state, req).map(Json)
}

async fn preview_quote(
    State(state): State<AppState>,
    query: Result<Query<QuoteRequest>, QueryRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Query(req) = query?;
    issue_quote(&state, req).map(Json)
}

fn issue_quote(state: &AppState, req: QuoteRequest) -> Result<QuoteResponse, ApiError> {
    let trip = req.into_trip()?;
    let quote = state.engine.quote(&trip)?;
    let display = QuoteSummary::new(&quote, state.engine.get_tariff(&quote.region_code));

    let computed_at = Utc::now();
    let response = QuoteResponse {
        quote_id: uuid::Uuid::new_v4(),
        quote,
        display,
        computed_at,
        expires_at: computed_at + state.quote_validity,
    };

    info!(
        quote_id = %response.quote_id,
        region = %response.quote.region_code,
        price_usd = %response.quote.price_usd,
        "Issued quote"
    );
    Ok(response)
}

fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Regions
        .route("/regions", get(list_regions))
        .route("/regions/:code", get(get_region))
        // Quotes
        .route("/quotes", get(preview_quote).post(create_quote))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Received shutdown signal");
}

// ============ MAIN ============

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_gateway=info".parse()?)
                .add_directive("haulhub_pricing=info".parse()?),
        )
        .json()
        .init();

    let config = GatewayConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    // A broken tariff table must stop the gateway before it serves quotes
    let tariffs = match &config.tariffs_path {
        Some(path) => TariffTable::from_path(path)?,
        None => TariffTable::builtin()?,
    };
    let engine = PricingEngine::new(tariffs);

    let state = AppState {
        engine: Arc::new(engine),
        quote_validity: config.quote_validity()?,
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    info!("HaulHub API Gateway starting on {}", addr);
    info!("Endpoints: /health, /regions, /regions/:code, /quotes");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HaulHub API Gateway stopped");
    Ok(())
}
