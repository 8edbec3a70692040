use actix_web::{web, HttpResponse};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::analysis::{Dashboard, FilterOptions};
use crate::error::DashboardError;
use crate::io::LoadReport;
use crate::models::FilterCriteria;

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub struct WebError(DashboardError);

impl From<DashboardError> for WebError {
    fn from(e: DashboardError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            DashboardError::ValidationError(_) | DashboardError::ParseError(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            DashboardError::InsufficientData(_) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Query extraction that answers an unparsable value with the JSON error body.
pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        WebError(DashboardError::ParseError(err.to_string())).into()
    })
}

/// Split a comma-separated query value into trimmed, non-empty items.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct OptionsResponse {
    name: String,
    total_listings: usize,
    report: LoadReport,
    /// Rows excluded while loading, shown beside the listing count
    skipped_rows: usize,
    options: FilterOptions,
    default_price_min: f64,
    default_price_max: f64,
}

pub async fn options(state: web::Data<AppState>) -> Result<HttpResponse, WebError> {
    let dataset = state.dataset()?;
    let options = FilterOptions::from_table(&dataset.table);
    Ok(HttpResponse::Ok().json(OptionsResponse {
        name: dataset.table.name.clone(),
        total_listings: dataset.table.len(),
        report: dataset.report.clone(),
        skipped_rows: dataset.report.skipped(),
        default_price_min: state
            .filter_defaults
            .price_min
            .unwrap_or(options.price_floor),
        default_price_max: state
            .filter_defaults
            .price_max
            .unwrap_or(options.price_ceiling),
        options,
    }))
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated neighborhood names; empty means all
    neighborhoods: Option<String>,
    /// Comma-separated room types; empty means all
    room_types: Option<String>,
    price_min: Option<f64>,
    price_max: Option<f64>,
}

pub async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, WebError> {
    let dataset = state.dataset()?;
    let options = FilterOptions::from_table(&dataset.table);

    let price_min = query
        .price_min
        .or(state.filter_defaults.price_min)
        .unwrap_or(options.price_floor);
    let price_max = query
        .price_max
        .or(state.filter_defaults.price_max)
        .unwrap_or(options.price_ceiling);

    let criteria = FilterCriteria::new(price_min, price_max)?
        .with_neighborhoods(split_list(query.neighborhoods.as_deref()))
        .with_room_types(split_list(query.room_types.as_deref()));

    let dash = Dashboard::new(&dataset.table, &state.settings);
    let view = match state.seed {
        Some(seed) => dash.render_with_rng(&criteria, &mut StdRng::seed_from_u64(seed)),
        None => dash.render(&criteria),
    };
    Ok(HttpResponse::Ok().json(view))
}

// ---------------------------------------------------------------------------
// Static file handlers
// ---------------------------------------------------------------------------

pub async fn index_html() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../../static/index.html"))
}
