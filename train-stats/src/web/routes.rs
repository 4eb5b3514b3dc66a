//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::{Datelike, Local};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::api::ApiError;
use crate::domain::{Crs, Stats};
use crate::ranking::{TableConfig, TableState};
use crate::tables::{classes, legs, operators, stations, units};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/years/:year", get(year_page))
        .route("/years/:year/geometry.json", get(year_geometry))
        .route("/legs", get(all_legs_page))
        .route("/legs/years/:year", get(leg_list_page))
        .route("/legs/:id", get(leg_page))
        .route("/stations", get(station_list_page))
        .route("/stations/:crs", get(station_page))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

fn render(template: impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// A year in a path: a positive integer.
fn parse_year(s: &str) -> Result<i32, AppError> {
    s.parse::<i32>()
        .ok()
        .filter(|&year| year > 0)
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid year: {}", s),
        })
}

/// A leg id in a path: a positive integer.
fn parse_leg_id(s: &str) -> Result<i64, AppError> {
    s.parse::<i64>()
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid leg id: {}", s),
        })
}

/// Years linked from the index, newest first.
fn index_years(first_year: i32, current_year: i32) -> Vec<i32> {
    (first_year..=current_year).rev().collect()
}

/// Index page with a link per year.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let years = index_years(state.config.first_year, Local::now().year());
    render(IndexTemplate { years })
}

/// Build a year's tables with the states carried in `query`. The class and
/// unit tables are left out when there is nothing to show.
fn year_tables(stats: &Stats, query: &YearQuery, config: &TableConfig, year: i32) -> Vec<TableView> {
    let stations = stations::table(stats.station_stats.clone(), config)
        .with_state(query.stations.as_deref());
    let operators = operators::table(stats.operator_stats.clone(), config)
        .with_state(query.operators.as_deref());
    let classes = (!stats.class_stats.is_empty()).then(|| {
        classes::table(stats.class_stats.clone(), config).with_state(query.classes.as_deref())
    });
    let units = (!stats.unit_stats.is_empty()).then(|| {
        units::table(stats.unit_stats.clone(), config).with_state(query.units.as_deref())
    });
    let legs = legs::table(stats.leg_stats.clone(), config).with_state(query.legs.as_deref());

    let mut states: Vec<(&'static str, TableState)> = vec![
        (stations.param, stations.table.state()),
        (operators.param, operators.table.state()),
    ];
    if let Some(t) = &classes {
        states.push((t.param, t.table.state()));
    }
    if let Some(t) = &units {
        states.push((t.param, t.table.state()));
    }
    states.push((legs.param, legs.table.state()));

    let base = format!("/years/{}", year);
    let mut views = vec![
        TableView::build(&stations, &base, &states),
        TableView::build(&operators, &base, &states),
    ];
    if let Some(t) = &classes {
        views.push(TableView::build(t, &base, &states));
    }
    if let Some(t) = &units {
        views.push(TableView::build(t, &base, &states));
    }
    views.push(TableView::build(&legs, &base, &states));
    views
}

/// A year's statistics and tables.
async fn year_page(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Html<String>, AppError> {
    let year = parse_year(&year)?;

    let (stats, legs) = futures::future::join(
        state.source.stats_for_year(year),
        state.source.legs_for_year(year),
    )
    .await;

    let stats = stats
        .inspect_err(|e| warn!(year, error = %e, "no stats"))
        .ok();
    let mapped_legs = legs
        .inspect_err(|e| warn!(year, error = %e, "no legs"))
        .ok()
        .map(|legs| legs.iter().filter(|leg| leg.geometry.is_some()).count());

    let (summary, tables) = match &stats {
        Some(stats) => (
            Some(SummaryView::from_stats(stats)),
            year_tables(stats, &query, &state.tables, year),
        ),
        None => (None, Vec::new()),
    };

    render(YearTemplate {
        year,
        summary,
        tables,
        mapped_legs,
    })
}

/// GeoJSON routes of a year's legs. Empty when the legs cannot be fetched.
async fn year_geometry(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<FeatureCollection>, AppError> {
    let year = parse_year(&year)?;
    let collection = match state.source.legs_for_year(year).await {
        Ok(legs) => FeatureCollection::from_legs(legs.iter()),
        Err(e) => {
            warn!(year, error = %e, "no legs for geometry");
            FeatureCollection::from_legs(std::iter::empty())
        }
    };
    Ok(Json(collection))
}

/// Every leg of a year in date order.
async fn leg_list_page(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Html<String>, AppError> {
    let year = parse_year(&year)?;
    let legs = match state.source.legs_for_year(year).await {
        Ok(legs) => Some(leg_rows(&legs)),
        Err(e) => {
            warn!(year, error = %e, "no legs");
            None
        }
    };
    render(LegListTemplate {
        year: Some(year),
        legs,
    })
}

/// Every recorded leg in date order.
async fn all_legs_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let legs = match state.source.all_legs().await {
        Ok(legs) => Some(leg_rows(&legs)),
        Err(e) => {
            warn!(error = %e, "no legs");
            None
        }
    };
    render(LegListTemplate { year: None, legs })
}

/// Every station with recorded calls.
async fn station_list_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let stations = match state.source.stations().await {
        Ok(stations) => Some(station_rows(&stations)),
        Err(e) => {
            warn!(error = %e, "no stations");
            None
        }
    };
    render(StationListTemplate { stations })
}

/// One leg in detail.
async fn leg_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_leg_id(&id)?;
    let leg = state.source.leg(id).await?;
    render(LegTemplate {
        leg: LegView::from_leg(&leg),
    })
}

/// One station and the legs that called there.
async fn station_page(
    State(state): State<AppState>,
    Path(crs): Path<String>,
) -> Result<Html<String>, AppError> {
    let crs = Crs::parse_normalized(&crs).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let station = state.source.station(&crs).await?;
    render(StationTemplate {
        station: StationView::from_station(&station),
    })
}

/// Application error type.
///
/// Anything wrong with the request or the data behind it sends the browser
/// back to the index; only a failure to render is an error page.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::NotFound | ApiError::Conversion(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Unavailable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unavailable { message } => {
                warn!(%message, "redirecting to index");
                Redirect::to("/").into_response()
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
