use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::controllers::extract::ApiJson;
use crate::error::EngineError;
use crate::models::energy::{
    DailyViewQuery, DisplayFilter, ExportView, PanelConfiguration, PanelConfigurationRequest,
    SeriesResponse, ViewResponse, YearlyScope, YearlyViewQuery,
};
use crate::services::csv_export::{self, ExportFile};
use crate::services::view_filter;
use crate::shared_state::{AppState, Snapshot};

fn committed(state: &AppState) -> Result<Snapshot, (StatusCode, Json<serde_json::Value>)> {
    state.get_snapshot().ok_or_else(|| {
        tracing::error!("snapshot lock poisoned");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Series unavailable"})),
        )
    })
}

fn series_response(snap: Snapshot) -> SeriesResponse {
    SeriesResponse {
        generation: snap.generation,
        generated_at: snap.generated_at,
        nominal_daily_energy: snap.nominal_daily_energy,
        series: snap.series,
    }
}

/// GET /api/configuration
/// Current panel configuration
#[utoipa::path(
    get,
    path = "/api/configuration",
    responses(
        (status = 200, description = "Configuration behind the committed series", body = PanelConfiguration),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_configuration(State(state): State<AppState>) -> impl IntoResponse {
    match committed(&state) {
        Ok(snap) => Json(snap.configuration).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /api/configuration
/// Replace the configuration and regenerate all series
///
/// Hourly, daily and yearly series are regenerated together with fresh noise.
/// An invalid configuration is rejected and the previous series stay in place.
/// A change overtaken by a later one answers 409 with nothing published.
#[utoipa::path(
    put,
    path = "/api/configuration",
    request_body = PanelConfigurationRequest,
    responses(
        (status = 200, description = "Newly generated series", body = SeriesResponse),
        (status = 400, description = "Invalid configuration or unknown month"),
        (status = 409, description = "Superseded by a later configuration change")
    )
)]
pub async fn put_configuration(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PanelConfigurationRequest>,
) -> Result<Json<SeriesResponse>, EngineError> {
    let configuration = PanelConfiguration::try_from(request)?;
    let snap = state.apply_configuration(configuration)?;
    Ok(Json(series_response(snap)))
}

/// GET /api/series
/// All three series from the last regeneration
#[utoipa::path(
    get,
    path = "/api/series",
    responses(
        (status = 200, description = "Hourly, daily and yearly series", body = SeriesResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_series(State(state): State<AppState>) -> impl IntoResponse {
    match committed(&state) {
        Ok(snap) => Json(series_response(snap)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /api/filter
#[utoipa::path(
    get,
    path = "/api/filter",
    responses(
        (status = 200, description = "Current display filter", body = DisplayFilter)
    )
)]
pub async fn get_filter(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.get_filter())
}

/// PUT /api/filter
/// Change which views are presented. Does not regenerate series.
#[utoipa::path(
    put,
    path = "/api/filter",
    request_body = DisplayFilter,
    responses(
        (status = 200, description = "Stored display filter", body = DisplayFilter),
        (status = 400, description = "Malformed filter")
    )
)]
pub async fn put_filter(
    State(state): State<AppState>,
    ApiJson(filter): ApiJson<DisplayFilter>,
) -> impl IntoResponse {
    state.set_filter(filter.clone());
    Json(filter)
}

/// GET /api/views/daily
/// Hourly or daily-in-month series, per the filter
#[utoipa::path(
    get,
    path = "/api/views/daily",
    params(DailyViewQuery),
    responses(
        (status = 200, description = "Short-range view", body = ViewResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_daily_view(
    State(state): State<AppState>,
    Query(query): Query<DailyViewQuery>,
) -> impl IntoResponse {
    let granularity = query.granularity.unwrap_or(state.get_filter().daily_granularity);
    match committed(&state) {
        Ok(snap) => {
            let points =
                view_filter::select_daily_view(&snap.series.hourly, &snap.series.daily, granularity).clone();
            Json(ViewResponse { generation: snap.generation, points }).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/views/yearly
/// Whole-year series, or a single month
///
/// A scope naming no month yields an empty list.
#[utoipa::path(
    get,
    path = "/api/views/yearly",
    params(YearlyViewQuery),
    responses(
        (status = 200, description = "Yearly view", body = ViewResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_yearly_view(
    State(state): State<AppState>,
    Query(query): Query<YearlyViewQuery>,
) -> impl IntoResponse {
    let scope = match query.scope {
        Some(s) => YearlyScope::from(s.as_str()),
        None => state.get_filter().yearly_scope,
    };
    match committed(&state) {
        Ok(snap) => {
            let points = view_filter::select_yearly_view(&snap.series.yearly, &scope);
            Json(ViewResponse { generation: snap.generation, points }).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /api/export/{view}
/// Download the presented view as CSV
///
/// `daily` exports `HourlyData.csv` or `DailyData.csv` depending on the filter;
/// `yearly` exports `YearlyData.csv` with the yearly scope applied.
#[utoipa::path(
    get,
    path = "/api/export/{view}",
    params(
        ("view" = String, Path, description = "\"daily\" or \"yearly\"")
    ),
    responses(
        (status = 200, description = "CSV file", body = String, content_type = "text/csv"),
        (status = 400, description = "Unknown view"),
        (status = 422, description = "Presented view is empty")
    )
)]
pub async fn export_csv(
    Path(view): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let filter = state.get_filter();
    let snap = match committed(&state) {
        Ok(snap) => snap,
        Err(e) => return e.into_response(),
    };

    match render_export(&view, &snap, &filter) {
        Ok(file) => {
            tracing::info!(file = %file.file_name, generation = snap.generation, "export generated");
            let disposition = format!("attachment; filename=\"{}\"", file.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.mime.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.content,
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}

fn render_export(
    view: &str,
    snap: &Snapshot,
    filter: &DisplayFilter,
) -> Result<ExportFile, EngineError> {
    let view = ExportView::resolve(view, filter.daily_granularity)?;
    match view {
        ExportView::Daily(granularity) => {
            let points =
                view_filter::select_daily_view(&snap.series.hourly, &snap.series.daily, granularity);
            csv_export::export_view(points, view)
        }
        ExportView::Yearly => {
            let points = view_filter::select_yearly_view(&snap.series.yearly, &filter.yearly_scope);
            csv_export::export_view(&points, view)
        }
    }
}
