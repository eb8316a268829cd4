use axum::{routing::get, Router};
use crate::controllers::estimation_controller::{
    // Configuration & generated series
    get_configuration, put_configuration, get_series,
    // Display filter & views
    get_filter, put_filter, get_daily_view, get_yearly_view,
    // Export
    export_csv,
};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/configuration",   get(get_configuration).put(put_configuration))
        .route("/series",          get(get_series))
        .route("/filter",          get(get_filter).put(put_filter))
        .route("/views/daily",     get(get_daily_view))
        .route("/views/yearly",    get(get_yearly_view))
        .route("/export/{view}",   get(export_csv))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::models::energy::{DisplayFilter, PanelConfiguration};

    fn app() -> Router {
        let state =
            AppState::new(PanelConfiguration::default(), DisplayFilter::default(), Some(7)).unwrap();
        Router::new().nest("/api", api_routes(state))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>, Option<String>) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let disposition = res
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec(), disposition)
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes, _) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn february_thin_film() -> Value {
        json!({
            "country": "India",
            "month": "February",
            "panelEfficiencyPercent": 18,
            "panelType": "Thin-Film",
            "years": 1,
            "voltage": 12,
            "current": 5
        })
    }

    #[tokio::test]
    async fn put_configuration_regenerates_series() {
        let app = app();
        let (status, body) = send_json(&app, Method::PUT, "/api/configuration", Some(february_thin_film())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generation"], 1);
        assert!((body["nominal_daily_energy"].as_f64().unwrap() - 38.88).abs() < 1e-9);
        assert_eq!(body["series"]["daily"].as_array().unwrap().len(), 28);
        assert_eq!(body["series"]["hourly"].as_array().unwrap().len(), 24);
        assert_eq!(body["series"]["yearly"].as_array().unwrap().len(), 12);

        let (_, cfg) = send_json(&app, Method::GET, "/api/configuration", None).await;
        assert_eq!(cfg["month"], "February");
        assert_eq!(cfg["panelType"], "Thin-Film");
    }

    #[tokio::test]
    async fn invalid_configuration_is_rejected() {
        let app = app();
        let mut bad = february_thin_film();
        bad["current"] = json!(-5);
        let (status, body) = send_json(&app, Method::PUT, "/api/configuration", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "ConfigurationError");

        let (_, series) = send_json(&app, Method::GET, "/api/series", None).await;
        assert_eq!(series["generation"], 0);
    }

    #[tokio::test]
    async fn unknown_month_is_an_invalid_month_error() {
        let app = app();
        let mut bad = february_thin_film();
        bad["month"] = json!("Smarch");
        let (status, body) = send_json(&app, Method::PUT, "/api/configuration", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidMonthError");
        assert_eq!(body["message"], "Unknown month: Smarch");

        let (_, series) = send_json(&app, Method::GET, "/api/series", None).await;
        assert_eq!(series["generation"], 0);
    }

    #[tokio::test]
    async fn malformed_bodies_answer_with_json_errors() {
        let app = app();
        let (status, body) =
            send_json(&app, Method::PUT, "/api/configuration", Some(json!({"month": "May"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "MalformedBody");

        let (status, body) = send_json(
            &app,
            Method::PUT,
            "/api/filter",
            Some(json!({"dailyGranularity": "weekly"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "MalformedBody");
    }

    #[tokio::test]
    async fn views_follow_filter_and_overrides() {
        let app = app();
        let (_, daily) = send_json(&app, Method::GET, "/api/views/daily", None).await;
        assert_eq!(daily["points"].as_array().unwrap().len(), 31);

        let (_, hourly) = send_json(&app, Method::GET, "/api/views/daily?granularity=hourly", None).await;
        assert_eq!(hourly["points"][0]["name"], "0:00");

        let (_, march) = send_json(&app, Method::GET, "/api/views/yearly?scope=March", None).await;
        let points = march["points"].as_array().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["name"], "March");

        let (status, none) = send_json(&app, Method::GET, "/api/views/yearly?scope=Marzo", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(none["points"].as_array().unwrap().is_empty());

        let (_, overall) = send_json(&app, Method::GET, "/api/views/yearly", None).await;
        assert_eq!(overall["points"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn export_uses_presented_view() {
        let app = app();
        let (status, body, disposition) = send(&app, Method::GET, "/api/export/daily", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(disposition.as_deref(), Some("attachment; filename=\"DailyData.csv\""));
        let text = String::from_utf8(body).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "name,energy");
        assert_eq!(lines.len(), 32);
        assert!(lines[1].starts_with("Day 1,"));

        let (status, _) = send_json(
            &app,
            Method::PUT,
            "/api/filter",
            Some(json!({"dailyGranularity": "hourly", "yearlyScope": "June"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body, disposition) = send(&app, Method::GET, "/api/export/daily", None).await;
        assert_eq!(disposition.as_deref(), Some("attachment; filename=\"HourlyData.csv\""));
        assert_eq!(String::from_utf8(body).unwrap().split('\n').count(), 25);

        let (_, body, disposition) = send(&app, Method::GET, "/api/export/yearly", None).await;
        assert_eq!(disposition.as_deref(), Some("attachment; filename=\"YearlyData.csv\""));
        let text = String::from_utf8(body).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("June,"));
    }

    #[tokio::test]
    async fn export_errors() {
        let app = app();
        let (status, body) = send_json(&app, Method::GET, "/api/export/weekly", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "UnknownExportView");

        send_json(&app, Method::PUT, "/api/filter", Some(json!({"yearlyScope": "Smarch"}))).await;
        let (status, body) = send_json(&app, Method::GET, "/api/export/yearly", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "EmptySeriesError");
    }
}
