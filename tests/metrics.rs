// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use std::time::Duration;
use tower::ServiceExt;

#[tokio::test]
async fn metrics_endpoint_exposes_dashboard_series() {
    let app = etl_pipeline_monitor::build_app(etl_pipeline_monitor::DashboardConfig::default())
        .expect("build_app should succeed in tests");

    {
        let mut d = app.dashboard.lock();
        d.advance(Duration::from_secs(5));
        d.clear_logs();
        d.select_filter("database".parse().unwrap());
    }

    let resp = app
        .router
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    for needle in [
        "monitor_task_runs_total",
        "monitor_log_records_total",
        "monitor_logs_cleared_total",
        "monitor_filter_changes_total",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
    assert!(text.contains(r#"task="logs""#), "{text}");
}

#[tokio::test]
async fn building_twice_reuses_the_recorder() {
    let a = etl_pipeline_monitor::build_app(etl_pipeline_monitor::DashboardConfig::default());
    let b = etl_pipeline_monitor::build_app(etl_pipeline_monitor::DashboardConfig::default());
    assert!(a.is_ok() && b.is_ok());
}
