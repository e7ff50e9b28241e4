//! HTTP routes of the calendar service

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{TimeZone, Utc};
use tower::ServiceExt;

use dart_calendar::cache::Cache;
use dart_calendar::config::Settings;
use dart_calendar::error::Result;
use dart_calendar::server::router;
use dart_calendar::traits::MatchSource;
use dart_calendar::{Competition, Error, MatchNumber, MatchRecord, Participant, Provider, TeamId};

struct FixedSource {
    programs: HashMap<TeamId, Vec<MatchRecord>>,
}

#[async_trait]
impl MatchSource for FixedSource {
    async fn fetch_matches(&self, team_id: TeamId) -> Result<Vec<MatchRecord>> {
        self.programs.get(&team_id)
            .cloned()
            .ok_or(Error::UpstreamStatus { team_id, status: reqwest::StatusCode::INTERNAL_SERVER_ERROR })
    }
}

fn app() -> axum::Router {
    let record = MatchRecord {
        match_number: Some(MatchNumber::Number(9)),
        start: Some(Utc.with_ymd_and_hms(2030, 3, 5, 18, 0, 0).unwrap()),
        home: Some(Participant { id: Some(5), name: Some("Pilen 1".to_string()) }),
        away: None,
        competition: Some(Competition { name: Some("Serie 1".to_string()) }),
    };
    let mut programs = HashMap::new();
    programs.insert(5, vec![record]);

    let provider = Provider::new(FixedSource { programs }, Cache::new(), &Settings::default()).unwrap();
    router(Arc::new(provider))
}

async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn serves_calendars() {
    let (status, headers, body) = get("/?teamIds=5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/calendar; charset=utf-8");
    assert_eq!(headers[header::CONTENT_DISPOSITION], "inline; filename=dart-kampprogram.ics");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=900");
    assert!(body.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(body.contains("\r\nSUMMARY:Serie 1: Pilen 1 vs Away\r\n"));
}

#[tokio::test]
async fn rejects_invalid_requests() {
    let (status, _, body) = get("/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing required query params: teamIds");

    let (status, _, body) = get("/?teamIds=1,2,3,4,5,6,7,8,9,10,11").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid number of teamIds (1–10 allowed)");

    let (status, _, _) = get("/?teamIds=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_errors_are_bad_gateways() {
    let (status, _, body) = get("/?teamIds=6").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("teamId 6"));
}
