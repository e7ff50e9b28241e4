//! HTTP routes serving calendars

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;

use crate::calendar::{CONTENT_TYPE, FILE_NAME};
use crate::error::Error;
use crate::provider::Provider;
use crate::request::CalendarRequest;
use crate::traits::MatchSource;

/// The query parameter listing the requested teams
pub const TEAM_IDS_PARAM: &str = "teamIds";

/// Converts errors to plain text HTTP responses
pub struct AppError(Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status != StatusCode::BAD_REQUEST {
            log::error!("Unable to serve a calendar: {}", self.0);
        }
        (status, self.0.to_string()).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

/// The routes of the calendar service
pub fn router<S>(provider: Arc<Provider<S>>) -> Router
where
    S: MatchSource + 'static,
{
    Router::new()
        .route("/", get(serve_calendar::<S>))
        .with_state(provider)
}

async fn serve_calendar<S>(
    State(provider): State<Arc<Provider<S>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError>
where
    S: MatchSource + 'static,
{
    let request = CalendarRequest::parse(params.get(TEAM_IDS_PARAM).map(String::as_str), provider.max_team_ids())?;
    let ics = provider.calendar(&request, Utc::now()).await?;

    let cache_control = format!("public, max-age={}", provider.calendar_ttl().num_seconds());
    let disposition = format!("inline; filename={}", FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, cache_control),
        ],
        ics,
    ).into_response())
}
