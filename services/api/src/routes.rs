use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use knowing_me::error::AppError;
use knowing_me::sessions::domain::{QuestionId, Rating, Role};
use knowing_me::sessions::{
    session_router, MatchInsights, QuestionPack, QuestionResult, RatingsCsvImporter,
    RatingsImportError, Session, SessionId, SessionRepository, SessionService,
    DEFAULT_INSIGHT_LIMIT,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct RatingPayload {
    pub(crate) question_id: String,
    pub(crate) rater: Role,
    pub(crate) target: Role,
    pub(crate) value: u8,
}

/// Stateless report request: either inline ratings or a raw CSV export,
/// both scored against the standard pack.
#[derive(Debug, Deserialize)]
pub(crate) struct MatchReportRequest {
    #[serde(default)]
    pub(crate) ratings: Vec<RatingPayload>,
    #[serde(default)]
    pub(crate) ratings_csv: Option<String>,
    #[serde(default)]
    pub(crate) top: Option<usize>,
    #[serde(default)]
    pub(crate) include_results: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchReportResponse {
    pub(crate) data_source: MatchDataSource,
    pub(crate) complete: bool,
    pub(crate) match_percentage: u8,
    pub(crate) insights: MatchInsights,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) results: Option<Vec<QuestionResult>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MatchDataSource {
    Csv,
    Inline,
}

pub(crate) fn with_session_routes<R>(service: Arc<SessionService<R>>) -> axum::Router
where
    R: SessionRepository + 'static,
{
    session_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/match/report",
            axum::routing::post(match_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn match_report_endpoint(
    Json(payload): Json<MatchReportRequest>,
) -> Result<Json<MatchReportResponse>, AppError> {
    let MatchReportRequest {
        ratings,
        ratings_csv,
        top,
        include_results,
    } = payload;

    let pack = QuestionPack::standard();
    let (session, data_source) = if let Some(csv) = ratings_csv {
        let reader = Cursor::new(csv.into_bytes());
        let session = RatingsCsvImporter::from_reader(reader, &pack)?;
        (session, MatchDataSource::Csv)
    } else {
        let mut session = Session::new(SessionId("adhoc".to_string()), &pack);
        for rating in ratings {
            session
                .submit_rating(Rating {
                    question_id: QuestionId(rating.question_id),
                    rater: rating.rater,
                    target: rating.target,
                    value: rating.value,
                })
                .map_err(RatingsImportError::from)?;
        }
        (session, MatchDataSource::Inline)
    };

    let report = session.report();
    let insights = report.insights(top.unwrap_or(DEFAULT_INSIGHT_LIMIT).max(1));

    Ok(Json(MatchReportResponse {
        data_source,
        complete: session.is_complete(),
        match_percentage: insights.match_percentage,
        insights,
        results: include_results.then(|| report.into_results()),
    }))
}
