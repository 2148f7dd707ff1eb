use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cn_core::{AnalyzedArticle, Error, RawArticle};
use serde_json::json;

use crate::AppState;

/// Maps pipeline errors onto HTTP responses with a JSON `error` body.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            Error::Retrieval(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!("Request failed with {}: {}", status, self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(company): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let output = state.pipeline.run(&company).await?;
    Ok(Json(output))
}

pub async fn analyze_articles(
    State(state): State<Arc<AppState>>,
    Json(articles): Json<Vec<RawArticle>>,
) -> Result<impl IntoResponse, ApiError> {
    let analyzed = state.pipeline.analyze_articles(articles).await?;
    Ok(Json(analyzed))
}

pub async fn build_report(
    State(state): State<Arc<AppState>>,
    Json(articles): Json<Vec<AnalyzedArticle>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.pipeline.build_report(&articles)?;
    Ok(Json(report))
}
