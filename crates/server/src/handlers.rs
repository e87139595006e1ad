use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use remitscan_core::{classify, EngineError, ReviewPolicy, ReviewReport, VendorRules};
use remitscan_import::{read_transactions, CsvError};
use remitscan_report::{bundle, bundle_name, render_report, BundleError, RenderError};

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: ReviewReport,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no file provided")]
    MissingFile,
    #[error("invalid upload: {0}")]
    Multipart(#[from] MultipartError),
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::Multipart(_)
            | ApiError::Csv(CsvError::NoDataRows)
            | ApiError::Engine(EngineError::NoTransactions) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request failed");
        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Pulls the uploaded export out of the multipart form (field name `file`).
async fn upload_bytes(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(field.bytes().await?.to_vec());
        }
    }
    Err(ApiError::MissingFile)
}

async fn run_review(multipart: &mut Multipart) -> Result<ReviewReport, ApiError> {
    let data = upload_bytes(multipart).await?;
    let records = read_transactions(data.as_slice())?;
    let report = classify(&records, &VendorRules::default(), &ReviewPolicy::default())?;
    Ok(report)
}

/// Classifies an uploaded export and returns the three tables plus stats
/// as JSON.
pub async fn process(mut multipart: Multipart) -> Result<Json<ProcessResponse>, ApiError> {
    let report = run_review(&mut multipart).await?;
    Ok(Json(ProcessResponse {
        success: true,
        report,
    }))
}

/// Classifies an uploaded export and returns the rendered reports as a
/// dated tar.gz download.
pub async fn process_archive(mut multipart: Multipart) -> Result<Response, ApiError> {
    let report = run_review(&mut multipart).await?;
    let rendered = render_report(&report)?;
    let archive = bundle(&rendered)?;
    let name = bundle_name(Utc::now().date_naive());

    let headers = [
        (header::CONTENT_TYPE, "application/gzip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        ),
    ];
    Ok((headers, archive).into_response())
}
