//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cli::{generate as cli_generate, inspect as cli_inspect};
use crate::config::JobConfig;
use crate::types::Service;

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "Ratio Forge API Server".to_string(),
        version: state.version.clone(),
        description: "Multi-ratio staffing workbook generation".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/generate",
                "POST",
                "Generate a ratio workbook from a roster",
            ),
            EndpointInfo::new(
                "/api/v1/inspect",
                "POST",
                "Report candidate columns of a roster",
            ),
        ],
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub services: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        services: Service::ALL.iter().map(|s| s.to_string()).collect(),
    }))
}

/// Generate request
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub input_path: String,
    pub range: String,
    #[serde(default)]
    pub service: Option<Service>,
    pub output_path: String,
    #[serde(default)]
    pub sheet: Option<String>,
}

/// Generate response
#[derive(Serialize, Default)]
pub struct GenerateResponse {
    pub generated: bool,
    pub output_path: String,
    pub sheets: Vec<String>,
    pub message: String,
}

/// POST /api/v1/generate - Build a ratio workbook
pub async fn generate(Json(req): Json<GenerateRequest>) -> impl IntoResponse {
    let flags = JobConfig {
        range: Some(req.range),
        service: req.service,
        output: Some(req.output_path.clone()),
        sheet: req.sheet,
    };

    match cli_generate(PathBuf::from(&req.input_path), flags, None, false) {
        Ok(report) => Json(ApiResponse::ok(GenerateResponse {
            generated: true,
            output_path: report.output_path.display().to_string(),
            message: format!("Generated {} worksheets", report.sheets.len()),
            sheets: report.sheets,
        })),
        Err(e) => Json(ApiResponse::ok(GenerateResponse {
            generated: false,
            output_path: req.output_path,
            sheets: Vec::new(),
            message: e.to_string(),
        })),
    }
}

/// Inspect request
#[derive(Debug, Deserialize)]
pub struct InspectRequest {
    pub input_path: String,
    #[serde(default)]
    pub sheet: Option<String>,
}

/// Inspect response
#[derive(Serialize, Default)]
pub struct InspectResponse {
    pub headers: Vec<String>,
    pub rows: usize,
    pub candidate_columns: Vec<String>,
    pub total_candidate_column: Option<String>,
    pub max_candidate_sum: Option<i64>,
}

/// POST /api/v1/inspect - Report detected columns
pub async fn inspect(Json(req): Json<InspectRequest>) -> impl IntoResponse {
    match cli_inspect(PathBuf::from(&req.input_path), req.sheet) {
        Ok(report) => Json(ApiResponse::ok(InspectResponse {
            headers: report.headers,
            rows: report.rows,
            candidate_columns: report.candidate_columns,
            total_candidate_column: report.total_candidate_column,
            max_candidate_sum: report.max_candidate_sum,
        })),
        Err(e) => Json(ApiResponse::<InspectResponse>::err(e.to_string())),
    }
}
