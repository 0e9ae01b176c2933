use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::facts::{FactSet, FactValue};
use super::service::{
    CategoryCatalog, DangerSignService, ScreeningError, ScreeningMetadata, ServiceHealth,
};

/// Request body for single-field evaluation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEvaluationRequest {
    #[serde(default)]
    pub patient_id: String,
    pub field: String,
    pub value: FactValue,
    #[serde(default)]
    pub context: Option<FactSet>,
    #[serde(default)]
    pub metadata: Option<ScreeningMetadata>,
}

/// Request body for bulk symptom evaluation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEvaluationRequest {
    #[serde(default)]
    pub patient_id: String,
    pub symptoms: FactSet,
    #[serde(default)]
    pub metadata: Option<ScreeningMetadata>,
}

/// Routes for danger-sign evaluation and rule-set introspection.
pub fn danger_sign_router(service: Arc<DangerSignService>) -> Router {
    Router::new()
        .route("/api/v1/danger-signs/evaluate", post(evaluate_field_handler))
        .route(
            "/api/v1/danger-signs/evaluate/bulk",
            post(evaluate_bulk_handler),
        )
        .route("/api/v1/danger-signs/categories", get(categories_handler))
        .route("/api/v1/danger-signs/health", get(health_handler))
        .with_state(service)
}

pub(crate) async fn evaluate_field_handler(
    State(service): State<Arc<DangerSignService>>,
    axum::Json(request): axum::Json<FieldEvaluationRequest>,
) -> Response {
    let FieldEvaluationRequest {
        patient_id,
        field,
        value,
        context,
        metadata,
    } = request;

    match service.evaluate_field(
        &patient_id,
        &field,
        value,
        context.as_ref(),
        metadata.as_ref(),
    ) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => invalid_request(error),
    }
}

pub(crate) async fn evaluate_bulk_handler(
    State(service): State<Arc<DangerSignService>>,
    axum::Json(request): axum::Json<BulkEvaluationRequest>,
) -> Response {
    let BulkEvaluationRequest {
        patient_id,
        symptoms,
        metadata,
    } = request;

    match service.evaluate_symptoms(&patient_id, &symptoms, metadata.as_ref()) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => invalid_request(error),
    }
}

pub(crate) async fn categories_handler(
    State(service): State<Arc<DangerSignService>>,
) -> axum::Json<CategoryCatalog> {
    axum::Json(service.categories().clone())
}

pub(crate) async fn health_handler(
    State(service): State<Arc<DangerSignService>>,
) -> axum::Json<ServiceHealth> {
    axum::Json(service.health())
}

fn invalid_request(error: ScreeningError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
