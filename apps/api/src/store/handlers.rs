use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{JobDescription, Resume};
use crate::state::AppState;

/// POST /resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(resume): Json<Resume>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let resume = state.store.insert_resume(resume).await?;
    tracing::info!(resume_id = %resume.id, "resume stored");
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(state.store.get_resume(resume_id).await?))
}

/// POST /job-descriptions
pub async fn handle_create_job_description(
    State(state): State<AppState>,
    Json(jd): Json<JobDescription>,
) -> Result<(StatusCode, Json<JobDescription>), AppError> {
    let jd = state.store.insert_job_description(jd).await?;
    tracing::info!(jd_id = %jd.id, "job description stored");
    Ok((StatusCode::CREATED, Json(jd)))
}

/// GET /job-descriptions/:id
pub async fn handle_get_job_description(
    State(state): State<AppState>,
    Path(jd_id): Path<Uuid>,
) -> Result<Json<JobDescription>, AppError> {
    Ok(Json(state.store.get_job_description(jd_id).await?))
}
