use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::optimizer::OptimizationSuggestion;
use crate::matching::MatchResult;
use crate::models::{JobDescription, Resume};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct JdQuery {
    #[serde(rename = "jdId")]
    pub jd_id: Option<String>,
}

impl JdQuery {
    fn jd_id(&self) -> Result<Uuid, AppError> {
        let raw = self
            .jd_id
            .as_deref()
            .ok_or_else(|| AppError::Validation("jdId query parameter is required".to_string()))?;
        Uuid::parse_str(raw)
            .map_err(|_| AppError::Validation(format!("jdId '{raw}' is not a valid UUID")))
    }
}

async fn load_pair(
    state: &AppState,
    resume_id: Uuid,
    query: &JdQuery,
) -> Result<(Resume, JobDescription), AppError> {
    let jd_id = query.jd_id()?;
    let resume = state.store.get_resume(resume_id).await?;
    let jd = state.store.get_job_description(jd_id).await?;
    Ok((resume, jd))
}

/// POST /resumes/:id/match?jdId=
pub async fn handle_match(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<JdQuery>,
) -> Result<Json<MatchResult>, AppError> {
    let (resume, jd) = load_pair(&state, resume_id, &query).await?;
    let result = state.matcher.match_resume(&resume, &jd)?;
    tracing::info!(
        %resume_id,
        jd_id = %jd.id,
        overall = result.overall_score,
        "match computed"
    );
    Ok(Json(result))
}

/// GET /resumes/:id/optimization-suggestions?jdId=
pub async fn handle_optimization_suggestions(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<JdQuery>,
) -> Result<Json<OptimizationSuggestion>, AppError> {
    let (resume, jd) = load_pair(&state, resume_id, &query).await?;
    Ok(Json(state.matcher.optimize(&resume, &jd)?))
}

/// POST /resumes/:id/optimize?jdId=
/// Applies the optimized summary and skills to the stored resume. Only those two
/// fields are written; with concurrent calls the last write wins.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<JdQuery>,
) -> Result<Json<Resume>, AppError> {
    let (resume, jd) = load_pair(&state, resume_id, &query).await?;
    let suggestion = state.matcher.optimize(&resume, &jd)?;

    let summary = Some(suggestion.optimized_summary).filter(|s| !s.is_empty());
    let skills = Some(suggestion.optimized_skills).filter(|s| !s.is_empty());
    let updated = state
        .store
        .update_summary_and_skills(resume_id, summary, skills)
        .await?;
    tracing::info!(
        %resume_id,
        jd_id = %jd.id,
        added_keywords = suggestion.added_keywords,
        "resume optimized"
    );
    Ok(Json(updated))
}
