//! Matching & Optimization Engine: scores a resume against a job description
//! and proposes vocabulary-level rewrites.
//!
//! Default: `KeywordMatcher` (rule-based, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn ResumeMatcher>`, so handlers never depend on the
//! concrete engine.

pub mod dictionary;
pub mod experience;
pub mod handlers;
pub mod keywords;
pub mod normalizer;
pub mod optimizer;
pub mod scoring;
pub mod suggestions;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{JobDescription, Resume};

use self::optimizer::OptimizationSuggestion;
use self::scoring::{AtsWeights, ScoringWeights};

// ────────────────────────────────────────────────────────────────────────────
// Settings & errors
// ────────────────────────────────────────────────────────────────────────────

/// Tunables fixed at startup. Results are a pure function of the inputs and these.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Dimensions scoring below this get suggestions.
    pub suggestion_threshold: f64,
    pub max_suggestions: usize,
    /// Date that "present" in a date range resolves to.
    pub reference_date: NaiveDate,
    pub weights: ScoringWeights,
    pub ats_weights: AtsWeights,
}

impl EngineSettings {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            suggestion_threshold: 70.0,
            max_suggestions: 6,
            reference_date,
            weights: ScoringWeights::default(),
            ats_weights: AtsWeights::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("job description has no text and no extracted fields")]
    InsufficientInput,
}

pub fn validate_job_description(jd: &JobDescription) -> Result<(), EngineError> {
    if jd.is_blank() {
        return Err(EngineError::InsufficientInput);
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub overall_score: f64,
    pub skills_match_score: f64,
    pub experience_match_score: f64,
    pub ats_score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub strength: String,
    pub weakness: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The matching engine seam. Implement this to swap engines without touching
/// handlers.
///
/// Carried in `AppState` as `Arc<dyn ResumeMatcher>`.
pub trait ResumeMatcher: Send + Sync {
    fn match_resume(&self, resume: &Resume, jd: &JobDescription) -> Result<MatchResult, EngineError>;

    fn optimize(
        &self,
        resume: &Resume,
        jd: &JobDescription,
    ) -> Result<OptimizationSuggestion, EngineError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatcher: default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Dictionary-driven keyword matcher.
///
/// Algorithm:
/// 1. Extract weighted keyword sets from both documents
/// 2. skills = matched job weight / total job weight
/// 3. experience = resume years vs required years (neutral 75 when unstated)
/// 4. ATS = section headers + non-text penalty + keyword density
/// 5. overall = 0.5 × skills + 0.3 × ATS + 0.2 × experience
pub struct KeywordMatcher {
    settings: EngineSettings,
}

impl KeywordMatcher {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }
}

impl ResumeMatcher for KeywordMatcher {
    fn match_resume(&self, resume: &Resume, jd: &JobDescription) -> Result<MatchResult, EngineError> {
        let card = scoring::score(resume, jd, &self.settings)?;
        let feedback = suggestions::generate_suggestions(&card, &self.settings);

        tracing::debug!(
            resume_id = %resume.id,
            jd_id = %jd.id,
            overall = card.overall_score,
            matched = card.matched.len(),
            missing = card.missing.len(),
            "resume matched"
        );

        Ok(MatchResult {
            overall_score: card.overall_score,
            skills_match_score: card.skills_score,
            experience_match_score: card.experience_score,
            ats_score: card.ats_score,
            matched_keywords: card.matched_keywords(),
            missing_keywords: card.missing_keywords(),
            suggestions: feedback.suggestions,
            strength: feedback.strength,
            weakness: feedback.weakness,
        })
    }

    fn optimize(
        &self,
        resume: &Resume,
        jd: &JobDescription,
    ) -> Result<OptimizationSuggestion, EngineError> {
        let result = self.match_resume(resume, jd)?;
        Ok(optimizer::optimize(resume, jd, &result))
    }
}
