//! Scoring engine: skills, experience and ATS sub-scores plus the weighted overall.

use crate::matching::experience::ExperienceSignal;
use crate::matching::keywords::{extract_job_keywords, KeywordSet, ResumeProfile};
use crate::matching::{validate_job_description, EngineError, EngineSettings};
use crate::models::resume::{non_blank, JobDescription, Resume};

/// Weights of the overall score. Skills heaviest, then ATS, then experience.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub ats: f64,
    pub experience: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            ats: 0.3,
            experience: 0.2,
        }
    }
}

/// Points each ATS component contributes; they sum to 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtsWeights {
    pub sections: f64,
    pub non_text: f64,
    pub density: f64,
}

impl Default for AtsWeights {
    fn default() -> Self {
        Self {
            sections: 40.0,
            non_text: 20.0,
            density: 40.0,
        }
    }
}

/// Standard sections an ATS looks for, with their share of the sections component.
pub const ATS_SECTIONS: &[(&str, f64)] = &[
    ("summary", 0.25),
    ("experience", 0.25),
    ("education", 0.25),
    ("skills", 0.25),
];

/// Keyword density (job keyword hits per resume content token) that earns full credit.
pub const DENSITY_LOW: f64 = 0.02;
/// Above this, density reads as stuffing and credit decays.
pub const DENSITY_HIGH: f64 = 0.10;
const DENSITY_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub keyword: String,
    pub display: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtsBreakdown {
    pub sections: f64,
    pub missing_sections: Vec<&'static str>,
    pub non_text: f64,
    pub non_text_elements: u32,
    pub density: f64,
    pub keyword_density: f64,
}

/// Full scoring result, before suggestions are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub ats_score: f64,
    pub matched: Vec<KeywordMatch>,
    pub missing: Vec<KeywordMatch>,
    pub job_keyword_weight: f64,
    pub experience: ExperienceSignal,
    pub ats: AtsBreakdown,
}

impl ScoreCard {
    pub fn matched_keywords(&self) -> Vec<String> {
        self.matched.iter().map(|k| k.display.clone()).collect()
    }

    pub fn missing_keywords(&self) -> Vec<String> {
        self.missing.iter().map(|k| k.display.clone()).collect()
    }
}

/// Scores a resume against a job description.
pub fn score(
    resume: &Resume,
    jd: &JobDescription,
    settings: &EngineSettings,
) -> Result<ScoreCard, EngineError> {
    validate_job_description(jd)?;

    let job_keywords = extract_job_keywords(jd);
    let profile = ResumeProfile::build(resume);

    let (matched, missing) = partition_keywords(&job_keywords, &profile);
    let job_keyword_weight = job_keywords.total_weight();
    let skills_raw = if job_keywords.is_empty() {
        100.0
    } else {
        100.0 * matched.iter().map(|k| k.weight).sum::<f64>() / job_keyword_weight
    };

    let experience = ExperienceSignal::read(resume, jd, settings.reference_date);
    let experience_raw = experience.score();

    let ats = ats_breakdown(resume, &job_keywords, &profile, &settings.ats_weights);
    let ats_raw = ats.sections + ats.non_text + ats.density;

    let w = &settings.weights;
    let overall_raw = (w.skills * clamp(skills_raw)
        + w.ats * clamp(ats_raw)
        + w.experience * clamp(experience_raw))
        / (w.skills + w.ats + w.experience);

    Ok(ScoreCard {
        overall_score: round1(overall_raw),
        skills_score: round1(skills_raw),
        experience_score: round1(experience_raw),
        ats_score: round1(ats_raw),
        matched,
        missing,
        job_keyword_weight,
        experience,
        ats,
    })
}

fn partition_keywords(
    job_keywords: &KeywordSet,
    profile: &ResumeProfile,
) -> (Vec<KeywordMatch>, Vec<KeywordMatch>) {
    let (mut matched, mut missing): (Vec<_>, Vec<_>) = job_keywords
        .iter()
        .map(|entry| KeywordMatch {
            keyword: entry.keyword.clone(),
            display: entry.display.clone(),
            weight: entry.weight,
        })
        .partition(|k| profile.has_keyword(&k.keyword));

    matched.sort_by(keyword_order);
    missing.sort_by(keyword_order);
    (matched, missing)
}

/// Descending weight, then case-insensitive display, then key.
fn keyword_order(a: &KeywordMatch, b: &KeywordMatch) -> std::cmp::Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then_with(|| a.display.to_lowercase().cmp(&b.display.to_lowercase()))
        .then_with(|| a.keyword.cmp(&b.keyword))
}

// ────────────────────────────────────────────────────────────────────────────
// ATS heuristic
// ────────────────────────────────────────────────────────────────────────────

fn ats_breakdown(
    resume: &Resume,
    job_keywords: &KeywordSet,
    profile: &ResumeProfile,
    weights: &AtsWeights,
) -> AtsBreakdown {
    let mut sections = 0.0;
    let mut missing_sections = Vec::new();
    for &(section, share) in ATS_SECTIONS {
        if non_blank(section_text(resume, section)).is_some() {
            sections += share * weights.sections;
        } else {
            missing_sections.push(section);
        }
    }

    let non_text = match resume.non_text_elements {
        0 => weights.non_text,
        1..=2 => weights.non_text / 2.0,
        _ => 0.0,
    };

    let content_tokens = profile.tokens.content_token_count();
    let (keyword_density, density) = if content_tokens == 0 {
        (0.0, 0.0)
    } else if job_keywords.is_empty() {
        (0.0, weights.density)
    } else {
        let hits: usize = job_keywords
            .iter()
            .map(|k| profile.tokens.occurrences(&k.keyword))
            .sum();
        let d = hits as f64 / content_tokens as f64;
        (d, weights.density * density_credit(d))
    };

    AtsBreakdown {
        sections,
        missing_sections,
        non_text,
        non_text_elements: resume.non_text_elements,
        density,
        keyword_density,
    }
}

fn section_text<'a>(resume: &'a Resume, section: &str) -> &'a Option<String> {
    match section {
        "summary" => &resume.summary,
        "experience" => &resume.experience,
        "education" => &resume.education,
        _ => &resume.skills,
    }
}

/// Fraction of the density component earned at keyword density `d`.
pub fn density_credit(d: f64) -> f64 {
    if d <= 0.0 {
        0.0
    } else if d < DENSITY_LOW {
        d / DENSITY_LOW
    } else if d <= DENSITY_HIGH {
        1.0
    } else {
        (DENSITY_HIGH / d).max(DENSITY_FLOOR)
    }
}

fn clamp(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

/// Clamps to [0, 100] and rounds to one decimal.
pub fn round1(x: f64) -> f64 {
    (clamp(x) * 10.0).round() / 10.0
}
