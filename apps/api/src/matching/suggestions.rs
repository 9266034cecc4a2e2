//! Suggestion generator: ranked, templated advice from a score card.
//!
//! Each dimension under the threshold emits suggestions tagged with the overall
//! points they could recover. The list is sorted by that gain (stable, so equal
//! gains keep missing-keyword order) and capped.

use crate::matching::dictionary::{dictionary, SkillCategory};
use crate::matching::keywords::REQUIRED_WEIGHT;
use crate::matching::scoring::{KeywordMatch, ScoreCard, ATS_SECTIONS, DENSITY_HIGH};
use crate::matching::EngineSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Skills,
    Ats,
    Experience,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub suggestions: Vec<String>,
    pub strength: String,
    pub weakness: String,
}

struct Candidate {
    text: String,
    gain: f64,
}

pub fn generate_suggestions(card: &ScoreCard, settings: &EngineSettings) -> Feedback {
    let w = &settings.weights;
    let total = w.skills + w.ats + w.experience;
    let threshold = settings.suggestion_threshold;
    let mut candidates = Vec::new();

    if card.skills_score < threshold && card.job_keyword_weight > 0.0 {
        for k in &card.missing {
            candidates.push(Candidate {
                text: keyword_suggestion(k),
                gain: w.skills / total * 100.0 * k.weight / card.job_keyword_weight,
            });
        }
    }

    if card.ats_score < threshold {
        let a = &settings.ats_weights;
        if !card.ats.missing_sections.is_empty() {
            candidates.push(Candidate {
                text: format!(
                    "Add clearly labelled {} section{} so applicant tracking systems can find them.",
                    join_names(&card.ats.missing_sections.iter().map(|s| title_case(s)).collect::<Vec<_>>()),
                    if card.ats.missing_sections.len() == 1 { "" } else { "s" },
                ),
                gain: w.ats / total * (a.sections - card.ats.sections),
            });
        }
        if card.ats.non_text < a.non_text {
            candidates.push(Candidate {
                text: format!(
                    "Replace the {} table, image or column block{} with plain text; parsers often skip them.",
                    card.ats.non_text_elements,
                    if card.ats.non_text_elements == 1 { "" } else { "s" },
                ),
                gain: w.ats / total * (a.non_text - card.ats.non_text),
            });
        }
        let density_gain = w.ats / total * (a.density - card.ats.density);
        if density_gain > 0.0 {
            let text = if card.ats.keyword_density > DENSITY_HIGH {
                "Cut repeated keywords; the resume reads as keyword-stuffed to screening software."
            } else {
                "Use the job's own terminology in your summary and experience bullets to raise keyword density."
            };
            candidates.push(Candidate {
                text: text.to_string(),
                gain: density_gain,
            });
        }
    }

    if card.experience_score < threshold {
        candidates.push(Candidate {
            text: experience_suggestion(card),
            gain: w.experience / total * (100.0 - card.experience_score),
        });
    }

    candidates.sort_by(|a, b| b.gain.total_cmp(&a.gain));
    candidates.truncate(settings.max_suggestions);

    let dimensions = [
        (Dimension::Skills, card.skills_score),
        (Dimension::Ats, card.ats_score),
        (Dimension::Experience, card.experience_score),
    ];

    Feedback {
        suggestions: candidates.into_iter().map(|c| c.text).collect(),
        strength: describe_strength(pick(&dimensions, |a, b| a > b), card),
        weakness: describe_weakness(pick(&dimensions, |a, b| a < b), card),
    }
}

/// First dimension that no later one beats; earlier entries win ties.
fn pick(dimensions: &[(Dimension, f64)], better: impl Fn(f64, f64) -> bool) -> Dimension {
    let mut best = dimensions[0];
    for &candidate in &dimensions[1..] {
        if better(candidate.1, best.1) {
            best = candidate;
        }
    }
    best.0
}

fn keyword_suggestion(k: &KeywordMatch) -> String {
    let category = dictionary().term(&k.keyword).map(|t| t.category);
    let emphasis = if k.weight >= REQUIRED_WEIGHT {
        "it is a core requirement for this role"
    } else {
        "the job description mentions it"
    };

    match category {
        Some(SkillCategory::Certification) => format!(
            "List the {} certification under Certifications if you hold it; {emphasis}.",
            k.display
        ),
        Some(_) => format!(
            "Add {} to your Skills section if you have worked with it; {emphasis}.",
            k.display
        ),
        None => format!(
            "Describe your experience with {} in a project or role bullet; {emphasis}.",
            k.display
        ),
    }
}

fn experience_suggestion(card: &ScoreCard) -> String {
    let signal = &card.experience;
    match (signal.has_experience_text, signal.required_years, signal.resume_years) {
        (false, Some(required), _) => format!(
            "Add an Experience section with roles and dates; the role asks for {} years.",
            years(required)
        ),
        (true, Some(required), Some(found)) => format!(
            "The role asks for {} years and your resume shows about {}. Include earlier roles, internships or long-running projects that count toward it.",
            years(required),
            years(found)
        ),
        _ => "Give each role a start and end date (for example \"Jan 2020 - Present\") so your experience can be measured.".to_string(),
    }
}

fn describe_strength(dimension: Dimension, card: &ScoreCard) -> String {
    match dimension {
        Dimension::Skills if !card.matched.is_empty() => format!(
            "Skills match ({}%): you already cover {}.",
            card.skills_score,
            join_names(&top_displays(&card.matched))
        ),
        Dimension::Skills => format!("Skills match ({}%) is your strongest area.", card.skills_score),
        Dimension::Ats => format!(
            "ATS readiness ({}%): {} of {} standard sections present.",
            card.ats_score,
            ATS_SECTIONS.len() - card.ats.missing_sections.len(),
            ATS_SECTIONS.len()
        ),
        Dimension::Experience => match (card.experience.required_years, card.experience.resume_years) {
            (Some(required), Some(found)) => format!(
                "Experience ({}%): about {} years against {} required.",
                card.experience_score,
                years(found),
                years(required)
            ),
            (None, _) => format!(
                "Experience ({}%): the role states no years requirement.",
                card.experience_score
            ),
            _ => format!("Experience ({}%) is your strongest area.", card.experience_score),
        },
    }
}

fn describe_weakness(dimension: Dimension, card: &ScoreCard) -> String {
    match dimension {
        Dimension::Skills if !card.missing.is_empty() => format!(
            "Skills gap ({}%): missing {}.",
            card.skills_score,
            join_names(&top_displays(&card.missing))
        ),
        Dimension::Skills => format!("Skills match ({}%) is your weakest area.", card.skills_score),
        Dimension::Ats if !card.ats.missing_sections.is_empty() => format!(
            "ATS readiness ({}%): no {} section.",
            card.ats_score,
            join_names(&card.ats.missing_sections.iter().map(|s| title_case(s)).collect::<Vec<_>>())
        ),
        Dimension::Ats if card.ats.non_text_elements > 0 => format!(
            "ATS readiness ({}%): {} non-text element(s) may not parse.",
            card.ats_score, card.ats.non_text_elements
        ),
        Dimension::Ats => format!(
            "ATS readiness ({}%): keyword density is {:.1}%.",
            card.ats_score,
            card.ats.keyword_density * 100.0
        ),
        Dimension::Experience => match (card.experience.required_years, card.experience.resume_years) {
            (Some(required), Some(found)) => format!(
                "Experience ({}%): about {} years against {} required.",
                card.experience_score,
                years(found),
                years(required)
            ),
            (Some(required), None) => format!(
                "Experience ({}%): the role asks for {} years and your history could not be measured.",
                card.experience_score,
                years(required)
            ),
            (None, _) => format!(
                "Experience ({}%): the role states no years requirement.",
                card.experience_score
            ),
        },
    }
}

fn top_displays(keywords: &[KeywordMatch]) -> Vec<String> {
    keywords.iter().take(3).map(|k| k.display.clone()).collect()
}

fn years(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "A", "A and B", "A, B and C".
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => format!(
            "{} and {}",
            init.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(", "),
            last.as_ref()
        ),
    }
}
