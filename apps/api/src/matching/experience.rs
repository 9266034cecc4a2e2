//! Years-of-experience signals: what the job asks for and what the resume shows.
//!
//! Required years come from "5+ years of", "3-5 years experience" or "at least 2
//! years" phrases in the job description (largest lower bound wins), falling back to
//! seniority words in the title. Resume years are the larger of explicit "N years of
//! experience" claims and the merged length of every date range in the experience
//! section, measured against a fixed reference date.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};

use crate::models::resume::{non_blank, JobDescription, Resume};

/// Score when the job states no requirement, or the resume's history cannot be read.
pub const NEUTRAL_EXPERIENCE_SCORE: f64 = 75.0;

const SENIORITY: &[(&str, f64)] = &[
    ("principal", 8.0),
    ("staff", 7.0),
    ("lead", 7.0),
    ("senior", 5.0),
    ("sr", 5.0),
    ("mid-level", 3.0),
    ("intermediate", 3.0),
    ("junior", 0.0),
    ("jr", 0.0),
    ("entry-level", 0.0),
    ("graduate", 0.0),
    ("intern", 0.0),
];

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceSignal {
    pub required_years: Option<f64>,
    pub resume_years: Option<f64>,
    pub has_experience_text: bool,
}

impl ExperienceSignal {
    pub fn read(resume: &Resume, jd: &JobDescription, reference: NaiveDate) -> Self {
        let experience = non_blank(&resume.experience);
        Self {
            required_years: required_years(jd),
            resume_years: experience.and_then(|text| resume_years(text, reference)),
            has_experience_text: experience.is_some(),
        }
    }

    /// Experience sub-score in [0, 100], before rounding.
    pub fn score(&self) -> f64 {
        let Some(required) = self.required_years else {
            return NEUTRAL_EXPERIENCE_SCORE;
        };
        if required <= 0.0 {
            return 100.0;
        }
        if !self.has_experience_text {
            return 0.0;
        }
        match self.resume_years {
            Some(years) => 100.0 * (years / required).min(1.0),
            None => NEUTRAL_EXPERIENCE_SCORE,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job side
// ────────────────────────────────────────────────────────────────────────────

fn requirement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?ix)
            (?P<cue_before> \b(?:at\s+least|minimum(?:\s+of)?|min\.?|over|more\s+than)\s+ )?
            \b(?P<years>\d{1,2})\s*(?:\+|plus)?\s*
            (?:(?:-|\x{2013}|to)\s*\d{1,2}\s*\+?\s*)?
            (?:years?|yrs?)\b
            (?:
                (?P<not_required> \s+(?:ago|old)\b )
              | (?P<cue_after> \s*(?:'|\x{2019})?\s*(?:of|with)\b
                             | [^.\n]{0,40}?\b(?:experience|required|requirement)\b )
            )?",
        )
        .expect("requirement pattern is valid")
    })
}

/// Years the job asks for, if it says.
pub fn required_years(jd: &JobDescription) -> Option<f64> {
    let texts = [
        non_blank(&jd.required_skills),
        non_blank(&jd.preferred_skills),
        non_blank(&jd.responsibilities),
        Some(jd.description.as_str()),
    ];

    let stated = texts
        .into_iter()
        .flatten()
        .flat_map(|text| requirement_pattern().captures_iter(text))
        .filter(is_requirement)
        .filter_map(|caps| caps.name("years")?.as_str().parse::<f64>().ok())
        .fold(None, |max: Option<f64>, years| Some(max.map_or(years, |m| m.max(years))));

    stated.or_else(|| seniority_years(jd))
}

/// A bare "N years" is only a requirement when something around it says so.
fn is_requirement(caps: &Captures<'_>) -> bool {
    caps.name("not_required").is_none()
        && (caps.name("cue_before").is_some() || caps.name("cue_after").is_some())
}

fn seniority_years(jd: &JobDescription) -> Option<f64> {
    let headline = non_blank(&jd.job_title)
        .or_else(|| jd.description.lines().map(str::trim).find(|l| !l.is_empty()))?
        .to_lowercase();

    let words: Vec<&str> = headline
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect();

    SENIORITY
        .iter()
        .find(|(word, _)| words.contains(word))
        .map(|&(_, years)| years)
        .or_else(|| {
            // "mid level" written as two words
            words
                .windows(2)
                .any(|w| w == ["mid", "level"])
                .then_some(3.0)
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Resume side
// ────────────────────────────────────────────────────────────────────────────

fn claim_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2}(?:\.\d)?)\s*\+?\s*(?:years?|yrs?)\b[^.\n]{0,40}?\bexperience\b")
            .expect("claim pattern is valid")
    })
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?ix)
            (?: (?P<sm>jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+
              | (?P<sn>\d{1,2})\s*/\s* )?
            (?P<sy>(?:19|20)\d{2})
            \s*(?:-|\x{2013}|\x{2014}|to|until)\s*
            (?:
                (?: (?P<em>jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+
                  | (?P<en>\d{1,2})\s*/\s* )?
                (?P<ey>(?:19|20)\d{2})
              | (?P<open>present|current|now|today)
            )",
        )
        .expect("date range pattern is valid")
    })
}

/// Years of experience the resume text supports, or `None` when nothing parses.
/// Date ranges that parse but cover no time count as zero years.
pub fn resume_years(text: &str, reference: NaiveDate) -> Option<f64> {
    let claimed = claim_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .fold(None, |max: Option<f64>, years| Some(max.map_or(years, |m| m.max(years))));

    let ranged = merged_months(date_ranges(text, reference)).map(|months| months / 12.0);

    match (claimed, ranged) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Half-open `[start, end)` date intervals. A range that ends before it starts is
/// kept as an empty interval.
fn date_ranges(text: &str, reference: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    range_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let start_year: i32 = caps.name("sy")?.as_str().parse().ok()?;
            let start = first_of_month(start_year, month_number(&caps, "sm", "sn").unwrap_or(1))?;

            let end = if caps.name("open").is_some() {
                reference
            } else {
                let end_year: i32 = caps.name("ey")?.as_str().parse().ok()?;
                match month_number(&caps, "em", "en") {
                    Some(month) => first_of_month(end_year, month)?,
                    // a bare end year means the job ran through that year
                    None => first_of_month(end_year + 1, 1)?,
                }
            };

            Some((start, end.max(start)))
        })
        .collect()
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// 1-based month from a month name or a numeric month capture.
fn month_number(caps: &Captures<'_>, name: &str, number: &str) -> Option<u32> {
    if let Some(m) = caps.name(name) {
        let prefix = m.as_str().to_lowercase();
        return MONTHS
            .iter()
            .position(|&mon| mon == prefix)
            .map(|i| i as u32 + 1);
    }
    let n: u32 = caps.name(number)?.as_str().parse().ok()?;
    (1..=12).contains(&n).then_some(n)
}

fn months_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let years = end.year() - start.year();
    let months = end.month() as i32 - start.month() as i32;
    let total = years * 12 + months;
    let day_frac = (end.day() as f64 - start.day() as f64) / 30.0;
    (total as f64 + day_frac).max(0.0)
}

/// Total months covered, counting overlapping ranges once.
fn merged_months(mut ranges: Vec<(NaiveDate, NaiveDate)>) -> Option<f64> {
    if ranges.is_empty() {
        return None;
    }
    ranges.sort_unstable();

    let mut total = 0.0;
    let (mut cur_start, mut cur_end) = ranges[0];
    for &(start, end) in &ranges[1..] {
        if start <= cur_end {
            cur_end = cur_end.max(end);
        } else {
            total += months_between(cur_start, cur_end);
            (cur_start, cur_end) = (start, end);
        }
    }
    Some(total + months_between(cur_start, cur_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn jd_with(description: &str, title: Option<&str>) -> JobDescription {
        JobDescription {
            description: description.to_string(),
            job_title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_years_takes_largest_lower_bound() {
        let jd = jd_with("3-5 years of Java. 2+ years with Kubernetes.", None);
        assert_eq!(required_years(&jd), Some(3.0));
        let jd = jd_with("At least 7 yrs building backends", None);
        assert_eq!(required_years(&jd), Some(7.0));
    }

    #[test]
    fn test_year_phrases_without_a_requirement_cue_are_ignored() {
        let jd = jd_with("Founded 25 years ago, we build payments. 3+ years of Rust experience.", None);
        assert_eq!(required_years(&jd), Some(3.0));
        let jd = jd_with("A 30 years old company. Minimum 4 years in backend roles.", None);
        assert_eq!(required_years(&jd), Some(4.0));
        let jd = jd_with("Serving clients for 12 years", Some("Backend Engineer"));
        assert_eq!(required_years(&jd), None);
        let jd = jd_with("2 years' experience with Go", None);
        assert_eq!(required_years(&jd), Some(2.0));
    }

    #[test]
    fn test_required_years_from_seniority() {
        assert_eq!(required_years(&jd_with("", Some("Senior Backend Engineer"))), Some(5.0));
        assert_eq!(required_years(&jd_with("", Some("Staff Engineer"))), Some(7.0));
        assert_eq!(required_years(&jd_with("", Some("Junior Developer"))), Some(0.0));
        assert_eq!(required_years(&jd_with("Mid level platform role\nWe build things", None)), Some(3.0));
        assert_eq!(required_years(&jd_with("Build APIs", Some("Backend Engineer"))), None);
    }

    #[test]
    fn test_stated_years_beat_seniority() {
        let jd = jd_with("4+ years required", Some("Senior Engineer"));
        assert_eq!(required_years(&jd), Some(4.0));
    }

    #[test]
    fn test_resume_claims() {
        assert_eq!(resume_years("Engineer with 6 years of backend experience.", jan_2026()), Some(6.0));
        assert_eq!(resume_years("Built things at Acme", jan_2026()), None);
    }

    #[test]
    fn test_resume_date_ranges_merge_overlaps() {
        let text = "Acme, Jan 2019 - Jan 2021\nSide gig, Jun 2020 - Dec 2020\nGlobex, 2022 - present";
        assert_eq!(resume_years(text, jan_2026()), Some(6.0));
    }

    #[test]
    fn test_numeric_month_ranges() {
        assert_eq!(resume_years("03/2020 \u{2013} 03/2023", jan_2026()), Some(3.0));
    }

    #[test]
    fn test_bare_years_cover_whole_end_year() {
        assert_eq!(resume_years("Initech 2018-2019", jan_2026()), Some(2.0));
    }

    #[test]
    fn test_present_resolves_against_reference_date() {
        let earlier = resume_years("Jan 2020 - Present", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let later = resume_years("Jan 2020 - Present", jan_2026());
        let mid_year = resume_years("Jan 2020 - Present", NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(earlier, Some(4.0));
        assert_eq!(later, Some(6.0));
        assert_eq!(mid_year, Some(6.5));
    }

    #[test]
    fn test_range_starting_in_reference_year_is_measured() {
        let reference = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        assert_eq!(resume_years("Acme, Mar 2026 - Present", reference), Some(7.0 / 12.0));

        let resume = Resume {
            experience: Some("Acme, Mar 2026 - Present".to_string()),
            ..Default::default()
        };
        let jd = jd_with("5+ years of Go", None);
        let newcomer = ExperienceSignal::read(&resume, &jd, reference).score();
        let veteran = ExperienceSignal::read(
            &Resume {
                experience: Some("Globex, Jan 2024 - Jan 2026".to_string()),
                ..Default::default()
            },
            &jd,
            reference,
        )
        .score();
        assert!(newcomer < veteran, "{newcomer} >= {veteran}");
        assert_eq!(veteran, 40.0);
    }

    #[test]
    fn test_range_not_yet_started_counts_as_zero_years() {
        let resume = Resume {
            experience: Some("Acme, Mar 2026 - Present".to_string()),
            ..Default::default()
        };
        let signal = ExperienceSignal::read(&resume, &jd_with("5+ years of Go", None), jan_2026());
        assert_eq!(signal.resume_years, Some(0.0));
        assert_eq!(signal.score(), 0.0);
    }

    #[test]
    fn test_score_without_requirement_is_neutral() {
        let signal = ExperienceSignal {
            required_years: None,
            resume_years: Some(10.0),
            has_experience_text: true,
        };
        assert_eq!(signal.score(), 75.0);
    }

    #[test]
    fn test_unparseable_history_scores_exactly_75() {
        let resume = Resume {
            experience: Some("Worked at several startups on billing systems".to_string()),
            ..Default::default()
        };
        let jd = jd_with("5+ years of Go", None);
        let signal = ExperienceSignal::read(&resume, &jd, jan_2026());
        assert_eq!(signal.required_years, Some(5.0));
        assert_eq!(signal.resume_years, None);
        assert_eq!(signal.score(), 75.0);
    }

    #[test]
    fn test_empty_history_against_requirement_scores_zero() {
        let jd = jd_with("3 years of experience", None);
        let signal = ExperienceSignal::read(&Resume::default(), &jd, jan_2026());
        assert_eq!(signal.score(), 0.0);
    }

    #[test]
    fn test_score_is_proportional_and_capped() {
        let mut signal = ExperienceSignal {
            required_years: Some(4.0),
            resume_years: Some(2.0),
            has_experience_text: true,
        };
        assert_eq!(signal.score(), 50.0);
        signal.resume_years = Some(9.0);
        assert_eq!(signal.score(), 100.0);
        signal.required_years = Some(0.0);
        signal.resume_years = None;
        assert_eq!(signal.score(), 100.0);
    }
}
