//! Optimizer: non-destructive rewrites of the summary and skills fields.
//!
//! Only vocabulary is added. Original text is kept verbatim, missing keywords are
//! phrased as interest rather than experience, and nothing quantitative (employers,
//! dates, numbers) is ever introduced.

use serde::{Deserialize, Serialize};

use crate::matching::keywords::{listed_skill_keys, TokenIndex};
use crate::matching::normalizer::normalized_key;
use crate::matching::suggestions::join_names;
use crate::matching::MatchResult;
use crate::models::resume::{non_blank, JobDescription, Resume};

const SUMMARY_KEYWORDS: usize = 3;
const SKILLS_KEYWORDS: usize = 5;
const BULLET_REWRITES: usize = 5;

/// Weak bullet openers and the action verb that replaces them.
const WEAK_OPENERS: &[(&str, &str)] = &[
    ("responsible for", "Owned"),
    ("worked on", "Contributed to"),
    ("helped with", "Supported"),
    ("helped to", "Helped"),
    ("assisted with", "Supported"),
    ("assisted in", "Supported"),
    ("involved in", "Contributed to"),
    ("participated in", "Contributed to"),
    ("tasked with", "Handled"),
    ("in charge of", "Led"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletImprovement {
    pub original: String,
    pub suggested: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSuggestion {
    pub optimized_summary: String,
    pub optimized_skills: String,
    pub added_keywords: usize,
    #[serde(default)]
    pub bullet_improvements: Vec<BulletImprovement>,
}

/// Builds candidate rewrites for the caller to accept or discard.
pub fn optimize(resume: &Resume, jd: &JobDescription, result: &MatchResult) -> OptimizationSuggestion {
    let title = non_blank(&jd.job_title);
    let (optimized_skills, added_keywords) =
        optimize_skills(resume.skills.as_deref().unwrap_or(""), &result.missing_keywords);

    OptimizationSuggestion {
        optimized_summary: optimize_summary(resume.summary.as_deref(), title, result),
        optimized_skills,
        added_keywords,
        bullet_improvements: improve_bullets(resume.experience.as_deref().unwrap_or("")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

fn optimize_summary(summary: Option<&str>, title: Option<&str>, result: &MatchResult) -> String {
    let original = summary.unwrap_or("");
    let role = title.map_or_else(|| "this".to_string(), |t| format!("a {t}"));

    if original.trim().is_empty() {
        let matched: Vec<&String> = result.matched_keywords.iter().take(SUMMARY_KEYWORDS).collect();
        return match (matched.is_empty(), title) {
            (false, Some(t)) => format!("{t} candidate with hands-on work in {}.", join_names(&matched)),
            (false, None) => format!("Candidate with hands-on work in {}.", join_names(&matched)),
            (true, Some(t)) => format!("Candidate for the {t} role."),
            (true, None) => String::new(),
        };
    }

    let present = TokenIndex::from_texts([original]);
    let additions: Vec<&String> = result
        .missing_keywords
        .iter()
        .filter(|k| !present.contains(&normalized_key(k)))
        .take(SUMMARY_KEYWORDS)
        .collect();

    if additions.is_empty() {
        return original.to_string();
    }

    let sentence = format!(
        "Interested in applying {} in {role} role.",
        join_names(&additions)
    );
    let trimmed = original.trim_end();
    if trimmed.ends_with(['.', '!', '?']) {
        format!("{trimmed} {sentence}")
    } else {
        format!("{trimmed}. {sentence}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Appends missing keywords in the field's own list style; returns the text and count added.
fn optimize_skills(original: &str, missing: &[String]) -> (String, usize) {
    let mut existing = listed_skill_keys(original);
    let mut additions = Vec::new();
    for keyword in missing {
        if additions.len() == SKILLS_KEYWORDS {
            break;
        }
        let key = normalized_key(keyword);
        if !key.is_empty() && existing.insert(key) {
            additions.push(keyword.as_str());
        }
    }

    if additions.is_empty() {
        return (original.to_string(), 0);
    }

    let trimmed = original.trim_end();
    let text = if trimmed.is_empty() {
        additions.join(", ")
    } else if trimmed.contains('\n') {
        let prefix = bullet_prefix(trimmed.lines().last().unwrap_or(""));
        let lines: Vec<String> = additions.iter().map(|k| format!("{prefix}{k}")).collect();
        format!("{trimmed}\n{}", lines.join("\n"))
    } else {
        let sep = if trimmed.contains(';') && !trimmed.contains(',') { "; " } else { ", " };
        if trimmed.ends_with([',', ';']) {
            format!("{trimmed} {}", additions.join(sep))
        } else {
            format!("{trimmed}{sep}{}", additions.join(sep))
        }
    };

    (text, additions.len())
}

/// Leading bullet marker of a list line ("• ", "- ", "* ") including its indent.
fn bullet_prefix(line: &str) -> &str {
    let body = line.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '\u{2022}' | '-' | '*'));
    &line[..line.len() - body.len()]
}

// ────────────────────────────────────────────────────────────────────────────
// Experience bullets
// ────────────────────────────────────────────────────────────────────────────

fn improve_bullets(experience: &str) -> Vec<BulletImprovement> {
    experience
        .lines()
        .filter_map(rewrite_opener)
        .take(BULLET_REWRITES)
        .collect()
}

fn rewrite_opener(line: &str) -> Option<BulletImprovement> {
    let original = line.trim();
    let prefix = bullet_prefix(original);
    let body = &original[prefix.len()..];

    let (opener, verb) = WEAK_OPENERS.iter().find(|(opener, _)| {
        body.get(..opener.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(opener))
            && body[opener.len()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace)
    })?;

    let rest = body[opener.len()..].trim_start();
    Some(BulletImprovement {
        original: original.to_string(),
        suggested: format!("{prefix}{verb} {rest}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::keywords::extract_resume_keywords;

    fn result(matched: &[&str], missing: &[&str]) -> MatchResult {
        MatchResult {
            matched_keywords: matched.iter().map(|s| s.to_string()).collect(),
            missing_keywords: missing.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn jd(title: Option<&str>) -> JobDescription {
        JobDescription {
            description: "Backend role".to_string(),
            job_title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_summary_keeps_original_and_appends_interest() {
        let resume = Resume {
            summary: Some("I build reliable Java services.".to_string()),
            ..Default::default()
        };
        let out = optimize(
            &resume,
            &jd(Some("Backend Engineer")),
            &result(&["Java"], &["Kubernetes", "React", "Terraform", "Kafka"]),
        );
        assert_eq!(
            out.optimized_summary,
            "I build reliable Java services. Interested in applying Kubernetes, React and Terraform in a Backend Engineer role."
        );
    }

    #[test]
    fn test_summary_skips_keywords_already_mentioned() {
        let resume = Resume {
            summary: Some("Curious about Kubernetes".to_string()),
            ..Default::default()
        };
        let out = optimize(&resume, &jd(None), &result(&[], &["Kubernetes", "React"]));
        assert_eq!(
            out.optimized_summary,
            "Curious about Kubernetes. Interested in applying React in this role."
        );
    }

    #[test]
    fn test_empty_summary_uses_matched_keywords_only() {
        let out = optimize(
            &Resume::default(),
            &jd(Some("Data Engineer")),
            &result(&["Python", "SQL"], &["Spark"]),
        );
        assert_eq!(
            out.optimized_summary,
            "Data Engineer candidate with hands-on work in Python and SQL."
        );
        assert!(!out.optimized_summary.contains("Spark"));
    }

    #[test]
    fn test_skills_appended_with_comma_separator() {
        let resume = Resume {
            skills: Some("Java, Docker".to_string()),
            ..Default::default()
        };
        let out = optimize(&resume, &jd(None), &result(&["Java"], &["Kubernetes", "React"]));
        assert_eq!(out.optimized_skills, "Java, Docker, Kubernetes, React");
        assert_eq!(out.added_keywords, 2);
    }

    #[test]
    fn test_skills_mirror_bullet_list() {
        let resume = Resume {
            skills: Some("- Java\n- Docker\n".to_string()),
            ..Default::default()
        };
        let out = optimize(&resume, &jd(None), &result(&[], &["Kubernetes"]));
        assert_eq!(out.optimized_skills, "- Java\n- Docker\n- Kubernetes");
    }

    #[test]
    fn test_skills_never_duplicate_case_insensitively() {
        let resume = Resume {
            skills: Some("java; k8s".to_string()),
            ..Default::default()
        };
        let out = optimize(&resume, &jd(None), &result(&[], &["Java", "Kubernetes", "Go lang"]));
        assert_eq!(out.optimized_skills, "java; k8s; Go lang");
        assert_eq!(out.added_keywords, 1);
    }

    #[test]
    fn test_skills_cap_and_trailing_separator() {
        let resume = Resume {
            skills: Some("Rust,".to_string()),
            ..Default::default()
        };
        let missing = ["A1", "B2", "C3", "D4", "E5", "F6"];
        let out = optimize(&resume, &jd(None), &result(&[], &missing));
        assert_eq!(out.optimized_skills, "Rust, A1, B2, C3, D4, E5");
        assert_eq!(out.added_keywords, 5);
    }

    #[test]
    fn test_optimized_skills_is_a_superset() {
        let resume = Resume {
            skills: Some("Spring Boot, PostgreSQL, CI/CD".to_string()),
            ..Default::default()
        };
        let out = optimize(&resume, &jd(None), &result(&[], &["Kubernetes", "Terraform"]));
        let before = extract_resume_keywords(&resume);
        let after = extract_resume_keywords(&Resume {
            skills: Some(out.optimized_skills.clone()),
            ..Default::default()
        });
        for entry in before.iter() {
            assert!(after.contains(&entry.keyword), "lost {}", entry.keyword);
        }
        assert!(after.contains("kubernetes"));
    }

    #[test]
    fn test_nothing_to_add_leaves_fields_unchanged() {
        let resume = Resume {
            summary: Some("Kubernetes operator".to_string()),
            skills: Some("Kubernetes".to_string()),
            ..Default::default()
        };
        let out = optimize(&resume, &jd(None), &result(&[], &["Kubernetes"]));
        assert_eq!(out.optimized_summary, "Kubernetes operator");
        assert_eq!(out.optimized_skills, "Kubernetes");
        assert_eq!(out.added_keywords, 0);
    }

    #[test]
    fn test_other_sections_are_untouched() {
        let resume = Resume {
            experience: Some("Responsible for billing".to_string()),
            education: Some("BSc".to_string()),
            ..Default::default()
        };
        let snapshot = resume.clone();
        let _ = optimize(&resume, &jd(None), &result(&[], &["Kubernetes"]));
        assert_eq!(resume, snapshot);
    }

    #[test]
    fn test_weak_openers_are_rewritten() {
        let experience = "Acme Corp 2019 - 2021\n\
                          \u{2022} Responsible for the billing migration\n\
                          - worked on search ranking\n\
                          - Shipped the mobile app\n\
                          Helped with on-call rotations";
        let improvements = improve_bullets(experience);
        let suggested: Vec<&str> = improvements.iter().map(|b| b.suggested.as_str()).collect();
        assert_eq!(
            suggested,
            vec![
                "\u{2022} Owned the billing migration",
                "- Contributed to search ranking",
                "Supported on-call rotations",
            ]
        );
        assert_eq!(improvements[1].original, "- worked on search ranking");
    }

    #[test]
    fn test_opener_must_be_whole_words() {
        assert!(rewrite_opener("Worked onboarding flows").is_none());
        assert!(rewrite_opener("Responsible for").is_none());
    }

    #[test]
    fn test_opener_match_is_byte_exact() {
        // KELVIN SIGN lower-cases to an ASCII 'k' of a different byte length
        assert!(rewrite_opener("- Wor\u{212A}ed on the ledger").is_none());
        assert!(rewrite_opener("\u{130}nvolved in audits").is_none());
        assert_eq!(
            rewrite_opener("- WORKED ON the ledger").unwrap().suggested,
            "- Contributed to the ledger"
        );
    }
}
