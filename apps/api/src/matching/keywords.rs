//! Keyword extractor: weighted keyword sets for job descriptions and resumes.
//!
//! Every field is tokenized on its own. Dictionary terms always count; unknown
//! tokens only count when they look like proper nouns or recur, so ordinary
//! English does not leak into the set. Weights favour explicit requirements and
//! terms that show up in more than one field.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::matching::dictionary::dictionary;
use crate::matching::normalizer::{normalize, tokenize, Token};
use crate::models::resume::{non_blank, JobDescription, Resume};

/// Which field of the input a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    JobTitle,
    RequiredSkills,
    PreferredSkills,
    Responsibilities,
    Description,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl FieldKind {
    pub const fn base_weight(self) -> f64 {
        match self {
            FieldKind::RequiredSkills => 3.0,
            FieldKind::JobTitle => 2.0,
            FieldKind::Responsibilities => 1.5,
            FieldKind::PreferredSkills => 1.0,
            FieldKind::Description => 1.0,
            FieldKind::Skills => 2.0,
            FieldKind::Experience => 1.5,
            FieldKind::Certifications => 1.5,
            FieldKind::Projects => 1.25,
            FieldKind::Summary => 1.0,
            FieldKind::Education => 1.0,
        }
    }
}

/// Weight a job keyword reaches when it is listed as a hard requirement.
pub const REQUIRED_WEIGHT: f64 = FieldKind::RequiredSkills.base_weight();

const CROSS_FIELD_BONUS: f64 = 0.5;
const REPEAT_BONUS: f64 = 0.25;
const MAX_COUNTED_REPEATS: u32 = 4;
const MIN_RECURRENCE: u32 = 2;
const MAX_PHRASE_TOKENS: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// KeywordSet
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordEntry {
    /// Normalized key, lower-case.
    pub keyword: String,
    /// Human-readable form surfaced in results.
    pub display: String,
    pub weight: f64,
    /// Order of first occurrence across the input; breaks weight ties.
    pub first_seen: usize,
    pub in_dictionary: bool,
}

/// Normalized keyword → weight. Immutable once built; iterates by descending
/// weight, ties in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    entries: Vec<KeywordEntry>,
    index: HashMap<String, usize>,
}

impl KeywordSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.index.contains_key(keyword)
    }

    pub fn get(&self, keyword: &str) -> Option<&KeywordEntry> {
        self.index.get(keyword).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.iter()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

struct Tally {
    display: String,
    fields: Vec<FieldKind>,
    occurrences: u32,
    first_seen: usize,
    in_dictionary: bool,
}

#[derive(Default)]
struct KeywordSetBuilder {
    terms: HashMap<String, Tally>,
    next_seen: usize,
}

impl KeywordSetBuilder {
    fn record(&mut self, keyword: &str, display: &str, field: FieldKind, in_dictionary: bool) {
        let seen = self.next_seen;
        self.next_seen += 1;

        let tally = self
            .terms
            .entry(keyword.to_string())
            .or_insert_with(|| Tally {
                display: display.to_string(),
                fields: Vec::new(),
                occurrences: 0,
                first_seen: seen,
                in_dictionary,
            });
        tally.occurrences += 1;
        tally.in_dictionary |= in_dictionary;
        if !tally.fields.contains(&field) {
            tally.fields.push(field);
        }
    }

    fn build(self) -> KeywordSet {
        let mut entries: Vec<KeywordEntry> = self
            .terms
            .into_iter()
            .map(|(keyword, tally)| {
                let base = tally
                    .fields
                    .iter()
                    .map(|f| f.base_weight())
                    .fold(0.0_f64, f64::max);
                let cross = CROSS_FIELD_BONUS * (tally.fields.len() - 1) as f64;
                let repeats = REPEAT_BONUS * (tally.occurrences - 1).min(MAX_COUNTED_REPEATS) as f64;
                KeywordEntry {
                    keyword,
                    display: tally.display,
                    weight: base + cross + repeats,
                    first_seen: tally.first_seen,
                    in_dictionary: tally.in_dictionary,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then(a.first_seen.cmp(&b.first_seen))
        });

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.keyword.clone(), i))
            .collect();

        KeywordSet { entries, index }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Comma/newline separated items, each kept even when unknown.
    List,
    FreeText,
    /// Only dictionary terms count (titles are full of generic words).
    DictionaryOnly,
}

struct Field<'a> {
    kind: FieldKind,
    layout: Layout,
    text: &'a str,
}

impl<'a> Field<'a> {
    fn new(kind: FieldKind, layout: Layout, text: &'a str) -> Self {
        Self { kind, layout, text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionLabel {
    Required,
    Preferred,
    Responsibilities,
}

#[derive(Debug)]
struct Segment<'a> {
    label: Option<SectionLabel>,
    text: &'a str,
}

fn section_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(
            r"(?i)\b(requirements|required(?:\s+(?:skills|qualifications))?|minimum qualifications|qualifications|must[- ]haves?|what you(?:'ll| will) need|responsibilities|duties|what you(?:'ll| will) do|preferred(?:\s+(?:skills|qualifications))?|nice[- ]to[- ]haves?|bonus points)\s*:",
        )
        .expect("section marker pattern is valid")
    })
}

fn label_for(marker: &str) -> SectionLabel {
    let marker = marker.to_lowercase();
    if marker.starts_with("pref") || marker.starts_with("nice") || marker.starts_with("bonus") {
        SectionLabel::Preferred
    } else if marker.starts_with("resp")
        || marker.starts_with("duties")
        || marker.ends_with("do")
    {
        SectionLabel::Responsibilities
    } else {
        SectionLabel::Required
    }
}

/// Splits a description on labelled headings ("Requirements:", "Nice to have:" …).
fn split_sections(description: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut label = None;
    let mut start = 0;

    for caps in section_marker().captures_iter(description) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        segments.push(Segment {
            label,
            text: &description[start..whole.start()],
        });
        label = Some(label_for(name.as_str()));
        start = whole.end();
    }
    segments.push(Segment {
        label,
        text: &description[start..],
    });

    segments.retain(|s| !s.text.trim().is_empty());
    segments
}

fn job_fields(jd: &JobDescription) -> Vec<Field<'_>> {
    let mut fields = Vec::new();

    if let Some(title) = non_blank(&jd.job_title) {
        fields.push(Field::new(FieldKind::JobTitle, Layout::DictionaryOnly, title));
    }

    let required = non_blank(&jd.required_skills);
    let preferred = non_blank(&jd.preferred_skills);
    let responsibilities = non_blank(&jd.responsibilities);

    if let Some(text) = required {
        fields.push(Field::new(FieldKind::RequiredSkills, Layout::List, text));
    }
    if let Some(text) = preferred {
        fields.push(Field::new(FieldKind::PreferredSkills, Layout::List, text));
    }
    if let Some(text) = responsibilities {
        fields.push(Field::new(FieldKind::Responsibilities, Layout::FreeText, text));
    }

    // Labelled segments stand in for extracted fields the collaborator did not supply.
    for segment in split_sections(&jd.description) {
        let kind = match segment.label {
            Some(SectionLabel::Required) if required.is_none() => FieldKind::RequiredSkills,
            Some(SectionLabel::Preferred) if preferred.is_none() => FieldKind::PreferredSkills,
            Some(SectionLabel::Responsibilities) if responsibilities.is_none() => {
                FieldKind::Responsibilities
            }
            _ => FieldKind::Description,
        };
        fields.push(Field::new(kind, Layout::FreeText, segment.text));
    }

    fields
}

fn resume_fields(resume: &Resume) -> Vec<Field<'_>> {
    [
        (FieldKind::Summary, Layout::FreeText, &resume.summary),
        (FieldKind::Skills, Layout::List, &resume.skills),
        (FieldKind::Experience, Layout::FreeText, &resume.experience),
        (FieldKind::Projects, Layout::FreeText, &resume.projects),
        (FieldKind::Certifications, Layout::List, &resume.certifications),
        (FieldKind::Education, Layout::FreeText, &resume.education),
    ]
    .into_iter()
    .filter_map(|(kind, layout, text)| non_blank(text).map(|t| Field::new(kind, layout, t)))
    .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Builds the weighted keyword set of a job description.
pub fn extract_job_keywords(jd: &JobDescription) -> KeywordSet {
    let excluded = excluded_tokens(jd.company_name.as_deref());
    extract(&job_fields(jd), &excluded)
}

/// Builds the keyword set present in a resume.
pub fn extract_resume_keywords(resume: &Resume) -> KeywordSet {
    let excluded = excluded_tokens(resume.name.as_deref());
    extract(&resume_fields(resume), &excluded)
}

/// Splits an explicit list field into trimmed, non-empty items.
pub fn split_items(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', ';', '|', '\n', '\u{2022}'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// True for tokens that can stand as a keyword on their own.
pub fn is_content(token: &Token) -> bool {
    token.in_dictionary
        || (!dictionary().is_stop_word(&token.text)
            && token.text.chars().count() >= 2
            && token.text.chars().any(char::is_alphabetic))
}

/// Names (company, candidate) never count as skills, unless they are dictionary terms.
fn excluded_tokens(name: Option<&str>) -> HashSet<String> {
    name.map(tokenize)
        .unwrap_or_default()
        .into_iter()
        .filter(|t| !t.in_dictionary)
        .map(|t| t.text)
        .collect()
}

fn extract(fields: &[Field<'_>], excluded: &HashSet<String>) -> KeywordSet {
    let tokenized: Vec<Vec<Token>> = fields.iter().map(|f| tokenize(f.text)).collect();

    let mut recurrence: HashMap<&str, u32> = HashMap::new();
    for token in tokenized.iter().flatten().filter(|t| !t.in_dictionary) {
        *recurrence.entry(token.text.as_str()).or_default() += 1;
    }

    let mut builder = KeywordSetBuilder::default();
    for (field, tokens) in fields.iter().zip(&tokenized) {
        match field.layout {
            Layout::List => {
                for item in split_items(field.text) {
                    record_item(&mut builder, field.kind, item, &recurrence, excluded);
                }
            }
            Layout::FreeText => {
                record_free_text(&mut builder, field.kind, tokens, &recurrence, excluded)
            }
            Layout::DictionaryOnly => record_dictionary_terms(&mut builder, field.kind, tokens),
        }
    }

    builder.build()
}

fn record_dictionary_terms(builder: &mut KeywordSetBuilder, kind: FieldKind, tokens: &[Token]) {
    let dict = dictionary();
    for token in tokens.iter().filter(|t| t.in_dictionary) {
        let display = dict.display(&token.text).unwrap_or(token.surface.as_str());
        builder.record(&token.text, display, kind, true);
    }
}

fn record_free_text(
    builder: &mut KeywordSetBuilder,
    kind: FieldKind,
    tokens: &[Token],
    recurrence: &HashMap<&str, u32>,
    excluded: &HashSet<String>,
) {
    let dict = dictionary();
    for token in tokens {
        if token.in_dictionary {
            let display = dict.display(&token.text).unwrap_or(token.surface.as_str());
            builder.record(&token.text, display, kind, true);
            continue;
        }
        let recurs = recurrence.get(token.text.as_str()).copied().unwrap_or(0) >= MIN_RECURRENCE;
        if is_content(token) && !excluded.contains(&token.text) && (token.capitalized || recurs) {
            builder.record(&token.text, &token.surface, kind, false);
        }
    }
}

fn record_item(
    builder: &mut KeywordSetBuilder,
    kind: FieldKind,
    item: &str,
    recurrence: &HashMap<&str, u32>,
    excluded: &HashSet<String>,
) {
    let tokens = tokenize(item);
    if tokens.iter().any(|t| t.in_dictionary) {
        record_dictionary_terms(builder, kind, &tokens);
        return;
    }

    let content: Vec<&Token> = tokens
        .iter()
        .filter(|t| is_content(t) && !excluded.contains(&t.text))
        .collect();

    match content.len() {
        0 => {}
        1..=MAX_PHRASE_TOKENS => {
            let keyword = content
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let display = content
                .iter()
                .map(|t| t.surface.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            builder.record(&keyword, &display, kind, false);
        }
        // a sentence rather than an item
        _ => record_free_text(builder, kind, &tokens, recurrence, excluded),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Token index
// ────────────────────────────────────────────────────────────────────────────

/// Normalized token streams, one per field, for whole-token phrase lookups.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    fields: Vec<Vec<Token>>,
}

impl TokenIndex {
    pub fn from_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            fields: texts.into_iter().map(tokenize).collect(),
        }
    }

    /// Counts whole-token occurrences of a normalized keyword.
    pub fn occurrences(&self, keyword: &str) -> usize {
        let parts: Vec<&str> = keyword.split(' ').collect();
        self.fields
            .iter()
            .map(|tokens| {
                let single = tokens.iter().filter(|t| t.text == keyword).count();
                let phrase = if parts.len() > 1 {
                    tokens
                        .windows(parts.len())
                        .filter(|w| w.iter().zip(&parts).all(|(t, p)| t.text == *p))
                        .count()
                } else {
                    0
                };
                single + phrase
            })
            .sum()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.occurrences(keyword) > 0
    }

    /// Tokens that carry meaning (dictionary terms and non-stop words).
    pub fn content_token_count(&self) -> usize {
        self.fields.iter().flatten().filter(|t| is_content(t)).count()
    }
}

/// Everything the scorer needs to know about a resume's vocabulary.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    pub keywords: KeywordSet,
    pub tokens: TokenIndex,
}

impl ResumeProfile {
    pub fn build(resume: &Resume) -> Self {
        let fields = resume_fields(resume);
        Self {
            keywords: extract_resume_keywords(resume),
            tokens: TokenIndex::from_texts(fields.iter().map(|f| f.text)),
        }
    }

    /// A job keyword is present when the resume lists it or uses it as a whole phrase.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword) || self.tokens.contains(keyword)
    }
}

/// Normalized keys of the skills already listed in a skills field.
pub fn listed_skill_keys(skills: &str) -> HashSet<String> {
    split_items(skills)
        .map(|item| normalize(item).join(" "))
        .chain(normalize(skills))
        .filter(|key| !key.is_empty())
        .collect()
}
