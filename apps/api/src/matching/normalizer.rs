//! Text normalizer: turns free text into comparable lexical units.
//!
//! Lower-cases, folds typographic punctuation, keeps the characters that make up
//! technical terms ("c++", "c#", "node.js", "ci/cd"), then merges the longest
//! multi-word dictionary phrases and resolves aliases. Never fails: empty or
//! malformed input produces an empty sequence.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::matching::dictionary::dictionary;

/// One normalized lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalized text; the canonical key when `in_dictionary` is set.
    pub text: String,
    /// The words as written, space-joined for merged phrases.
    pub surface: String,
    /// Looks like a proper noun or acronym in the source text.
    pub capitalized: bool,
    pub in_dictionary: bool,
}

struct RawWord {
    lower: String,
    surface: String,
    sentence_start: bool,
    /// Punctuation separates this word from the previous one.
    clause_start: bool,
}

/// Normalizes `text` into an ordered sequence of tokens.
pub fn normalize(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.text).collect()
}

/// Normalizes `text`, keeping surface form and capitalization for each token.
pub fn tokenize(text: &str) -> Vec<Token> {
    merge_phrases(split_words(text))
}

/// Space-joined normalized form of a short phrase, used as a comparison key.
pub fn normalized_key(text: &str) -> String {
    normalize(text).join(" ")
}

fn fold_char(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
        '\u{2026}' => '.',
        '\u{00A0}' => ' ',
        _ => c,
    }
}

/// Characters that glue word segments into one technical term ("c++", "ci/cd").
fn is_joiner(c: char) -> bool {
    matches!(c, '+' | '#' | '.' | '-' | '/' | '&')
}

fn is_sentence_break(c: char) -> bool {
    matches!(c, '!' | '?' | ':' | ';' | '\n' | '\u{2022}' | '*')
}

/// Splits on Unicode word boundaries, then rejoins adjacent segments that only
/// joiner characters separate.
fn split_words(text: &str) -> Vec<RawWord> {
    let folded: String = text.chars().map(fold_char).collect();
    let mut words = Vec::new();
    let mut current = String::new();
    let mut sentence_start = true;
    let mut clause_start = true;

    for segment in folded.split_word_bounds() {
        let is_word = segment.chars().any(char::is_alphanumeric);
        if is_word || segment.chars().all(is_joiner) {
            current.push_str(segment);
            continue;
        }
        if let Some(ends_sentence) = flush_word(&mut words, &mut current, sentence_start, clause_start) {
            sentence_start = ends_sentence;
            clause_start = ends_sentence;
        }
        for c in segment.chars() {
            if is_sentence_break(c) {
                sentence_start = true;
                clause_start = true;
            } else if !c.is_whitespace() {
                clause_start = true;
            }
        }
    }
    flush_word(&mut words, &mut current, sentence_start, clause_start);

    words
}

/// Pushes the trimmed word, if any is left, and reports whether it ended a sentence.
fn flush_word(
    words: &mut Vec<RawWord>,
    current: &mut String,
    sentence_start: bool,
    clause_start: bool,
) -> Option<bool> {
    let raw = std::mem::take(current);
    let ends_sentence = raw.ends_with('.');

    let trimmed_end = raw.trim_end_matches(|c: char| matches!(c, '.' | '-' | '/' | '&'));
    let trimmed_end = trimmed_end.strip_suffix("'s").unwrap_or(trimmed_end);
    let lower_end = trimmed_end.to_lowercase();
    // ".net" and friends keep their leading dot
    let surface = if trimmed_end.starts_with('.') && dictionary().canonicalize(&lower_end).is_some()
    {
        trimmed_end
    } else {
        trimmed_end.trim_start_matches(|c: char| matches!(c, '.' | '-' | '/' | '&' | '+' | '#'))
    };

    if surface.is_empty() {
        return None;
    }

    words.push(RawWord {
        lower: surface.to_lowercase(),
        surface: surface.to_string(),
        sentence_start,
        clause_start,
    });
    Some(ends_sentence)
}

fn looks_capitalized(word: &RawWord) -> bool {
    let mut chars = word.surface.chars();
    let first_upper = chars.next().is_some_and(|c| c.is_uppercase());
    let interior_upper = chars.any(|c| c.is_uppercase());
    interior_upper || (first_upper && !word.sentence_start)
}

fn merge_phrases(words: Vec<RawWord>) -> Vec<Token> {
    let dict = dictionary();

    let mut haystack = String::new();
    let mut bounds = Vec::with_capacity(words.len());
    for word in &words {
        if !haystack.is_empty() {
            haystack.push(' ');
        }
        let start = haystack.len();
        haystack.push_str(&word.lower);
        bounds.push(start..haystack.len());
    }

    // first word index of the next clause, per word
    let mut clause_end = vec![words.len(); words.len()];
    for i in (0..words.len().saturating_sub(1)).rev() {
        clause_end[i] = if words[i + 1].clause_start {
            i + 1
        } else {
            clause_end[i + 1]
        };
    }

    let mut tokens = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        match whole_word_phrase(&haystack, &bounds, i, clause_end[i]) {
            Some((canonical, len)) => {
                let span = &words[i..i + len];
                tokens.push(Token {
                    text: canonical.to_string(),
                    surface: span
                        .iter()
                        .map(|w| w.surface.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    capitalized: span.iter().any(looks_capitalized),
                    in_dictionary: true,
                });
                i += len;
            }
            None => {
                let word = &words[i];
                tokens.push(Token {
                    text: word.lower.clone(),
                    surface: word.surface.clone(),
                    capitalized: looks_capitalized(word),
                    in_dictionary: false,
                });
                i += 1;
            }
        }
    }

    tokens
}

/// Longest dictionary phrase made of whole words `first..limit`, as
/// (canonical key, word count).
fn whole_word_phrase(
    haystack: &str,
    bounds: &[Range<usize>],
    first: usize,
    limit: usize,
) -> Option<(&'static str, usize)> {
    let dict = dictionary();
    let mut last = limit;
    while last > first {
        let span = bounds[first].start..bounds[last - 1].end;
        let (end, canonical) = dict.longest_phrase_at(haystack, span)?;
        let words = &bounds[first..last];
        if let Some(k) = words.iter().position(|b| b.end == end) {
            return Some((canonical, k + 1));
        }
        // match stopped inside a word; retry without that word
        last = first + words.iter().take_while(|b| b.end < end).count();
    }
    None
}
