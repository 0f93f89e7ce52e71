//! Vendor name extraction using character-case heuristics.

use tracing::debug;

use super::patterns::{
    ALL_CAPS_PHRASE, BUSINESS_SUFFIXES, CAPITALIZED_SEQUENCE, SHORT_ABBREVIATION,
    SUFFIX_ANCHORED_PHRASES, TITLE_CASE_PHRASE, VENDOR_EXCLUDE_TERMS, VENDOR_KEYWORD_WINDOWS,
};

/// A scored vendor candidate.
#[derive(Debug, Clone)]
struct VendorCandidate {
    text: String,
    score: i32,
}

/// Extract the most likely vendor name, or empty when no candidate is
/// found.
///
/// Candidates are collected from four strategies over the raw text, scored
/// additively, and the highest score wins. Ties keep the candidate seen
/// first, in strategy order.
pub fn extract_vendor(text: &str) -> String {
    let mut candidates = Vec::new();

    candidates.extend(find_near_keywords(text));
    candidates.extend(find_title_case_names(text));
    candidates.extend(find_all_caps_names(text));
    candidates.extend(find_suffix_anchored_names(text));

    debug!("collected {} vendor candidates", candidates.len());
    select_best(candidates)
}

/// Capitalized word sequences inside a bounded window after each
/// vendor-role keyword.
fn find_near_keywords(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    for window in VENDOR_KEYWORD_WINDOWS.iter() {
        for m in window.find_iter(text) {
            for cap in CAPITALIZED_SEQUENCE.find_iter(m.as_str()) {
                candidates.push(cap.as_str().to_string());
            }
        }
    }

    candidates
}

/// Title-case phrases of 2-5 words, minus anything containing an excluded
/// term.
fn find_title_case_names(text: &str) -> Vec<String> {
    TITLE_CASE_PHRASE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|phrase| !contains_excluded_term(phrase))
        .collect()
}

/// All-uppercase phrases, dropping short pure abbreviations.
fn find_all_caps_names(text: &str) -> Vec<String> {
    ALL_CAPS_PHRASE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|phrase| {
            phrase.len() >= 3
                && !SHORT_ABBREVIATION.is_match(phrase)
                && !contains_excluded_term(phrase)
        })
        .collect()
}

/// Phrases ending in a known business suffix.
fn find_suffix_anchored_names(text: &str) -> Vec<String> {
    SUFFIX_ANCHORED_PHRASES
        .iter()
        .flat_map(|p| p.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Highest score wins; the first-encountered candidate wins ties.
fn select_best(candidates: Vec<String>) -> String {
    let mut best: Option<VendorCandidate> = None;

    for text in candidates {
        let score = score_candidate(&text);
        let better = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if better {
            best = Some(VendorCandidate { text, score });
        }
    }

    best.map(|c| c.text.trim().to_string()).unwrap_or_default()
}

/// Additive scoring over shape features of the candidate text.
fn score_candidate(candidate: &str) -> i32 {
    let mut score = 0;
    let lower = candidate.to_lowercase();

    // Length sweet spot.
    let length = candidate.chars().count();
    if (10..=50).contains(&length) {
        score += 10;
    } else if (5..=60).contains(&length) {
        score += 5;
    }

    // Multi-word names look more like organizations.
    if candidate.split_whitespace().count() >= 2 {
        score += 15;
    }

    if BUSINESS_SUFFIXES.iter().any(|s| lower.contains(s)) {
        score += 20;
    }

    if is_title_case(candidate) {
        score += 10;
    }

    if VENDOR_EXCLUDE_TERMS.iter().any(|t| lower.contains(t)) {
        score -= 20;
    }

    if is_all_uppercase(candidate) && length > 10 {
        score -= 5;
    }

    if candidate.chars().any(|c| c.is_ascii_digit()) {
        score -= 10;
    }

    score
}

fn contains_excluded_term(phrase: &str) -> bool {
    let lower = phrase.to_lowercase();
    VENDOR_EXCLUDE_TERMS.iter().any(|t| lower.contains(t))
}

/// Every word starts with an uppercase letter followed by lowercase only.
fn is_title_case(text: &str) -> bool {
    let mut saw_word = false;
    for word in text.split_whitespace() {
        let mut chars = word.chars().filter(|c| c.is_alphabetic());
        match chars.next() {
            Some(first) if first.is_uppercase() => {
                if chars.any(|c| c.is_uppercase()) {
                    return false;
                }
                saw_word = true;
            }
            Some(_) => return false,
            None => continue,
        }
    }
    saw_word
}

/// At least one letter and no lowercase letters.
fn is_all_uppercase(text: &str) -> bool {
    let mut has_alpha = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if c.is_lowercase() {
            return false;
        }
        has_alpha = true;
    }
    has_alpha
}
