//! Currency amount extraction and total identification.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use super::patterns::{AMOUNT_PATTERNS, TOTAL_KEYWORD_PATTERNS};

/// Validated amount range: one cent up to just under a billion.
fn min_amount() -> Decimal {
    Decimal::new(1, 2)
}

fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999, 2)
}

/// Amounts extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedAmounts {
    /// Canonical string of the identified total, or empty.
    pub total: String,
    /// Remaining amounts, sorted descending, comma-joined.
    pub other_amounts: String,
}

/// Extract all currency amounts and identify the most likely total.
pub fn extract_amounts(text: &str) -> ExtractedAmounts {
    let text_lower = text.to_lowercase();

    let all_amounts = find_all_amounts(&text_lower);
    let total = find_total(&text_lower, &all_amounts);

    let others: Vec<String> = all_amounts
        .iter()
        .filter(|a| **a != total)
        .cloned()
        .collect();

    ExtractedAmounts {
        total,
        other_amounts: others.join(", "),
    }
}

/// All valid amounts in canonical form, deduplicated and sorted
/// descending by value.
fn find_all_amounts(text_lower: &str) -> Vec<String> {
    let mut amounts: Vec<String> = Vec::new();

    for pattern in AMOUNT_PATTERNS.iter() {
        for caps in pattern.captures_iter(text_lower) {
            let raw = match caps.get(1) {
                Some(group) => group.as_str(),
                None => caps.get(0).unwrap().as_str(),
            };

            let Some(cleaned) = clean_amount(raw) else {
                continue;
            };
            if !is_valid_amount(&cleaned) {
                continue;
            }

            if let Some(value) = parse_amount(&cleaned) {
                let formatted = format_amount(value);
                if !amounts.contains(&formatted) {
                    amounts.push(formatted);
                }
            }
        }
    }

    amounts.sort_by(|a, b| {
        let av = parse_canonical(a);
        let bv = parse_canonical(b);
        bv.cmp(&av)
    });

    debug!("found {} distinct amounts", amounts.len());
    amounts
}

/// Pick the total: the first keyword-adjacent amount that is also in the
/// validated set, walking the keyword list in priority order. Falls back
/// to the largest amount, which can misidentify a subtotal; that is the
/// documented heuristic.
fn find_total(text_lower: &str, all_amounts: &[String]) -> String {
    if all_amounts.is_empty() {
        return String::new();
    }

    for (after, before) in TOTAL_KEYWORD_PATTERNS.iter() {
        for pattern in [after, before] {
            for caps in pattern.captures_iter(text_lower) {
                let Some(cleaned) = clean_amount(&caps[1]) else {
                    continue;
                };
                if let Some(value) = parse_amount(&cleaned) {
                    let formatted = format_amount(value);
                    if all_amounts.contains(&formatted) {
                        return formatted;
                    }
                }
            }
        }
    }

    // Largest amount as fallback (the list is sorted descending).
    all_amounts[0].clone()
}

/// Strip currency symbols and noise, keeping digits, commas and periods.
fn clean_amount(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Shape and range validation of a cleaned amount string.
fn is_valid_amount(cleaned: &str) -> bool {
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let parts: Vec<&str> = cleaned.split('.').collect();
    if parts.len() > 2 {
        return false;
    }
    if parts.len() == 2 && parts[1].len() > 2 {
        return false;
    }

    match parse_amount(cleaned) {
        Some(value) => value >= min_amount() && value <= max_amount(),
        None => false,
    }
}

fn parse_amount(cleaned: &str) -> Option<Decimal> {
    Decimal::from_str(&cleaned.replace(',', "")).ok()
}

/// Value of a canonical `$x,xxx.xx` string.
fn parse_canonical(canonical: &str) -> Decimal {
    parse_amount(canonical.trim_start_matches('$')).unwrap_or_default()
}

/// Canonical display form: `$` plus thousands-grouped value with exactly
/// two fractional digits.
pub fn format_amount(value: Decimal) -> String {
    let fixed = format!("{:.2}", value.round_dp(2));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("${grouped}.{frac_part}")
}
