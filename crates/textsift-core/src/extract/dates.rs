//! Date extraction with priority-based labeling.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use super::context_snippet;
use super::patterns::{
    DAY_MONTH_YEAR, GENERIC_DATE_PATTERNS, LABELED_DATE_PATTERNS, MONTH_DAY_YEAR, NUMERIC_DATE,
};
use crate::models::record::{Confidence, DateLabel};

/// Accepted year range; anything outside is treated as a false match.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Bytes of context kept on each side of a date match.
const SNIPPET_RADIUS: usize = 50;

/// A single date occurrence found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFinding {
    /// Text exactly as matched.
    pub raw_text: String,
    /// Parsed calendar date.
    pub date: NaiveDate,
    /// Label derived from the surrounding keyword.
    pub label: DateLabel,
    /// Whitespace-collapsed context around the match.
    pub snippet: String,
    pub confidence: Confidence,
}

impl DateFinding {
    /// The date formatted as MM/DD/YYYY, the record column format.
    pub fn mmddyyyy(&self) -> String {
        self.date.format("%m/%d/%Y").to_string()
    }
}

/// Extract up to `max_dates` deduplicated, priority-ranked dates.
///
/// The labeled pass runs first over a lowercased copy of the text; a
/// generic date-shape pass only runs when the labeled pass produced fewer
/// than three candidates. Unparseable tokens and years outside
/// [1900, 2100] are dropped silently.
pub fn extract_dates(text: &str, max_dates: usize) -> Vec<DateFinding> {
    let mut findings = Vec::new();
    let text_lower = text.to_lowercase();

    for (label, patterns) in LABELED_DATE_PATTERNS.iter() {
        for pattern in patterns {
            for caps in pattern.captures_iter(&text_lower) {
                let token = caps.get(1).unwrap_or_else(|| caps.get(0).unwrap());
                if let Some(date) = parse_fuzzy_date(token.as_str()) {
                    // Offsets come from the lowercased copy; if lowercasing
                    // changed byte lengths the snippet window shifts slightly.
                    // context_snippet clamps to char boundaries either way.
                    findings.push(DateFinding {
                        raw_text: token.as_str().to_string(),
                        date,
                        label: *label,
                        snippet: context_snippet(text, token.start(), token.end(), SNIPPET_RADIUS),
                        confidence: Confidence::High,
                    });
                }
            }
        }
    }

    // Generic shapes only when the labeled pass came up short.
    if findings.len() < 3 {
        for pattern in GENERIC_DATE_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                let raw = m.as_str();
                if findings
                    .iter()
                    .any(|f| f.raw_text.eq_ignore_ascii_case(raw))
                {
                    continue;
                }
                if let Some(date) = parse_fuzzy_date(raw) {
                    findings.push(DateFinding {
                        raw_text: raw.to_string(),
                        date,
                        label: DateLabel::Unknown,
                        snippet: context_snippet(text, m.start(), m.end(), SNIPPET_RADIUS),
                        confidence: Confidence::Medium,
                    });
                }
            }
        }
    }

    debug!("found {} date candidates before dedup", findings.len());
    dedup_by_priority(findings, max_dates)
}

/// Stable-sort by label priority, then keep the first occurrence of each
/// distinct calendar date.
///
/// Because the sort is stable, a duplicate date seen earlier in sorted
/// order wins even if a later occurrence carries a higher-priority label.
/// Downstream consumers depend on this ordering; keep it as is.
fn dedup_by_priority(mut findings: Vec<DateFinding>, max_dates: usize) -> Vec<DateFinding> {
    findings.sort_by_key(|f| f.label.priority());

    let mut seen: HashSet<NaiveDate> = HashSet::new();
    findings.retain(|f| seen.insert(f.date));
    findings.truncate(max_dates);
    findings
}

/// Parse a raw date token into a calendar date, tolerating the shapes the
/// pattern tables produce: numeric triples in month-first or year-first
/// order, and English month names in either position.
pub fn parse_fuzzy_date(raw: &str) -> Option<NaiveDate> {
    let token = raw.trim();

    if let Some(caps) = NUMERIC_DATE.captures(token) {
        let first = &caps[1];
        let a: i32 = first.parse().ok()?;
        let b: u32 = caps[2].parse().ok()?;
        let c: i32 = caps[3].parse().ok()?;

        let date = if first.len() == 4 {
            // Year-first: YYYY/MM/DD
            NaiveDate::from_ymd_opt(a, b, c as u32)
        } else {
            // Month-first by default; swap when the first field cannot be
            // a month but the second can.
            let year = expand_year(c);
            let (month, day) = if a > 12 && b <= 12 {
                (b, a as u32)
            } else {
                (a as u32, b)
            };
            NaiveDate::from_ymd_opt(year, month, day)
        };
        return date.filter(in_year_range);
    }

    if let Some(caps) = MONTH_DAY_YEAR.captures(token) {
        let month = month_from_name(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).filter(in_year_range);
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(token) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).filter(in_year_range);
    }

    None
}

fn in_year_range(date: &NaiveDate) -> bool {
    use chrono::Datelike;
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Two-digit years are windowed: 00-50 to the 2000s, 51-99 to the 1900s.
fn expand_year(year: i32) -> i32 {
    if year < 100 {
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_numeric_month_first() {
        assert_eq!(
            parse_fuzzy_date("01/15/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_parse_numeric_day_first_swap() {
        // 15 cannot be a month, so day and month swap.
        assert_eq!(
            parse_fuzzy_date("15/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_parse_year_first() {
        assert_eq!(
            parse_fuzzy_date("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_parse_two_digit_year() {
        assert_eq!(
            parse_fuzzy_date("01/15/24"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_fuzzy_date("01/15/99"),
            NaiveDate::from_ymd_opt(1999, 1, 15)
        );
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(
            parse_fuzzy_date("January 15, 2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            parse_fuzzy_date("15 March 2024"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_year_range_rejected() {
        assert_eq!(parse_fuzzy_date("01/15/1850"), None);
        assert_eq!(parse_fuzzy_date("01/15/2150"), None);
    }

    #[test]
    fn test_labeled_ranking() {
        let text = "Invoice Date: 01/15/2024\nDue Date: 02/15/2024";
        let dates = extract_dates(text, 3);

        assert!(dates.len() >= 2);
        assert_eq!(dates[0].label, DateLabel::Invoice);
        assert_eq!(dates[0].mmddyyyy(), "01/15/2024");
        assert_eq!(dates[0].confidence, Confidence::High);
        assert_eq!(dates[1].label, DateLabel::Due);
        assert_eq!(dates[1].mmddyyyy(), "02/15/2024");
    }

    #[test]
    fn test_generic_pass_labels_unknown() {
        let text = "Delivered on 03/10/2024 by courier";
        let dates = extract_dates(text, 3);

        assert_eq!(dates[0].label, DateLabel::Unknown);
        assert_eq!(dates[0].confidence, Confidence::Medium);
        assert_eq!(dates[0].mmddyyyy(), "03/10/2024");
    }

    #[test]
    fn test_generic_pass_skipped_when_three_labeled() {
        let text = "Invoice Date: 01/01/2024\nDue Date: 02/01/2024\nOrder Date: 03/01/2024\nAlso seen 04/01/2024";
        let dates = extract_dates(text, 3);

        assert_eq!(dates.len(), 3);
        assert!(dates.iter().all(|d| d.label != DateLabel::Unknown));
    }

    #[test]
    fn test_duplicate_dates_collapse() {
        let text = "Invoice Date: 01/15/2024\nDue Date: 01/15/2024";
        let dates = extract_dates(text, 3);

        let same_day: Vec<_> = dates
            .iter()
            .filter(|d| d.mmddyyyy() == "01/15/2024")
            .collect();
        assert_eq!(same_day.len(), 1);
        assert_eq!(same_day[0].label, DateLabel::Invoice);
    }

    #[test]
    fn test_out_of_range_not_counted() {
        let text = "Invoice Date: 01/15/1850";
        let dates = extract_dates(text, 3);
        assert!(dates.iter().all(|d| d.mmddyyyy() != "01/15/1850"));
    }

    #[test]
    fn test_snippet_contains_context() {
        let text = "Payment terms net 30. Invoice Date: 01/15/2024. Thank you.";
        let dates = extract_dates(text, 3);

        let invoice = dates.iter().find(|d| d.label == DateLabel::Invoice).unwrap();
        assert!(invoice.snippet.contains("01/15/2024"));
        assert!(invoice.snippet.contains("Invoice Date"));
    }
}
