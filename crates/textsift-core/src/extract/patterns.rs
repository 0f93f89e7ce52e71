//! Ordered regex pattern tables for field extraction.
//!
//! Patterns are data, not control flow: each extractor walks its table in
//! order, so adding or reprioritizing a pattern is a table edit only.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::DateLabel;

/// Numeric date token: 1-2 digit day/month fields, `/`, `-` or `.`
/// separators, 2- or 4-digit year.
const DATE_TOKEN: &str = r"([0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2,4})";

/// Vendor-role keywords that often appear near an organization name.
pub const VENDOR_KEYWORDS: [&str; 20] = [
    "vendor",
    "supplier",
    "company",
    "corp",
    "corporation",
    "inc",
    "incorporated",
    "ltd",
    "limited",
    "llc",
    "llp",
    "pllc",
    "co",
    "group",
    "enterprises",
    "services",
    "solutions",
    "systems",
    "technologies",
    "industries",
];

/// Terms that disqualify a phrase from being a vendor name.
pub const VENDOR_EXCLUDE_TERMS: [&str; 34] = [
    "invoice",
    "bill",
    "receipt",
    "statement",
    "total",
    "amount",
    "payment",
    "date",
    "number",
    "account",
    "customer",
    "order",
    "purchase",
    "sale",
    "tax",
    "shipping",
    "delivery",
    "address",
    "phone",
    "email",
    "website",
    "terms",
    "conditions",
    "description",
    "quantity",
    "price",
    "subtotal",
    "discount",
    "balance",
    "due",
    "paid",
    "remit",
    "billing",
    "contact",
];

/// Business suffixes that boost a vendor candidate's score.
pub const BUSINESS_SUFFIXES: [&str; 12] = [
    "corp",
    "corporation",
    "inc",
    "incorporated",
    "ltd",
    "limited",
    "llc",
    "llp",
    "pllc",
    "co",
    "group",
    "enterprises",
];

/// Words that look like identifiers but never are one.
pub const INVOICE_STOPWORDS: [&str; 11] = [
    "invoice",
    "number",
    "total",
    "amount",
    "date",
    "due",
    "paid",
    "balance",
    "tax",
    "shipping",
    "subtotal",
];

/// Phrases indicating a total amount, in selection priority order.
pub const TOTAL_KEYWORDS: [&str; 14] = [
    "total",
    "grand total",
    "amount due",
    "balance due",
    "final amount",
    "total amount",
    "amount owed",
    "total due",
    "pay",
    "payment",
    "sum",
    "balance",
    "invoice total",
    "bill total",
];

lazy_static! {
    /// Label-specific date patterns, in label priority order. Applied to
    /// lowercased text; every match is a high-confidence candidate.
    pub static ref LABELED_DATE_PATTERNS: Vec<(DateLabel, Vec<Regex>)> = vec![
        (
            DateLabel::Invoice,
            vec![
                date_pattern(r"invoice\s*date[:\s]*"),
                date_pattern(r"inv\s*date[:\s]*"),
                date_pattern(r"invoice[:\s]*"),
            ],
        ),
        (
            DateLabel::Due,
            vec![
                date_pattern(r"due\s*date[:\s]*"),
                date_pattern(r"payment\s*due[:\s]*"),
                date_pattern(r"due[:\s]*"),
            ],
        ),
        (
            DateLabel::Order,
            vec![
                date_pattern(r"order\s*date[:\s]*"),
                date_pattern(r"po\s*date[:\s]*"),
                date_pattern(r"purchase\s*date[:\s]*"),
            ],
        ),
        (
            DateLabel::Ship,
            vec![
                date_pattern(r"ship\s*date[:\s]*"),
                date_pattern(r"shipping\s*date[:\s]*"),
                date_pattern(r"shipped[:\s]*"),
            ],
        ),
    ];

    /// Locale-agnostic date shapes for the generic pass, applied to
    /// original-case text.
    pub static ref GENERIC_DATE_PATTERNS: Vec<Regex> = vec![
        // MM/DD/YYYY or DD/MM/YYYY
        Regex::new(r"[0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{4}").unwrap(),
        // YYYY/MM/DD
        Regex::new(r"[0-9]{4}[/.\-][0-9]{1,2}[/.\-][0-9]{1,2}").unwrap(),
        // MM/DD/YY
        Regex::new(r"[0-9]{1,2}[/.\-][0-9]{1,2}[/.\-][0-9]{2}").unwrap(),
        // Month DD, YYYY
        Regex::new(
            r"(?i)(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+[0-9]{1,2},?\s+[0-9]{4}",
        )
        .unwrap(),
        // DD Month YYYY
        Regex::new(
            r"(?i)[0-9]{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+[0-9]{4}",
        )
        .unwrap(),
    ];

    // Date-token shapes used by the fuzzy parser.
    pub static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{1,4})[/.\-](\d{1,2})[/.\-](\d{2,4})$").unwrap();
    pub static ref MONTH_DAY_YEAR: Regex =
        Regex::new(r"(?i)^([a-z]+)\.?\s+(\d{1,2}),?\s+(\d{4})$").unwrap();
    pub static ref DAY_MONTH_YEAR: Regex =
        Regex::new(r"(?i)^(\d{1,2})\s+([a-z]+)\.?\s+(\d{4})$").unwrap();

    /// Bounded window following each vendor keyword, scanned for
    /// capitalized sequences.
    pub static ref VENDOR_KEYWORD_WINDOWS: Vec<Regex> = VENDOR_KEYWORDS
        .iter()
        .map(|kw| {
            Regex::new(&format!(r"(?i)\b{}\b.{{0,100}}", regex::escape(kw))).unwrap()
        })
        .collect();

    /// Capitalized word sequence (one or more words).
    pub static ref CAPITALIZED_SEQUENCE: Regex =
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap();

    /// Title-case phrase of 2-5 words.
    pub static ref TITLE_CASE_PHRASE: Regex =
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,4}\b").unwrap();

    /// All-uppercase phrase, each word at least two letters.
    pub static ref ALL_CAPS_PHRASE: Regex =
        Regex::new(r"\b[A-Z]{2,}(?:\s+[A-Z]{2,})*\b").unwrap();

    /// Pure abbreviation: 1-3 uppercase letters, nothing else.
    pub static ref SHORT_ABBREVIATION: Regex = Regex::new(r"^[A-Z]{1,3}$").unwrap();

    /// Phrases anchored on a known business suffix.
    pub static ref SUFFIX_ANCHORED_PHRASES: Vec<Regex> = vec![
        Regex::new(
            r"(?i)\b[A-Z][a-zA-Z\s&]+(?:Corp|Corporation|Inc|Incorporated|Ltd|Limited|LLC|LLP|PLLC|Co)\b",
        )
        .unwrap(),
        Regex::new(
            r"(?i)\b[A-Z][a-zA-Z\s&]+(?:Group|Enterprises|Services|Solutions|Systems|Technologies|Industries)\b",
        )
        .unwrap(),
    ];

    /// Keyword-anchored invoice number patterns, line-scoped pass.
    pub static ref LINE_INVOICE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)invoice\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)inv\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)bill\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
    ];

    /// Broader invoice number patterns for the full-text fallback.
    pub static ref INVOICE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)invoice\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)inv\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)invoice\s*(?:number|no|num)\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)inv\s*(?:number|no|num)\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)invoice\s*[:#]\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)inv\s*[:#]\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)(?:invoice|inv).*?([A-Z]{1,3}[0-9]{3,10})").unwrap(),
        Regex::new(r"(?i)(?:invoice|inv).*?([0-9]{3,10}[A-Z]{0,3})").unwrap(),
        Regex::new(r"(?i)bill\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
        Regex::new(r"(?i)bill\s*(?:number|no|num)\s*#?\s*:?\s*([A-Z0-9\-]{3,20})").unwrap(),
    ];

    /// Standalone alphanumeric token, word-bounded.
    pub static ref STANDALONE_TOKEN: Regex = Regex::new(r"\b[A-Za-z0-9\-]{3,20}\b").unwrap();

    /// Structural shape every accepted invoice number must match in full.
    pub static ref INVOICE_CHARSET: Regex = Regex::new(r"^[A-Za-z0-9_\-]{3,20}$").unwrap();

    /// Amount-shape patterns, applied to lowercased text in order.
    pub static ref AMOUNT_PATTERNS: Vec<Regex> = vec![
        // Symbol before amount: $123.45, $1,234.56
        Regex::new(r"[$€£¥₹¢₦₡₪₱₨₩₴₽]\s*([0-9,]+\.?[0-9]*)").unwrap(),
        // Amount with symbol after: 123.45$, 1234€
        Regex::new(r"([0-9,]+\.?[0-9]*)\s*[$€£¥₹¢₦₡₪₱₨₩₴₽]").unwrap(),
        // ISO code after amount
        Regex::new(r"(?i)([0-9,]+\.?[0-9]*)\s*(?:USD|EUR|GBP|JPY|INR|CAD|AUD)\b").unwrap(),
        // ISO code before amount
        Regex::new(r"(?i)(?:USD|EUR|GBP|JPY|INR|CAD|AUD)\s*([0-9,]+\.?[0-9]*)").unwrap(),
        // Keyword before amount
        Regex::new(r"(?i)(?:total|amount|sum|due|balance|pay|price|cost)[:\s]*\$?\s*([0-9,]+\.?[0-9]*)")
            .unwrap(),
        // Keyword after amount
        Regex::new(r"(?i)([0-9,]+\.?[0-9]*)\s*(?:total|due|balance)").unwrap(),
    ];

    /// Per-keyword (amount-after, amount-before) patterns for total
    /// selection, in [`TOTAL_KEYWORDS`] order.
    pub static ref TOTAL_KEYWORD_PATTERNS: Vec<(Regex, Regex)> = TOTAL_KEYWORDS
        .iter()
        .map(|kw| {
            let kw = regex::escape(kw);
            (
                // Word-bounded so "subtotal" never satisfies "total".
                Regex::new(&format!(r"\b{kw}[:\s]*\$?\s*([0-9,]+\.?[0-9]*)")).unwrap(),
                Regex::new(&format!(r"([0-9,]+\.?[0-9]*)\s*{kw}\b")).unwrap(),
            )
        })
        .collect();
}

fn date_pattern(prefix: &str) -> Regex {
    Regex::new(&format!("{prefix}{DATE_TOKEN}")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_compile() {
        assert_eq!(LABELED_DATE_PATTERNS.len(), 4);
        assert_eq!(GENERIC_DATE_PATTERNS.len(), 5);
        assert_eq!(AMOUNT_PATTERNS.len(), 6);
        assert_eq!(TOTAL_KEYWORD_PATTERNS.len(), TOTAL_KEYWORDS.len());
        assert_eq!(VENDOR_KEYWORD_WINDOWS.len(), VENDOR_KEYWORDS.len());
    }

    #[test]
    fn test_vendor_term_lists() {
        assert!(VENDOR_KEYWORDS.contains(&"industries"));
        for term in ["paid", "remit", "billing", "contact"] {
            assert!(VENDOR_EXCLUDE_TERMS.contains(&term));
        }
    }

    #[test]
    fn test_labeled_date_pattern_matches() {
        let (label, patterns) = &LABELED_DATE_PATTERNS[0];
        assert_eq!(*label, crate::models::record::DateLabel::Invoice);

        let caps = patterns[0].captures("invoice date: 01/15/2024").unwrap();
        assert_eq!(&caps[1], "01/15/2024");
    }

    #[test]
    fn test_standalone_token_bounds() {
        let found: Vec<&str> = STANDALONE_TOKEN
            .find_iter("Invoice INV-2024-001 due")
            .map(|m| m.as_str())
            .collect();
        assert!(found.contains(&"INV-2024-001"));
    }
}
