//! Invoice/bill identifier extraction.

use super::patterns::{
    INVOICE_CHARSET, INVOICE_PATTERNS, INVOICE_STOPWORDS, LINE_INVOICE_PATTERNS, STANDALONE_TOKEN,
};

/// Extract the invoice or bill identifier, uppercased, or empty.
///
/// Lines mentioning an invoice keyword are tried first, top to bottom, for
/// better context; a full-text pattern sweep is the fallback.
pub fn extract_invoice_number(text: &str) -> String {
    for line in text.lines() {
        let line_lower = line.trim().to_lowercase();
        if line_lower.contains("invoice") || line_lower.contains("inv") || line_lower.contains("bill")
        {
            if let Some(number) = extract_from_line(line) {
                return number;
            }
        }
    }

    let text_lower = text.to_lowercase();
    for pattern in INVOICE_PATTERNS.iter() {
        for caps in pattern.captures_iter(&text_lower) {
            let candidate = match caps.get(1) {
                Some(group) => group.as_str(),
                None => caps.get(0).unwrap().as_str(),
            };
            if is_valid_invoice_number(candidate) {
                return candidate.to_uppercase();
            }
        }
    }

    String::new()
}

/// Keyword-anchored capture on a single line, falling back to any
/// standalone token on explicit "invoice" lines.
fn extract_from_line(line: &str) -> Option<String> {
    for pattern in LINE_INVOICE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(line) {
            let candidate = &caps[1];
            if is_valid_invoice_number(candidate) {
                return Some(candidate.to_uppercase());
            }
        }
    }

    if line.to_lowercase().contains("invoice") {
        for token in STANDALONE_TOKEN.find_iter(line) {
            if is_valid_invoice_number(token.as_str()) {
                return Some(token.as_str().to_uppercase());
            }
        }
    }

    None
}

/// Structural validity of an identifier candidate.
pub fn is_valid_invoice_number(candidate: &str) -> bool {
    let stripped: String = candidate
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect();
    if stripped.chars().count() < 3 {
        return false;
    }

    if !stripped.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if !INVOICE_CHARSET.is_match(candidate) {
        return false;
    }

    if INVOICE_STOPWORDS
        .iter()
        .any(|s| candidate.eq_ignore_ascii_case(s))
    {
        return false;
    }

    let has_letter = candidate.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = candidate.chars().any(|c| c.is_ascii_digit());
    if has_letter && has_digit {
        return true;
    }

    // Pure numeric identifiers need a little more length to be credible.
    candidate.chars().all(|c| c.is_ascii_digit()) && candidate.len() >= 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_scoped_extraction() {
        let text = "Acme Corp\nInvoice #: INV-2024-001\nTotal: $100.00";
        assert_eq!(extract_invoice_number(text), "INV-2024-001");
    }

    #[test]
    fn test_result_is_uppercased() {
        let text = "invoice no: inv-77a3";
        assert_eq!(extract_invoice_number(text), "INV-77A3");
    }

    #[test]
    fn test_bill_number() {
        let text = "Bill #: B-10042\nAmount: $55.00";
        assert_eq!(extract_invoice_number(text), "B-10042");
    }

    #[test]
    fn test_first_line_wins() {
        let text = "Invoice: A-1001\nInvoice: B-2002";
        assert_eq!(extract_invoice_number(text), "A-1001");
    }

    #[test]
    fn test_standalone_token_fallback() {
        // The keyword-anchored patterns fail on the parenthesis, so the
        // standalone token scan picks up the identifier.
        let text = "Invoice (ref) AB-123";
        assert_eq!(extract_invoice_number(text), "AB-123");
    }

    #[test]
    fn test_no_identifier() {
        assert_eq!(extract_invoice_number("nothing relevant here"), "");
    }

    #[test]
    fn test_stopwords_rejected() {
        assert!(!is_valid_invoice_number("INVOICE"));
        assert!(!is_valid_invoice_number("subtotal"));
    }

    #[test]
    fn test_validity_rules() {
        assert!(is_valid_invoice_number("INV-2024-001"));
        assert!(is_valid_invoice_number("12345")); // numeric, long enough
        assert!(!is_valid_invoice_number("123")); // numeric but too short
        assert!(!is_valid_invoice_number("ABC")); // no digit
        assert!(!is_valid_invoice_number("A-1")); // too short after stripping
        assert!(!is_valid_invoice_number("INV 2024 001")); // spaces fail the shape
    }
}
