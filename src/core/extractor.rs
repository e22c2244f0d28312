//! Field extraction from unstructured analysis text.
//!
//! Used when the compliance API answers in prose only. Both functions are
//! total: the worst case is a fallback string or an empty detail block.

use regex::Regex;
use std::sync::OnceLock;

/// Longest rule summary, ellipsis included.
pub const MAX_RULE_CHARS: usize = 80;

/// Longest detail block, ellipsis included.
pub const MAX_DETAIL_CHARS: usize = 400;

/// Returned when no line of the answer is usable as a summary.
pub const RULE_FALLBACK: &str = "Compliance assessment in progress...";

const ELLIPSIS: &str = "...";

/// Clauses worth quoting as the triggered rule, in priority order.
///
/// A clause runs to the end of its sentence: a `.` or `;` followed by
/// whitespace or the end of the line. Decimal points inside amounts such as
/// `$2.50` do not end it.
const RULE_PATTERNS: [&str; 4] = [
    r"(?i)\bexceeds?\s+(.+?)(?:[.;](?:\s|$)|$)",
    r"(?i)\bviolat\w*(?:[^.;]|[.;]\S)*?\bbecause\s+(.+?)(?:[.;](?:\s|$)|$)",
    r"(?i)\brisk:\s*(.+?)(?:[.;](?:\s|$)|$)",
    r"(?i)\bcompliance status:\s*(.+?)(?:[.;](?:\s|$)|$)",
];

struct DetailPatterns {
    blank_runs: Regex,
    status_line: Regex,
    analysis_marker: Regex,
    bold: Regex,
    italic: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

fn rule_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| RULE_PATTERNS.iter().map(|p| compile(p)).collect())
}

fn detail_patterns() -> &'static DetailPatterns {
    static PATTERNS: OnceLock<DetailPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| DetailPatterns {
        blank_runs: compile(r"\n(?:[ \t]*\n){2,}"),
        status_line: compile(r"^\s*COMPLIANCE STATUS:[^\n]*\n?"),
        analysis_marker: compile(r"^\s*ANALYSIS:[ \t]*\n?"),
        bold: compile(r"\*\*(.+?)\*\*"),
        italic: compile(r"\*(.+?)\*"),
    })
}

/// Pull a one-sentence "rule triggered" summary out of an answer.
///
/// Patterns are tried in order against every non-blank line, so an
/// "exceeds" clause anywhere beats a "risk:" clause on an earlier line.
pub fn extract_rule_triggered(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    for pattern in rule_patterns() {
        for line in &lines {
            let clause = pattern
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().replace("**", ""))
                .filter(|clause| !clause.trim().is_empty());

            if let Some(clause) = clause {
                return truncate_with_ellipsis(&capitalize(clause.trim()), MAX_RULE_CHARS);
            }
        }
    }

    lines
        .iter()
        .find(|line| is_summary_candidate(line))
        .map(|line| truncate_with_ellipsis(line.replace("**", "").trim(), MAX_RULE_CHARS))
        .unwrap_or_else(|| RULE_FALLBACK.to_string())
}

/// Clean an answer for display as the detail block.
pub fn cleanup_details(text: &str) -> String {
    let patterns = detail_patterns();

    let text = text.replace("\r\n", "\n");
    let text = patterns.blank_runs.replace_all(&text, "\n\n");
    let text = patterns.status_line.replace(&text, "");
    let text = patterns.analysis_marker.replace(&text, "");
    let text = patterns.bold.replace_all(&text, "${1}");
    let text = patterns.italic.replace_all(&text, "${1}");

    truncate_with_ellipsis(text.trim(), MAX_DETAIL_CHARS)
}

/// Cut `text` to at most `max_chars` characters, ending in "..." when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text
        .chars()
        .take(max_chars.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{}{}", kept, ELLIPSIS)
}

fn is_summary_candidate(line: &str) -> bool {
    line.chars().count() > 10
        && !line.starts_with("COMPLIANCE")
        && !line.starts_with("ANALYSIS")
        && !contains_url(line)
}

fn contains_url(line: &str) -> bool {
    line.contains("http://") || line.contains("https://") || line.contains("www.")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeds_clause() {
        let text = "ANALYSIS:\nThe hotel rate exceeds the $250 nightly cap for this city.";
        assert_eq!(
            extract_rule_triggered(text),
            "The $250 nightly cap for this city"
        );
    }

    #[test]
    fn test_violation_because_clause() {
        let text = "This violates the travel policy because economy fares were available.";
        assert_eq!(
            extract_rule_triggered(text),
            "Economy fares were available"
        );
    }

    #[test]
    fn test_decimal_amount_stays_in_clause() {
        assert_eq!(
            extract_rule_triggered("Amount exceeds the $2.50 per-item cap"),
            "The $2.50 per-item cap"
        );
        assert_eq!(
            extract_rule_triggered("The tip exceeds 20.5% of the bill. Please resubmit."),
            "20.5% of the bill"
        );
        assert_eq!(
            extract_rule_triggered(
                "This violates the $75.00 meal limit because the total was $92.40; see receipt."
            ),
            "The total was $92.40"
        );
    }

    #[test]
    fn test_bold_markers_stripped_from_clause() {
        assert_eq!(extract_rule_triggered("**COMPLIANCE STATUS:** HIGH"), "HIGH");
        assert_eq!(
            extract_rule_triggered("**Risk:** **over budget** for Q3"),
            "Over budget for Q3"
        );
    }

    #[test]
    fn test_risk_clause() {
        assert_eq!(
            extract_rule_triggered("Risk: missing manager sign-off"),
            "Missing manager sign-off"
        );
    }

    #[test]
    fn test_pattern_order_beats_line_order() {
        let text =
            "COMPLIANCE STATUS: flagged\nRisk: late submission\nAmount exceeds monthly budget";
        assert_eq!(extract_rule_triggered(text), "Monthly budget");
    }

    #[test]
    fn test_fallback_line() {
        let text = "COMPLIANCE REPORT\n\
                    See https://intranet.example.com/policy for more\n\
                    **Gift cards** are treated as cash equivalents";
        assert_eq!(
            extract_rule_triggered(text),
            "Gift cards are treated as cash equivalents"
        );
    }

    #[test]
    fn test_fallback_skips_short_lines() {
        assert_eq!(extract_rule_triggered("OK\nFine."), RULE_FALLBACK);
        assert_eq!(extract_rule_triggered(""), RULE_FALLBACK);
        assert_eq!(extract_rule_triggered("   \n\n  "), RULE_FALLBACK);
    }

    #[test]
    fn test_long_rule_is_truncated() {
        let text = format!("Risk: {}", "a".repeat(120));
        let rule = extract_rule_triggered(&text);
        assert_eq!(rule.chars().count(), 80);
        assert!(rule.ends_with("..."));
        assert_eq!(&rule[..77], format!("A{}", "a".repeat(76)));
    }

    #[test]
    fn test_cleanup_strips_markers() {
        let text = "COMPLIANCE STATUS: flagged\nANALYSIS:\nMissing receipt for $200 expense.";
        assert_eq!(cleanup_details(text), "Missing receipt for $200 expense.");
    }

    #[test]
    fn test_cleanup_analysis_on_same_line() {
        assert_eq!(
            cleanup_details("ANALYSIS: Meals are within limits."),
            "Meals are within limits."
        );
    }

    #[test]
    fn test_cleanup_collapses_blank_lines() {
        let text = "First paragraph.\n\n\n   \nSecond paragraph.\n\nThird.";
        assert_eq!(
            cleanup_details(text),
            "First paragraph.\n\nSecond paragraph.\n\nThird."
        );
    }

    #[test]
    fn test_cleanup_strips_emphasis() {
        assert_eq!(
            cleanup_details("This is **not** allowed without *prior* approval."),
            "This is not allowed without prior approval."
        );
    }

    #[test]
    fn test_cleanup_keeps_inner_status_lines() {
        let text = "Summary first.\nCOMPLIANCE STATUS: HIGH";
        assert_eq!(cleanup_details(text), text);
    }

    #[test]
    fn test_cleanup_truncates() {
        let details = cleanup_details(&"x".repeat(1000));
        assert_eq!(details.chars().count(), MAX_DETAIL_CHARS);
        assert!(details.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "é".repeat(90);
        let cut = truncate_with_ellipsis(&text, MAX_RULE_CHARS);
        assert_eq!(cut.chars().count(), 80);
        assert_eq!(truncate_with_ellipsis("short", 80), "short");
    }
}
