//! Ranking extraction from free-form judge responses.
//!
//! Judges are prompted to end with a `FINAL RANKING:` section, but model
//! output is unreliable: the section may be missing, the numbering may be
//! irregular, or labels may only appear in prose. This parser degrades
//! gracefully through three passes and never fails — unparsable input
//! yields an empty ordering, so one malformed judge costs only its own
//! ranking signal, never the run.

use crate::council::label::Label;
use regex::Regex;
use std::sync::LazyLock;

/// Section marker judges are instructed to emit (case-sensitive).
pub const RANKING_MARKER: &str = "FINAL RANKING:";

// Numbered list line: "1. Response A", tolerating loose spacing around
// the dot and between "Response" and the letter. Numbering values are
// not validated; order of appearance wins.
static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\d+\s*\.\s*Response\s+([A-Z])\b").expect("valid regex")
});

// Any "Response X" mention, for the prose fallback.
static LABEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Response\s+([A-Z])\b").expect("valid regex"));

/// Extract an ordered list of labels from a judge's raw response.
///
/// 1. If `FINAL RANKING:` occurs, only the text after it is parsed;
///    earlier incidental label mentions in discussion prose are ignored.
/// 2. Numbered-list lines inside the window are read in order of
///    appearance.
/// 3. If no numbered lines matched, every `Response <letter>` mention in
///    the window is taken in first-occurrence order, deduplicated.
///
/// Returns an empty vector when nothing matches. Never errors.
pub fn parse_ranking_from_text(raw_text: &str) -> Vec<Label> {
    let window = match raw_text.find(RANKING_MARKER) {
        Some(pos) => &raw_text[pos + RANKING_MARKER.len()..],
        None => raw_text,
    };

    let numbered: Vec<Label> = NUMBERED_LINE
        .captures_iter(window)
        .filter_map(|cap| cap[1].chars().next().and_then(Label::from_letter))
        .collect();
    if !numbered.is_empty() {
        return numbered;
    }

    let mut order: Vec<Label> = Vec::new();
    for cap in LABEL_MENTION.captures_iter(window) {
        if let Some(label) = cap[1].chars().next().and_then(Label::from_letter)
            && !order.contains(&label)
        {
            order.push(label);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(order: &[Label]) -> Vec<&str> {
        order.iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn test_standard_final_ranking_format() {
        let text = "Here is my evaluation of the responses.\n\n\
                    FINAL RANKING:\n1. Response C\n2. Response A\n3. Response B\n";
        let result = parse_ranking_from_text(text);
        assert_eq!(
            labels(&result),
            vec!["Response C", "Response A", "Response B"]
        );
    }

    #[test]
    fn test_final_ranking_without_numbers() {
        let text = "FINAL RANKING:\n\
                    Response B is best, followed by Response A, then Response C.";
        let result = parse_ranking_from_text(text);
        assert_eq!(
            labels(&result),
            vec!["Response B", "Response A", "Response C"]
        );
    }

    #[test]
    fn test_fallback_without_header() {
        let text = "I think Response A is best, then Response B.";
        let result = parse_ranking_from_text(text);
        assert_eq!(labels(&result), vec!["Response A", "Response B"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ranking_from_text("").is_empty());
    }

    #[test]
    fn test_no_label_mentions() {
        assert!(parse_ranking_from_text("This is some text without any rankings.").is_empty());
    }

    #[test]
    fn test_marker_restricts_window() {
        // Mentions before the marker must not pollute the extracted order.
        let text = "Response A was good. Response B was better.\n\
                    FINAL RANKING:\n1. Response B\n2. Response A\n";
        let result = parse_ranking_from_text(text);
        assert_eq!(labels(&result), vec!["Response B", "Response A"]);
    }

    #[test]
    fn test_five_labels() {
        let text = "FINAL RANKING:\n\
                    1. Response D\n2. Response B\n3. Response E\n4. Response A\n5. Response C\n";
        let result = parse_ranking_from_text(text);
        assert_eq!(
            labels(&result),
            vec![
                "Response D",
                "Response B",
                "Response E",
                "Response A",
                "Response C"
            ]
        );
    }

    #[test]
    fn test_irregular_spacing() {
        let text = "FINAL RANKING:\n1.Response A\n2.  Response B\n3.   Response C\n";
        let result = parse_ranking_from_text(text);
        assert_eq!(
            labels(&result),
            vec!["Response A", "Response B", "Response C"]
        );
    }

    #[test]
    fn test_non_monotonic_numbering() {
        // Appearance order is authoritative, not the printed numbers.
        let text = "FINAL RANKING:\n3. Response B\n1. Response A\n";
        let result = parse_ranking_from_text(text);
        assert_eq!(labels(&result), vec!["Response B", "Response A"]);
    }

    #[test]
    fn test_fallback_dedupes_mentions() {
        let text = "Response A then Response B, though Response A again.";
        let result = parse_ranking_from_text(text);
        assert_eq!(labels(&result), vec!["Response A", "Response B"]);
    }

    #[test]
    fn test_letters_outside_assigned_range_still_parse() {
        // The parser is alphabet-wide; filtering against the run's
        // assigned labels happens in the aggregator.
        let text = "FINAL RANKING:\n1. Response Z\n2. Response A\n";
        let result = parse_ranking_from_text(text);
        assert_eq!(labels(&result), vec!["Response Z", "Response A"]);
    }
}
