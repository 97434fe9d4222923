//! Title cleanup for phrases that contained a date/time span.

/// Word removed from titles after the span is cut out ("lunch from tomorrow").
///
/// Removal is a plain case-sensitive substring replace, so it also bites into
/// words that merely contain it ("wherefrom" becomes "where").
const FROM_WORD: &str = "from";

/// Derive an event title from the input minus the matched span text.
///
/// Returns an empty string when nothing is left; the resolver decides what to
/// substitute in that case.
pub fn extract_title(original: &str, matched: &str) -> String {
    let without_span = if matched.is_empty() {
        original.to_string()
    } else {
        original.replacen(matched, "", 1)
    };

    without_span.replace(FROM_WORD, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_span_and_from() {
        assert_eq!(
            extract_title("meeting from 14:00 to 16:00", "14:00 to 16:00"),
            "meeting"
        );
        assert_eq!(
            extract_title("lunch from tomorrow to next friday", "tomorrow to next friday"),
            "lunch"
        );
    }

    #[test]
    fn only_first_span_occurrence_is_removed() {
        assert_eq!(extract_title("noon talk about noon", "noon"), "talk about noon");
    }

    #[test]
    fn span_removal_is_case_sensitive() {
        assert_eq!(extract_title("Tomorrow tomorrow", "tomorrow"), "Tomorrow");
    }

    #[test]
    fn from_removal_is_case_sensitive_substring() {
        assert_eq!(extract_title("From here", "here"), "From");
        assert_eq!(extract_title("wherefrom 9am", "9am"), "where");
        assert_eq!(extract_title("from a from b", ""), "a  b");
    }

    #[test]
    fn only_span_yields_empty_title() {
        assert_eq!(extract_title("tomorrow at noon", "tomorrow at noon"), "");
        assert_eq!(extract_title("  from tomorrow ", "tomorrow"), "");
    }
}
