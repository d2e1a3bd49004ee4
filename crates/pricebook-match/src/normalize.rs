//! Label normalization for comparison
//!
//! Label text varies across document versions in punctuation, numbering
//! prefixes and required-field markers ("01. Opportunity ID" vs
//! "A. Opportunity ID:*"). Normalization strips the decoration so the
//! similarity ratio compares only the label's core content.

use lazy_regex::regex;

/// Normalize a raw label for comparison.
///
/// Steps, in order: lowercase; strip `*` required markers; strip leading and
/// trailing punctuation runs; strip at most one leading enumerator prefix
/// ("01.", "3)", "a."); collapse whitespace; trim. An empty result is valid
/// and means the label has no comparable content.
///
/// # Examples
/// ```
/// use pricebook_match::normalize_label;
///
/// assert_eq!(normalize_label("01. Opportunity ID"), "opportunity id");
/// assert_eq!(normalize_label("A. Opportunity ID:*"), "opportunity id");
/// assert_eq!(normalize_label(""), "");
/// ```
pub fn normalize_label(raw: &str) -> String {
    let mut s = raw.trim().to_lowercase();
    s.retain(|c| c != '*');

    let s = regex!(r"[:.\-()\[\]]+$").replace(&s, "");
    let s = regex!(r"^[:.\-()\[\]]+").replace(&s, "");
    let s = s.trim_start();

    // At most one enumerator prefix is removed: "01." style first, then
    // single-letter "a." style. The separator is required so labels that
    // merely start with a digit ("3d printing") are left alone.
    let s = if let Some(m) = regex!(r"^\d+\s*[.)\-]\s*").find(s) {
        &s[m.end()..]
    } else if let Some(m) = regex!(r"^[a-z]\s*[.)]\s*").find(s) {
        &s[m.end()..]
    } else {
        s
    };

    let s = regex!(r"\s+").replace_all(s, " ");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_decoration_stripping() {
        assert_eq!(normalize_label("Client Name:"), "client name");
        assert_eq!(normalize_label("01. Opportunity ID"), "opportunity id");
        assert_eq!(normalize_label("A. Opportunity ID:"), "opportunity id");
        assert_eq!(normalize_label("(1) Cost Centre"), "cost centre");
        assert_eq!(normalize_label("Start Date*"), "start date");
        assert_eq!(normalize_label("  Engagement   Partner  "), "engagement partner");
    }

    #[test]
    fn test_digit_prefix_needs_separator() {
        assert_eq!(normalize_label("3d printing"), "3d printing");
        assert_eq!(normalize_label("3. d printing"), "d printing");
    }

    #[test]
    fn test_empty_results_are_valid() {
        assert_eq!(normalize_label(""), "");
        assert_eq!(normalize_label("***"), "");
        assert_eq!(normalize_label(":::"), "");
        assert_eq!(normalize_label("   "), "");
    }

    #[test]
    fn test_idempotent_on_real_labels() {
        let labels = [
            "",
            "Client Name:",
            "01. Opportunity ID",
            "A. Opportunity ID:*",
            "(1) Cost Centre",
            "Start Date (DD/MM/YY):",
            "Engagement   Partner",
        ];
        for label in labels {
            let once = normalize_label(label);
            assert_eq!(normalize_label(&once), once, "not idempotent for {label:?}");
        }
    }

    proptest! {
        // Labels with one optional enumerator, a word body and optional
        // trailing punctuation, like the ones the scanner actually surfaces.
        #[test]
        fn prop_idempotent(label in r"( ?\*)?(([0-9]{1,2}[.)])|([a-z]\.))? ?[A-Za-z][A-Za-z ]{0,30}[:.]{0,2}") {
            let once = normalize_label(&label);
            prop_assert_eq!(normalize_label(&once), once);
        }

        #[test]
        fn prop_no_surrounding_whitespace(label in r"[ A-Za-z0-9:.*()-]{0,40}") {
            let normalized = normalize_label(&label);
            prop_assert_eq!(normalized.trim(), normalized.as_str());
            prop_assert!(!normalized.contains('*'));
            prop_assert!(!normalized.contains("  "));
        }
    }
}
