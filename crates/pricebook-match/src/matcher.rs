//! Best-above-threshold matching of source fields to scanned candidates

use crate::normalize::normalize_label;
use crate::scan::scan_candidates;
use crate::similarity::similarity;
use pricebook_core::{
    CellLocation, FieldMap, MatchCandidate, MatchMethod, ReconcileConfig, SheetRead,
};

/// Match each source field against the candidate list.
///
/// For every source field (in mapping order) each candidate is scored by
/// [`similarity`] over normalized text. A candidate replaces the current
/// best only when its score is strictly greater and at least `threshold`;
/// a score exactly at the threshold is accepted, and ties keep the
/// earlier-scanned candidate. Fields with no qualifying candidate simply
/// produce no match.
///
/// Two source fields are allowed to match the same cell; the writer applies
/// matches in field order, so the later field's value stands.
pub fn match_fields(
    sources: &FieldMap,
    candidates: &[CellLocation],
    threshold: f64,
    method: MatchMethod,
) -> Vec<MatchCandidate> {
    if sources.is_empty() || candidates.is_empty() {
        return Vec::new();
    }

    let normalized: Vec<String> = candidates
        .iter()
        .map(|c| normalize_label(&c.content))
        .collect();

    let mut matches = Vec::new();
    for (name, value) in sources.iter() {
        let source_norm = normalize_label(name);
        let mut best: Option<(usize, f64)> = None;

        if !source_norm.is_empty() {
            for (idx, candidate_norm) in normalized.iter().enumerate() {
                if candidate_norm.is_empty() {
                    continue;
                }
                let score = similarity(&source_norm, candidate_norm);
                let current = best.map(|(_, s)| s).unwrap_or(0.0);
                if score > current && score >= threshold {
                    best = Some((idx, score));
                }
            }
        }

        match best {
            Some((idx, confidence)) => {
                let target = candidates[idx].clone();
                tracing::info!(
                    field = name,
                    target = %target.reference,
                    confidence,
                    "matched source field"
                );
                matches.push(MatchCandidate {
                    source_field: name.to_string(),
                    target,
                    confidence,
                    source_value: value.to_string(),
                    method,
                });
            }
            None => {
                tracing::debug!(field = name, threshold, "no candidate met the threshold");
            }
        }
    }

    tracing::info!(
        matched = matches.len(),
        sources = sources.len(),
        "field matching complete"
    );
    matches
}

/// Scan a sheet and match the source fields against it in one step.
pub fn reconcile_sheet<S: SheetRead + ?Sized>(
    sheet: &S,
    sources: &FieldMap,
    config: &ReconcileConfig,
) -> Vec<MatchCandidate> {
    let (candidates, method) = scan_candidates(sheet, config);
    if candidates.is_empty() {
        tracing::warn!(sheet = sheet.name(), "no label candidates found");
        return Vec::new();
    }
    match_fields(sources, &candidates, config.threshold, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sources(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().copied().collect()
    }

    fn candidate(row: u32, col: u32, content: &str) -> CellLocation {
        CellLocation::new(row, col, content)
    }

    #[test]
    fn test_exact_label_matches_with_full_confidence() {
        let fields = sources(&[("Client Name", "Acme Corp")]);
        let candidates = vec![candidate(12, 5, "Client Name:")];

        let matches = match_fields(&fields, &candidates, 0.65, MatchMethod::Optimized);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].source_field, "Client Name");
        assert_eq!(matches[0].target.reference, "E12");
        assert_eq!(matches[0].confidence, 1.0);
        assert_eq!(matches[0].source_value, "Acme Corp");
    }

    #[test]
    fn test_tie_keeps_earlier_scanned_candidate() {
        let fields = sources(&[("Cost Centre", "12345")]);
        // Identical content, so identical scores: the first in scan order wins
        let candidates = vec![
            candidate(3, 5, "Cost Centre:"),
            candidate(9, 5, "Cost Centre:"),
        ];

        let matches = match_fields(&fields, &candidates, 0.65, MatchMethod::Optimized);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].target.reference, "E3");
    }

    #[test]
    fn test_threshold_boundary() {
        // similarity("abcd", "bcde") == 0.75 after (no-op) normalization
        let fields = sources(&[("abcd", "v")]);
        let candidates = vec![candidate(1, 1, "bcde")];

        let accepted = match_fields(&fields, &candidates, 0.75, MatchMethod::Generic);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].confidence, 0.75);

        let rejected = match_fields(&fields, &candidates, 0.75 + 1e-9, MatchMethod::Generic);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_unmatched_field_is_an_absence() {
        let fields = sources(&[("Client Name", "Acme"), ("Billing Code", "B-1")]);
        let candidates = vec![candidate(2, 5, "Client Name:")];

        let matches = match_fields(&fields, &candidates, 0.65, MatchMethod::Optimized);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].source_field, "Client Name");
    }

    #[test]
    fn test_empty_normalized_text_never_matches() {
        let fields = sources(&[("***", "v")]);
        let candidates = vec![candidate(1, 1, "(((" ), candidate(2, 1, "real label")];

        let matches = match_fields(&fields, &candidates, 0.0, MatchMethod::Generic);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_two_fields_may_share_a_target() {
        let fields = sources(&[("Client Name", "First"), ("Client  Name", "Second")]);
        let candidates = vec![candidate(4, 5, "Client Name:")];

        let matches = match_fields(&fields, &candidates, 0.65, MatchMethod::Optimized);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].target.reference, "E4");
        assert_eq!(matches[1].target.reference, "E4");
        // Field order is preserved, so the later field's value wins at write time
        assert_eq!(matches[1].source_value, "Second");
    }

    #[test]
    fn test_best_score_wins_over_first_qualifying() {
        let fields = sources(&[("Opportunity Name", "Project X")]);
        let candidates = vec![
            candidate(1, 5, "Opportunity ID:"),
            candidate(2, 5, "Opportunity Name:"),
        ];

        let matches = match_fields(&fields, &candidates, 0.5, MatchMethod::Optimized);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].target.reference, "E2");
        assert_eq!(matches[0].confidence, 1.0);
    }
}
