//! Ratcliff–Obershelp similarity ratio
//!
//! The ratio is 2·M / (|a| + |b|) where M is the total length of matching
//! blocks: the longest common block is found, then the regions to its left
//! and right are matched recursively. O(|a|·|b|) per block search.

/// Similarity of two strings as a ratio in [0, 1].
///
/// 1.0 means identical, 0.0 means no overlap. Either side being empty
/// scores 0.0: an empty normalized label has no comparable content and
/// never matches anything.
///
/// # Examples
/// ```
/// use pricebook_match::similarity;
///
/// assert_eq!(similarity("client name", "client name"), 1.0);
/// assert_eq!(similarity("abcd", "bcde"), 0.75);
/// assert_eq!(similarity("", "anything"), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    // Canonical argument order: block tie-breaks would otherwise let
    // similarity(a, b) and similarity(b, a) disagree on contrived inputs.
    let (a, b) = if (a.len(), a) <= (b.len(), b) { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let matched = matching_len(&a, 0, a.len(), &b, 0, b.len());
    (2.0 * matched as f64) / ((a.len() + b.len()) as f64)
}

/// Total matched characters between `a[alo..ahi]` and `b[blo..bhi]`.
fn matching_len(a: &[char], alo: usize, ahi: usize, b: &[char], blo: usize, bhi: usize) -> usize {
    if alo >= ahi || blo >= bhi {
        return 0;
    }
    let (i, j, k) = longest_block(a, alo, ahi, b, blo, bhi);
    if k == 0 {
        return 0;
    }
    k + matching_len(a, alo, i, b, blo, j) + matching_len(a, i + k, ahi, b, j + k, bhi)
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as
/// (a_start, b_start, len). Ties resolve to the earliest a-index, then the
/// earliest b-index, keeping the recursion deterministic.
fn longest_block(
    a: &[char],
    alo: usize,
    ahi: usize,
    b: &[char],
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0usize);
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];

    for i in alo..ahi {
        cur[0] = 0;
        for j in blo..bhi {
            let jj = j - blo;
            if a[i] == b[j] {
                let run = prev[jj] + 1;
                cur[jj + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            } else {
                cur[jj + 1] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_is_one() {
        assert_eq!(similarity("opportunity id", "opportunity id"), 1.0);
        assert_eq!(similarity("a", "a"), 1.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "client name"), 0.0);
        assert_eq!(similarity("client name", ""), 0.0);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // Longest block "bcd", nothing else matches: 2*3 / 8
        assert_eq!(similarity("abcd", "bcde"), 0.75);
        // "client name" vs "client names": 2*11 / 23
        let score = similarity("client name", "client names");
        assert!((score - 22.0 / 23.0).abs() < 1e-12);
    }

    #[test]
    fn test_recursion_covers_flanking_regions() {
        // Blocks "xx" and then "yy" on each side of the mismatch
        let score = similarity("xxayy", "xxbyy");
        assert_eq!(score, 0.8);
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in "[a-d ]{0,12}", b in "[a-d ]{0,12}") {
            prop_assert_eq!(similarity(&a, &b).to_bits(), similarity(&b, &a).to_bits());
        }

        #[test]
        fn prop_in_unit_range(a in "[a-f]{0,16}", b in "[a-f]{0,16}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn prop_identical_nonempty_is_one(a in "[a-z]{1,16}") {
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }
    }
}
