//! Edit distance and normalized similarity.
//!
//! Both functions compare Unicode scalar values. Case folding is the
//! caller's job; the scorer lower-cases everything before it gets here.

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character insertions, deletions or substitutions
/// needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Two rows of the (m+1) x (n+1) table are enough
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity in `[0, 1]`.
///
/// `1 - distance / max(len(a), len(b))`, where two empty strings are
/// considered identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }

    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("curry", "curry"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("pasta", "pesta"), 1);
    }

    #[test]
    fn test_levenshtein_insert() {
        assert_eq!(levenshtein_distance("tiramisu", "tiramisou"), 1);
    }

    #[test]
    fn test_levenshtein_delete() {
        assert_eq!(levenshtein_distance("chicken", "chiken"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "naan"), 4);
        assert_eq!(levenshtein_distance("naan", ""), 4);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn test_levenshtein_multibyte() {
        assert_eq!(levenshtein_distance("crème", "creme"), 1);
    }

    #[test]
    fn test_similarity_typo() {
        let ratio = similarity_ratio("tiramisou", "tiramisu");
        assert!((ratio - 0.888_888).abs() < 1e-4);
        assert_eq!((ratio * 30.0).floor() as u32, 26);
    }

    #[test]
    fn test_similarity_empty_strings() {
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("", "dal"), 0.0);
    }

    #[test]
    fn test_similarity_exact_boundaries() {
        // 1 edit over 20 chars and 2 edits over 5 chars land exactly on the
        // suggestion cut-offs
        assert_eq!(similarity_ratio("abcdefghijklmnopqrst", "abcdefghijklmnopqrsx"), 0.95);
        assert_eq!(similarity_ratio("abcde", "abcxy"), 0.6);
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(levenshtein_distance(&a, &b), levenshtein_distance(&b, &a));
        }

        #[test]
        fn prop_distance_zero_iff_equal(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            prop_assert_eq!(levenshtein_distance(&a, &b) == 0, a == b);
        }

        #[test]
        fn prop_similarity_bounds(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let ratio = similarity_ratio(&a, &b);
            prop_assert!((0.0..=1.0).contains(&ratio));
            prop_assert_eq!(similarity_ratio(&a, &a), 1.0);
        }
    }
}
