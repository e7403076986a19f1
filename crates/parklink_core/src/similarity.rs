//! Edit-distance name similarity.
//!
//! Names are normalized before comparison: lower-cased, with every character
//! that is not an ASCII letter or digit removed. "Joshua Tree N.P." and
//! "joshua tree np" therefore compare as identical.

/// Lower-case `name` and keep only ASCII alphanumerics.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Similarity of two names in `[0, 1]`.
///
/// Returns `0.0` when either name normalizes to nothing and exactly `1.0`
/// when the normalized forms are equal. Otherwise
/// `1 - levenshtein / max(len_a, len_b)`.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = normalize_name(a);
    let b = normalize_name(b);
    normalized_similarity(&a, &b)
}

/// Same as [`name_similarity`] for inputs already passed through [`normalize_name`].
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    // Normalized strings are ASCII, so byte length equals char count.
    let max_len = a.len().max(b.len());
    let distance = strsim::levenshtein(a, b);
    1.0 - distance as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_case_and_punctuation() {
        assert_eq!(normalize_name("Joshua Tree N.P."), "joshuatreenp");
        assert_eq!(normalize_name("Yosemite-NP"), "yosemitenp");
        assert_eq!(normalize_name("  ...  "), "");
    }

    #[test]
    fn punctuation_and_case_variants_are_identical() {
        assert_eq!(name_similarity("Joshua Tree N.P.", "joshua tree np"), 1.0);
        assert_eq!(name_similarity("Yosemite NP", "yosemite np"), 1.0);
        assert_eq!(name_similarity("Yosemite NP", "Yosemite-NP"), 1.0);
    }

    #[test]
    fn empty_after_normalization_scores_zero() {
        assert_eq!(name_similarity("", "Zion"), 0.0);
        assert_eq!(name_similarity("Zion", "!!!"), 0.0);
        assert_eq!(name_similarity("", ""), 0.0);
    }

    #[test]
    fn single_character_strings() {
        assert_eq!(name_similarity("a", "A"), 1.0);
        assert_eq!(name_similarity("a", "b"), 0.0);
    }

    #[test]
    fn partial_overlap_uses_longest_length() {
        // "kitten" -> "sitting" is the classic distance-3 pair.
        let score = name_similarity("kitten", "sitting");
        assert!((score - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn non_ascii_characters_are_dropped() {
        // The accented character is removed rather than folded.
        assert_eq!(normalize_name("Café"), "caf");
    }
}
