use caseless::default_case_fold_str;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Reduce a ritual name or file name to the key used for prefix matching.
///
/// The value is decomposed (NFKD), case folded, and stripped of everything that is not a
/// letter or digit. Combining marks go too, so accents, punctuation, whitespace and separators
/// never affect a match.
pub fn normalize_key(value: &str) -> String {
    let decomposed: String = value.nfkd().collect();
    default_case_fold_str(&decomposed)
        .chars()
        .filter(|c| c.is_alphanumeric() && !is_combining_mark(*c))
        .collect()
}
