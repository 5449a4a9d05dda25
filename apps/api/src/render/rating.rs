use serde::Serialize;

use crate::models::analysis::is_not_applicable;

/// Display bucket for an overall resume rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    /// 8 and above.
    Good,
    /// 6 up to 8.
    Fair,
    Poor,
    /// No leading number to judge by. Deliberately not `Poor`: a plain float
    /// parse would bucket these with low scores, but a missing score is not a
    /// low one.
    Unrated,
}

const GOOD_THRESHOLD: f64 = 8.0;
const FAIR_THRESHOLD: f64 = 6.0;

impl RatingTier {
    /// Classifies ratings such as `"8.5/10"` by their leading number.
    pub fn from_rating(rating: &str) -> Self {
        if is_not_applicable(rating) {
            return RatingTier::Unrated;
        }
        match leading_number(rating) {
            Some(score) if score >= GOOD_THRESHOLD => RatingTier::Good,
            Some(score) if score >= FAIR_THRESHOLD => RatingTier::Fair,
            Some(_) => RatingTier::Poor,
            None => RatingTier::Unrated,
        }
    }
}

/// Parses the longest numeric prefix (after leading whitespace), so `"8.5/10"`
/// yields 8.5 and `"7 out of 10"` yields 7.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
            has_digits = true;
        }
    }

    if !has_digits {
        return None;
    }
    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_rating_is_good() {
        assert_eq!(RatingTier::from_rating("8.5/10"), RatingTier::Good);
        assert_eq!(RatingTier::from_rating("8/10"), RatingTier::Good);
        assert_eq!(RatingTier::from_rating("10"), RatingTier::Good);
    }

    #[test]
    fn test_middle_rating_is_fair() {
        assert_eq!(RatingTier::from_rating("6/10"), RatingTier::Fair);
        assert_eq!(RatingTier::from_rating("7.9 / 10"), RatingTier::Fair);
    }

    #[test]
    fn test_low_rating_is_poor() {
        assert_eq!(RatingTier::from_rating("5.9/10"), RatingTier::Poor);
        assert_eq!(RatingTier::from_rating("0/10"), RatingTier::Poor);
        assert_eq!(RatingTier::from_rating("-1"), RatingTier::Poor);
    }

    #[test]
    fn test_unparseable_rating_is_unrated() {
        assert_eq!(RatingTier::from_rating("N/A"), RatingTier::Unrated);
        assert_eq!(RatingTier::from_rating(""), RatingTier::Unrated);
        assert_eq!(RatingTier::from_rating("excellent"), RatingTier::Unrated);
        assert_eq!(RatingTier::from_rating("./10"), RatingTier::Unrated);
    }

    #[test]
    fn test_leading_number_prefixes() {
        assert_eq!(leading_number("  8.5/10"), Some(8.5));
        assert_eq!(leading_number("7 out of 10"), Some(7.0));
        assert_eq!(leading_number(".5"), Some(0.5));
        assert_eq!(leading_number("9."), Some(9.0));
        assert_eq!(leading_number("score: 9"), None);
    }
}
