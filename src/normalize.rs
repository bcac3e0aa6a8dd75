//! Normalizers for the free-text summary fields on a course page.
//!
//! The catalog renders durations either as a plain value ("16 weeks",
//! "~ 8 hours per week") or as a range ("from 4 to 8 weeks"). Ranges are
//! normalized to (min, max) pairs; plain values repeat the same number twice.

use crate::error::{AppError, Result};

/// Parse a course length phrase into (weeks_min, weeks_max).
pub fn parse_week_range(text: &str) -> Result<(u32, u32)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.contains(&"from") {
        Ok((int_token(&tokens, 1, text)?, int_token(&tokens, 3, text)?))
    } else {
        let weeks = int_token(&tokens, 0, text)?;
        Ok((weeks, weeks))
    }
}

/// Parse a weekly workload phrase into (hours_min, hours_max).
///
/// Plain workload values carry a leading approximation mark ("~ 8 hours per
/// week"), so the number sits at the second token, unlike week phrases.
pub fn parse_hour_range(text: &str) -> Result<(u32, u32)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.contains(&"from") {
        Ok((int_token(&tokens, 1, text)?, int_token(&tokens, 3, text)?))
    } else {
        let hours = int_token(&tokens, 1, text)?;
        Ok((hours, hours))
    }
}

/// Parse a credit phrase ("3 credit units") into its leading number.
pub fn parse_credits(text: &str) -> Result<u32> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    int_token(&tokens, 0, text)
}

/// Map a language phrase to a two-letter code; unknown phrases map to "".
pub fn language_code(text: &str) -> &'static str {
    match text.trim() {
        "Russian language" => "ru",
        "English language" => "en",
        _ => "",
    }
}

fn int_token(tokens: &[&str], index: usize, source: &str) -> Result<u32> {
    let token = tokens.get(index).ok_or_else(|| {
        AppError::parse(format!("missing token {index} in {source:?}"))
    })?;
    token.parse().map_err(|_| {
        AppError::parse(format!("non-numeric token {token:?} in {source:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_range_expands_from_phrase() {
        assert_eq!(parse_week_range("from 4 to 8 weeks").unwrap(), (4, 8));
    }

    #[test]
    fn week_range_repeats_single_value() {
        assert_eq!(parse_week_range("16 weeks").unwrap(), (16, 16));
    }

    #[test]
    fn hour_range_expands_from_phrase() {
        assert_eq!(parse_hour_range("from 6 to 9 hours per week").unwrap(), (6, 9));
    }

    #[test]
    fn hour_range_reads_second_token_of_plain_phrase() {
        assert_eq!(parse_hour_range("~ 8 hours per week").unwrap(), (8, 8));
    }

    #[test]
    fn plain_phrases_index_differently_for_weeks_and_hours() {
        // Week phrases start with the number, hour phrases with "~".
        assert_eq!(parse_week_range("16 weeks").unwrap(), (16, 16));
        assert!(parse_hour_range("16 hours").is_err());
        assert_eq!(parse_hour_range("~ 16 hours").unwrap(), (16, 16));
    }

    #[test]
    fn range_phrase_needs_both_bounds() {
        assert!(parse_week_range("from 4 weeks").is_err());
    }

    #[test]
    fn empty_phrase_is_rejected() {
        assert!(parse_week_range("").is_err());
        assert!(parse_hour_range("").is_err());
        assert!(parse_credits("").is_err());
    }

    #[test]
    fn credits_read_leading_number() {
        assert_eq!(parse_credits("3 credit units").unwrap(), 3);
    }

    #[test]
    fn credits_reject_text_lead() {
        assert!(parse_credits("three credit units").is_err());
    }

    #[test]
    fn language_codes_map_known_phrases() {
        assert_eq!(language_code("Russian language"), "ru");
        assert_eq!(language_code("English language"), "en");
        assert_eq!(language_code("  English language  "), "en");
    }

    #[test]
    fn unknown_language_maps_to_empty() {
        assert_eq!(language_code("Esperanto"), "");
        assert_eq!(language_code(""), "");
    }
}
