// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::{AppError, Result};

/// Extract the numeric subject-group id from a taxonomy link.
///
/// Group links carry the id as the value of their last query parameter,
/// e.g. `https://openedu.ru/course/?course_group=10`. Relative links are
/// handled by falling back to the text after the last `=`.
///
/// # Examples
/// ```
/// use openedu_crawler::utils::url::extract_group_id;
///
/// assert_eq!(
///     extract_group_id("https://openedu.ru/course/?course_group=10").unwrap(),
///     10
/// );
/// ```
pub fn extract_group_id(href: &str) -> Result<u32> {
    let raw = match Url::parse(href) {
        Ok(parsed) => parsed.query_pairs().last().map(|(_, value)| value.to_string()),
        Err(_) => href.rsplit_once('=').map(|(_, value)| value.to_string()),
    };

    let raw = raw.ok_or_else(|| AppError::parse(format!("group link {href:?} has no id")))?;
    raw.parse()
        .map_err(|_| AppError::parse(format!("group link {href:?} has non-numeric id {raw:?}")))
}
