//! User-supplied identifier classification.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for the canonical dashed UUID textual form (8-4-4-4-12 hex).
static FULL_UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap_or_else(|_| unreachable!())
});

/// Check whether a token is a full identifier in canonical UUID form.
///
/// Only the dashed 8-4-4-4-12 hex shape qualifies, case-insensitively.
/// Every other string, including the empty string, is treated as a partial
/// identifier or name and returns `false`. Undashed, braced, and URN UUID
/// renderings are deliberately partial tokens: the platform only accepts
/// the canonical form for exact fetches.
///
/// # Example
///
/// ```
/// use longshore_core::is_uuid4;
///
/// assert!(is_uuid4("7a4cfe51-038b-42d6-825e-3b533888d8cd"));
/// assert!(is_uuid4("7A4CFE51-03BB-42D6-825E-3B533888D8CD"));
/// assert!(!is_uuid4("7a4cfe51"));
/// assert!(!is_uuid4(""));
/// ```
#[must_use]
pub fn is_uuid4(token: &str) -> bool {
    FULL_UUID_REGEX.is_match(token)
}
