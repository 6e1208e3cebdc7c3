use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Normalize an email address by trimming surrounding whitespace and
/// lowercasing the domain part. The local part keeps its case.
///
/// Returns `None` when the input has no `@` at all, so callers can treat
/// junk input as "no email" rather than an error.
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let (local, domain) = trimmed.rsplit_once('@')?;
    Some(format!("{local}@{}", domain.to_lowercase()))
}
