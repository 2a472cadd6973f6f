//! Field-level validation helpers shared by the entity input types.
//!
//! Validators collect every applicable [`FieldError`] instead of failing fast,
//! so a form round-trip can surface all problems at once.

pub use common::types::FieldError;

/// RFC-lite email check: one `@`, no whitespace, and the domain part carries
/// a dot with characters on both sides (`local@domain.tld`).
pub fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
