//! Reusable input validators.
//!
//! Plain predicates shared by the domain constructors and the CLI value
//! parsers. Email shape is checked character by character.

/// Whether `value` has non-whitespace content
pub fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Team sizes must be positive
pub fn validate_team_size(team_size: usize) -> bool {
    team_size > 0
}

/// Budgets must be finite and non-negative
pub fn validate_budget(budget: f64) -> bool {
    budget.is_finite() && budget >= 0.0
}

/// Basic email shape check: `local@domain`.
///
/// The local part may contain alphanumerics and `+ _ . -`; the domain may
/// contain alphanumerics, `.` and `-`. Exactly one `@` is allowed.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));

    local_ok && domain_ok
}
