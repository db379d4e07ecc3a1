//! Claimant email normalization.
//!
//! Enrollment uniqueness is keyed on the normalized form, so every code
//! path that touches an enrollment email must go through [`normalize`].

/// Normalize an email for storage and uniqueness comparison.
///
/// Trims surrounding whitespace and lowercases the whole address. Local
/// parts are technically case-sensitive per RFC 5321, but no mainstream
/// provider honors that and the original enrollment data never did.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Cheap structural check used before hitting the database.
///
/// Full deliverability validation is out of scope; this only rejects
/// obviously malformed input (missing `@`, interior whitespace, empty
/// local part or domain).
pub fn is_plausible(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && domain.contains('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize("bob@example.com"), "bob@example.com");
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        // Structural validation rejects these; normalize does not guess.
        assert_eq!(normalize("a b@example.com"), "a b@example.com");
    }

    #[test]
    fn plausible_accepts_normal_address() {
        assert!(is_plausible("carol@example.com"));
    }

    #[test]
    fn plausible_rejects_missing_at() {
        assert!(!is_plausible("carol.example.com"));
    }

    #[test]
    fn plausible_rejects_empty_local_part() {
        assert!(!is_plausible("@example.com"));
    }

    #[test]
    fn plausible_rejects_bare_domain() {
        assert!(!is_plausible("carol@localhost"));
    }

    #[test]
    fn plausible_rejects_interior_whitespace() {
        assert!(!is_plausible("a b@example.com"));
    }
}
