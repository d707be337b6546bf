//! # Validation Utilities
//!
//! Input helpers for the simulated login form.

/// Part of an email before `@`, or `None` when there is nothing usable.
pub fn email_local_part(email: &str) -> Option<&str> {
    let local = email.trim().split('@').next()?.trim();
    if local.is_empty() {
        None
    } else {
        Some(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("ramesh@kisan.in"), Some("ramesh"));
        assert_eq!(email_local_part("ramesh"), Some("ramesh"));
        assert_eq!(email_local_part("  "), None);
        assert_eq!(email_local_part("@x.in"), None);
    }
}
