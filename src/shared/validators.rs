use crate::shared::error::FieldErrors;

pub fn require(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field is required");
    }
}

pub fn check_choice(errors: &mut FieldErrors, field: &str, value: &str, choices: &[&str]) {
    if !choices.contains(&value) {
        errors.add(field, format!("'{value}' is not a valid choice"));
    }
}

pub fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        errors.add(field, "Enter a valid email address");
    }
}

/// Tax identification number: exactly ten digits when present.
pub fn check_nip(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    if value.len() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
        errors.add(field, "NIP must consist of 10 digits");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_flags_blank() {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", "  ");
        assert!(errors.has("name"));
    }

    #[test]
    fn test_check_email_accepts_valid() {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, "email", "jan.kowalski@example.com");
        check_email(&mut errors, "email", "");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_email_rejects_malformed() {
        for bad in ["plainaddress", "@example.com", "user@", "user@nodot", "user@dot."] {
            let mut errors = FieldErrors::new();
            check_email(&mut errors, "email", bad);
            assert!(errors.has("email"), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_check_nip() {
        let mut errors = FieldErrors::new();
        check_nip(&mut errors, "nip", "1234567890");
        assert!(errors.is_empty());
        check_nip(&mut errors, "nip", "123");
        check_nip(&mut errors, "nip", "12345678ab");
        assert_eq!(errors.0["nip"].len(), 2);
    }

    #[test]
    fn test_check_choice() {
        let mut errors = FieldErrors::new();
        check_choice(&mut errors, "status", "lead", &["lead", "prospect"]);
        assert!(errors.is_empty());
        check_choice(&mut errors, "status", "vip", &["lead", "prospect"]);
        assert!(errors.has("status"));
    }
}
