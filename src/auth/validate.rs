use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::RegisterRequest;
use crate::errors::ApiError;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Registration input after trimming and validation.
#[derive(Debug)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Pure check of registration input: trims name, email and password, then
/// enforces name >= 3 chars, a plausible email shape and password >= 6 chars.
pub fn validate_registration(input: &RegisterRequest) -> Result<NewAccount, ApiError> {
    let name = input.name.trim();
    let email = input.email.trim();
    let password = input.password.trim();

    if name.chars().count() < 3 {
        return Err(ApiError::validation(
            "name must be at least 3 characters long",
        ));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ApiError::validation("invalid email format"));
    }
    if password.chars().count() < 6 {
        return Err(ApiError::validation(
            "password must be at least 6 characters long",
        ));
    }

    Ok(NewAccount {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_valid_input_and_trims() {
        let account =
            validate_registration(&request("  Test User  ", " t@example.com ", " securepw "))
                .expect("valid input");
        assert_eq!(account.name, "Test User");
        assert_eq!(account.email, "t@example.com");
        assert_eq!(account.password, "securepw");
    }

    #[test]
    fn rejects_short_name() {
        let err = validate_registration(&request("ab", "t@example.com", "securepw")).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn whitespace_padding_does_not_satisfy_name_length() {
        assert!(validate_registration(&request("  a  ", "t@example.com", "securepw")).is_err());
    }

    #[test]
    fn rejects_bad_email_shapes() {
        for email in [
            "",
            "plainaddress",
            "missing-domain@",
            "@missing-local.com",
            "no-dot@domain",
            "one-letter-tld@example.c",
            "spaces in@example.com",
        ] {
            let err = validate_registration(&request("Test User", email, "securepw"))
                .expect_err(email);
            assert!(err.to_string().contains("email"), "{email}");
        }
    }

    #[test]
    fn accepts_plus_and_dots_in_local_part() {
        assert!(
            validate_registration(&request("Test User", "first.last+tag@sub.example.co", "securepw"))
                .is_ok()
        );
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_registration(&request("Test User", "t@example.com", "12345")).unwrap_err();
        assert!(err.to_string().contains("password"));
    }
}
