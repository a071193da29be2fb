use validator::ValidateEmail;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Problem with a single field, or with the password/confirmation pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    MinLength { min: usize },
    PasswordMismatch,
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !value.validate_email() {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::MinLength {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Confirmation must be filled in, and must equal the password exactly
pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), FieldError> {
    if confirmation.is_empty() {
        return Err(FieldError::Required);
    }
    if password != confirmation {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(""), Err(FieldError::Required));
        assert_eq!(validate_email("not-an-email"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("jane@"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("jane doe@example.com"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("jane@example.com"), Ok(()));
        assert_eq!(validate_email("jane.doe+ads@mail.example.fr"), Ok(()));
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), Err(FieldError::Required));
        assert_eq!(
            validate_password("12345"),
            Err(FieldError::MinLength { min: 6 })
        );
        assert_eq!(validate_password("123456"), Ok(()));
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Five characters, more than six bytes
        assert_eq!(
            validate_password("éééé€"),
            Err(FieldError::MinLength { min: 6 })
        );
        assert_eq!(validate_password("éééé€é"), Ok(()));
    }

    #[test]
    fn test_confirmation_rules() {
        assert_eq!(validate_confirmation("secret1", ""), Err(FieldError::Required));
        assert_eq!(
            validate_confirmation("secret1", "secret2"),
            Err(FieldError::PasswordMismatch)
        );
        assert_eq!(
            validate_confirmation("secret1", "Secret1"),
            Err(FieldError::PasswordMismatch)
        );
        assert_eq!(validate_confirmation("secret1", "secret1"), Ok(()));
    }
}
