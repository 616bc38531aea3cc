//! Validation of the profile fields collected during onboarding.
//!
//! Each validator returns the accepted (trimmed) value or
//! [`DomainError::InvalidProfile`] naming the rejected field.

use crate::core::error::DomainError;

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 50;
const PHONE_PREFIX: &str = "09";
const PHONE_SUFFIX_DIGITS: usize = 9;

/// Letters of the Arabic-script block (Persian names) or ASCII Latin letters.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{0600}'..='\u{06FF}').contains(&c) || c.is_whitespace()
}

/// Full name: 3-50 letters or spaces, and at least one space (first and last name).
pub fn validate_full_name(input: &str) -> Result<String, DomainError> {
    let chars = input.chars().count();
    let well_formed = (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars)
        && input.chars().all(is_name_char)
        && input.contains(' ');
    if well_formed {
        Ok(input.trim().to_string())
    } else {
        Err(DomainError::InvalidProfile("full_name".into()))
    }
}

/// Mobile number: `09` followed by exactly nine digits.
pub fn validate_phone(input: &str) -> Result<String, DomainError> {
    let well_formed = input.strip_prefix(PHONE_PREFIX).is_some_and(|rest| {
        rest.len() == PHONE_SUFFIX_DIGITS && rest.bytes().all(|b| b.is_ascii_digit())
    });
    if well_formed {
        Ok(input.to_string())
    } else {
        Err(DomainError::InvalidProfile("phone".into()))
    }
}

/// City: more than 2 and fewer than 50 characters, without `:`.
pub fn validate_city(input: &str) -> Result<String, DomainError> {
    let chars = input.chars().count();
    if chars > 2 && chars < 50 && !input.contains(':') {
        Ok(input.trim().to_string())
    } else {
        Err(DomainError::InvalidProfile("city".into()))
    }
}
