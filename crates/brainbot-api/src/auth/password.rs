//! Client-side password rules, checked before any request is made.

use crate::ApiError;

pub const MIN_PASSWORD_LEN: usize = 8;

fn check_new_password(new_password: &str, confirmation: &str) -> Result<(), ApiError> {
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if new_password != confirmation {
        return Err(ApiError::InvalidInput("Passwords do not match".into()));
    }
    Ok(())
}

/// Rules for the signed-in "change password" form.
pub fn validate_password_change(new_password: &str, confirmation: &str) -> Result<(), ApiError> {
    check_new_password(new_password, confirmation)
}

/// Rules for the emailed reset link: the link must carry both email and token.
pub fn validate_password_reset(
    email: &str,
    token: &str,
    new_password: &str,
    confirmation: &str,
) -> Result<(), ApiError> {
    check_new_password(new_password, confirmation)?;
    if email.trim().is_empty() || token.trim().is_empty() {
        return Err(ApiError::InvalidInput("Invalid or missing reset link".into()));
    }
    Ok(())
}
