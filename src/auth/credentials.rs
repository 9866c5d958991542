//! Shared-secret admin credential verification.

use crate::config::Config;
use crate::error::AppError;

/// Compare submitted credentials against the configured admin pair.
///
/// # Returns
/// * `Ok(true)` if both username and password match
/// * `Ok(false)` on any mismatch
/// * `Err(AppError::Config)` when the server has no complete credential
///   pair configured — reported as a 500 configuration error, distinct
///   from a 401 credential mismatch, without naming the missing variable
pub fn verify_credentials(
    config: &Config,
    username: &str,
    password: &str,
) -> Result<bool, AppError> {
    let (expected_user, expected_pass) = match (&config.admin_username, &config.admin_password) {
        (Some(user), Some(pass)) => (user, pass),
        _ => {
            return Err(AppError::Config(
                "Admin credentials are not configured".to_string(),
            ))
        }
    };

    Ok(username == expected_user && password == expected_pass)
}
