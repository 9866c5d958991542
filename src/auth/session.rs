//! Session token issue and validation.
//!
//! A token is `base64("{unix_millis}-{nonce}-{secret}")` where the secret is
//! the shared admin password. There is no signature and no server-side
//! session state: possession of a token embedding the right secret is the
//! whole proof, and the httpOnly cookie over HTTPS is what keeps tokens
//! confidential. The embedded timestamp is informational only; expiry is
//! enforced by the cookie Max-Age, not here.

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use zeroize::Zeroizing;

/// Length of the random middle segment. Alphanumeric only, so the
/// dash-delimited layout stays unambiguous.
const NONCE_LEN: usize = 12;

/// Issue a new session token bound to the given shared secret.
pub fn issue_token(secret: &str) -> String {
    let nonce: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect();

    // The plaintext embeds the secret; zeroize it once encoded.
    let raw = Zeroizing::new(format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        nonce,
        secret
    ));
    general_purpose::STANDARD.encode(raw.as_bytes())
}

/// Check a presented token against the shared secret.
///
/// Returns false on any structural problem: not base64, not UTF-8, not
/// exactly three dash-separated parts, or a secret mismatch. Never panics.
/// A secret that itself contains a dash can never produce a valid token
/// (the part count check fails), which fails closed.
pub fn validate_token(token: &str, secret: &str) -> bool {
    let decoded = match general_purpose::STANDARD.decode(token) {
        Ok(bytes) => Zeroizing::new(bytes),
        Err(_) => return false,
    };

    let text = match std::str::from_utf8(&decoded) {
        Ok(text) => text,
        Err(_) => return false,
    };

    let parts: Vec<&str> = text.split('-').collect();
    parts.len() == 3 && parts[2] == secret
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "correcthorse";

    #[test]
    fn test_issued_token_validates() {
        let token = issue_token(SECRET);
        assert!(validate_token(&token, SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(SECRET);
        assert!(!validate_token(&token, "batterystaple"));
    }

    #[test]
    fn test_tokens_are_unique() {
        // Same secret, back-to-back: the nonce must differ even when the
        // millisecond timestamp does not.
        let token1 = issue_token(SECRET);
        let token2 = issue_token(SECRET);
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_token_layout() {
        let token = issue_token(SECRET);
        let decoded = general_purpose::STANDARD.decode(&token).unwrap();
        let text = std::str::from_utf8(&decoded).unwrap();

        let parts: Vec<&str> = text.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<i64>().is_ok(), "timestamp part: {}", parts[0]);
        assert_eq!(parts[1].len(), NONCE_LEN);
        assert!(parts[1].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(parts[2], SECRET);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!validate_token("", SECRET));
        assert!(!validate_token("!!!not-base64!!!", SECRET));

        // Valid base64 but not UTF-8
        let not_utf8 = general_purpose::STANDARD.encode([0xff, 0xfe, 0x80]);
        assert!(!validate_token(&not_utf8, SECRET));
    }

    #[test]
    fn test_rejects_wrong_part_count() {
        let two_parts = general_purpose::STANDARD.encode(format!("1700000000000-{}", SECRET));
        assert!(!validate_token(&two_parts, SECRET));

        let four_parts =
            general_purpose::STANDARD.encode(format!("1700000000000-abc-extra-{}", SECRET));
        assert!(!validate_token(&four_parts, SECRET));
    }

    #[test]
    fn test_dashed_secret_fails_closed() {
        // The dash splits the secret into extra parts; such tokens can never
        // validate, and that must reject rather than accept.
        let secret = "pass-word";
        let token = issue_token(secret);
        assert!(!validate_token(&token, secret));
    }

    #[test]
    fn test_forged_token_without_secret() {
        let forged = general_purpose::STANDARD.encode("1700000000000-abcdefGHIJ12-");
        assert!(!validate_token(&forged, SECRET));
    }
}
