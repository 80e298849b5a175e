//! Unverified JWT expiry peek.
//!
//! Reads the `exp` claim out of a token payload without checking the
//! signature. This only exists to skip a refresh round trip that is certain
//! to fail; the server remains the authority on token validity.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;

/// Local verdict on a token's expiry claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpiryCheck {
    /// Decodable `exp` claim in the past.
    Expired,
    /// Decodable `exp` claim still in the future.
    Valid,
    /// Not a decodable JWT, or no usable `exp` claim. Treated as "cannot
    /// verify locally": the refresh call proceeds and the server decides.
    Unverifiable,
}

pub(crate) fn check_expiry(token: &str) -> ExpiryCheck {
    match decode_exp(token) {
        Some(exp) if exp <= Utc::now().timestamp() => ExpiryCheck::Expired,
        Some(_) => ExpiryCheck::Valid,
        None => ExpiryCheck::Unverifiable,
    }
}

fn decode_exp(token: &str) -> Option<i64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let decoded = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let json: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    json.get("exp")?.as_i64()
}
