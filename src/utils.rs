//! Shared helpers for webhook signature verification

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Helper function for verifying a GitHub webhook signature.
///
/// The `X-Hub-Signature-256` header carries `sha256=<hex digest>`,
/// where the digest is HMAC-SHA256 over the raw request body keyed
/// with the shared secret. Returns false on any mismatch or malformed
/// header rather than distinguishing the causes.
pub fn verify_github_signature(secret: &str, body: &[u8], signature_header: &str) -> bool {
    let Some(hex_digest) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let Ok(claimed) = hex::decode(hex_digest) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(body);

    // verify_slice compares in constant time
    mac.verify_slice(&claimed).is_ok()
}
