//! HMAC-SHA256 payload signatures.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded HMAC-SHA256 signature of `payload`.
///
/// An empty secret produces an empty string, which [`verify`] will never
/// accept.
pub fn sign(payload: &[u8], secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Checks `signature` against a freshly computed signature of `payload`.
///
/// The comparison is constant-time (via the `hmac` crate's tag
/// verification), so the result does not leak how many signature bytes
/// matched. Fails closed: an empty secret or a signature that is not valid
/// hex returns `false`.
pub fn verify(payload: &[u8], secret: &str, signature: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"eventId":"evt_1","eventType":"card.created"}"#;

    #[test]
    fn sign_verify_roundtrip() {
        let signature = sign(PAYLOAD, SECRET);
        assert!(verify(PAYLOAD, SECRET, &signature));
    }

    #[test]
    fn signature_is_hex_sha256_length() {
        assert_eq!(sign(PAYLOAD, SECRET).len(), 64);
    }

    #[test]
    fn tampered_payload_fails() {
        let signature = sign(PAYLOAD, SECRET);
        assert!(!verify(b"tampered", SECRET, &signature));
    }

    #[test]
    fn wrong_secret_fails() {
        let signature = sign(PAYLOAD, SECRET);
        assert!(!verify(PAYLOAD, "whsec_other", &signature));
    }

    #[test]
    fn empty_secret_fails_closed() {
        let signature = sign(PAYLOAD, SECRET);
        assert!(!verify(PAYLOAD, "", &signature));
        // Even against the degenerate empty signature.
        assert!(!verify(PAYLOAD, "", ""));
    }

    #[test]
    fn non_hex_signature_fails() {
        assert!(!verify(PAYLOAD, SECRET, "not-hex-at-all"));
    }
}
