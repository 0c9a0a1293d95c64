//! Digest helpers for scan analytics.
//!
//! Client IPs are never stored in clear; scans keep a keyed digest so the
//! same visitor can be counted without the raw address leaking from a
//! database dump.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Keyed HMAC-SHA256 of `data`, hex encoded.
pub fn hmac_sha256_hex(secret: &str, data: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

/// Hash a client IP for storage on a scan row.
///
/// Returns `None` for blank or `"unknown"` addresses so the column stays
/// null instead of holding the digest of a placeholder.
pub fn hash_client_ip(secret: &str, ip: &str) -> Option<String> {
    let ip = ip.trim();
    if ip.is_empty() || ip.eq_ignore_ascii_case("unknown") {
        return None;
    }
    Some(hmac_sha256_hex(secret, ip.as_bytes()))
}
