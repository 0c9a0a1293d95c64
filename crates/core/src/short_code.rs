//! Short-code generation.
//!
//! Short codes are the public identifier in every scanned URL
//! (`/q/{short_code}`). They are drawn uniformly from the 62-symbol
//! alphanumeric alphabet and must be globally unique.

use std::future::Future;

use rand::Rng;

use crate::error::CoreError;

/// Default short-code length.
pub const DEFAULT_LENGTH: usize = 8;

/// Upper bound on generate-and-check rounds before giving up.
pub const MAX_ATTEMPTS: u32 = 20;

/// The 62 symbols a short code may contain.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random short code of `length` alphanumeric characters.
pub fn generate(length: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Whether `code` looks like a short code this service could have issued.
///
/// Used to reject junk path segments before they reach the database.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == DEFAULT_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Allocate a unique short code: draw candidates from `next_code`
/// (normally `|| generate(DEFAULT_LENGTH)`) and let `attempt` try to claim
/// each, usually by inserting a row.
///
/// `Ok(None)` from `attempt` means the candidate was already taken and
/// another is drawn. Gives up with [`CoreError::RetryExhausted`] after
/// [`MAX_ATTEMPTS`] collisions; any `Err` from `attempt` is returned as is.
pub async fn ensure_unique<T, E, C, F, Fut>(mut next_code: C, mut attempt: F) -> Result<T, E>
where
    C: FnMut() -> String,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: From<CoreError>,
{
    for _ in 0..MAX_ATTEMPTS {
        if let Some(claimed) = attempt(next_code()).await? {
            return Ok(claimed);
        }
    }
    Err(CoreError::RetryExhausted {
        what: "short code",
        attempts: MAX_ATTEMPTS,
    }
    .into())
}
