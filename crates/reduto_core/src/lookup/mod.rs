//! Postal-code address lookup against an external directory service.
//!
//! # Responsibility
//! - Define the lookup capability and its structured result.
//! - Gate malformed postal codes before any network traffic.
//!
//! # Invariants
//! - Codes that are not exactly 8 digits never reach the network.
//! - "Not found" is data (`Ok(None)`), not an error.

use crate::format::digits_only;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod viacep;

pub use viacep::ViaCepClient;

pub type LookupResult<T> = Result<T, LookupError>;

/// Transport-level lookup failure. Callers treat these as "no data"
/// after logging; the directory service is untrusted and unreliable.
#[derive(Debug)]
pub enum LookupError {
    Http(reqwest::Error),
    /// Non-success HTTP status from the directory service.
    Status(u16),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "{err}"),
            Self::Status(code) => write!(f, "directory service returned status {code}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Structured address returned by a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Directory lookup capability keyed by an 8-digit postal code.
pub trait AddressLookup {
    /// Resolves a postal code to a structured address.
    ///
    /// Returns `Ok(None)` for unknown codes and for inputs that are not
    /// exactly 8 digits after stripping separators (no request is made).
    fn by_postal_code(&self, code: &str) -> LookupResult<Option<Address>>;
}

/// Normalizes a postal code to its 8-digit form, or `None` if malformed.
pub fn normalize_postal_code(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    if digits.len() == 8 {
        Some(digits)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_postal_code;

    #[test]
    fn normalize_accepts_masked_and_plain_codes() {
        assert_eq!(normalize_postal_code("01310-930").as_deref(), Some("01310930"));
        assert_eq!(normalize_postal_code("01310930").as_deref(), Some("01310930"));
    }

    #[test]
    fn normalize_rejects_wrong_lengths() {
        assert_eq!(normalize_postal_code(""), None);
        assert_eq!(normalize_postal_code("0131093"), None);
        assert_eq!(normalize_postal_code("013109301"), None);
        assert_eq!(normalize_postal_code("abc"), None);
    }
}
