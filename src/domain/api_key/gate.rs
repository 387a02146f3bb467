//! Authorization gate
//!
//! Decides, once per request, whether the `Authorization` header carries a
//! usable key. Missing headers, malformed headers, unknown keys and failed
//! lookups all collapse into the same "bad request" outcome; only a key that
//! the store recognises as inactive yields "unauthorized".

use tracing::{debug, warn};

use super::check::ApiKeyCheck;
use super::repository::ApiKeyRepository;

/// Why a request was turned away with a bad-request status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    MissingCredential,
    MalformedCredential,
    UnknownKey,
    LookupFailed,
}

impl GateRejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingCredential => "API key is missing",
            Self::MalformedCredential => "Authorization header must be '<scheme> <key>'",
            Self::UnknownKey => "API key is not recognised",
            Self::LookupFailed => "API key could not be verified",
        }
    }
}

/// Outcome of the gate for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    BadRequest(GateRejection),
    Unauthorized,
}

/// Split `<scheme> <key>` and return the key.
///
/// Any scheme name is accepted. Returns `None` unless the header holds exactly
/// two whitespace-separated tokens.
pub fn extract_key(header: &str) -> Option<&str> {
    let mut tokens = header.split_whitespace();
    let _scheme = tokens.next()?;
    let key = tokens.next()?;

    if tokens.next().is_some() {
        return None;
    }

    Some(key)
}

/// Run the gate for a raw header value. Lookups are never retried.
pub async fn authorize<R>(header: Option<&str>, keys: &R) -> GateDecision
where
    R: ApiKeyRepository + ?Sized,
{
    let Some(header) = header else {
        return GateDecision::BadRequest(GateRejection::MissingCredential);
    };

    let Some(key) = extract_key(header) else {
        return GateDecision::BadRequest(GateRejection::MalformedCredential);
    };

    debug!(
        key_prefix = %key.chars().take(4).collect::<String>(),
        "Validating API key"
    );

    match keys.check(key).await {
        Ok(ApiKeyCheck::Valid) => GateDecision::Allow,
        Ok(ApiKeyCheck::Invalid) => GateDecision::Unauthorized,
        Ok(ApiKeyCheck::Unknown) => GateDecision::BadRequest(GateRejection::UnknownKey),
        Err(e) => {
            warn!(error = %e, "API key lookup failed");
            GateDecision::BadRequest(GateRejection::LookupFailed)
        }
    }
}
