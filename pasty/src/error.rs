use core::fmt;

/// Boxed error from an encoding layer (JSON, base64, claim formatting).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// Error returned for all token service operations that can fail
pub enum Error {
    /// The purpose was neither `local` nor `public`.
    #[error("purpose must be either local or public, got {0:?}")]
    InvalidPurpose(String),
    /// Fresh key material could not be generated.
    #[error("could not generate key material")]
    KeyGeneration(#[source] pasetors::errors::Error),
    /// A claim could not be written into the token payload.
    #[error("claim {name:?} could not be encoded")]
    ClaimEncoding {
        name: String,
        #[source]
        source: BoxError,
    },
    /// The claims could not be signed or encrypted.
    #[error("token could not be sealed")]
    Seal(#[source] pasetors::errors::Error),
    /// The token was not a well formed v4 token of the expected purpose.
    #[error("could not parse the token")]
    TokenParse(#[source] BoxError),
    /// The signature did not verify, or the payload did not decrypt.
    #[error("token signature could not be verified or payload could not be decrypted")]
    SignatureOrDecryption(#[source] pasetors::errors::Error),
    /// A configured issuer, audience or identifier was absent or different.
    #[error("claim {claim:?} does not match the expected value")]
    ClaimPredicateMismatch { claim: &'static str },
    /// The token is outside of its validity window.
    #[error("token is {0}")]
    ExpiredOrNotYetValid(TemporalViolation),
}

impl Error {
    pub(crate) fn claim(name: &str) -> impl FnOnce(pasetors::errors::Error) -> Self + '_ {
        move |err| Error::ClaimEncoding {
            name: name.to_owned(),
            source: Box::new(err),
        }
    }
}

/// Which temporal rule a token broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalViolation {
    /// `exp` is in the past.
    Expired,
    /// `nbf` is in the future.
    NotYetValid,
    /// `exp` is absent.
    MissingExpiry,
}

impl fmt::Display for TemporalViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemporalViolation::Expired => f.write_str("expired"),
            TemporalViolation::NotYetValid => f.write_str("not yet valid"),
            TemporalViolation::MissingExpiry => f.write_str("missing an expiration"),
        }
    }
}
