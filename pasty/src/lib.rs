//! Issue and validate PASETO v4 tokens.
//!
//! A [`TokenService`] owns freshly generated key material and a [`Purpose`]:
//! `public` tokens are signed and readable by anyone, `local` tokens are encrypted.
//! All cryptography and token framing is done by [`pasetors`].
//!
//! ```
//! use std::time::Duration;
//!
//! use jiff::Timestamp;
//! use pasty::{Error, TokenOptions, TokenService};
//!
//! // create a service that signs tokens
//! let options = TokenOptions::default()
//!     .from_issuer("https://auth.example.com/")
//!     .for_audience("example.com");
//! let service = TokenService::new("public", options)?;
//!
//! // issue a token that expires in an hour
//! let expires = Timestamp::now() + Duration::from_secs(3600);
//! let token = service.issue(expires, [("user", "conrad")], Some(b"kid-1".as_slice()))?;
//! assert!(token.starts_with("v4.public."));
//!
//! // validate it against the same claims
//! service.validate_public(&token)?;
//!
//! // or read the claims back out
//! let verified = service.verify_public(&token)?;
//! let user: String = verified.claims.claim("user").unwrap()?;
//! assert_eq!(user, "conrad");
//! assert_eq!(verified.footer, b"kid-1");
//!
//! // a service expecting another audience rejects it
//! let other = service.with_options(TokenOptions::default().for_audience("other.com"));
//! assert!(matches!(
//!     other.validate_public(&token),
//!     Err(Error::ClaimPredicateMismatch { claim: "aud" })
//! ));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub mod claims;
pub mod error;
pub mod keys;
mod options;
mod purpose;
mod service;
pub mod validation;

pub use claims::{RegisteredClaims, TokenClaims};
pub use error::{Error, TemporalViolation};
pub use keys::KeyMaterial;
pub use options::{ServiceConfig, TokenOptions};
pub use purpose::Purpose;
pub use service::{TokenService, VerifiedToken};

pub use jiff;
pub use pasetors;
