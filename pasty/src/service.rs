use core::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use pasetors::token::{TrustedToken, UntrustedToken};
use pasetors::version4::{LocalToken, PublicToken, V4};
use pasetors::{Local, Public};
use serde::Serialize;

use crate::claims::{RegisteredClaims, TokenClaims, add_custom};
use crate::validation::{ForAudience, FromIssuer, HasExpiry, Time, Validate, WithIdentifier};
use crate::{Error, KeyMaterial, Purpose, ServiceConfig, TokenOptions};

/// Issues and validates v4 tokens of a single [`Purpose`].
///
/// A `public` service signs with its secret key and verifies with its public key.
/// A `local` service encrypts and decrypts with its symmetric key.
pub struct TokenService {
    purpose: Purpose,
    keys: Arc<KeyMaterial>,
    options: TokenOptions,
}

/// A token whose signature or encryption has been checked and whose claims passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifiedToken {
    /// The claims that were contained in the token
    pub claims: TokenClaims,
    /// The footer that was sent with the token
    pub footer: Vec<u8>,
}

impl TokenService {
    /// Create a service for the named purpose, `local` or `public` in any casing.
    ///
    /// Fresh key material is generated for both purposes.
    pub fn new(purpose: &str, options: TokenOptions) -> Result<Self, Error> {
        Self::with_purpose(purpose.parse()?, options)
    }

    /// Create a service for an already parsed purpose, with fresh key material.
    pub fn with_purpose(purpose: Purpose, options: TokenOptions) -> Result<Self, Error> {
        let keys = KeyMaterial::generate()?;
        tracing::debug!(%purpose, "generated token service keys");

        Ok(Self {
            purpose,
            keys: Arc::new(keys),
            options,
        })
    }

    /// Create a service from a loaded [`ServiceConfig`].
    pub fn from_config(config: &ServiceConfig) -> Result<Self, Error> {
        Self::with_purpose(config.purpose, config.options.clone())
    }

    /// A service with the same purpose and key material, but different claim defaults.
    pub fn with_options(&self, options: TokenOptions) -> Self {
        Self {
            purpose: self.purpose,
            keys: Arc::clone(&self.keys),
            options,
        }
    }

    /// The purpose of the tokens this service issues.
    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    /// The claim defaults and leeway in effect.
    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// The key material, shared with services made by [`with_options`](Self::with_options).
    pub fn keys(&self) -> &KeyMaterial {
        &self.keys
    }

    /// The PASERK encoding of the public key, for verifiers of `public` tokens.
    pub fn public_key_paserk(&self) -> String {
        self.keys.public_key_paserk()
    }

    /// The PASERK ID of the key that verifies or decrypts this service's tokens.
    pub fn key_id(&self) -> String {
        self.keys.key_id(self.purpose)
    }

    /// Create a signed (`public`) or encrypted (`local`) token.
    ///
    /// The token is issued and valid from now until `expiration`, and carries the issuer,
    /// audience and identifier in effect for this service along with the custom `claims`.
    /// A non-empty `footer` is authenticated but never encrypted.
    pub fn issue<I, K, V>(
        &self,
        expiration: Timestamp,
        claims: I,
        footer: Option<&[u8]>,
    ) -> Result<String, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Serialize,
    {
        let now = Timestamp::now();
        let mut payload = RegisteredClaims::new(now, expiration)
            .with_options(&self.options)
            .to_payload()?;

        for (name, value) in claims {
            add_custom(&mut payload, name.as_ref(), value)?;
        }

        let payload = payload.to_string().map_err(Error::Seal)?;
        let footer = footer.filter(|f| !f.is_empty());
        let token = match self.purpose {
            Purpose::Public => {
                PublicToken::sign(self.keys.secret_key(), payload.as_bytes(), footer, None)
            }
            Purpose::Local => {
                LocalToken::encrypt(self.keys.local_key(), payload.as_bytes(), footer, None)
            }
        }
        .map_err(Error::Seal)?;

        tracing::debug!(purpose = %self.purpose, footer = footer.is_some(), "issued token");
        Ok(token)
    }

    /// Verify a `public` token and validate its claims.
    pub fn validate_public(&self, token: &str) -> Result<(), Error> {
        self.verify_public(token).map(drop)
    }

    /// Decrypt a `local` token and validate its claims.
    pub fn validate_local(&self, token: &str) -> Result<(), Error> {
        self.verify_local(token).map(drop)
    }

    /// Verify a `public` token, validate its claims and return them.
    pub fn verify_public(&self, token: &str) -> Result<VerifiedToken, Error> {
        let result = UntrustedToken::<Public, V4>::try_from(token)
            .map_err(|err| Error::TokenParse(Box::new(err)))
            .and_then(|untrusted| {
                PublicToken::verify(self.keys.public_key(), &untrusted, None, None)
                    .map_err(Error::SignatureOrDecryption)
            })
            .and_then(|trusted| self.accept(&trusted));

        log_rejection(Purpose::Public, result)
    }

    /// Decrypt a `local` token, validate its claims and return them.
    pub fn verify_local(&self, token: &str) -> Result<VerifiedToken, Error> {
        let result = UntrustedToken::<Local, V4>::try_from(token)
            .map_err(|err| Error::TokenParse(Box::new(err)))
            .and_then(|untrusted| {
                LocalToken::decrypt(self.keys.local_key(), &untrusted, None, None)
                    .map_err(Error::SignatureOrDecryption)
            })
            .and_then(|trusted| self.accept(&trusted));

        log_rejection(Purpose::Local, result)
    }

    /// View the **unverified** footer of a token of this service's purpose.
    ///
    /// Useful to pick a key before verifying. Never trust its contents otherwise.
    pub fn unverified_footer(&self, token: &str) -> Result<Vec<u8>, Error> {
        let footer = match self.purpose {
            Purpose::Public => UntrustedToken::<Public, V4>::try_from(token)
                .map(|t| t.untrusted_footer().to_vec()),
            Purpose::Local => UntrustedToken::<Local, V4>::try_from(token)
                .map(|t| t.untrusted_footer().to_vec()),
        };
        footer.map_err(|err| Error::TokenParse(Box::new(err)))
    }

    fn accept(&self, trusted: &TrustedToken) -> Result<VerifiedToken, Error> {
        let claims = TokenClaims::decode(trusted.payload())?;
        self.rules(Timestamp::now()).validate(&claims.registered)?;

        Ok(VerifiedToken {
            claims,
            footer: trusted.footer().to_vec(),
        })
    }

    /// Expiry is required and checked first, then the configured claims in turn.
    fn rules(&self, now: Timestamp) -> Vec<Box<dyn Validate + '_>> {
        let mut rules: Vec<Box<dyn Validate + '_>> = vec![
            Box::new(HasExpiry),
            Box::new(Time::valid_at(now).with_leeway(self.options.leeway())),
        ];
        if let Some(iss) = self.options.issuer() {
            rules.push(Box::new(FromIssuer(iss)));
        }
        if let Some(aud) = self.options.audience() {
            rules.push(Box::new(ForAudience(aud)));
        }
        if let Some(jti) = self.options.identifier() {
            rules.push(Box::new(WithIdentifier(jti)));
        }
        rules
    }
}

fn log_rejection<T>(purpose: Purpose, result: Result<T, Error>) -> Result<T, Error> {
    if let Err(err) = &result {
        tracing::debug!(%purpose, error = %err, "rejected token");
    }
    result
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("purpose", &self.purpose)
            .field("key_id", &self.key_id())
            .field("options", &self.options)
            .finish()
    }
}
