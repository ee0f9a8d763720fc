//! Token claims.
//!
//! Payloads are built with [`pasetors::claims::Claims`] on the way out, and decoded
//! into [`TokenClaims`] once a token has been verified or decrypted.

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, TokenOptions};

/// The registered claims of a PASETO payload.
///
/// Timestamps are carried as RFC 3339 strings on the wire.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<Timestamp>,
}

impl RegisteredClaims {
    /// Claims issued at `now`, valid from `now` until `exp`.
    pub fn new(now: Timestamp, exp: Timestamp) -> Self {
        Self {
            exp: Some(exp),
            nbf: Some(now),
            iat: Some(now),
            ..Self::default()
        }
    }

    pub fn from_issuer(mut self, iss: String) -> Self {
        self.iss = Some(iss);
        self
    }

    pub fn for_audience(mut self, aud: String) -> Self {
        self.aud = Some(aud);
        self
    }

    pub fn for_subject(mut self, sub: String) -> Self {
        self.sub = Some(sub);
        self
    }

    pub fn with_token_id(mut self, jti: String) -> Self {
        self.jti = Some(jti);
        self
    }

    /// Apply the issuer, audience and identifier that are in effect in `options`.
    pub fn with_options(mut self, options: &TokenOptions) -> Self {
        if let Some(iss) = options.issuer() {
            self.iss = Some(iss.to_owned());
        }
        if let Some(aud) = options.audience() {
            self.aud = Some(aud.to_owned());
        }
        if let Some(jti) = options.identifier() {
            self.jti = Some(jti.to_owned());
        }
        self
    }

    /// Write these claims into a `pasetors` payload.
    pub(crate) fn to_payload(&self) -> Result<pasetors::claims::Claims, Error> {
        let mut payload = pasetors::claims::Claims::new().map_err(Error::claim("iat"))?;

        if let Some(iss) = &self.iss {
            payload.issuer(iss).map_err(Error::claim("iss"))?;
        }
        if let Some(sub) = &self.sub {
            payload.subject(sub).map_err(Error::claim("sub"))?;
        }
        if let Some(aud) = &self.aud {
            payload.audience(aud).map_err(Error::claim("aud"))?;
        }
        if let Some(jti) = &self.jti {
            payload.token_identifier(jti).map_err(Error::claim("jti"))?;
        }
        match self.exp {
            Some(exp) => payload
                .expiration(&exp.to_string())
                .map_err(Error::claim("exp"))?,
            None => payload.non_expiring(),
        }
        if let Some(nbf) = self.nbf {
            payload
                .not_before(&nbf.to_string())
                .map_err(Error::claim("nbf"))?;
        }
        if let Some(iat) = self.iat {
            payload
                .issued_at(&iat.to_string())
                .map_err(Error::claim("iat"))?;
        }

        Ok(payload)
    }
}

/// Add a caller supplied claim to a `pasetors` payload.
///
/// Registered claim names are rejected.
pub(crate) fn add_custom(
    payload: &mut pasetors::claims::Claims,
    name: &str,
    value: impl Serialize,
) -> Result<(), Error> {
    tracing::debug!(claim = name, "setting custom claim");

    let value = serde_json::to_value(value).map_err(|err| Error::ClaimEncoding {
        name: name.to_owned(),
        source: Box::new(err),
    })?;
    payload
        .add_additional(name, value)
        .map_err(Error::claim(name))
}

/// The decoded payload of a verified token.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub registered: RegisteredClaims,
    /// Every claim that is not a registered claim
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl TokenClaims {
    pub(crate) fn decode(payload: &str) -> Result<Self, Error> {
        serde_json::from_str(payload).map_err(|err| Error::TokenParse(Box::new(err)))
    }

    /// Decode the custom claim `name`, if present.
    pub fn claim<T: DeserializeOwned>(&self, name: &str) -> Option<Result<T, serde_json::Error>> {
        self.custom.get(name).map(T::deserialize)
    }
}
