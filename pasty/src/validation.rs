use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;

use crate::claims::RegisteredClaims;
use crate::error::{Error, TemporalViolation};

pub trait Validate {
    /// The validation to perform on the claims
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error>;

    /// Extend the validation with another validation.
    fn and_then<V>(self, other: V) -> ValidateThen<Self, V>
    where
        Self: Sized,
        V: Validate,
    {
        ValidateThen(self, other)
    }
}

pub struct ValidateThen<T, U>(T, U);

impl<T: Validate, U: Validate> Validate for ValidateThen<T, U> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        self.0.validate(claims)?;
        self.1.validate(claims)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        <[T]>::validate(self, claims)
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        for v in self {
            T::validate(v, claims)?;
        }
        Ok(())
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        T::validate(self, claims)
    }
}

impl<T: Validate + ?Sized> Validate for Arc<T> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        T::validate(self, claims)
    }
}

/// Checks `exp` and `nbf` against a point in time.
pub struct Time {
    now: Timestamp,
    leeway: Duration,
}

impl Time {
    pub fn valid_now() -> Self {
        Self::valid_at(Timestamp::now())
    }

    pub fn valid_at(now: Timestamp) -> Self {
        Self {
            now,
            leeway: Duration::ZERO,
        }
    }

    pub fn with_leeway(self, leeway: Duration) -> Self {
        Self { leeway, ..self }
    }
}

impl Time {
    /// The earliest and latest instants accepted as "now", saturating at the bounds of [`Timestamp`].
    fn window(&self) -> (Timestamp, Timestamp) {
        let earliest = self.now.checked_sub(self.leeway).unwrap_or(Timestamp::MIN);
        let latest = self.now.checked_add(self.leeway).unwrap_or(Timestamp::MAX);
        (earliest, latest)
    }
}

impl Validate for Time {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        let (earliest, latest) = self.window();

        if let Some(exp) = claims.exp
            && exp < earliest
        {
            return Err(Error::ExpiredOrNotYetValid(TemporalViolation::Expired));
        }

        if let Some(nbf) = claims.nbf
            && latest < nbf
        {
            return Err(Error::ExpiredOrNotYetValid(TemporalViolation::NotYetValid));
        }

        Ok(())
    }
}

pub struct HasExpiry;

impl Validate for HasExpiry {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        if claims.exp.is_none() {
            return Err(Error::ExpiredOrNotYetValid(
                TemporalViolation::MissingExpiry,
            ));
        }
        Ok(())
    }
}

pub struct FromIssuer<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> Validate for FromIssuer<T> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        if claims.iss.as_deref() != Some(self.0.as_ref()) {
            return Err(Error::ClaimPredicateMismatch { claim: "iss" });
        }
        Ok(())
    }
}

pub struct ForAudience<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> Validate for ForAudience<T> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        if claims.aud.as_deref() != Some(self.0.as_ref()) {
            return Err(Error::ClaimPredicateMismatch { claim: "aud" });
        }
        Ok(())
    }
}

pub struct WithIdentifier<T: AsRef<str>>(pub T);

impl<T: AsRef<str>> Validate for WithIdentifier<T> {
    fn validate(&self, claims: &RegisteredClaims) -> Result<(), Error> {
        if claims.jti.as_deref() != Some(self.0.as_ref()) {
            return Err(Error::ClaimPredicateMismatch { claim: "jti" });
        }
        Ok(())
    }
}
