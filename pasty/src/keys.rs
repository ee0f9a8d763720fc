//! Key material owned by a [`TokenService`](crate::TokenService).

use core::fmt;

use pasetors::keys::{
    AsymmetricKeyPair, AsymmetricPublicKey, AsymmetricSecretKey, Generate, SymmetricKey,
};
use pasetors::paserk::{FormatAsPaserk, Id};
use pasetors::version4::V4;

use crate::{Error, Purpose};

/// A v4 key pair for `public` tokens and a v4 key for `local` tokens.
///
/// Both are always generated, whatever the purpose of the owning service.
pub struct KeyMaterial {
    secret: AsymmetricSecretKey<V4>,
    public: AsymmetricPublicKey<V4>,
    local: SymmetricKey<V4>,
}

impl KeyMaterial {
    /// Generate a fresh key pair and symmetric key from the OS random source.
    pub fn generate() -> Result<Self, Error> {
        let pair = AsymmetricKeyPair::<V4>::generate().map_err(Error::KeyGeneration)?;
        let local = SymmetricKey::<V4>::generate().map_err(Error::KeyGeneration)?;

        Ok(Self {
            secret: pair.secret,
            public: pair.public,
            local,
        })
    }

    /// Public key used for signature verification
    pub fn public_key(&self) -> &AsymmetricPublicKey<V4> {
        &self.public
    }

    pub(crate) fn secret_key(&self) -> &AsymmetricSecretKey<V4> {
        &self.secret
    }

    pub(crate) fn local_key(&self) -> &SymmetricKey<V4> {
        &self.local
    }

    /// The PASERK encoding of the public key, `k4.public.…`
    pub fn public_key_paserk(&self) -> String {
        paserk(&self.public)
    }

    /// The PASERK ID of the key that verifies or decrypts tokens of `purpose`.
    ///
    /// `k4.pid.…` for public tokens, `k4.lid.…` for local tokens.
    pub fn key_id(&self, purpose: Purpose) -> String {
        match purpose {
            Purpose::Public => paserk(&Id::from(&self.public)),
            Purpose::Local => paserk(&Id::from(&self.local)),
        }
    }
}

fn paserk(key: &impl FormatAsPaserk) -> String {
    let mut out = String::new();
    let _ = key.fmt(&mut out);
    out
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("public", &self.public_key_paserk())
            .finish_non_exhaustive()
    }
}
