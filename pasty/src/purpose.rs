use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Purpose of the issued tokens.
///
/// * `public` - signed tokens. payload included in plaintext
/// * `local` - encrypted tokens. payload is not readable without key
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Purpose {
    /// Marks tokens as encrypted with a symmetric key
    Local,
    /// Marks tokens as signed with a secret key
    #[default]
    Public,
}

impl Purpose {
    /// "local" or "public"
    pub const fn as_str(self) -> &'static str {
        match self {
            Purpose::Local => "local",
            Purpose::Public => "public",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("local") {
            Ok(Purpose::Local)
        } else if s.eq_ignore_ascii_case("public") {
            Ok(Purpose::Public)
        } else {
            Err(Error::InvalidPurpose(s.to_owned()))
        }
    }
}

impl TryFrom<String> for Purpose {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_any_casing() {
        for (input, expected) in [
            ("local", Purpose::Local),
            ("LOCAL", Purpose::Local),
            ("Local", Purpose::Local),
            ("public", Purpose::Public),
            ("PuBlIc", Purpose::Public),
        ] {
            assert_eq!(input.parse::<Purpose>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn rejects_other_values() {
        for input in ["secret", "", " public", "publicx", "v4.local"] {
            let err = input.parse::<Purpose>().unwrap_err();
            assert!(matches!(err, Error::InvalidPurpose(ref p) if p == input));
        }
    }

    #[test]
    fn defaults_to_public() {
        assert_eq!(Purpose::default(), Purpose::Public);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Purpose::Local).unwrap(), r#""local""#);
        let p: Purpose = serde_json::from_str(r#""PUBLIC""#).unwrap();
        assert_eq!(p, Purpose::Public);
        assert!(serde_json::from_str::<Purpose>(r#""secret""#).is_err());
    }
}
