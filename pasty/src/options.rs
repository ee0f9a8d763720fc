//! Service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Purpose;

/// Standard claim defaults and validation settings of a [`TokenService`](crate::TokenService).
///
/// An issuer, audience or identifier is only in effect when it is non-empty. When in effect it
/// is embedded into every issued token, and required to match exactly on validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TokenOptions {
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub identifier: Option<String>,
    /// Clock skew tolerated on `exp` and `nbf`, in seconds
    pub leeway_secs: u64,
}

impl TokenOptions {
    pub fn from_issuer(mut self, iss: impl Into<String>) -> Self {
        self.issuer = Some(iss.into());
        self
    }

    pub fn for_audience(mut self, aud: impl Into<String>) -> Self {
        self.audience = Some(aud.into());
        self
    }

    pub fn with_identifier(mut self, jti: impl Into<String>) -> Self {
        self.identifier = Some(jti.into());
        self
    }

    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway_secs = leeway.as_secs();
        self
    }

    pub fn issuer(&self) -> Option<&str> {
        non_empty(&self.issuer)
    }

    pub fn audience(&self) -> Option<&str> {
        non_empty(&self.audience)
    }

    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.identifier)
    }

    pub fn leeway(&self) -> Duration {
        Duration::from_secs(self.leeway_secs)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A deserializable service section, for embedding in an application config file.
///
/// ```
/// use pasty::{Purpose, ServiceConfig};
///
/// let config: ServiceConfig = serde_json::from_str(r#"{
///     "purpose": "Local",
///     "issuer": "https://auth.example.com/",
///     "leeway-secs": 30
/// }"#).unwrap();
///
/// assert_eq!(config.purpose, Purpose::Local);
/// assert_eq!(config.options.issuer(), Some("https://auth.example.com/"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServiceConfig {
    pub purpose: Purpose,
    #[serde(flatten)]
    pub options: TokenOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_not_in_effect() {
        let options = TokenOptions::default()
            .from_issuer("")
            .for_audience("example.com");

        assert_eq!(options.issuer(), None);
        assert_eq!(options.audience(), Some("example.com"));
        assert_eq!(options.identifier(), None);
    }

    #[test]
    fn leeway_is_whole_seconds() {
        let options = TokenOptions::default().with_leeway(Duration::from_millis(2500));
        assert_eq!(options.leeway(), Duration::from_secs(2));
    }

    #[test]
    fn config_defaults() {
        let config: ServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.purpose, Purpose::Public);
        assert_eq!(config.options.leeway(), Duration::ZERO);
    }

    #[test]
    fn config_rejects_unknown_purpose() {
        let err = serde_json::from_str::<ServiceConfig>(r#"{"purpose": "secret"}"#).unwrap_err();
        assert!(err.to_string().contains("purpose must be either local or public"));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ServiceConfig {
            purpose: Purpose::Local,
            options: TokenOptions::default()
                .from_issuer("example.com")
                .with_identifier("id-1"),
        };
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["purpose"], "local");
        assert_eq!(json["issuer"], "example.com");
        assert_eq!(json["leeway-secs"], 0);

        let back: ServiceConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
