use std::time::Duration;

use jiff::Timestamp;
use libtest_mimic::{Arguments, Failed, Trial};
use pasty::{Purpose, TokenOptions, TokenService};
use pasty_test::{Outcome, TestFile, read_test};
use serde::Deserialize;
use serde_json::{Map, Value};

fn main() {
    let args = Arguments::from_args();

    let mut tests = vec![];

    Scenario::add_tests("scenarios.json", &mut tests);

    libtest_mimic::run(&args, tests).exit();
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct Scenario {
    purpose: Purpose,
    /// seconds from now, negative for the past
    expires_in: i64,
    #[serde(default)]
    claims: Map<String, Value>,
    #[serde(default)]
    footer: Option<String>,
    #[serde(default)]
    issuer_options: TokenOptions,
    /// the validating service shares keys with the issuer, but has its own options
    #[serde(default)]
    validator_options: Option<TokenOptions>,
    /// validate with the validator of the other purpose
    #[serde(default)]
    swap_validator: bool,
    #[serde(default)]
    append: Option<String>,
    expect: Outcome,
}

impl Scenario {
    fn add_tests(file: &str, tests: &mut Vec<Trial>) {
        let test_file: TestFile<Self> = read_test(file);
        for test in test_file.tests {
            let name = format!("{}::{}", test.test_data.purpose, test.name);
            tests.push(Trial::test(name, move || test.test_data.test()));
        }
    }

    fn test(self) -> Result<(), Failed> {
        let issuer = TokenService::with_purpose(self.purpose, self.issuer_options.clone())?;
        let validator = match self.validator_options {
            Some(options) => issuer.with_options(options),
            None => issuer.with_options(self.issuer_options),
        };

        let expires = if self.expires_in < 0 {
            Timestamp::now() - Duration::from_secs(self.expires_in.unsigned_abs())
        } else {
            Timestamp::now() + Duration::from_secs(self.expires_in.unsigned_abs())
        };
        let footer = self.footer.as_deref().map(str::as_bytes);

        let mut token = issuer.issue(expires, self.claims, footer)?;
        if let Some(suffix) = &self.append {
            token.push_str(suffix);
        }

        let validate_as = match (self.purpose, self.swap_validator) {
            (Purpose::Public, false) | (Purpose::Local, true) => Purpose::Public,
            (Purpose::Local, false) | (Purpose::Public, true) => Purpose::Local,
        };
        let result = match validate_as {
            Purpose::Public => validator.validate_public(&token),
            Purpose::Local => validator.validate_local(&token),
        };

        if self.expect.matches(&result) {
            Ok(())
        } else {
            Err(format!("expected {:?}, got {result:?}", self.expect).into())
        }
    }
}
