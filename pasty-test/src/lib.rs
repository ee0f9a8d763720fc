use pasty::{Error, TemporalViolation};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub fn read_test<Test: DeserializeOwned>(v: &str) -> TestFile<Test> {
    let path = format!("tests/vectors/{v}");
    let file = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&file).unwrap()
}

#[derive(Deserialize)]
pub struct TestFile<T> {
    pub tests: Vec<Test<T>>,
}

#[derive(Deserialize)]
pub struct Test<T> {
    pub name: String,
    #[serde(flatten)]
    pub test_data: T,
}

/// The outcome a vector expects from validation.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Valid,
    Expired,
    ClaimMismatch,
    /// Either unparseable, or failing signature/decryption
    Rejected,
    Malformed,
}

impl Outcome {
    pub fn of(result: &Result<(), Error>) -> Option<Self> {
        match result {
            Ok(()) => Some(Outcome::Valid),
            Err(Error::ExpiredOrNotYetValid(TemporalViolation::Expired)) => Some(Outcome::Expired),
            Err(Error::ClaimPredicateMismatch { .. }) => Some(Outcome::ClaimMismatch),
            Err(Error::TokenParse(_)) => Some(Outcome::Malformed),
            Err(Error::SignatureOrDecryption(_)) => Some(Outcome::Rejected),
            Err(_) => None,
        }
    }

    pub fn matches(self, result: &Result<(), Error>) -> bool {
        match (self, Outcome::of(result)) {
            (Outcome::Rejected, Some(Outcome::Malformed)) => true,
            (expected, Some(actual)) => expected == actual,
            (_, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_covers_malformed() {
        let malformed: Result<(), Error> = Err(Error::TokenParse("bad".into()));
        assert!(Outcome::Rejected.matches(&malformed));
        assert!(Outcome::Malformed.matches(&malformed));
        assert!(!Outcome::Valid.matches(&malformed));
        assert!(!Outcome::Malformed.matches(&Ok(())));
    }
}
