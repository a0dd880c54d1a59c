use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MemberId(i64);

impl MemberId {
    /// Parse an id from its wire form, e.g. a token subject claim.
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = id.parse::<i64>().map_err(|e| {
            ValidationError::new(format!("Invalid member ID: {e}"))
        })?;
        if parsed < 1 {
            return Err(ValidationError::new(format!(
                "Invalid member ID: {parsed}"
            )));
        }
        Ok(Self(parsed))
    }

    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl AsRef<i64> for MemberId {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_valid_ids() {
    let parsed = MemberId::parse("42").expect("42 should parse");
    assert_eq!(parsed, MemberId::new(42));
    assert_eq!(parsed.to_string(), "42");
}

#[test]
fn test_invalid_ids() {
    for invalid_id in ["", "abc", "1.5", "0", "-3"] {
        let result = MemberId::parse(invalid_id);
        let error = result.expect_err(invalid_id);
        assert!(error.as_ref().starts_with("Invalid member ID"));
    }
}
