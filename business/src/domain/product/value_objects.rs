use serde::{Deserialize, Serialize};

/// Numeric key of a product as the remote API knows it.
///
/// Kept as the digit string the operator typed: leading zeros are preserved
/// and whether the product exists is up to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Parses a non-empty string of ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, super::errors::ProductError> {
        if raw.is_empty() || !is_numeric_input(raw) {
            return Err(super::errors::ProductError::InvalidId);
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = super::errors::ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whether `raw` is acceptable as identifier input: digits only, empty allowed.
pub fn is_numeric_input(raw: &str) -> bool {
    regex::Regex::new(r"^[0-9]*$")
        .map(|re| re.is_match(raw))
        .unwrap_or(false)
}
