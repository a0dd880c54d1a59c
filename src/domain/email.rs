use super::ValidationError;
use secrecy::{ExposeSecret, Secret};

use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

impl Email {
    // Addresses are only required to contain an '@'; anything stricter
    // rejects values the rest of the system accepts.
    pub fn parse(s: Secret<String>) -> Result<Self, ValidationError> {
        if !s.expose_secret().contains('@') {
            return Err(ValidationError::new(
                "Invalid email format".to_string(),
            ));
        }
        Ok(Self(s))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
