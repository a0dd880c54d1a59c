use super::Password;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher, PasswordVerifier, Version,
};
use color_eyre::eyre::{eyre, Report};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Malformed credential hash")]
    MalformedHash(#[source] Report),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

/// A one-way Argon2id hash of a member's password, stored in PHC string
/// format. The plaintext is unrecoverable; the only operations are
/// computing a new hash and verifying a candidate against it.
#[derive(Debug, Clone)]
pub struct Credential(Secret<String>);

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Credential {
    /// Accepts a stored hash, rejecting corrupt state up front.
    pub fn parse(s: Secret<String>) -> Result<Self, CredentialError> {
        PasswordHash::new(s.expose_secret())
            .map_err(|e| CredentialError::MalformedHash(eyre!(e)))?;
        Ok(Self(s))
    }

    pub async fn from_password(
        password: &Password,
    ) -> Result<Self, CredentialError> {
        let hash =
            compute_credential_hash(password.as_ref().to_owned()).await?;
        Ok(Self(hash))
    }

    /// A wrong password is `Ok(false)`, never an error; errors are
    /// reserved for corrupt stored state.
    pub async fn verify(
        &self,
        candidate: &Secret<String>,
    ) -> Result<bool, CredentialError> {
        verify_credential_hash(self.0.clone(), candidate.clone()).await
    }
}

impl AsRef<Secret<String>> for Credential {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[tracing::instrument(name = "Computing credential hash", skip_all)]
async fn compute_credential_hash(
    password: Secret<String>,
) -> Result<Secret<String>, CredentialError> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let salt: SaltString =
                SaltString::generate(&mut rand::thread_rng());
            let params = Params::new(15000, 2, 1, None)
                .map_err(|e| CredentialError::UnexpectedError(eyre!(e)))?;
            let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password(password.expose_secret().as_bytes(), &salt)
                .map_err(|e| CredentialError::UnexpectedError(eyre!(e)))?
                .to_string();

            Ok(Secret::new(hash))
        })
    })
    .await
    .map_err(|e| CredentialError::UnexpectedError(eyre!(e)))?
}

#[tracing::instrument(name = "Verifying credential hash", skip_all)]
async fn verify_credential_hash(
    stored: Secret<String>,
    candidate: Secret<String>,
) -> Result<bool, CredentialError> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let parsed = PasswordHash::new(stored.expose_secret())
                .map_err(|e| CredentialError::MalformedHash(eyre!(e)))?;

            match Argon2::default().verify_password(
                candidate.expose_secret().as_bytes(),
                &parsed,
            ) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(CredentialError::UnexpectedError(eyre!(e))),
            }
        })
    })
    .await
    .map_err(|e| CredentialError::UnexpectedError(eyre!(e)))?
}
