use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid password")]
    IncorrectCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Missing token")]
    MissingToken,
    #[error("User not authorized to perform this action")]
    Forbidden,
    #[error("User not found")]
    MemberNotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
