use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Member,
    ProjectOwner,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "member" => Ok(Role::Member),
            "project_owner" => Ok(Role::ProjectOwner),
            other => Err(ValidationError::new(format!(
                "Role must be either 'member' or 'project_owner', got '{other}'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::ProjectOwner => "project_owner",
        }
    }
}
