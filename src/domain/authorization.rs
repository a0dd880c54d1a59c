use super::{ApiError, Member, MemberId, Role};

/// Everything the HTTP surface can do, named for the guard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Signup,
    Login,
    CheckSession,
    Logout,
    ChangePassword,
    CreateMember,
    ReadMember,
    UpdateMember,
    DeleteMember,
    CreateProject,
    ReadProject,
    UpdateProject,
    DeleteProject,
    CreateTask,
    ReadTask,
    UpdateTask,
    DeleteTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    Authenticated,
    RequiresRole(Role),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub member_id: MemberId,
    pub role: Role,
}

impl From<&Member> for Identity {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id,
            role: member.role,
        }
    }
}

/// The whole authorization policy in one table. Creation is the gated
/// surface; reads, updates and deletes are open.
pub const fn requirement(action: Action) -> Requirement {
    match action {
        Action::Signup | Action::Login => Requirement::Public,
        Action::CheckSession
        | Action::Logout
        | Action::ChangePassword
        | Action::CreateTask => Requirement::Authenticated,
        Action::CreateProject => {
            Requirement::RequiresRole(Role::ProjectOwner)
        }
        Action::CreateMember
        | Action::ReadMember
        | Action::UpdateMember
        | Action::DeleteMember
        | Action::ReadProject
        | Action::UpdateProject
        | Action::DeleteProject
        | Action::ReadTask
        | Action::UpdateTask
        | Action::DeleteTask => Requirement::Public,
    }
}

/// Pure decision; never touches state.
pub fn authorize(
    action: Action,
    identity: Option<&Identity>,
) -> Result<(), ApiError> {
    match requirement(action) {
        Requirement::Public => Ok(()),
        Requirement::Authenticated => match identity {
            Some(_) => Ok(()),
            None => Err(ApiError::MissingToken),
        },
        Requirement::RequiresRole(role) => match identity {
            None => Err(ApiError::MissingToken),
            Some(identity) if identity.role == role => Ok(()),
            Some(_) => Err(ApiError::Forbidden),
        },
    }
}
