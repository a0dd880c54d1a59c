use super::{
    ApiError, Member, MemberId, MemberUpdate, NewMember, NewProject, NewTask,
    Project, ProjectId, ProjectUpdate, Task, TaskId, TaskUpdate,
    ValidationError,
};
use color_eyre::eyre::Report;
use thiserror::Error;

/// Owns all three entity types so that cross-entity invariants (foreign
/// keys, cascades) live behind one seam. Every mutation applies fully or
/// not at all.
#[async_trait::async_trait]
pub trait EntityStore {
    async fn add_member(
        &mut self,
        new_member: NewMember,
    ) -> Result<Member, EntityStoreError>;
    async fn get_member(
        &self,
        id: MemberId,
    ) -> Result<Member, EntityStoreError>;
    async fn get_member_by_username(
        &self,
        username: &str,
    ) -> Result<Member, EntityStoreError>;
    async fn list_members(&self) -> Result<Vec<Member>, EntityStoreError>;
    async fn update_member(
        &mut self,
        id: MemberId,
        changes: MemberUpdate,
    ) -> Result<Member, EntityStoreError>;
    /// Removes the member together with its owned projects (and their
    /// tasks) and any tasks assigned to it, atomically.
    async fn delete_member(
        &mut self,
        id: MemberId,
    ) -> Result<(), EntityStoreError>;

    async fn add_project(
        &mut self,
        new_project: NewProject,
    ) -> Result<Project, EntityStoreError>;
    async fn get_project(
        &self,
        id: ProjectId,
    ) -> Result<Project, EntityStoreError>;
    async fn list_projects(&self) -> Result<Vec<Project>, EntityStoreError>;
    async fn update_project(
        &mut self,
        id: ProjectId,
        changes: ProjectUpdate,
    ) -> Result<Project, EntityStoreError>;
    /// Removes the project and every task under it, atomically.
    async fn delete_project(
        &mut self,
        id: ProjectId,
    ) -> Result<(), EntityStoreError>;
    async fn projects_owned_by(
        &self,
        owner_id: MemberId,
    ) -> Result<Vec<Project>, EntityStoreError>;

    async fn add_task(
        &mut self,
        new_task: NewTask,
    ) -> Result<Task, EntityStoreError>;
    async fn get_task(&self, id: TaskId) -> Result<Task, EntityStoreError>;
    async fn list_tasks(&self) -> Result<Vec<Task>, EntityStoreError>;
    async fn update_task(
        &mut self,
        id: TaskId,
        changes: TaskUpdate,
    ) -> Result<Task, EntityStoreError>;
    async fn delete_task(
        &mut self,
        id: TaskId,
    ) -> Result<(), EntityStoreError>;
    async fn tasks_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, EntityStoreError>;
    async fn tasks_assigned_to(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Task>, EntityStoreError>;
}

#[derive(Debug, Error)]
pub enum EntityStoreError {
    #[error("{0} already exists. Please use a different one.")]
    DuplicateValue(&'static str),
    #[error("Member not found")]
    MemberNotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for EntityStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::ProjectNotFound, Self::ProjectNotFound)
                | (Self::TaskNotFound, Self::TaskNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        ) || matches!(
            (self, other),
            (Self::DuplicateValue(a), Self::DuplicateValue(b)) if a == b
        )
    }
}

impl From<EntityStoreError> for ApiError {
    fn from(e: EntityStoreError) -> Self {
        match e {
            EntityStoreError::DuplicateValue(_) => {
                ApiError::ValidationError(ValidationError::new(e.to_string()))
            }
            EntityStoreError::MemberNotFound => ApiError::MemberNotFound,
            EntityStoreError::ProjectNotFound => ApiError::ProjectNotFound,
            EntityStoreError::TaskNotFound => ApiError::TaskNotFound,
            EntityStoreError::UnexpectedError(report) => {
                ApiError::UnexpectedError(report)
            }
        }
    }
}
