use chrono::NaiveDate;

use super::{MemberId, ProjectId};

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub project_name: String,
    pub details: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub owner_id: MemberId,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_name: String,
    pub details: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub owner_id: MemberId,
}

impl NewProject {
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            project_name: self.project_name,
            details: self.details,
            deadline: self.deadline,
            owner_id: self.owner_id,
        }
    }
}

/// Sparse patch; ownership is fixed at creation and not updatable.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub project_name: Option<String>,
    pub details: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
}

impl ProjectUpdate {
    pub fn apply(self, project: &mut Project) {
        if let Some(project_name) = self.project_name {
            project.project_name = project_name;
        }
        if let Some(details) = self.details {
            project.details = details;
        }
        if let Some(deadline) = self.deadline {
            project.deadline = deadline;
        }
    }
}
