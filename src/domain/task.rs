use chrono::NaiveDate;

use super::{MemberId, ProjectId, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub task_name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub deadline: Option<NaiveDate>,
    pub project_id: ProjectId,
    pub assigned_member_id: MemberId,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub task_name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub deadline: Option<NaiveDate>,
    pub project_id: ProjectId,
    pub assigned_member_id: MemberId,
}

impl NewTask {
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            task_name: self.task_name,
            description: self.description,
            status: self.status,
            deadline: self.deadline,
            project_id: self.project_id,
            assigned_member_id: self.assigned_member_id,
        }
    }
}

/// Sparse patch. Reassigning `project_id` or `assigned_member_id` is only
/// valid when the new target exists; the store rejects the whole patch
/// otherwise.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub task_name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub deadline: Option<Option<NaiveDate>>,
    pub project_id: Option<ProjectId>,
    pub assigned_member_id: Option<MemberId>,
}

impl TaskUpdate {
    pub fn apply(self, task: &mut Task) {
        if let Some(task_name) = self.task_name {
            task.task_name = task_name;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(assigned_member_id) = self.assigned_member_id {
            task.assigned_member_id = assigned_member_id;
        }
    }
}
