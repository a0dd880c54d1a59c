use std::collections::HashMap;

use crate::domain::{
    EntityStore, EntityStoreError, Member, MemberId, MemberUpdate, NewMember,
    NewProject, NewTask, Project, ProjectId, ProjectUpdate, Task, TaskId,
    TaskUpdate,
};

/// In-memory twin of the Postgres store. Validation happens before the
/// first mutation, so a rejected operation leaves the maps untouched.
#[derive(Default)]
pub struct HashmapEntityStore {
    members: HashMap<i64, Member>,
    projects: HashMap<i64, Project>,
    tasks: HashMap<i64, Task>,
    next_member_id: i64,
    next_project_id: i64,
    next_task_id: i64,
}

impl HashmapEntityStore {
    fn check_member_uniqueness(
        &self,
        candidate: &Member,
        exclude: Option<MemberId>,
    ) -> Result<(), EntityStoreError> {
        for member in self.members.values() {
            if Some(member.id) == exclude {
                continue;
            }
            if member.id_no == candidate.id_no {
                return Err(EntityStoreError::DuplicateValue("ID number"));
            }
            if member.member_no == candidate.member_no {
                return Err(EntityStoreError::DuplicateValue("Member number"));
            }
            if member.username == candidate.username {
                return Err(EntityStoreError::DuplicateValue("Username"));
            }
            if member.email == candidate.email {
                return Err(EntityStoreError::DuplicateValue("Email"));
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl EntityStore for HashmapEntityStore {
    async fn add_member(
        &mut self,
        new_member: NewMember,
    ) -> Result<Member, EntityStoreError> {
        let member = new_member.into_member(MemberId::new(
            self.next_member_id + 1,
        ));
        self.check_member_uniqueness(&member, None)?;

        self.next_member_id += 1;
        self.members
            .insert(*member.id.as_ref(), member.clone());
        Ok(member)
    }

    async fn get_member(
        &self,
        id: MemberId,
    ) -> Result<Member, EntityStoreError> {
        match self.members.get(id.as_ref()) {
            Some(member) => Ok(member.clone()),
            None => Err(EntityStoreError::MemberNotFound),
        }
    }

    async fn get_member_by_username(
        &self,
        username: &str,
    ) -> Result<Member, EntityStoreError> {
        self.members
            .values()
            .find(|member| member.username == username)
            .cloned()
            .ok_or(EntityStoreError::MemberNotFound)
    }

    async fn list_members(&self) -> Result<Vec<Member>, EntityStoreError> {
        let mut members: Vec<Member> =
            self.members.values().cloned().collect();
        members.sort_by_key(|member| *member.id.as_ref());
        Ok(members)
    }

    async fn update_member(
        &mut self,
        id: MemberId,
        changes: MemberUpdate,
    ) -> Result<Member, EntityStoreError> {
        let mut updated = self.get_member(id).await?;
        changes.apply(&mut updated);
        self.check_member_uniqueness(&updated, Some(id))?;

        self.members.insert(*id.as_ref(), updated.clone());
        Ok(updated)
    }

    async fn delete_member(
        &mut self,
        id: MemberId,
    ) -> Result<(), EntityStoreError> {
        if !self.members.contains_key(id.as_ref()) {
            return Err(EntityStoreError::MemberNotFound);
        }

        let owned: Vec<i64> = self
            .projects
            .values()
            .filter(|project| project.owner_id == id)
            .map(|project| *project.id.as_ref())
            .collect();

        self.tasks.retain(|_, task| {
            task.assigned_member_id != id
                && !owned.contains(task.project_id.as_ref())
        });
        for project_id in owned {
            self.projects.remove(&project_id);
        }
        self.members.remove(id.as_ref());
        Ok(())
    }

    async fn add_project(
        &mut self,
        new_project: NewProject,
    ) -> Result<Project, EntityStoreError> {
        if !self
            .members
            .contains_key(new_project.owner_id.as_ref())
        {
            return Err(EntityStoreError::MemberNotFound);
        }

        self.next_project_id += 1;
        let project =
            new_project.into_project(ProjectId::new(self.next_project_id));
        self.projects
            .insert(*project.id.as_ref(), project.clone());
        Ok(project)
    }

    async fn get_project(
        &self,
        id: ProjectId,
    ) -> Result<Project, EntityStoreError> {
        match self.projects.get(id.as_ref()) {
            Some(project) => Ok(project.clone()),
            None => Err(EntityStoreError::ProjectNotFound),
        }
    }

    async fn list_projects(&self) -> Result<Vec<Project>, EntityStoreError> {
        let mut projects: Vec<Project> =
            self.projects.values().cloned().collect();
        projects.sort_by_key(|project| *project.id.as_ref());
        Ok(projects)
    }

    async fn update_project(
        &mut self,
        id: ProjectId,
        changes: ProjectUpdate,
    ) -> Result<Project, EntityStoreError> {
        let mut updated = self.get_project(id).await?;
        changes.apply(&mut updated);

        self.projects.insert(*id.as_ref(), updated.clone());
        Ok(updated)
    }

    async fn delete_project(
        &mut self,
        id: ProjectId,
    ) -> Result<(), EntityStoreError> {
        if self.projects.remove(id.as_ref()).is_none() {
            return Err(EntityStoreError::ProjectNotFound);
        }
        self.tasks.retain(|_, task| task.project_id != id);
        Ok(())
    }

    async fn projects_owned_by(
        &self,
        owner_id: MemberId,
    ) -> Result<Vec<Project>, EntityStoreError> {
        let mut projects: Vec<Project> = self
            .projects
            .values()
            .filter(|project| project.owner_id == owner_id)
            .cloned()
            .collect();
        projects.sort_by_key(|project| *project.id.as_ref());
        Ok(projects)
    }

    async fn add_task(
        &mut self,
        new_task: NewTask,
    ) -> Result<Task, EntityStoreError> {
        if !self
            .projects
            .contains_key(new_task.project_id.as_ref())
        {
            return Err(EntityStoreError::ProjectNotFound);
        }
        if !self
            .members
            .contains_key(new_task.assigned_member_id.as_ref())
        {
            return Err(EntityStoreError::MemberNotFound);
        }

        self.next_task_id += 1;
        let task = new_task.into_task(TaskId::new(self.next_task_id));
        self.tasks.insert(*task.id.as_ref(), task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> Result<Task, EntityStoreError> {
        match self.tasks.get(id.as_ref()) {
            Some(task) => Ok(task.clone()),
            None => Err(EntityStoreError::TaskNotFound),
        }
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, EntityStoreError> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| *task.id.as_ref());
        Ok(tasks)
    }

    async fn update_task(
        &mut self,
        id: TaskId,
        changes: TaskUpdate,
    ) -> Result<Task, EntityStoreError> {
        let current = self.get_task(id).await?;

        // Reject the whole patch before touching anything if a reassigned
        // reference dangles.
        if let Some(project_id) = changes.project_id {
            if !self.projects.contains_key(project_id.as_ref()) {
                return Err(EntityStoreError::ProjectNotFound);
            }
        }
        if let Some(member_id) = changes.assigned_member_id {
            if !self.members.contains_key(member_id.as_ref()) {
                return Err(EntityStoreError::MemberNotFound);
            }
        }

        let mut updated = current;
        changes.apply(&mut updated);
        self.tasks.insert(*id.as_ref(), updated.clone());
        Ok(updated)
    }

    async fn delete_task(
        &mut self,
        id: TaskId,
    ) -> Result<(), EntityStoreError> {
        match self.tasks.remove(id.as_ref()) {
            Some(_) => Ok(()),
            None => Err(EntityStoreError::TaskNotFound),
        }
    }

    async fn tasks_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, EntityStoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| *task.id.as_ref());
        Ok(tasks)
    }

    async fn tasks_assigned_to(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Task>, EntityStoreError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.assigned_member_id == member_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| *task.id.as_ref());
        Ok(tasks)
    }
}
