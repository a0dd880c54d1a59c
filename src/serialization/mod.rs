//! Renders entities into transport-safe JSON maps. Every relation is
//! serialized in exactly one direction (member → project → task), which
//! is what keeps the output finite on a cyclic entity graph.

use chrono::NaiveDate;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::domain::{EntityStore, EntityStoreError, Member, Project, Task};

fn date_string(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Tasks nest nothing; their relations stay scalar foreign keys.
pub fn serialize_task(task: &Task) -> Value {
    json!({
        "id": task.id,
        "task_name": task.task_name,
        "description": task.description,
        "status": task.status.as_str(),
        "deadline": task.deadline.as_ref().map(date_string),
        "project_id": task.project_id,
        "assigned_member_id": task.assigned_member_id,
    })
}

/// A project carries its tasks, never its owner.
pub async fn serialize_project<S>(
    store: &S,
    project: &Project,
) -> Result<Value, EntityStoreError>
where
    S: EntityStore + ?Sized,
{
    let tasks: Vec<Value> = store
        .tasks_for_project(project.id)
        .await?
        .iter()
        .map(serialize_task)
        .collect();

    Ok(json!({
        "id": project.id,
        "project_name": project.project_name,
        "details": project.details,
        "deadline": project.deadline.as_ref().map(date_string),
        "owner_id": project.owner_id,
        "tasks": tasks,
    }))
}

/// A member carries its owned projects (each with that project's tasks)
/// and the tasks assigned to it. The credential is never rendered.
pub async fn serialize_member<S>(
    store: &S,
    member: &Member,
) -> Result<Value, EntityStoreError>
where
    S: EntityStore + ?Sized,
{
    let mut projects_owned = Vec::new();
    for project in store.projects_owned_by(member.id).await? {
        projects_owned.push(serialize_project(store, &project).await?);
    }

    let tasks_assigned: Vec<Value> = store
        .tasks_assigned_to(member.id)
        .await?
        .iter()
        .map(serialize_task)
        .collect();

    Ok(json!({
        "id": member.id,
        "username": member.username,
        "full_name": member.full_name,
        "email": member.email.as_ref().expose_secret(),
        "role": member.role.as_str(),
        "gender": member.gender,
        "member_no": member.member_no,
        "date_of_birth": date_string(&member.date_of_birth),
        "member_status": member.member_status,
        "id_no": member.id_no,
        "address": member.address,
        "projects_owned": projects_owned,
        "tasks_assigned": tasks_assigned,
    }))
}
