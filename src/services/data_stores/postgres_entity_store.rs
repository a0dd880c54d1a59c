use chrono::NaiveDate;
use color_eyre::eyre::Report;
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};

use crate::domain::{
    Credential, Email, EntityStore, EntityStoreError, Member, MemberId,
    MemberUpdate, NewMember, NewProject, NewTask, Project, ProjectId,
    ProjectUpdate, Role, Task, TaskId, TaskStatus, TaskUpdate,
};

pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unexpected<E>(e: E) -> EntityStoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    EntityStoreError::UnexpectedError(Report::new(e))
}

fn member_from_row(row: &PgRow) -> Result<Member, EntityStoreError> {
    Ok(Member {
        id: MemberId::new(row.try_get("id").map_err(unexpected)?),
        username: row.try_get("username").map_err(unexpected)?,
        full_name: row.try_get("full_name").map_err(unexpected)?,
        email: Email::parse(Secret::new(
            row.try_get::<String, _>("email").map_err(unexpected)?,
        ))
        .map_err(unexpected)?,
        role: Role::parse(
            &row.try_get::<String, _>("role").map_err(unexpected)?,
        )
        .map_err(unexpected)?,
        gender: row.try_get("gender").map_err(unexpected)?,
        member_no: row.try_get("member_no").map_err(unexpected)?,
        date_of_birth: row
            .try_get::<NaiveDate, _>("date_of_birth")
            .map_err(unexpected)?,
        member_status: row.try_get("member_status").map_err(unexpected)?,
        id_no: row.try_get("id_no").map_err(unexpected)?,
        address: row
            .try_get::<Option<String>, _>("address")
            .map_err(unexpected)?,
        credential: Credential::parse(Secret::new(
            row.try_get::<String, _>("password_hash")
                .map_err(unexpected)?,
        ))
        .map_err(unexpected)?,
    })
}

fn project_from_row(row: &PgRow) -> Result<Project, EntityStoreError> {
    Ok(Project {
        id: ProjectId::new(row.try_get("id").map_err(unexpected)?),
        project_name: row.try_get("project_name").map_err(unexpected)?,
        details: row
            .try_get::<Option<String>, _>("details")
            .map_err(unexpected)?,
        deadline: row
            .try_get::<Option<NaiveDate>, _>("deadline")
            .map_err(unexpected)?,
        owner_id: MemberId::new(row.try_get("owner_id").map_err(unexpected)?),
    })
}

fn task_from_row(row: &PgRow) -> Result<Task, EntityStoreError> {
    Ok(Task {
        id: TaskId::new(row.try_get("id").map_err(unexpected)?),
        task_name: row.try_get("task_name").map_err(unexpected)?,
        description: row
            .try_get::<Option<String>, _>("description")
            .map_err(unexpected)?,
        status: TaskStatus::parse(
            &row.try_get::<String, _>("status").map_err(unexpected)?,
        )
        .map_err(unexpected)?,
        deadline: row
            .try_get::<Option<NaiveDate>, _>("deadline")
            .map_err(unexpected)?,
        project_id: ProjectId::new(
            row.try_get("project_id").map_err(unexpected)?,
        ),
        assigned_member_id: MemberId::new(
            row.try_get("assigned_member_id").map_err(unexpected)?,
        ),
    })
}

/// Uniqueness is checked here, inside the mutating transaction, so a
/// violation surfaces as a typed error instead of a constraint failure.
async fn ensure_member_unique(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    email: &str,
    member_no: &str,
    id_no: &str,
    exclude: Option<i64>,
) -> Result<(), EntityStoreError> {
    let conflict = sqlx::query(
        r#"
        SELECT username, email, member_no, id_no
        FROM members
        WHERE (username = $1 OR email = $2 OR member_no = $3 OR id_no = $4)
          AND ($5::bigint IS NULL OR id <> $5)
        LIMIT 1
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(member_no)
    .bind(id_no)
    .bind(exclude)
    .fetch_optional(&mut **tx)
    .await
    .map_err(unexpected)?;

    if let Some(row) = conflict {
        let field = if row.try_get::<String, _>("id_no").map_err(unexpected)?
            == id_no
        {
            "ID number"
        } else if row
            .try_get::<String, _>("member_no")
            .map_err(unexpected)?
            == member_no
        {
            "Member number"
        } else if row
            .try_get::<String, _>("username")
            .map_err(unexpected)?
            == username
        {
            "Username"
        } else {
            "Email"
        };
        return Err(EntityStoreError::DuplicateValue(field));
    }
    Ok(())
}

async fn member_exists(
    tx: &mut Transaction<'_, Postgres>,
    id: MemberId,
) -> Result<bool, EntityStoreError> {
    let row = sqlx::query("SELECT 1 AS present FROM members WHERE id = $1")
        .bind(id.as_ref())
        .fetch_optional(&mut **tx)
        .await
        .map_err(unexpected)?;
    Ok(row.is_some())
}

async fn project_exists(
    tx: &mut Transaction<'_, Postgres>,
    id: ProjectId,
) -> Result<bool, EntityStoreError> {
    let row = sqlx::query("SELECT 1 AS present FROM projects WHERE id = $1")
        .bind(id.as_ref())
        .fetch_optional(&mut **tx)
        .await
        .map_err(unexpected)?;
    Ok(row.is_some())
}

#[async_trait::async_trait]
impl EntityStore for PostgresEntityStore {
    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        new_member: NewMember,
    ) -> Result<Member, EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        ensure_member_unique(
            &mut tx,
            &new_member.username,
            new_member.email.as_ref().expose_secret(),
            &new_member.member_no,
            &new_member.id_no,
            None,
        )
        .await?;

        let row = sqlx::query(
            r#"
            INSERT INTO members
                (username, full_name, email, role, gender, member_no,
                 date_of_birth, member_status, id_no, address, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&new_member.username)
        .bind(&new_member.full_name)
        .bind(new_member.email.as_ref().expose_secret())
        .bind(new_member.role.as_str())
        .bind(&new_member.gender)
        .bind(&new_member.member_no)
        .bind(new_member.date_of_birth)
        .bind(&new_member.member_status)
        .bind(&new_member.id_no)
        .bind(&new_member.address)
        .bind(new_member.credential.as_ref().expose_secret())
        .fetch_one(&mut *tx)
        .await
        .map_err(unexpected)?;

        let id: i64 = row.try_get("id").map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)?;

        Ok(new_member.into_member(MemberId::new(id)))
    }

    #[tracing::instrument(name = "Retrieving member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        id: MemberId,
    ) -> Result<Member, EntityStoreError> {
        let row = sqlx::query("SELECT * FROM members WHERE id = $1")
            .bind(id.as_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(EntityStoreError::MemberNotFound)?;
        member_from_row(&row)
    }

    #[tracing::instrument(
        name = "Retrieving member by username from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_username(
        &self,
        username: &str,
    ) -> Result<Member, EntityStoreError> {
        let row = sqlx::query("SELECT * FROM members WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(EntityStoreError::MemberNotFound)?;
        member_from_row(&row)
    }

    #[tracing::instrument(name = "Listing members from PostgreSQL", skip_all)]
    async fn list_members(&self) -> Result<Vec<Member>, EntityStoreError> {
        let rows = sqlx::query("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        rows.iter().map(member_from_row).collect()
    }

    #[tracing::instrument(name = "Updating member in PostgreSQL", skip_all)]
    async fn update_member(
        &mut self,
        id: MemberId,
        changes: MemberUpdate,
    ) -> Result<Member, EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let row = sqlx::query("SELECT * FROM members WHERE id = $1 FOR UPDATE")
            .bind(id.as_ref())
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?
            .ok_or(EntityStoreError::MemberNotFound)?;
        let mut updated = member_from_row(&row)?;
        changes.apply(&mut updated);

        ensure_member_unique(
            &mut tx,
            &updated.username,
            updated.email.as_ref().expose_secret(),
            &updated.member_no,
            &updated.id_no,
            Some(*id.as_ref()),
        )
        .await?;

        sqlx::query(
            r#"
            UPDATE members
            SET username = $2, full_name = $3, email = $4, role = $5,
                gender = $6, member_no = $7, date_of_birth = $8,
                member_status = $9, id_no = $10, address = $11,
                password_hash = $12
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(&updated.username)
        .bind(&updated.full_name)
        .bind(updated.email.as_ref().expose_secret())
        .bind(updated.role.as_str())
        .bind(&updated.gender)
        .bind(&updated.member_no)
        .bind(updated.date_of_birth)
        .bind(&updated.member_status)
        .bind(&updated.id_no)
        .bind(&updated.address)
        .bind(updated.credential.as_ref().expose_secret())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        Ok(updated)
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(
        &mut self,
        id: MemberId,
    ) -> Result<(), EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        if !member_exists(&mut tx, id).await? {
            return Err(EntityStoreError::MemberNotFound);
        }

        // Owned projects, their tasks and the member's assigned tasks go
        // with the member; nothing may be left dangling.
        sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE assigned_member_id = $1
               OR project_id IN (SELECT id FROM projects WHERE owner_id = $1)
            "#,
        )
        .bind(id.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        sqlx::query("DELETE FROM projects WHERE owner_id = $1")
            .bind(id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Adding project to PostgreSQL", skip_all)]
    async fn add_project(
        &mut self,
        new_project: NewProject,
    ) -> Result<Project, EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        if !member_exists(&mut tx, new_project.owner_id).await? {
            return Err(EntityStoreError::MemberNotFound);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO projects (project_name, details, deadline, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new_project.project_name)
        .bind(&new_project.details)
        .bind(new_project.deadline)
        .bind(new_project.owner_id.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(unexpected)?;

        let id: i64 = row.try_get("id").map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)?;

        Ok(new_project.into_project(ProjectId::new(id)))
    }

    #[tracing::instrument(
        name = "Retrieving project from PostgreSQL",
        skip_all
    )]
    async fn get_project(
        &self,
        id: ProjectId,
    ) -> Result<Project, EntityStoreError> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = $1")
            .bind(id.as_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(EntityStoreError::ProjectNotFound)?;
        project_from_row(&row)
    }

    #[tracing::instrument(name = "Listing projects from PostgreSQL", skip_all)]
    async fn list_projects(&self) -> Result<Vec<Project>, EntityStoreError> {
        let rows = sqlx::query("SELECT * FROM projects ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        rows.iter().map(project_from_row).collect()
    }

    #[tracing::instrument(name = "Updating project in PostgreSQL", skip_all)]
    async fn update_project(
        &mut self,
        id: ProjectId,
        changes: ProjectUpdate,
    ) -> Result<Project, EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let row =
            sqlx::query("SELECT * FROM projects WHERE id = $1 FOR UPDATE")
                .bind(id.as_ref())
                .fetch_optional(&mut *tx)
                .await
                .map_err(unexpected)?
                .ok_or(EntityStoreError::ProjectNotFound)?;
        let mut updated = project_from_row(&row)?;
        changes.apply(&mut updated);

        sqlx::query(
            r#"
            UPDATE projects
            SET project_name = $2, details = $3, deadline = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(&updated.project_name)
        .bind(&updated.details)
        .bind(updated.deadline)
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        Ok(updated)
    }

    #[tracing::instrument(name = "Deleting project from PostgreSQL", skip_all)]
    async fn delete_project(
        &mut self,
        id: ProjectId,
    ) -> Result<(), EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        if !project_exists(&mut tx, id).await? {
            return Err(EntityStoreError::ProjectNotFound);
        }

        sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(
        name = "Listing projects by owner from PostgreSQL",
        skip_all
    )]
    async fn projects_owned_by(
        &self,
        owner_id: MemberId,
    ) -> Result<Vec<Project>, EntityStoreError> {
        let rows =
            sqlx::query("SELECT * FROM projects WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id.as_ref())
                .fetch_all(&self.pool)
                .await
                .map_err(unexpected)?;
        rows.iter().map(project_from_row).collect()
    }

    #[tracing::instrument(name = "Adding task to PostgreSQL", skip_all)]
    async fn add_task(
        &mut self,
        new_task: NewTask,
    ) -> Result<Task, EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        if !project_exists(&mut tx, new_task.project_id).await? {
            return Err(EntityStoreError::ProjectNotFound);
        }
        if !member_exists(&mut tx, new_task.assigned_member_id).await? {
            return Err(EntityStoreError::MemberNotFound);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO tasks
                (task_name, description, status, deadline, project_id,
                 assigned_member_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&new_task.task_name)
        .bind(&new_task.description)
        .bind(new_task.status.as_str())
        .bind(new_task.deadline)
        .bind(new_task.project_id.as_ref())
        .bind(new_task.assigned_member_id.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(unexpected)?;

        let id: i64 = row.try_get("id").map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)?;

        Ok(new_task.into_task(TaskId::new(id)))
    }

    #[tracing::instrument(name = "Retrieving task from PostgreSQL", skip_all)]
    async fn get_task(&self, id: TaskId) -> Result<Task, EntityStoreError> {
        let row = sqlx::query("SELECT * FROM tasks WHERE id = $1")
            .bind(id.as_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(EntityStoreError::TaskNotFound)?;
        task_from_row(&row)
    }

    #[tracing::instrument(name = "Listing tasks from PostgreSQL", skip_all)]
    async fn list_tasks(&self) -> Result<Vec<Task>, EntityStoreError> {
        let rows = sqlx::query("SELECT * FROM tasks ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        rows.iter().map(task_from_row).collect()
    }

    #[tracing::instrument(name = "Updating task in PostgreSQL", skip_all)]
    async fn update_task(
        &mut self,
        id: TaskId,
        changes: TaskUpdate,
    ) -> Result<Task, EntityStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let row = sqlx::query("SELECT * FROM tasks WHERE id = $1 FOR UPDATE")
            .bind(id.as_ref())
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?
            .ok_or(EntityStoreError::TaskNotFound)?;
        let current = task_from_row(&row)?;

        // A reassigned reference must exist; otherwise the whole patch is
        // rejected and the transaction rolls back untouched.
        if let Some(project_id) = changes.project_id {
            if !project_exists(&mut tx, project_id).await? {
                return Err(EntityStoreError::ProjectNotFound);
            }
        }
        if let Some(member_id) = changes.assigned_member_id {
            if !member_exists(&mut tx, member_id).await? {
                return Err(EntityStoreError::MemberNotFound);
            }
        }

        let mut updated = current;
        changes.apply(&mut updated);

        sqlx::query(
            r#"
            UPDATE tasks
            SET task_name = $2, description = $3, status = $4, deadline = $5,
                project_id = $6, assigned_member_id = $7
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .bind(&updated.task_name)
        .bind(&updated.description)
        .bind(updated.status.as_str())
        .bind(updated.deadline)
        .bind(updated.project_id.as_ref())
        .bind(updated.assigned_member_id.as_ref())
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;

        tx.commit().await.map_err(unexpected)?;
        Ok(updated)
    }

    #[tracing::instrument(name = "Deleting task from PostgreSQL", skip_all)]
    async fn delete_task(
        &mut self,
        id: TaskId,
    ) -> Result<(), EntityStoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(EntityStoreError::TaskNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(
        name = "Listing tasks by project from PostgreSQL",
        skip_all
    )]
    async fn tasks_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, EntityStoreError> {
        let rows =
            sqlx::query("SELECT * FROM tasks WHERE project_id = $1 ORDER BY id")
                .bind(project_id.as_ref())
                .fetch_all(&self.pool)
                .await
                .map_err(unexpected)?;
        rows.iter().map(task_from_row).collect()
    }

    #[tracing::instrument(
        name = "Listing tasks by assignee from PostgreSQL",
        skip_all
    )]
    async fn tasks_assigned_to(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<Task>, EntityStoreError> {
        let rows = sqlx::query(
            "SELECT * FROM tasks WHERE assigned_member_id = $1 ORDER BY id",
        )
        .bind(member_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;
        rows.iter().map(task_from_row).collect()
    }
}
