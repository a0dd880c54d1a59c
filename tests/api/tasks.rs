use crate::helpers::{
    add_new_project, get_json_response_body, member_id_for, signup_with_role,
    TestApp,
};
use project_tracker::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_and_default_to_pending(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let project_id = add_new_project(app, &token, "P1").await;

    let response = app
        .post_tasks(
            Some(&token),
            &json!({
                "task_name": "Write report",
                "project_id": project_id,
                "assigned_member_id": member_id,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "pending");
    assert_eq!(body.get("task_name").unwrap(), "Write report");
    assert_eq!(
        body.get("project_id").unwrap().as_i64().unwrap(),
        project_id
    );
    assert_eq!(
        body.get("assigned_member_id").unwrap().as_i64().unwrap(),
        member_id
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn dangling_references_are_rejected_with_404(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let project_id = add_new_project(app, &token, "P1").await;

    let response = app
        .post_tasks(
            Some(&token),
            &json!({
                "task_name": "t",
                "project_id": 9999,
                "assigned_member_id": member_id,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Project not found"
    );

    let response = app
        .post_tasks(
            Some(&token),
            &json!({
                "task_name": "t",
                "project_id": project_id,
                "assigned_member_id": 9999,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "User not found"
    );

    // Neither attempt left a row behind.
    let tasks = get_json_response_body(app.get_tasks().await).await;
    assert_eq!(tasks.as_array().unwrap().len(), 0);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response = app
        .post_tasks(
            None,
            &json!({
                "task_name": "t",
                "project_id": 1,
                "assigned_member_id": 1,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn status_only_patch_keeps_every_other_field(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let project_id = add_new_project(app, &token, "P1").await;

    let response = app
        .post_tasks(
            Some(&token),
            &json!({
                "task_name": "Write report",
                "description": "Quarterly numbers",
                "status": "in-progress",
                "deadline": "2025-06-30",
                "project_id": project_id,
                "assigned_member_id": member_id,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let before = get_json_response_body(response).await;
    let task_id = before.get("id").unwrap().as_i64().unwrap();

    let response =
        app.put_task(task_id, &json!({ "status": "completed" })).await;
    assert_eq!(response.status().as_u16(), 200);

    let after = get_json_response_body(app.get_task(task_id).await).await;
    assert_eq!(after.get("status").unwrap(), "completed");
    for field in [
        "task_name",
        "description",
        "deadline",
        "project_id",
        "assigned_member_id",
    ] {
        assert_eq!(
            after.get(field),
            before.get(field),
            "{field} must be unchanged"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn unknown_status_values_are_rejected(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let project_id = add_new_project(app, &token, "P1").await;

    let response = app
        .post_tasks(
            Some(&token),
            &json!({
                "task_name": "t",
                "status": "done",
                "project_id": project_id,
                "assigned_member_id": member_id,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let task_id = crate::helpers::add_new_task(
        app, &token, project_id, member_id,
    )
    .await;
    let response = app.put_task(task_id, &json!({ "status": "done" })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn reassignment_to_a_dangling_project_changes_nothing(
    app: &mut TestApp,
) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let project_id = add_new_project(app, &token, "P1").await;
    let task_id = crate::helpers::add_new_task(
        app, &token, project_id, member_id,
    )
    .await;
    let before = get_json_response_body(app.get_task(task_id).await).await;

    let response = app
        .put_task(
            task_id,
            &json!({ "task_name": "renamed", "project_id": 9999 }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    // The rejected patch must not have been partially applied.
    let after = get_json_response_body(app.get_task(task_id).await).await;
    assert_eq!(after, before);
}

#[test_context(TestApp)]
#[tokio::test]
async fn delete_removes_the_task(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let project_id = add_new_project(app, &token, "P1").await;
    let task_id = crate::helpers::add_new_task(
        app, &token, project_id, member_id,
    )
    .await;

    let response = app.delete_task(task_id).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.get_task(task_id).await.status().as_u16(), 404);
    assert_eq!(app.delete_task(task_id).await.status().as_u16(), 404);
}
