use crate::helpers::{
    add_new_project, add_new_task, get_json_response_body, member_id_for,
    signup_with_role, TestApp,
};
use project_tracker::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn signup_then_create_project_end_to_end(app: &mut TestApp) {
    let signup = app
        .post_signup(&json!({
            "username": "alice",
            "password": "longenough",
            "email": "a@x.com",
            "full_name": "Alice",
            "gender": "F",
            "member_no": "M000001",
            "date_of_birth": "1990-01-01",
            "id_no": "ID1",
            "role": "project_owner"
        }))
        .await;
    assert_eq!(signup.status().as_u16(), 201);
    let token = get_json_response_body(signup)
        .await
        .get("token")
        .unwrap()
        .as_str()
        .unwrap()
        .to_owned();
    let alice_id = member_id_for(app, &token).await;

    let response = app
        .post_projects(Some(&token), &json!({ "project_name": "P1" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("id").unwrap(), 1);
    assert_eq!(body.get("project_name").unwrap(), "P1");
    assert_eq!(body.get("owner_id").unwrap().as_i64().unwrap(), alice_id);
    assert_eq!(body.get("tasks").unwrap(), &json!([]));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_requests(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;

    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "description": "",
      "type": "object",
      "properties": {
        "id": { "type": "integer", "minimum": 1 },
        "project_name": { "type": "string", "minLength": 1 },
        "details": { "type": ["string", "null"] },
        "deadline": { "type": ["string", "null"] },
        "owner_id": { "type": "integer" },
        "tasks": { "type": "array" }
      },
      "required": ["id", "project_name", "owner_id", "tasks"]
    });

    let project_names = [
        "My hovercraft is full of eels",
        "A moose once bit my sister",
    ];

    for project_name in project_names.iter() {
        let response = app
            .post_projects(
                Some(&token),
                &json!({
                    "project_name": project_name,
                    "details": "from the sketches",
                    "deadline": "2025-12-31"
                }),
            )
            .await;
        assert_eq!(
            response.status().as_u16(),
            201,
            "Failed to create new project for project name: {}",
            project_name
        );

        let response_body = get_json_response_body(response).await;
        assert!(
            jsonschema::is_valid(&schema, &response_body),
            "response does not match schema"
        );
        assert_eq!(
            response_body.get("project_name").unwrap(),
            project_name,
            "Response should contain expected project name: {project_name}"
        );
        assert_eq!(response_body.get("deadline").unwrap(), "2025-12-31");
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_plain_members(app: &mut TestApp) {
    let token = signup_with_role(app, "member").await;

    let response = app
        .post_projects(Some(&token), &json!({ "project_name": "P1" }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "User not authorized to perform this action"
    );

    // No row was created by the denied request.
    let projects = get_json_response_body(app.get_projects().await).await;
    assert_eq!(projects.as_array().unwrap().len(), 0);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_authenticated(app: &mut TestApp) {
    let response =
        app.post_projects(None, &json!({ "project_name": "P1" })).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post_projects(Some("garbage-token"), &json!({ "project_name": "P1" }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_when_the_token_subject_is_gone(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    assert_eq!(app.delete_user(member_id).await.status().as_u16(), 200);

    let response = app
        .post_projects(Some(&token), &json!({ "project_name": "P1" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn partial_update_touches_only_the_supplied_fields(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let response = app
        .post_projects(
            Some(&token),
            &json!({
                "project_name": "P1",
                "deadline": "2025-12-31"
            }),
        )
        .await;
    let project_id = get_json_response_body(response)
        .await
        .get("id")
        .unwrap()
        .as_i64()
        .unwrap();

    let response = app
        .put_project(project_id, &json!({ "details": "now with details" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(app.get_project(project_id).await).await;
    assert_eq!(body.get("project_name").unwrap(), "P1");
    assert_eq!(body.get("details").unwrap(), "now with details");
    assert_eq!(body.get("deadline").unwrap(), "2025-12-31");

    // An explicit null clears a nullable field.
    let response =
        app.put_project(project_id, &json!({ "deadline": null })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(app.get_project(project_id).await).await;
    assert!(body.get("deadline").unwrap().is_null());
}

#[test_context(TestApp)]
#[tokio::test]
async fn deleting_a_project_removes_all_of_its_tasks(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;
    let member_id = member_id_for(app, &token).await;
    let doomed = add_new_project(app, &token, "doomed").await;
    let kept = add_new_project(app, &token, "kept").await;
    add_new_task(app, &token, doomed, member_id).await;
    add_new_task(app, &token, doomed, member_id).await;
    let surviving = add_new_task(app, &token, kept, member_id).await;

    let response = app.delete_project(doomed).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.get_project(doomed).await.status().as_u16(), 404);

    let tasks = get_json_response_body(app.get_tasks().await).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1, "only the other project's task survives");
    assert_eq!(tasks[0].get("id").unwrap().as_i64().unwrap(), surviving);
}

#[test_context(TestApp)]
#[tokio::test]
async fn unknown_project_ids_return_404(app: &mut TestApp) {
    assert_eq!(app.get_project(42).await.status().as_u16(), 404);
    assert_eq!(
        app.put_project(42, &json!({ "project_name": "x" }))
            .await
            .status()
            .as_u16(),
        404
    );
    assert_eq!(app.delete_project(42).await.status().as_u16(), 404);
}
