use crate::helpers::{
    get_json_response_body, member_id_for, signup_with_role, TestApp,
};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_the_token_subject(app: &mut TestApp) {
    let token = signup_with_role(app, "project_owner").await;

    let response = app.get_check_session(&token).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert!(body.get("id").unwrap().as_i64().unwrap() >= 1);
    assert!(body.get("username").is_some());
    assert_eq!(body.get("role").unwrap(), "project_owner");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_when_the_member_no_longer_exists(
    app: &mut TestApp,
) {
    let token = signup_with_role(app, "member").await;
    let member_id = member_id_for(app, &token).await;

    assert_eq!(app.delete_user(member_id).await.status().as_u16(), 200);

    // The token is still signature-valid but its subject is gone.
    let response = app.get_check_session(&token).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_an_invalid_token(app: &mut TestApp) {
    let response = app.get_check_session("invalid_token").await;
    assert_eq!(response.status().as_u16(), 401);
}
