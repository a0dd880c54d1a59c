use crate::helpers::{get_json_response_body, signup_body, TestApp};
use project_tracker::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_a_token_for_valid_credentials(
    app: &mut TestApp,
) {
    assert_eq!(
        app.post_signup(&signup_body("alice", None)).await.status().as_u16(),
        201
    );

    let response = app
        .post_login(&json!({
            "username": "alice",
            "password": "longenough"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let token = body.get("token").unwrap().as_str().unwrap();
    assert_eq!(app.get_check_session(token).await.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_a_wrong_password(app: &mut TestApp) {
    assert_eq!(
        app.post_signup(&signup_body("alice", None)).await.status().as_u16(),
        201
    );

    let response = app
        .post_login(&json!({
            "username": "alice",
            "password": "wrong-password"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Invalid password"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_an_unknown_username(app: &mut TestApp) {
    let response = app
        .post_login(&json!({
            "username": "nobody",
            "password": "longenough"
        }))
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
}
