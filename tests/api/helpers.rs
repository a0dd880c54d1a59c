use project_tracker::{
    app_state::{AppState, EntityStoreType},
    services::data_stores::HashmapEntityStore,
    utils::constants::test,
    Application,
};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A full application listening on an ephemeral port, wired to the
/// in-memory store so every test starts from an empty dataset.
pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub entity_store: EntityStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        let entity_store: EntityStoreType =
            Arc::new(RwLock::new(HashmapEntityStore::default()));
        let app_state = AppState::new(entity_store.clone());

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let http_client = Client::new();

        Self {
            address,
            http_client,
            entity_store,
        }
    }

    pub async fn post_signup<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/signup", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_check_session(&self, token: &str) -> Response {
        self.http_client
            .get(format!("{}/check_session", &self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_logout(&self, token: &str) -> Response {
        self.http_client
            .delete(format!("{}/logout", &self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_logout_without_token(&self) -> Response {
        self.http_client
            .delete(format!("{}/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_change_password<Body>(
        &self,
        token: Option<&str>,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        let mut request = self
            .http_client
            .post(format!("{}/change_password", &self.address))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn get_users(&self) -> Response {
        self.http_client
            .get(format!("{}/users", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_users<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/users", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_user(&self, user_id: i64) -> Response {
        self.http_client
            .get(format!("{}/users/{}", &self.address, user_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_user<Body>(&self, user_id: i64, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/users/{}", &self.address, user_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_user(&self, user_id: i64) -> Response {
        self.http_client
            .delete(format!("{}/users/{}", &self.address, user_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_projects(&self) -> Response {
        self.http_client
            .get(format!("{}/projects", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_projects<Body>(
        &self,
        token: Option<&str>,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        let mut request = self
            .http_client
            .post(format!("{}/projects", &self.address))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn get_project(&self, project_id: i64) -> Response {
        self.http_client
            .get(format!("{}/projects/{}", &self.address, project_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_project<Body>(
        &self,
        project_id: i64,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/projects/{}", &self.address, project_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_project(&self, project_id: i64) -> Response {
        self.http_client
            .delete(format!("{}/projects/{}", &self.address, project_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_tasks(&self) -> Response {
        self.http_client
            .get(format!("{}/tasks", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_tasks<Body>(
        &self,
        token: Option<&str>,
        body: &Body,
    ) -> Response
    where
        Body: serde::Serialize,
    {
        let mut request = self
            .http_client
            .post(format!("{}/tasks", &self.address))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn get_task(&self, task_id: i64) -> Response {
        self.http_client
            .get(format!("{}/tasks/{}", &self.address, task_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_task<Body>(&self, task_id: i64, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .put(format!("{}/tasks/{}", &self.address, task_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_task(&self, task_id: i64) -> Response {
        self.http_client
            .delete(format!("{}/tasks/{}", &self.address, task_id))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }

    async fn teardown(self) {}
}

pub fn get_random_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// A complete, unique signup body. `role` is omitted when `None`, which
/// exercises each route's own default.
pub fn signup_body(username: &str, role: Option<&str>) -> Value {
    let suffix = random_suffix();
    let mut body = json!({
        "username": username,
        "password": "longenough",
        "email": get_random_email(),
        "full_name": "Test Member",
        "gender": "Other",
        "member_no": format!("M{suffix}"),
        "date_of_birth": "1990-01-01",
        "id_no": format!("ID{suffix}"),
        "address": "1 Example Street",
    });
    if let Some(role) = role {
        body["role"] = json!(role);
    }
    body
}

pub async fn get_json_response_body(response: Response) -> Value {
    response
        .json()
        .await
        .expect("failed to parse response body JSON")
}

/// Signs up a fresh member with the given role and returns its token.
pub async fn signup_with_role(app: &TestApp, role: &str) -> String {
    let username = format!("user-{}", random_suffix());
    let response = app.post_signup(&signup_body(&username, Some(role))).await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to sign up member with role: {role}"
    );

    let body = get_json_response_body(response).await;
    body.get("token")
        .expect("No token in signup response")
        .as_str()
        .expect("Token should be a string")
        .to_owned()
}

/// The member id behind a token, as reported by /check_session.
pub async fn member_id_for(app: &TestApp, token: &str) -> i64 {
    let response = app.get_check_session(token).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    body.get("id").expect("No id in response").as_i64().unwrap()
}

/// Creates a project for the token's member and returns the project id.
pub async fn add_new_project(app: &TestApp, token: &str, name: &str) -> i64 {
    let response = app
        .post_projects(Some(token), &json!({ "project_name": name }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to add new project with name: {name}"
    );

    let body = get_json_response_body(response).await;
    body.get("id").expect("No ID in response").as_i64().unwrap()
}

/// Creates a task in the given project assigned to the given member and
/// returns the task id.
pub async fn add_new_task(
    app: &TestApp,
    token: &str,
    project_id: i64,
    assigned_member_id: i64,
) -> i64 {
    let response = app
        .post_tasks(
            Some(token),
            &json!({
                "task_name": "task",
                "project_id": project_id,
                "assigned_member_id": assigned_member_id,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201, "Failed to add new task");

    let body = get_json_response_body(response).await;
    body.get("id").expect("No ID in response").as_i64().unwrap()
}
