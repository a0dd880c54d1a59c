use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    serve::Serve,
    Json, Router,
};

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::ApiError;
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    auth::{change_password, check_session, login, logout, signup},
    members::{
        delete_member, get_member, list_members, new_member, update_member,
    },
    projects::{
        delete_project, get_project, list_projects, new_project,
        update_project,
    },
    tasks::{delete_task, get_task, list_tasks, new_task, update_task},
};
pub mod app_state;
pub mod domain;
pub mod serialization;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
            ApiError::MemberNotFound => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            ApiError::ProjectNotFound => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, "Project not found".to_string())
            }
            ApiError::TaskNotFound => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, "Task not found".to_string())
            }
            ApiError::IncorrectCredentials => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid password".to_string())
            }
            ApiError::MissingToken => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Missing token".to_string())
            }
            ApiError::InvalidToken => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ApiError::Forbidden => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::FORBIDDEN,
                    "User not authorized to perform this action".to_string(),
                )
            }
            ApiError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/login", post(login))
            .route("/check_session", get(check_session))
            .route("/signup", post(signup))
            .route("/logout", delete(logout))
            .route("/change_password", post(change_password))
            .route("/users", get(list_members).post(new_member))
            .route(
                "/users/:user_id",
                get(get_member).put(update_member).delete(delete_member),
            )
            .route("/projects", get(list_projects).post(new_project))
            .route(
                "/projects/:project_id",
                get(get_project).put(update_project).delete(delete_project),
            )
            .route("/tasks", get(list_tasks).post(new_task))
            .route(
                "/tasks/:task_id",
                get(get_task).put(update_task).delete(delete_task),
            )
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}
