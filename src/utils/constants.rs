use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref JWT_SECRET: Secret<String> = set_token();
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
}

fn load_env() {
    dotenv().ok();
}

fn set_token() -> Secret<String> {
    load_env();
    Secret::new(load_or_default(
        env::JWT_SECRET_ENV_VAR,
        DEFAULT_JWT_SECRET,
    ))
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn load_or_default(variable_name: &str, default_value: &str) -> String {
    load_env();

    match std_env::var(variable_name) {
        Ok(value) => {
            if value.is_empty() {
                String::from(default_value)
            } else {
                value
            }
        }
        Err(_) => String::from(default_value),
    }
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
}

// Development fallback only; deployments override via JWT_SECRET.
pub const DEFAULT_JWT_SECRET: &str = "insecure-dev-secret-override-me";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
