mod authorization;
mod credential;
mod data_stores;
mod email;
mod error;
mod member;
mod member_id;
mod password;
mod project;
mod project_id;
mod role;
mod task;
mod task_id;
mod task_status;

pub use authorization::*;
pub use credential::*;
pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use member::*;
pub use member_id::*;
pub use password::*;
pub use project::*;
pub use project_id::*;
pub use role::*;
pub use task::*;
pub use task_id::*;
pub use task_status::*;
