mod delete_project;
mod get_project;
mod list_projects;
mod new_project;
mod update_project;

pub use delete_project::*;
pub use get_project::*;
pub use list_projects::*;
pub use new_project::*;
pub use update_project::*;
