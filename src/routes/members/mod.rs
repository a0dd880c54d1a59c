mod delete_member;
mod get_member;
mod list_members;
mod new_member;
mod update_member;

pub use delete_member::*;
pub use get_member::*;
pub use list_members::*;
pub use new_member::*;
pub use update_member::*;
