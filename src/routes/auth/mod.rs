mod change_password;
mod check_session;
mod login;
mod logout;
mod signup;

pub use change_password::*;
pub use check_session::*;
pub use login::*;
pub use logout::*;
pub use signup::*;
