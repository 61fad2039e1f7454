//! UI Components
//!
//! One file per page/shell component.

mod dashboard;
mod header;
mod home;
mod login_form;

pub use dashboard::Dashboard;
pub use header::Header;
pub use home::Home;
pub use login_form::LoginForm;
