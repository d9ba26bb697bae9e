pub mod admin_tools;
pub mod login;
