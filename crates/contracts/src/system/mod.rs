pub mod auth;
pub mod maintenance;
pub mod users;
