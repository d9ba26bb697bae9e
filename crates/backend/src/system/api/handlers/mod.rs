pub mod auth;
pub mod debug;
pub mod maintenance;
pub mod users;
