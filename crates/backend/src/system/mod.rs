pub mod api;
pub mod auth;
pub mod maintenance;
pub mod middleware;
pub mod tracing;
pub mod users;
