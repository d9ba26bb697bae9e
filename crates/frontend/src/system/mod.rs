pub mod auth;
pub mod maintenance;
pub mod pages;
pub mod tutorial;
pub mod users;
