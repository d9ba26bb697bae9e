//! Общие контракты между backend и frontend: агрегаты, DTO и
//! чистая логика UI, которую можно тестировать без браузера.

pub mod domain;
pub mod shared;
pub mod system;
