pub mod aggregate;

pub use aggregate::{Office, OfficeDto};
