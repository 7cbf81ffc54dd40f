pub mod calculations;
pub mod db;
pub mod dxf;
pub mod models;
pub mod notify;

pub use db::repository::{QuoteRepository, RepositoryError};
pub use models::*;
