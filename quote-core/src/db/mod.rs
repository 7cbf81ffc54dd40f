pub mod repository;

pub use repository::{QuoteRepository, RepositoryError};
