pub mod decimal;
mod open;
pub mod repository;

pub use open::open;
pub use repository::SqliteRepository;
