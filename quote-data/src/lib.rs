mod loader;

pub use loader::{MaterialLoader, MaterialLoaderError, MaterialRecord};
