use std::path::PathBuf;

use quote_core::RepositoryError;

use crate::repository::SqliteRepository;

/// Open the quote database and bring it up to date: connect, run pending
/// migrations, and apply seed SQL if a seeds directory is present.
///
/// `database` is a file path (created on first use) or `":memory:"` for an
/// ephemeral database.
pub async fn open(database: &str) -> Result<SqliteRepository, RepositoryError> {
    let repo = SqliteRepository::new(database).await?;
    repo.run_migrations().await?;

    let seeds = seeds_dir();
    if seeds.is_dir() {
        repo.run_seeds(&seeds).await?;
    }

    Ok(repo)
}

/// Resolve the seeds directory at runtime so it works in both development and
/// packaged distribution.
///
/// Resolution order:
/// 1. **`QUOTE_DB_SQLITE_SEEDS_DIR`** — if set, use this path (override for
///    packagers or custom layouts).
/// 2. **`./seeds`** — if the directory exists in the current working directory.
/// 3. **Crate manifest dir** — `$CARGO_MANIFEST_DIR/seeds` as last resort
///    (dev/tests when run from the build tree).
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QUOTE_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

#[cfg(test)]
mod tests {
    use quote_core::QuoteRepository;

    use super::*;

    #[tokio::test]
    async fn open_in_memory_migrates_and_seeds() {
        let repo = open(":memory:").await.expect("in-memory open");

        // The seeded rate table is immediately queryable.
        let materials = repo.list_materials().await.unwrap();
        assert!(!materials.is_empty());
    }

    #[tokio::test]
    async fn open_seeds_workshops() {
        let repo = open(":memory:").await.unwrap();

        let workshops = repo.list_workshops().await.unwrap();
        assert!(!workshops.is_empty());
    }
}
