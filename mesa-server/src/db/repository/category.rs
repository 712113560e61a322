//! Category Repository
//!
//! Categories are bare names with a display position. The reserved
//! "All" sentinel and the in-use check live in the menu service so they
//! apply uniformly to every tier; this tier only enforces uniqueness.

use super::{RepoError, RepoResult};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All category names by display position.
    pub async fn find_all(&self) -> RepoResult<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM category ORDER BY position, name")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    pub async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(&self, name: &str) -> RepoResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM category WHERE name = ?1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Append a category at the end of the display order.
    pub async fn create(&self, name: &str) -> RepoResult<()> {
        if self.exists(name).await? {
            return Err(RepoError::Duplicate(format!(
                "Category '{name}' already exists"
            )));
        }
        sqlx::query(
            "INSERT INTO category (name, position) \
             VALUES (?1, (SELECT COALESCE(MAX(position), 0) + 1 FROM category))",
        )
        .bind(name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM category WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Category '{name}' not found")));
        }
        Ok(())
    }

    /// Insert preserving position (file → database migration).
    pub async fn upsert(&self, name: &str, position: i64) -> RepoResult<()> {
        sqlx::query("INSERT OR REPLACE INTO category (name, position) VALUES (?1, ?2)")
            .bind(name)
            .bind(position)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn create_rejects_duplicates() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CategoryRepository::new(db.pool.clone());
        repo.create("Soups").await.unwrap();
        let err = repo.create("Soups").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn categories_keep_insertion_order() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CategoryRepository::new(db.pool.clone());
        repo.create("Soups").await.unwrap();
        repo.create("Mains").await.unwrap();
        repo.create("Desserts").await.unwrap();
        assert_eq!(repo.find_all().await.unwrap(), ["Soups", "Mains", "Desserts"]);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let repo = CategoryRepository::new(db.pool.clone());
        let err = repo.delete("Ghost").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
