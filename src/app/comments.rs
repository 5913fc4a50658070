use time::OffsetDateTime;

use crate::app::StoreError;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct CommentService {
    db: Db,
}

impl CommentService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Inserts a new comment. Anyone may post; there is no ownership
    /// precondition. A reply to a vanished parent fails the foreign
    /// key check and surfaces as a storage error.
    pub async fn create(
        &self,
        author: &str,
        content: &str,
        parent_id: Option<i64>,
        addressee: Option<&str>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO comments (content, author, parent_id, addressee, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(content)
        .bind(author)
        .bind(parent_id)
        .bind(addressee)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Updates the content of a comment the author owns. The ownership
    /// filter lives in the statement predicate: no rows are updated
    /// unless the stored author matches, and zero affected rows is
    /// surfaced as `NoRowsAffected` whether the comment is missing or
    /// owned by someone else.
    pub async fn update(&self, id: i64, author: &str, content: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE comments SET content = ? WHERE id = ? AND author = ?")
            .bind(content)
            .bind(id)
            .bind(author)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NoRowsAffected);
        }

        Ok(())
    }

    /// Deletes a comment the author owns, under the same ownership
    /// filter as `update`. Replies cascade with their parent.
    pub async fn delete(&self, id: i64, author: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ? AND author = ?")
            .bind(id)
            .bind(author)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NoRowsAffected);
        }

        Ok(())
    }
}
