use crate::app::StoreError;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct LikeService {
    db: Db,
}

impl LikeService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Guarded upsert of a like. The NOT EXISTS guard suppresses the
    /// insert when the target comment belongs to the liker, in which
    /// case the affected-row count is the authoritative signal and
    /// `NoRowsAffected` is returned. A uniqueness conflict on
    /// (author, comment_id) overwrites the stored rate instead of
    /// failing; the store serializes conflicting writes.
    pub async fn upsert(&self, author: &str, comment_id: i64, rate: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO likes (author, comment_id, rate) \
             SELECT ?, ?, ? \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM comments c WHERE c.id = ? AND c.author = ? \
             ) \
             ON CONFLICT(author, comment_id) DO UPDATE SET rate = excluded.rate",
        )
        .bind(author)
        .bind(comment_id)
        .bind(rate)
        .bind(comment_id)
        .bind(author)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NoRowsAffected);
        }

        Ok(())
    }
}
