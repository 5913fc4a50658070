use std::collections::HashMap;

use sqlx::Row;
use time::OffsetDateTime;

use crate::app::StoreError;
use crate::domain::comment::{CommentRow, LikeRow, ThreadComment, ThreadReply};
use crate::domain::duration::age_bucket;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct ThreadService {
    db: Db,
}

impl ThreadService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Reads the flat rows and assembles the two-level thread for the
    /// given viewer. The three reads are issued sequentially and are
    /// not wrapped in a transaction; a comment deleted between them is
    /// omitted from the result.
    pub async fn list(&self, viewer: &str) -> Result<Vec<ThreadComment>, StoreError> {
        let ids = self.top_level_ids().await?;
        let rows = self.comment_rows().await?;
        let likes = self.like_rows().await?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        Ok(assemble_thread(&ids, &rows, &likes, viewer, now))
    }

    async fn top_level_ids(&self) -> Result<Vec<i64>, StoreError> {
        let rows = sqlx::query("SELECT id FROM comments WHERE parent_id IS NULL ORDER BY id")
            .fetch_all(self.db.pool())
            .await?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(row.try_get("id")?);
        }

        Ok(ids)
    }

    async fn comment_rows(&self) -> Result<Vec<CommentRow>, StoreError> {
        let rows = sqlx::query(
            "SELECT c.id, c.content, c.author, COALESCE(u.avatar_url, '') AS avatar_url, \
                    c.parent_id, c.addressee, c.created_at \
             FROM comments c \
             LEFT JOIN users u ON c.author = u.username \
             ORDER BY c.id",
        )
        .fetch_all(self.db.pool())
        .await?;

        let mut comments = Vec::with_capacity(rows.len());
        for row in rows {
            comments.push(CommentRow {
                id: row.try_get("id")?,
                content: row.try_get("content")?,
                author: row.try_get("author")?,
                avatar_url: row.try_get("avatar_url")?,
                parent_id: row.try_get("parent_id")?,
                addressee: row.try_get("addressee")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(comments)
    }

    async fn like_rows(&self) -> Result<Vec<LikeRow>, StoreError> {
        let rows = sqlx::query("SELECT author, comment_id, rate FROM likes")
            .fetch_all(self.db.pool())
            .await?;

        let mut likes = Vec::with_capacity(rows.len());
        for row in rows {
            likes.push(LikeRow {
                author: row.try_get("author")?,
                comment_id: row.try_get("comment_id")?,
                rate: row.try_get("rate")?,
            });
        }

        Ok(likes)
    }
}

/// Summed like score and the viewer's own rate for one comment.
/// Replies and top-level comments aggregate by the same rule.
pub fn aggregate_likes(comment_id: i64, likes: &[LikeRow], viewer: &str) -> (i64, i64) {
    let mut total = 0;
    let mut my_rate = 0;
    for like in likes.iter().filter(|like| like.comment_id == comment_id) {
        total += like.rate;
        if like.author == viewer {
            my_rate = like.rate;
        }
    }
    (total, my_rate)
}

/// Rebuilds the ordered two-level thread from flat rows.
///
/// `ids` is the canonical top-level ordering; the output walks it in
/// order. An identifier with no matching top-level row is omitted
/// rather than emitted as an empty placeholder. Reply rows attach to
/// their parent's slot in row order (rows are already sorted by
/// identifier); a reply whose parent is not a known top-level slot is
/// dropped, so replies never nest under replies.
pub fn assemble_thread(
    ids: &[i64],
    rows: &[CommentRow],
    likes: &[LikeRow],
    viewer: &str,
    now: i64,
) -> Vec<ThreadComment> {
    let mut slots: HashMap<i64, ThreadComment> = HashMap::with_capacity(ids.len());

    for row in rows {
        if row.parent_id.is_none() && ids.contains(&row.id) {
            let (total, my_rate) = aggregate_likes(row.id, likes, viewer);
            slots.insert(
                row.id,
                ThreadComment {
                    id: row.id,
                    content: row.content.clone(),
                    author: row.author.clone(),
                    avatar_url: row.avatar_url.clone(),
                    likes: total,
                    duration: age_bucket(row.created_at, now),
                    is_mine: row.author == viewer,
                    my_rate,
                    replies: Vec::new(),
                },
            );
        }
    }

    for row in rows {
        let Some(parent_id) = row.parent_id else {
            continue;
        };
        if let Some(slot) = slots.get_mut(&parent_id) {
            let (total, my_rate) = aggregate_likes(row.id, likes, viewer);
            slot.replies.push(ThreadReply {
                id: row.id,
                content: row.content.clone(),
                author: row.author.clone(),
                avatar_url: row.avatar_url.clone(),
                likes: total,
                duration: age_bucket(row.created_at, now),
                is_mine: row.author == viewer,
                my_rate,
                addressee: row.addressee.clone().unwrap_or_default(),
            });
        }
    }

    ids.iter().filter_map(|id| slots.remove(id)).collect()
}
