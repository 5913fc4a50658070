use serde::{Deserialize, Serialize};

/// Assembled top-level node of a thread. Derived fields (`likes`,
/// `my_rate`, `is_mine`, `duration`) are computed per viewer at
/// assembly time and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadComment {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub avatar_url: String,
    pub likes: i64,
    pub duration: String,
    pub is_mine: bool,
    pub my_rate: i64,
    pub replies: Vec<ThreadReply>,
}

/// Assembled reply node. Replies carry an addressee and never have
/// replies of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadReply {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub avatar_url: String,
    pub likes: i64,
    pub duration: String,
    pub is_mine: bool,
    pub my_rate: i64,
    pub addressee: String,
}

/// Flat projected comment row as read from storage, before assembly.
/// `parent_id` is None for top-level comments.
#[derive(Debug, Clone)]
pub struct CommentRow {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub avatar_url: String,
    pub parent_id: Option<i64>,
    pub addressee: Option<String>,
    pub created_at: i64,
}

/// One like row; at most one exists per (author, comment_id) pair.
#[derive(Debug, Clone)]
pub struct LikeRow {
    pub author: String,
    pub comment_id: i64,
    pub rate: i64,
}
