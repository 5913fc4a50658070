use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::comments::CommentService;
use crate::app::likes::LikeService;
use crate::app::threads::ThreadService;
use crate::app::StoreError;
use crate::domain::comment::ThreadComment;
use crate::http::AppError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

/// The viewer identity is a caller-supplied string, not authenticated.
#[derive(Deserialize)]
pub struct ViewerQuery {
    pub user: Option<String>,
}

impl ViewerQuery {
    fn require_user(&self) -> Result<&str, AppError> {
        match self.user.as_deref() {
            Some(user) if !user.trim().is_empty() => Ok(user),
            _ => Err(AppError::bad_request("user is required")),
        }
    }
}

#[derive(Serialize)]
pub struct ListCommentsResponse {
    pub data: Vec<ThreadComment>,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.db.ping().await.is_ok() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse { status })
}

pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
) -> Result<Json<ListCommentsResponse>, AppError> {
    let viewer = query.user.unwrap_or_default();

    let service = ThreadService::new(state.db.clone());
    let data = service.list(&viewer).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list comments");
        AppError::internal("failed to list comments")
    })?;

    Ok(Json(ListCommentsResponse { data }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<i64>,
    pub addressee: Option<String>,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<StatusCode, AppError> {
    let user = query.require_user()?;

    if payload.content.trim().is_empty() {
        return Err(AppError::bad_request("content is required"));
    }
    if let Some(parent_id) = payload.parent_id {
        if parent_id <= 0 {
            return Err(AppError::bad_request("parentId is invalid"));
        }
        let has_addressee = payload
            .addressee
            .as_deref()
            .map_or(false, |a| !a.trim().is_empty());
        if !has_addressee {
            return Err(AppError::bad_request(
                "addressee is required when parentId is present",
            ));
        }
    }

    let service = CommentService::new(state.db.clone());
    service
        .create(
            user,
            &payload.content,
            payload.parent_id,
            payload.addressee.as_deref(),
        )
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "failed to create comment");
            AppError::internal("failed to create comment")
        })?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

pub async fn update_comment(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<StatusCode, AppError> {
    let user = query.require_user()?;

    if id <= 0 {
        return Err(AppError::bad_request("id is invalid"));
    }
    if payload.content.trim().is_empty() {
        return Err(AppError::bad_request("content is required"));
    }

    let service = CommentService::new(state.db.clone());
    service
        .update(id, user, &payload.content)
        .await
        .map_err(|err| match err {
            StoreError::NoRowsAffected => AppError::not_found("comment not found"),
            StoreError::Storage(err) => {
                tracing::error!(error = ?err, comment_id = id, "failed to update comment");
                AppError::internal("failed to update comment")
            }
        })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_comment(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
) -> Result<StatusCode, AppError> {
    let user = query.require_user()?;

    if id <= 0 {
        return Err(AppError::bad_request("id is invalid"));
    }

    let service = CommentService::new(state.db.clone());
    service.delete(id, user).await.map_err(|err| match err {
        StoreError::NoRowsAffected => AppError::not_found("comment not found"),
        StoreError::Storage(err) => {
            tracing::error!(error = ?err, comment_id = id, "failed to delete comment");
            AppError::internal("failed to delete comment")
        }
    })?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertLikeRequest {
    pub comment_id: i64,
    pub rate: i64,
}

pub async fn upsert_like(
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
    Json(payload): Json<UpsertLikeRequest>,
) -> Result<StatusCode, AppError> {
    let user = query.require_user()?;

    if payload.comment_id <= 0 {
        return Err(AppError::bad_request("commentId is invalid"));
    }
    if !matches!(payload.rate, -1 | 0 | 1) {
        return Err(AppError::bad_request("rate is invalid"));
    }

    let service = LikeService::new(state.db.clone());
    service
        .upsert(user, payload.comment_id, payload.rate)
        .await
        .map_err(|err| match err {
            StoreError::NoRowsAffected => AppError::forbidden("cannot rate your own comment"),
            StoreError::Storage(err) => {
                tracing::error!(
                    error = ?err,
                    comment_id = payload.comment_id,
                    "failed to upsert like"
                );
                AppError::internal("failed to upsert like")
            }
        })?;

    Ok(StatusCode::NO_CONTENT)
}
