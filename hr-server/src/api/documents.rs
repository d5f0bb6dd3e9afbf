//! Document handlers
//!
//! Files are stored as bytes and travel as base64. Writes with undecodable
//! base64 are refused before anything is stored.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::codec::{self, BlobDecodeError};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::messages;
use shared::models::{Document, DocumentBulkCreate, DocumentCreate, DocumentUpdate, NewDocument};

use super::extract::Payload;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;
type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

fn invalid_encoding(e: BlobDecodeError) -> AppError {
    tracing::debug!(error = %e, "Rejected document payload");
    AppError::with_message(ErrorCode::DocumentInvalidEncoding, messages::FAILED)
        .with_detail("reason", e.to_string())
}

fn failed(code: ErrorCode) -> AppError {
    AppError::with_message(code, messages::FAILED)
}

/// Every document failure reads `messages::FAILED`; the code carries the reason
fn failed_from(e: impl Into<AppError>) -> AppError {
    let e = e.into();
    AppError {
        message: messages::FAILED.to_string(),
        ..e
    }
}

/// `GET /documents`
pub async fn list_all(State(state): State<AppState>) -> ApiResult<Vec<Document>> {
    let docs = state.documents.list_all().await.map_err(failed_from)?;
    Ok(Json(
        docs.into_iter().map(Document::without_timestamps).collect(),
    ))
}

/// `GET /documents/{empid}`; no match is an empty list
pub async fn list_by_employee(
    State(state): State<AppState>,
    Path(emp_id): Path<i64>,
) -> ApiResult<Vec<Document>> {
    let docs = state
        .documents
        .list_by_employee(emp_id)
        .await
        .map_err(failed_from)?;
    Ok(Json(docs))
}

/// `POST /documents/bulk`
pub async fn bulk_create(
    State(state): State<AppState>,
    Payload(body): Payload<DocumentBulkCreate>,
) -> Created<Vec<Document>> {
    let docs = body
        .data
        .iter()
        .map(NewDocument::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid_encoding)?;

    let count = docs.len();
    let created = state
        .documents
        .create_many(docs)
        .await
        .map_err(failed_from)?;
    tracing::info!(count, "Documents bulk created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// `POST /documents`
pub async fn create(
    State(state): State<AppState>,
    Payload(body): Payload<DocumentCreate>,
) -> Created<Document> {
    let doc = NewDocument::try_from(&body).map_err(invalid_encoding)?;
    let created = state.documents.create(doc).await.map_err(failed_from)?;
    tracing::info!(id = created.id, emp_id = created.emp_id, "Document created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// `PUT /documents`; the target id travels in the body
pub async fn update(
    State(state): State<AppState>,
    Payload(body): Payload<DocumentUpdate>,
) -> ApiResult<ApiResponse<Document>> {
    let file = codec::decode_opt(body.document_file.as_deref()).map_err(invalid_encoding)?;

    let mut doc = state
        .documents
        .find(body.id)
        .await
        .map_err(failed_from)?
        .ok_or_else(|| failed(ErrorCode::DocumentNotFound).with_detail("id", body.id))?;

    if let Some(emp_id) = body.emp_id {
        doc.emp_id = emp_id;
    }
    if file.is_some() {
        doc.document_file = file;
    }

    let saved = state.documents.save(&doc).await.map_err(failed_from)?;
    tracing::info!(id = saved.id, "Document updated");
    Ok(Json(ApiResponse::success(saved)))
}

/// `DELETE /documents/{id}`; succeeds only when exactly one row went away
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    let removed = state.documents.delete(id).await.map_err(failed_from)?;
    match removed {
        1 => {
            tracing::info!(id, "Document deleted");
            Ok(Json(ApiResponse::message(messages::DELETED)))
        }
        0 => Err(failed(ErrorCode::DocumentNotFound).with_detail("id", id)),
        n => {
            tracing::warn!(id, removed = n, "Unexpected document delete count");
            Err(failed(ErrorCode::InvalidRequest).with_detail("removed", n))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    #[test]
    fn test_database_failures_keep_failed_message() {
        let err = failed_from(ServiceError::Db("connection reset".into()));
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, messages::FAILED);
    }

    #[test]
    fn test_failed_from_keeps_code_and_details() {
        let err = failed_from(
            AppError::new(ErrorCode::DocumentNotFound).with_detail("id", 4),
        );
        assert_eq!(err.code, ErrorCode::DocumentNotFound);
        assert_eq!(err.message, messages::FAILED);
        assert_eq!(err.details.unwrap()["id"], 4);
    }
}
