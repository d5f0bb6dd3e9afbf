//! JSON body extractor
//!
//! Like `axum::Json`, but a body that cannot be read or deserialized is
//! refused with an `AppError` envelope instead of axum's plain-text reply.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use shared::error::{AppError, ErrorCode};
use shared::messages;

#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), error = %rejection.body_text(), "Rejected request body");
                Err(
                    AppError::with_message(ErrorCode::InvalidRequest, messages::FAILED)
                        .with_detail("reason", rejection.body_text()),
                )
            }
        }
    }
}
