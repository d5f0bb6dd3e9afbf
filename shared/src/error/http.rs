//! HTTP status mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::DocumentNotFound
            | Self::DocumentOwnerNotFound
            | Self::EmployeeNotFound
            | Self::RoleNotFound
            | Self::TeamNotFound
            | Self::DepartmentNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmployeeEmailExists
            | Self::EmployeeNotTerminated
            | Self::ReRegistrationInProgress => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::AdminRequired => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::DocumentOwnerNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::RoleNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DocumentNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::EmployeeNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::EmployeeNotTerminated.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::EmployeeEmailExists.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(ErrorCode::TokenInvalid.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorCode::AdminRequired.http_status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::DocumentInvalidEncoding.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::EmployeeMissingField.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
