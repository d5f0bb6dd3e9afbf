//! Unified error codes for the HR service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 7xxx: Document errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 7xxx: Document ====================
    /// Document not found
    DocumentNotFound = 7001,
    /// Document payload is not valid base64
    DocumentInvalidEncoding = 7002,
    /// Document owner does not exist
    DocumentOwnerNotFound = 7003,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee email already in use
    EmployeeEmailExists = 8002,
    /// Employee is not terminated
    EmployeeNotTerminated = 8003,
    /// Employee record lacks a field required for the operation
    EmployeeMissingField = 8004,
    /// Another re-registration is already running
    ReRegistrationInProgress = 8005,
    /// Role not found
    RoleNotFound = 8101,
    /// Team not found
    TeamNotFound = 8201,
    /// Department not found
    DepartmentNotFound = 8301,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Document
            ErrorCode::DocumentNotFound => "Document not found",
            ErrorCode::DocumentInvalidEncoding => "Document file is not valid base64",
            ErrorCode::DocumentOwnerNotFound => "Document owner does not exist",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already in use",
            ErrorCode::EmployeeNotTerminated => "Employee is not terminated",
            ErrorCode::EmployeeMissingField => "Missing required employee information",
            ErrorCode::ReRegistrationInProgress => "A re-registration is already in progress",
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::TeamNotFound => "Team not found",
            ErrorCode::DepartmentNotFound => "Department not found",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Document
            7001 => Ok(ErrorCode::DocumentNotFound),
            7002 => Ok(ErrorCode::DocumentInvalidEncoding),
            7003 => Ok(ErrorCode::DocumentOwnerNotFound),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeEmailExists),
            8003 => Ok(ErrorCode::EmployeeNotTerminated),
            8004 => Ok(ErrorCode::EmployeeMissingField),
            8005 => Ok(ErrorCode::ReRegistrationInProgress),
            8101 => Ok(ErrorCode::RoleNotFound),
            8201 => Ok(ErrorCode::TeamNotFound),
            8301 => Ok(ErrorCode::DepartmentNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
