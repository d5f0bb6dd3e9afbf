//! User-facing outcome messages
//!
//! The document controller reports every outcome with one of these two
//! strings; `ErrorCode` carries the structured reason alongside.

/// Successful removal of a record
pub const DELETED: &str = "Record deleted successfully";

/// Any failed operation
pub const FAILED: &str = "Operation failed";
