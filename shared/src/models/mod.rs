//! Data models
//!
//! Wire types shared by `hr-server` and `hr-client`. Field names are
//! camelCase on the wire.

pub mod document;
pub mod employee;
pub mod lenient;
pub mod reference;

pub use document::{Document, DocumentBulkCreate, DocumentCreate, DocumentUpdate, NewDocument};
pub use employee::{CreateEmployeeRequest, Employee, NewEmployee};
pub use reference::{DepartmentRef, ManagerRef, RoleRef, TeamRef};
