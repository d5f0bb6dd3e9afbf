//! Database access layer
//!
//! Handlers talk to storage through the repository traits below. The
//! PostgreSQL implementations back the running service; [`memory`] keeps
//! everything in process for router tests and local experiments.

pub mod documents;
pub mod employees;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{Document, Employee, NewDocument, NewEmployee};

use crate::error::ServiceResult;

pub use documents::PgDocuments;
pub use employees::PgEmployees;
pub use memory::MemoryStore;

/// Document storage
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn list_all(&self) -> ServiceResult<Vec<Document>>;

    async fn list_by_employee(&self, emp_id: i64) -> ServiceResult<Vec<Document>>;

    async fn find(&self, id: i64) -> ServiceResult<Option<Document>>;

    async fn create(&self, doc: NewDocument) -> ServiceResult<Document>;

    /// Insert every document or none of them
    async fn create_many(&self, docs: Vec<NewDocument>) -> ServiceResult<Vec<Document>>;

    /// Persist `emp_id` and `document_file` of an existing row
    async fn save(&self, doc: &Document) -> ServiceResult<Document>;

    /// Delete by id, returning the number of removed rows
    async fn delete(&self, id: i64) -> ServiceResult<u64>;
}

/// Employee storage
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Employees that are not terminated
    async fn list_active(&self) -> ServiceResult<Vec<Employee>>;

    /// Active employees whose manager is `manager_id`
    async fn list_team(&self, manager_id: i64) -> ServiceResult<Vec<Employee>>;

    async fn list_terminated(&self) -> ServiceResult<Vec<Employee>>;

    async fn create(&self, input: &NewEmployee) -> ServiceResult<Employee>;

    /// Remove a terminated record; active employees are refused
    async fn delete_terminated(&self, emp_id: i64) -> ServiceResult<()>;

    /// Replace a terminated record with a fresh employee, atomically
    ///
    /// The new record is built with [`shared::reregister::build_payload`],
    /// documents move to the new id, and the terminated row is deleted.
    async fn reregister(
        &self,
        emp_id: i64,
        now: DateTime<Utc>,
        email_domain: &str,
    ) -> ServiceResult<Employee>;
}
