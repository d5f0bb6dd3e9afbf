//! Typed HR API
//!
//! [`HrApi`] covers the employee endpoints the People directory consumes,
//! [`DocumentApi`] the document endpoints. [`HrClient`] implements both over
//! the network.

use async_trait::async_trait;
use shared::error::ApiResponse;
use shared::models::{
    CreateEmployeeRequest, Document, DocumentBulkCreate, DocumentCreate, DocumentUpdate, Employee,
};

use crate::{ClientError, ClientResult, HrClient};

/// Refuse an envelope that carries a non-success code
fn envelope<T>(response: ApiResponse<T>) -> ClientResult<ApiResponse<T>> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ClientError::Api {
        code: response.code.unwrap_or_default(),
        message: response.message,
        details: response
            .details
            .map(|d| serde_json::Value::Object(d.into_iter().collect())),
    })
}

fn data<T>(response: ApiResponse<T>, what: &str) -> ClientResult<T> {
    envelope(response)?
        .data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {what} data")))
}

fn message(response: ApiResponse<()>) -> ClientResult<String> {
    Ok(envelope(response)?.message)
}

/// Employee endpoints
#[async_trait]
pub trait HrApi: Send + Sync {
    async fn list_employees(&self) -> ClientResult<Vec<Employee>>;

    async fn list_team(&self, manager_id: i64) -> ClientResult<Vec<Employee>>;

    async fn list_terminated(&self) -> ClientResult<Vec<Employee>>;

    async fn create_employee(&self, request: &CreateEmployeeRequest) -> ClientResult<Employee>;

    /// Remove a terminated record, returning the server's message
    async fn delete_terminated(&self, emp_id: i64) -> ClientResult<String>;

    /// Turn a terminated record into a new employee in one server transaction
    async fn reregister(&self, emp_id: i64) -> ClientResult<Employee>;
}

/// Document endpoints
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self) -> ClientResult<Vec<Document>>;

    async fn list_documents_for(&self, emp_id: i64) -> ClientResult<Vec<Document>>;

    async fn create_document(&self, doc: &DocumentCreate) -> ClientResult<Document>;

    async fn bulk_create_documents(&self, docs: &DocumentBulkCreate) -> ClientResult<Vec<Document>>;

    async fn update_document(&self, doc: &DocumentUpdate) -> ClientResult<Document>;

    /// Delete by id, returning the server's message
    async fn delete_document(&self, id: i64) -> ClientResult<String>;
}

#[async_trait]
impl HrApi for HrClient {
    async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.get("/employees").await
    }

    async fn list_team(&self, manager_id: i64) -> ClientResult<Vec<Employee>> {
        self.get(&format!("/employees/team/{manager_id}")).await
    }

    async fn list_terminated(&self) -> ClientResult<Vec<Employee>> {
        self.get("/employees/terminated").await
    }

    async fn create_employee(&self, request: &CreateEmployeeRequest) -> ClientResult<Employee> {
        let response: ApiResponse<Employee> = self.post("/employees", request).await?;
        data(response, "employee")
    }

    async fn delete_terminated(&self, emp_id: i64) -> ClientResult<String> {
        let response: ApiResponse<()> = self
            .delete(&format!("/employees/terminated/{emp_id}"))
            .await?;
        message(response)
    }

    async fn reregister(&self, emp_id: i64) -> ClientResult<Employee> {
        let response: ApiResponse<Employee> = self
            .post_empty(&format!("/employees/terminated/{emp_id}/reregister"))
            .await?;
        data(response, "employee")
    }
}

#[async_trait]
impl DocumentApi for HrClient {
    async fn list_documents(&self) -> ClientResult<Vec<Document>> {
        self.get("/documents").await
    }

    async fn list_documents_for(&self, emp_id: i64) -> ClientResult<Vec<Document>> {
        self.get(&format!("/documents/{emp_id}")).await
    }

    async fn create_document(&self, doc: &DocumentCreate) -> ClientResult<Document> {
        let response: ApiResponse<Document> = self.post("/documents", doc).await?;
        data(response, "document")
    }

    async fn bulk_create_documents(&self, docs: &DocumentBulkCreate) -> ClientResult<Vec<Document>> {
        let response: ApiResponse<Vec<Document>> = self.post("/documents/bulk", docs).await?;
        data(response, "document")
    }

    async fn update_document(&self, doc: &DocumentUpdate) -> ClientResult<Document> {
        let response: ApiResponse<Document> = self.put("/documents", doc).await?;
        data(response, "document")
    }

    async fn delete_document(&self, id: i64) -> ClientResult<String> {
        let response: ApiResponse<()> = self.delete(&format!("/documents/{id}")).await?;
        message(response)
    }
}
