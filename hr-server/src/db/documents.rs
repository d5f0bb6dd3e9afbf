//! Document database operations

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::{Document, NewDocument};
use sqlx::PgPool;

use super::DocumentRepository;
use crate::error::{ServiceError, ServiceResult};

const COLUMNS: &str = "id, emp_id, document_file, created_at, updated_at";

fn write_error(e: sqlx::Error) -> ServiceError {
    ServiceError::from_constraint(e, ErrorCode::AlreadyExists, ErrorCode::DocumentOwnerNotFound)
}

/// PostgreSQL-backed documents
#[derive(Clone)]
pub struct PgDocuments {
    pool: PgPool,
}

impl PgDocuments {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocuments {
    async fn list_all(&self) -> ServiceResult<Vec<Document>> {
        let rows: Vec<Document> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM documents ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_employee(&self, emp_id: i64) -> ServiceResult<Vec<Document>> {
        let rows: Vec<Document> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM documents WHERE emp_id = $1 ORDER BY id"
        ))
        .bind(emp_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> ServiceResult<Option<Document>> {
        let row: Option<Document> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM documents WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create(&self, doc: NewDocument) -> ServiceResult<Document> {
        let row: Document = sqlx::query_as(&format!(
            "INSERT INTO documents (emp_id, document_file) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(doc.emp_id)
        .bind(&doc.document_file)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;
        Ok(row)
    }

    async fn create_many(&self, docs: Vec<NewDocument>) -> ServiceResult<Vec<Document>> {
        let sql = format!(
            "INSERT INTO documents (emp_id, document_file) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(docs.len());
        for doc in &docs {
            let row: Document = sqlx::query_as(&sql)
                .bind(doc.emp_id)
                .bind(&doc.document_file)
                .fetch_one(&mut *tx)
                .await
                .map_err(write_error)?;
            created.push(row);
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn save(&self, doc: &Document) -> ServiceResult<Document> {
        let row: Option<Document> = sqlx::query_as(&format!(
            r#"
            UPDATE documents SET
                emp_id = $1,
                document_file = $2,
                updated_at = now()
            WHERE id = $3
            RETURNING {COLUMNS}
            "#
        ))
        .bind(doc.emp_id)
        .bind(&doc.document_file)
        .bind(doc.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)?;
        row.ok_or_else(|| AppError::new(ErrorCode::DocumentNotFound).into())
    }

    async fn delete(&self, id: i64) -> ServiceResult<u64> {
        let rows = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected())
    }
}
