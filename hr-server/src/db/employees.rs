//! Employee database operations
//!
//! Reads join the role, team, department and manager lookups so every
//! returned record carries its resolved references.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{DepartmentRef, Employee, ManagerRef, NewEmployee, RoleRef, TeamRef};
use sqlx::{PgConnection, PgPool};

use super::EmployeeRepository;
use crate::error::{ServiceError, ServiceResult};

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.*,
           r.role_title,
           t.team_name,
           d.department_name,
           m.first_name AS manager_first_name,
           m.last_name AS manager_last_name
    FROM employees e
    LEFT JOIN roles r ON r.role_id = e.role_id
    LEFT JOIN teams t ON t.team_id = e.team_id
    LEFT JOIN departments d ON d.department_id = e.department_id
    LEFT JOIN employees m ON m.emp_id = e.manager_id
"#;

const TERMINATED: &str =
    "((e.termination_reason IS NOT NULL AND e.termination_reason <> '') OR e.auto_delete_at IS NOT NULL)";

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    emp_id: i64,
    first_name: String,
    last_name: String,
    preferred_name: Option<String>,
    email: String,
    gender: Option<String>,
    nationality: Option<String>,
    date_of_birth: Option<NaiveDate>,
    marital_status: Option<String>,
    phone_number: Option<String>,
    role_id: Option<i64>,
    team_id: Option<i64>,
    department_id: Option<i64>,
    manager_id: Option<i64>,
    position: Option<String>,
    post: Option<String>,
    salary: Option<Decimal>,
    employment_type: Option<String>,
    compensation_type: Option<String>,
    weekly_hours: Option<i32>,
    office_location: Option<String>,
    street_address: Option<String>,
    unit_suite: Option<String>,
    city: Option<String>,
    country: Option<String>,
    state_province: Option<String>,
    postal_zip_code: Option<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_relationship: Option<String>,
    emergency_contact_phone_number: Option<String>,
    degrees: Option<String>,
    field_of_interest: Option<String>,
    hire_date: Option<DateTime<Utc>>,
    effective_date: Option<DateTime<Utc>>,
    termination_reason: Option<String>,
    termination_note: Option<String>,
    auto_delete_at: Option<DateTime<Utc>>,
    completed_onboarding_at: Option<DateTime<Utc>>,
    photo: Option<String>,
    role_title: Option<String>,
    team_name: Option<String>,
    department_name: Option<String>,
    manager_first_name: Option<String>,
    manager_last_name: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        let manager = (row.manager_first_name.is_some() || row.manager_last_name.is_some())
            .then(|| ManagerRef {
                first_name: row.manager_first_name,
                last_name: row.manager_last_name,
            });
        Employee {
            emp_id: row.emp_id,
            first_name: Some(row.first_name),
            last_name: Some(row.last_name),
            preferred_name: row.preferred_name,
            email: Some(row.email),
            gender: row.gender,
            nationality: row.nationality,
            date_of_birth: row.date_of_birth,
            marital_status: row.marital_status,
            phone_number: row.phone_number,
            role_id: row.role_id,
            team_id: row.team_id,
            department_id: row.department_id,
            manager_id: row.manager_id,
            position: row.position,
            post: row.post,
            salary: row.salary,
            employment_type: row.employment_type,
            compensation_type: row.compensation_type,
            weekly_hours: row.weekly_hours,
            office_location: row.office_location,
            street_address: row.street_address,
            unit_suite: row.unit_suite,
            city: row.city,
            country: row.country,
            state_province: row.state_province,
            postal_zip_code: row.postal_zip_code,
            emergency_contact_name: row.emergency_contact_name,
            emergency_contact_relationship: row.emergency_contact_relationship,
            emergency_contact_phone_number: row.emergency_contact_phone_number,
            degrees: row.degrees,
            field_of_interest: row.field_of_interest,
            hire_date: row.hire_date,
            effective_date: row.effective_date,
            termination_reason: row.termination_reason,
            termination_note: row.termination_note,
            auto_delete_at: row.auto_delete_at,
            completed_onboarding_at: row.completed_onboarding_at,
            photo: row.photo,
            role: row.role_title.map(|t| RoleRef {
                role_title: Some(t),
            }),
            team: row.team_name.map(|t| TeamRef { team_name: Some(t) }),
            department: row.department_name.map(|d| DepartmentRef {
                department_name: Some(d),
            }),
            manager,
        }
    }
}

/// Code for a foreign-key violation, picked by the violated constraint
fn missing_reference(constraint: Option<&str>) -> ErrorCode {
    match constraint {
        Some("employees_role_id_fkey") => ErrorCode::RoleNotFound,
        Some("employees_team_id_fkey") => ErrorCode::TeamNotFound,
        Some("employees_department_id_fkey") => ErrorCode::DepartmentNotFound,
        Some("employees_manager_id_fkey") => ErrorCode::EmployeeNotFound,
        _ => ErrorCode::ValidationFailed,
    }
}

fn write_error(e: sqlx::Error) -> ServiceError {
    let on_foreign_key = match &e {
        sqlx::Error::Database(db) => missing_reference(db.constraint()),
        _ => ErrorCode::ValidationFailed,
    };
    ServiceError::from_constraint(e, ErrorCode::EmployeeEmailExists, on_foreign_key)
}

async fn fetch_by_id(conn: &mut PgConnection, emp_id: i64) -> ServiceResult<Employee> {
    let row: Option<EmployeeRow> =
        sqlx::query_as(&format!("{SELECT_EMPLOYEE} WHERE e.emp_id = $1"))
            .bind(emp_id)
            .fetch_optional(&mut *conn)
            .await?;
    row.map(Employee::from)
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound).into())
}

async fn insert(conn: &mut PgConnection, input: &NewEmployee) -> ServiceResult<i64> {
    let (emp_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO employees (
            first_name, last_name, preferred_name, email, gender,
            nationality, date_of_birth, marital_status, phone_number, role_id,
            team_id, department_id, manager_id, position, post,
            salary, employment_type, compensation_type, weekly_hours, office_location,
            street_address, unit_suite, city, country, state_province,
            postal_zip_code, emergency_contact_name, emergency_contact_relationship,
            emergency_contact_phone_number, degrees,
            field_of_interest, hire_date, effective_date, termination_reason, termination_note,
            auto_delete_at, completed_onboarding_at, photo
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
            $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
            $21, $22, $23, $24, $25, $26, $27, $28, $29, $30,
            $31, $32, $33, $34, $35, $36, $37, $38
        )
        RETURNING emp_id
        "#,
    )
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.preferred_name)
    .bind(&input.email)
    .bind(&input.gender)
    .bind(&input.nationality)
    .bind(input.date_of_birth)
    .bind(&input.marital_status)
    .bind(&input.phone_number)
    .bind(input.role_id)
    .bind(input.team_id)
    .bind(input.department_id)
    .bind(input.manager_id)
    .bind(&input.position)
    .bind(&input.post)
    .bind(input.salary)
    .bind(&input.employment_type)
    .bind(&input.compensation_type)
    .bind(input.weekly_hours)
    .bind(&input.office_location)
    .bind(&input.street_address)
    .bind(&input.unit_suite)
    .bind(&input.city)
    .bind(&input.country)
    .bind(&input.state_province)
    .bind(&input.postal_zip_code)
    .bind(&input.emergency_contact_name)
    .bind(&input.emergency_contact_relationship)
    .bind(&input.emergency_contact_phone_number)
    .bind(&input.degrees)
    .bind(&input.field_of_interest)
    .bind(input.hire_date)
    .bind(input.effective_date)
    .bind(&input.termination_reason)
    .bind(&input.termination_note)
    .bind(input.auto_delete_at)
    .bind(input.completed_onboarding_at)
    .bind(&input.photo)
    .fetch_one(&mut *conn)
    .await
    .map_err(write_error)?;
    Ok(emp_id)
}

/// PostgreSQL-backed employees
#[derive(Clone)]
pub struct PgEmployees {
    pool: PgPool,
}

impl PgEmployees {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, filter: &str, manager_id: Option<i64>) -> ServiceResult<Vec<Employee>> {
        let sql = format!("{SELECT_EMPLOYEE} WHERE {filter} ORDER BY e.emp_id");
        let mut query = sqlx::query_as::<_, EmployeeRow>(&sql);
        if let Some(id) = manager_id {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployees {
    async fn list_active(&self) -> ServiceResult<Vec<Employee>> {
        self.list_where(&format!("NOT {TERMINATED}"), None).await
    }

    async fn list_team(&self, manager_id: i64) -> ServiceResult<Vec<Employee>> {
        self.list_where(&format!("e.manager_id = $1 AND NOT {TERMINATED}"), Some(manager_id))
            .await
    }

    async fn list_terminated(&self) -> ServiceResult<Vec<Employee>> {
        self.list_where(TERMINATED, None).await
    }

    async fn create(&self, input: &NewEmployee) -> ServiceResult<Employee> {
        let mut conn = self.pool.acquire().await?;
        let emp_id = insert(&mut *conn, input).await?;
        fetch_by_id(&mut *conn, emp_id).await
    }

    async fn delete_terminated(&self, emp_id: i64) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;
        let found: Option<(bool,)> = sqlx::query_as(&format!(
            "SELECT {TERMINATED} FROM employees e WHERE e.emp_id = $1 FOR UPDATE"
        ))
        .bind(emp_id)
        .fetch_optional(&mut *tx)
        .await?;

        match found {
            None => return Err(AppError::new(ErrorCode::EmployeeNotFound).into()),
            Some((false,)) => return Err(AppError::new(ErrorCode::EmployeeNotTerminated).into()),
            Some((true,)) => {}
        }

        sqlx::query("DELETE FROM employees WHERE emp_id = $1")
            .bind(emp_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn reregister(
        &self,
        emp_id: i64,
        now: DateTime<Utc>,
        email_domain: &str,
    ) -> ServiceResult<Employee> {
        let mut tx = self.pool.begin().await?;

        // Row lock: a concurrent re-registration of the same record waits
        // here and then finds the row gone.
        let row: Option<EmployeeRow> = sqlx::query_as(&format!(
            "{SELECT_EMPLOYEE} WHERE e.emp_id = $1 FOR UPDATE OF e"
        ))
        .bind(emp_id)
        .fetch_optional(&mut *tx)
        .await?;

        let record = row
            .map(Employee::from)
            .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
        if !record.is_terminated() {
            return Err(AppError::new(ErrorCode::EmployeeNotTerminated).into());
        }

        let payload = shared::reregister::build_payload(&record, now, email_domain)?;
        let new_id = insert(&mut *tx, &payload).await?;

        sqlx::query("UPDATE documents SET emp_id = $1, updated_at = now() WHERE emp_id = $2")
            .bind(new_id)
            .bind(emp_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM employees WHERE emp_id = $1")
            .bind(emp_id)
            .execute(&mut *tx)
            .await?;

        let created = fetch_by_id(&mut *tx, new_id).await?;
        tx.commit().await?;

        tracing::info!(old_emp_id = emp_id, new_emp_id = new_id, "Employee re-registered");
        Ok(created)
    }
}
