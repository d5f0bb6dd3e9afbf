//! In-process repositories
//!
//! Mirrors the PostgreSQL behaviour the handlers rely on: foreign-key checks
//! on documents and employee references, unique e-mail addresses, resolved references on read and an
//! all-or-nothing re-registration.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    DepartmentRef, Document, Employee, ManagerRef, NewDocument, NewEmployee, RoleRef, TeamRef,
};
use tokio::sync::Mutex;

use super::{DocumentRepository, EmployeeRepository};
use crate::error::ServiceResult;

#[derive(Default)]
struct Tables {
    roles: BTreeMap<i64, String>,
    teams: BTreeMap<i64, String>,
    departments: BTreeMap<i64, String>,
    employees: BTreeMap<i64, Employee>,
    documents: BTreeMap<i64, Document>,
    next_emp_id: i64,
    next_doc_id: i64,
}

impl Tables {
    fn resolve(&self, emp: &Employee) -> Employee {
        let mut out = Employee {
            role: None,
            team: None,
            department: None,
            manager: None,
            ..emp.clone()
        };
        out.role = emp
            .role_id
            .and_then(|id| self.roles.get(&id))
            .map(|t| RoleRef {
                role_title: Some(t.clone()),
            });
        out.team = emp
            .team_id
            .and_then(|id| self.teams.get(&id))
            .map(|t| TeamRef {
                team_name: Some(t.clone()),
            });
        out.department = emp
            .department_id
            .and_then(|id| self.departments.get(&id))
            .map(|d| DepartmentRef {
                department_name: Some(d.clone()),
            });
        out.manager = emp
            .manager_id
            .and_then(|id| self.employees.get(&id))
            .map(|m| ManagerRef {
                first_name: m.first_name.clone(),
                last_name: m.last_name.clone(),
            });
        out
    }

    fn check_owner(&self, emp_id: i64) -> ServiceResult<()> {
        if self.employees.contains_key(&emp_id) {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::DocumentOwnerNotFound).into())
        }
    }

    fn insert_document(&mut self, doc: NewDocument, now: DateTime<Utc>) -> Document {
        self.next_doc_id += 1;
        let stored = Document {
            id: self.next_doc_id,
            emp_id: doc.emp_id,
            document_file: doc.document_file,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.documents.insert(stored.id, stored.clone());
        stored
    }

    fn insert_employee(&mut self, input: &NewEmployee) -> ServiceResult<i64> {
        if self
            .employees
            .values()
            .any(|e| e.email.as_deref() == Some(input.email.as_str()))
        {
            return Err(AppError::new(ErrorCode::EmployeeEmailExists).into());
        }
        let code = if unknown(input.role_id, &self.roles) {
            Some(ErrorCode::RoleNotFound)
        } else if unknown(input.team_id, &self.teams) {
            Some(ErrorCode::TeamNotFound)
        } else if unknown(input.department_id, &self.departments) {
            Some(ErrorCode::DepartmentNotFound)
        } else if unknown(input.manager_id, &self.employees) {
            Some(ErrorCode::EmployeeNotFound)
        } else {
            None
        };
        if let Some(code) = code {
            return Err(AppError::new(code).into());
        }
        self.next_emp_id += 1;
        let emp_id = self.next_emp_id;
        self.employees.insert(emp_id, employee_from(emp_id, input));
        Ok(emp_id)
    }

    fn filtered(&self, keep: impl Fn(&Employee) -> bool) -> Vec<Employee> {
        self.employees
            .values()
            .filter(|e| keep(*e))
            .map(|e| self.resolve(e))
            .collect()
    }
}

fn unknown<V>(id: Option<i64>, table: &BTreeMap<i64, V>) -> bool {
    id.is_some_and(|id| !table.contains_key(&id))
}

fn employee_from(emp_id: i64, input: &NewEmployee) -> Employee {
    Employee {
        emp_id,
        first_name: Some(input.first_name.clone()),
        last_name: Some(input.last_name.clone()),
        preferred_name: input.preferred_name.clone(),
        email: Some(input.email.clone()),
        gender: input.gender.clone(),
        nationality: input.nationality.clone(),
        date_of_birth: input.date_of_birth,
        marital_status: input.marital_status.clone(),
        phone_number: input.phone_number.clone(),
        role_id: input.role_id,
        team_id: input.team_id,
        department_id: input.department_id,
        manager_id: input.manager_id,
        position: input.position.clone(),
        post: input.post.clone(),
        salary: Some(input.salary),
        employment_type: input.employment_type.clone(),
        compensation_type: input.compensation_type.clone(),
        weekly_hours: input.weekly_hours,
        office_location: input.office_location.clone(),
        street_address: input.street_address.clone(),
        unit_suite: input.unit_suite.clone(),
        city: input.city.clone(),
        country: input.country.clone(),
        state_province: input.state_province.clone(),
        postal_zip_code: input.postal_zip_code.clone(),
        emergency_contact_name: input.emergency_contact_name.clone(),
        emergency_contact_relationship: input.emergency_contact_relationship.clone(),
        emergency_contact_phone_number: input.emergency_contact_phone_number.clone(),
        degrees: input.degrees.clone(),
        field_of_interest: input.field_of_interest.clone(),
        hire_date: input.hire_date,
        effective_date: input.effective_date,
        termination_reason: input.termination_reason.clone(),
        termination_note: input.termination_note.clone(),
        auto_delete_at: input.auto_delete_at,
        completed_onboarding_at: input.completed_onboarding_at,
        photo: input.photo.clone(),
        ..Default::default()
    }
}

/// Both repositories over one set of in-memory tables
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_role(&self, role_id: i64, title: &str) {
        self.tables.lock().await.roles.insert(role_id, title.to_string());
    }

    pub async fn add_team(&self, team_id: i64, name: &str) {
        self.tables.lock().await.teams.insert(team_id, name.to_string());
    }

    pub async fn add_department(&self, department_id: i64, name: &str) {
        self.tables
            .lock()
            .await
            .departments
            .insert(department_id, name.to_string());
    }

    /// Seed an employee record as-is, terminated or not
    pub async fn add_employee(&self, input: &NewEmployee) -> ServiceResult<i64> {
        self.tables.lock().await.insert_employee(input)
    }

    pub async fn employee_count(&self) -> usize {
        self.tables.lock().await.employees.len()
    }
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn list_all(&self) -> ServiceResult<Vec<Document>> {
        Ok(self.tables.lock().await.documents.values().cloned().collect())
    }

    async fn list_by_employee(&self, emp_id: i64) -> ServiceResult<Vec<Document>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .documents
            .values()
            .filter(|d| d.emp_id == emp_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: i64) -> ServiceResult<Option<Document>> {
        Ok(self.tables.lock().await.documents.get(&id).cloned())
    }

    async fn create(&self, doc: NewDocument) -> ServiceResult<Document> {
        let mut tables = self.tables.lock().await;
        tables.check_owner(doc.emp_id)?;
        Ok(tables.insert_document(doc, Utc::now()))
    }

    async fn create_many(&self, docs: Vec<NewDocument>) -> ServiceResult<Vec<Document>> {
        let mut tables = self.tables.lock().await;
        for doc in &docs {
            tables.check_owner(doc.emp_id)?;
        }
        let now = Utc::now();
        Ok(docs
            .into_iter()
            .map(|doc| tables.insert_document(doc, now))
            .collect())
    }

    async fn save(&self, doc: &Document) -> ServiceResult<Document> {
        let mut tables = self.tables.lock().await;
        tables.check_owner(doc.emp_id)?;
        let stored = tables
            .documents
            .get_mut(&doc.id)
            .ok_or_else(|| AppError::new(ErrorCode::DocumentNotFound))?;
        stored.emp_id = doc.emp_id;
        stored.document_file = doc.document_file.clone();
        stored.updated_at = Some(Utc::now());
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> ServiceResult<u64> {
        let removed = self.tables.lock().await.documents.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn list_active(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.tables.lock().await.filtered(|e| !e.is_terminated()))
    }

    async fn list_team(&self, manager_id: i64) -> ServiceResult<Vec<Employee>> {
        Ok(self
            .tables
            .lock()
            .await
            .filtered(|e| !e.is_terminated() && e.manager_id == Some(manager_id)))
    }

    async fn list_terminated(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.tables.lock().await.filtered(Employee::is_terminated))
    }

    async fn create(&self, input: &NewEmployee) -> ServiceResult<Employee> {
        let mut tables = self.tables.lock().await;
        let emp_id = tables.insert_employee(input)?;
        let created = tables.resolve(&tables.employees[&emp_id]);
        Ok(created)
    }

    async fn delete_terminated(&self, emp_id: i64) -> ServiceResult<()> {
        let mut tables = self.tables.lock().await;
        let emp = tables
            .employees
            .get(&emp_id)
            .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
        if !emp.is_terminated() {
            return Err(AppError::new(ErrorCode::EmployeeNotTerminated).into());
        }
        tables.employees.remove(&emp_id);
        tables.documents.retain(|_, d| d.emp_id != emp_id);
        Ok(())
    }

    async fn reregister(
        &self,
        emp_id: i64,
        now: DateTime<Utc>,
        email_domain: &str,
    ) -> ServiceResult<Employee> {
        // The lock is held for the whole swap.
        let mut tables = self.tables.lock().await;
        let record = tables
            .employees
            .get(&emp_id)
            .map(|e| tables.resolve(e))
            .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
        if !record.is_terminated() {
            return Err(AppError::new(ErrorCode::EmployeeNotTerminated).into());
        }

        let payload = shared::reregister::build_payload(&record, now, email_domain)?;
        let new_id = tables.insert_employee(&payload)?;
        for doc in tables.documents.values_mut().filter(|d| d.emp_id == emp_id) {
            doc.emp_id = new_id;
            doc.updated_at = Some(now);
        }
        tables.employees.remove(&emp_id);

        let created = tables.resolve(&tables.employees[&new_id]);
        Ok(created)
    }
}
