//! People directory behaviour against an in-process HR API

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use hr_client::directory::{
    Cell, Collection, Column, DirectoryCache, DirectoryContext, MISSING_INFO, NoticeLevel,
    PeopleDirectory, RowClick, Tab,
};
use hr_client::{ClientError, ClientResult, HrApi, PermissionLevel, Viewer};
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::{CreateEmployeeRequest, Employee};
use shared::reregister::{self, DEFAULT_EMAIL_DOMAIN};
use tokio::sync::{Mutex, Notify};

#[derive(Default)]
struct Calls {
    list_employees: AtomicUsize,
    list_team: AtomicUsize,
    list_terminated: AtomicUsize,
    reregister: AtomicUsize,
}

/// Blocks `reregister` until released
struct Gate {
    entered: Notify,
    release: Notify,
}

#[derive(Default)]
struct FakeApi {
    active: Mutex<Vec<Employee>>,
    terminated: Mutex<Vec<Employee>>,
    next_id: AtomicUsize,
    calls: Calls,
    gate: Option<Gate>,
}

impl FakeApi {
    fn new(active: Vec<Employee>, terminated: Vec<Employee>) -> Self {
        Self {
            active: Mutex::new(active),
            terminated: Mutex::new(terminated),
            next_id: AtomicUsize::new(100),
            ..Default::default()
        }
    }

    fn gated(mut self) -> Self {
        self.gate = Some(Gate {
            entered: Notify::new(),
            release: Notify::new(),
        });
        self
    }

    fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HrApi for FakeApi {
    async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.calls.list_employees.fetch_add(1, Ordering::SeqCst);
        Ok(self.active.lock().await.clone())
    }

    async fn list_team(&self, manager_id: i64) -> ClientResult<Vec<Employee>> {
        self.calls.list_team.fetch_add(1, Ordering::SeqCst);
        let active = self.active.lock().await;
        Ok(active
            .iter()
            .filter(|e| e.manager_id == Some(manager_id))
            .cloned()
            .collect())
    }

    async fn list_terminated(&self) -> ClientResult<Vec<Employee>> {
        self.calls.list_terminated.fetch_add(1, Ordering::SeqCst);
        Ok(self.terminated.lock().await.clone())
    }

    async fn create_employee(&self, _request: &CreateEmployeeRequest) -> ClientResult<Employee> {
        Err(ClientError::Internal("not used".into()))
    }

    async fn delete_terminated(&self, _emp_id: i64) -> ClientResult<String> {
        Err(ClientError::Internal("not used".into()))
    }

    async fn reregister(&self, emp_id: i64) -> ClientResult<Employee> {
        self.calls.reregister.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let mut terminated = self.terminated.lock().await;
        let Some(pos) = terminated.iter().position(|e| e.emp_id == emp_id) else {
            return Err(ClientError::Api {
                code: ErrorCode::EmployeeNotFound.code(),
                message: "Employee not found".into(),
                details: None,
            });
        };
        let old = terminated.remove(pos);
        let payload = reregister::build_payload(&old, Utc::now(), DEFAULT_EMAIL_DOMAIN).map_err(
            |e| ClientError::Api {
                code: e.code.code(),
                message: e.message,
                details: None,
            },
        )?;

        let created = Employee {
            emp_id: self.next_id.fetch_add(1, Ordering::SeqCst) as i64,
            first_name: Some(payload.first_name),
            last_name: Some(payload.last_name),
            preferred_name: payload.preferred_name,
            email: Some(payload.email),
            role_id: payload.role_id,
            manager_id: payload.manager_id,
            salary: Some(payload.salary),
            weekly_hours: payload.weekly_hours,
            hire_date: payload.hire_date,
            effective_date: payload.effective_date,
            termination_reason: payload.termination_reason,
            photo: payload.photo,
            ..Default::default()
        };
        self.active.lock().await.push(created.clone());
        Ok(created)
    }
}

fn record(value: serde_json::Value) -> Employee {
    serde_json::from_value(value).unwrap()
}

fn active(emp_id: i64, first: &str, manager_id: Option<i64>) -> Employee {
    record(json!({
        "empId": emp_id,
        "firstName": first,
        "lastName": "Active",
        "email": format!("{}@x.com", first.to_lowercase()),
        "managerId": manager_id,
        "salary": "85000",
    }))
}

fn terminated_ana() -> Employee {
    record(json!({
        "empId": 7,
        "firstName": "Ana",
        "lastName": "Li",
        "email": "old@x.com",
        "roleId": "3",
        "terminationReason": "Resigned",
        "photo": "aVZCT1J3MEtHZ289",
    }))
}

fn terminated_without_email() -> Employee {
    record(json!({
        "empId": 8,
        "firstName": "Bo",
        "lastName": "Ng",
        "terminationReason": "Contract ended",
    }))
}

fn admin() -> Viewer {
    Viewer::new(PermissionLevel::Admin, Some(1))
}

fn manager() -> Viewer {
    Viewer::new(PermissionLevel::Manager, Some(10))
}

fn staff() -> Viewer {
    Viewer::new(PermissionLevel::Staff, Some(20))
}

fn seeded() -> Arc<FakeApi> {
    Arc::new(FakeApi::new(
        vec![active(10, "Mia", Some(1)), active(11, "Raj", Some(10)), active(12, "Zoe", Some(2))],
        vec![terminated_ana(), terminated_without_email()],
    ))
}

async fn loaded(api: Arc<FakeApi>, viewer: Viewer) -> (PeopleDirectory, DirectoryCache) {
    let ctx = DirectoryContext::new(api);
    let cache = ctx.cache.clone();
    let mut dir = PeopleDirectory::new(ctx, viewer);
    dir.load().await.unwrap();
    (dir, cache)
}

fn ids(dir: &PeopleDirectory, tab: Tab) -> Vec<i64> {
    dir.rows(tab).iter().map(|r| r.emp_id).collect()
}

#[tokio::test]
async fn test_tabs_follow_permission_level() {
    let api = seeded();
    let ctx = DirectoryContext::new(api);

    let tabs = |viewer| PeopleDirectory::new(ctx.clone(), viewer).tabs();
    assert_eq!(tabs(admin()), vec![Tab::Employees, Tab::MyTeam, Tab::Terminated]);
    assert_eq!(tabs(manager()), vec![Tab::Employees, Tab::MyTeam]);
    assert_eq!(tabs(staff()), vec![Tab::Employees]);
    assert_eq!(
        tabs(Viewer::new(PermissionLevel::Manager, None)),
        vec![Tab::Employees]
    );
    assert_eq!(Tab::Terminated.label(), "Terminated Employees");
}

#[tokio::test]
async fn test_load_reuses_cached_collections() {
    let api = seeded();
    let ctx = DirectoryContext::new(api.clone());

    let mut first = PeopleDirectory::new(ctx.clone(), manager());
    first.load().await.unwrap();
    let mut second = PeopleDirectory::new(ctx, manager());
    second.load().await.unwrap();

    assert_eq!(FakeApi::count(&api.calls.list_employees), 1);
    assert_eq!(FakeApi::count(&api.calls.list_team), 1);
    assert_eq!(FakeApi::count(&api.calls.list_terminated), 0);
    assert_eq!(ids(&second, Tab::MyTeam), vec![11]);
    assert_eq!(ids(&second, Tab::Employees), vec![10, 11, 12]);
}

#[tokio::test]
async fn test_refresh_fetches_again() {
    let api = seeded();
    let (mut dir, _) = loaded(api.clone(), staff()).await;
    dir.refresh().await.unwrap();
    assert_eq!(FakeApi::count(&api.calls.list_employees), 2);
}

#[tokio::test]
async fn test_row_click_outcomes() {
    let (mut dir, _) = loaded(seeded(), admin()).await;

    match dir.click(Tab::Employees, 10) {
        RowClick::OpenProfile(e) => assert_eq!(e.emp_id, 10),
        other => panic!("unexpected click outcome: {other:?}"),
    }
    assert_eq!(dir.pending(), None);

    assert_eq!(dir.click(Tab::Terminated, 7), RowClick::ConfirmReRegistration(7));
    assert_eq!(dir.pending(), Some(7));
    dir.cancel();
    assert_eq!(dir.pending(), None);

    assert_eq!(dir.click(Tab::Employees, 999), RowClick::Ignored);
}

#[tokio::test]
async fn test_missing_email_aborts_before_network() {
    let api = seeded();
    let (mut dir, _) = loaded(api.clone(), admin()).await;
    let employees_before = ids(&dir, Tab::Employees);
    let terminated_before = ids(&dir, Tab::Terminated);

    assert_eq!(dir.click(Tab::Terminated, 8), RowClick::ConfirmReRegistration(8));
    let notice = dir.confirm_reregistration().await;

    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, MISSING_INFO);
    assert_eq!(notice.code, Some(ErrorCode::EmployeeMissingField));
    assert_eq!(FakeApi::count(&api.calls.reregister), 0);
    assert_eq!(ids(&dir, Tab::Employees), employees_before);
    assert_eq!(ids(&dir, Tab::Terminated), terminated_before);
    assert_eq!(dir.pending(), None);
}

#[tokio::test]
async fn test_reregistration_happy_path() {
    let api = seeded();
    let (mut dir, cache) = loaded(api.clone(), admin()).await;
    let calls_before = FakeApi::count(&api.calls.list_terminated);

    dir.click(Tab::Terminated, 7);
    let notice = dir.confirm_reregistration().await;

    assert!(notice.is_success(), "{notice:?}");
    assert_eq!(notice.message, "New employee created successfully: Ana Li");
    assert_eq!(ids(&dir, Tab::Terminated), vec![8]);

    let new_row = dir.rows(Tab::Employees).last().unwrap();
    let email = new_row.email.as_deref().unwrap();
    let middle = email
        .strip_prefix("ana.li.")
        .and_then(|rest| rest.strip_suffix("@company.com"))
        .unwrap();
    assert!(!middle.is_empty() && middle.chars().all(|c| c.is_ascii_digit()));

    let source = new_row.source();
    assert_eq!(source.role_id, Some(3));
    assert_eq!(source.termination_reason, None);
    assert_eq!(source.photo, None);
    assert!(!new_row.terminated);

    // Whole cache dropped; only the terminated list was fetched again
    assert!(cache.get(Collection::Employees).await.is_none());
    assert!(cache.get(Collection::MyTeam).await.is_none());
    assert_eq!(
        FakeApi::count(&api.calls.list_terminated),
        calls_before + 1
    );
    assert_eq!(dir.pending(), None);
}

#[tokio::test]
async fn test_server_error_becomes_notice() {
    let api = seeded();
    let (mut dir, _) = loaded(api.clone(), admin()).await;
    // Someone else re-registered Ana meanwhile
    api.terminated.lock().await.retain(|e| e.emp_id != 7);

    dir.click(Tab::Terminated, 7);
    let notice = dir.confirm_reregistration().await;

    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.code, Some(ErrorCode::EmployeeNotFound));
    assert_eq!(ids(&dir, Tab::Terminated), vec![7, 8]);
    assert_eq!(dir.pending(), None);
}

#[tokio::test]
async fn test_second_reregistration_rejected_while_in_flight() {
    let api = Arc::new(
        FakeApi::new(vec![], vec![terminated_ana(), {
            let mut other = terminated_ana();
            other.emp_id = 9;
            other.first_name = Some("Eli".into());
            other
        }])
        .gated(),
    );
    let ctx = DirectoryContext::new(api.clone());

    let mut first = PeopleDirectory::new(ctx.clone(), admin());
    first.load().await.unwrap();
    let mut second = PeopleDirectory::new(ctx, admin());
    second.load().await.unwrap();

    first.click(Tab::Terminated, 7);
    second.click(Tab::Terminated, 9);

    let running = tokio::spawn(async move {
        let notice = first.confirm_reregistration().await;
        (first, notice)
    });
    let gate = api.gate.as_ref().unwrap();
    gate.entered.notified().await;

    let rejected = second.confirm_reregistration().await;
    assert_eq!(rejected.level, NoticeLevel::Warning);
    assert_eq!(rejected.code, Some(ErrorCode::ReRegistrationInProgress));
    assert_eq!(second.pending(), None);

    gate.release.notify_one();
    let (_first, notice) = running.await.unwrap();
    assert!(notice.is_success(), "{notice:?}");
    assert_eq!(FakeApi::count(&api.calls.reregister), 1);
}

#[tokio::test]
async fn test_formatting_twice_is_stable() {
    let (mut dir, _) = loaded(seeded(), admin()).await;
    let before: Vec<_> = dir.rows(Tab::Employees).to_vec();
    let sources: Vec<Employee> = before.iter().map(|r| r.source().clone()).collect();

    dir.load().await.unwrap();

    assert_eq!(dir.rows(Tab::Employees), before.as_slice());
    for (row, source) in dir.rows(Tab::Employees).iter().zip(&sources) {
        assert_eq!(row.source(), source);
    }
    assert_eq!(before[0].salary, "85,000");
    assert_eq!(sources[0].salary, Some(85_000.into()));
}

#[tokio::test]
async fn test_action_menus_by_level() {
    let api = seeded();

    let (dir, _) = loaded(api.clone(), admin()).await;
    let action = dir.columns().iter().position(|c| *c == Column::Action).unwrap();
    for row in dir.cells(Tab::Employees) {
        match &row[action] {
            Cell::Actions(menu) => assert!(!menu.disabled),
            other => panic!("admin row without menu: {other:?}"),
        }
    }
    // Terminated tab carries no menu
    assert!(dir.cells(Tab::Terminated).iter().all(|r| r[action] == Cell::Empty));

    let (dir, _) = loaded(api.clone(), manager()).await;
    let action = dir.columns().iter().position(|c| *c == Column::Action).unwrap();
    let rows = dir.cells(Tab::Employees);
    let disabled: Vec<bool> = rows
        .iter()
        .map(|r| match &r[action] {
            Cell::Actions(menu) => menu.disabled,
            other => panic!("manager row without menu: {other:?}"),
        })
        .collect();
    // Only Raj reports to manager 10
    assert_eq!(disabled, vec![true, false, true]);

    let (dir, _) = loaded(api, staff()).await;
    assert!(!dir.columns().contains(&Column::Salary));
    let action = dir.columns().iter().position(|c| *c == Column::Action).unwrap();
    assert!(dir.cells(Tab::Employees).iter().all(|r| r[action] == Cell::Empty));
}
