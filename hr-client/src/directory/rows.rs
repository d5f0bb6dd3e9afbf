//! Display rows and table cells

use std::sync::Arc;

use shared::models::Employee;
use shared::policy::{self, ActionMenu, Capability, PermissionLevel, Viewer};

use super::format;

/// Team shown for employees not yet placed in one
pub const UNASSIGNED_TEAM: &str = "New Team";

/// Formatted view of one employee
///
/// Built from a shared handle onto the record it was derived from; the
/// record itself is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRow {
    pub emp_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub team: String,
    pub department: Option<String>,
    pub manager: Option<String>,
    pub salary: String,
    pub hire_date: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub manager_id: Option<i64>,
    pub terminated: bool,
    source: Arc<Employee>,
}

impl DirectoryRow {
    pub fn new(source: Arc<Employee>) -> Self {
        let e = source.as_ref();
        let manager = e.manager.as_ref().map(|m| {
            format!(
                "{} {}",
                m.first_name.as_deref().unwrap_or_default(),
                m.last_name.as_deref().unwrap_or_default()
            )
        });

        Self {
            emp_id: e.emp_id,
            name: e.full_name(),
            role: e.role.as_ref().and_then(|r| r.role_title.clone()),
            team: e
                .team
                .as_ref()
                .and_then(|t| t.team_name.clone())
                .unwrap_or_else(|| UNASSIGNED_TEAM.to_string()),
            department: e.department.as_ref().and_then(|d| d.department_name.clone()),
            manager,
            salary: format::salary(e.salary.unwrap_or_default()),
            hire_date: e.hire_date.map(|d| format::long_date(d.date_naive())),
            date_of_birth: e.date_of_birth.map(format::long_date),
            phone_number: e.phone_number.as_deref().map(format::phone),
            email: e.email.clone(),
            avatar: e
                .photo
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(format::avatar_uri),
            manager_id: e.manager_id,
            terminated: e.is_terminated(),
            source,
        }
    }

    /// The record this row was built from
    pub fn source(&self) -> &Employee {
        &self.source
    }

    pub fn source_handle(&self) -> Arc<Employee> {
        Arc::clone(&self.source)
    }
}

impl From<Employee> for DirectoryRow {
    fn from(employee: Employee) -> Self {
        Self::new(Arc::new(employee))
    }
}

/// Table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Role,
    Department,
    Team,
    Manager,
    Salary,
    HireDate,
    PhoneNumber,
    Email,
    Action,
}

impl Column {
    pub const ADMIN: &'static [Column] = &[
        Column::Name,
        Column::Role,
        Column::Department,
        Column::Team,
        Column::Manager,
        Column::Salary,
        Column::HireDate,
        Column::PhoneNumber,
        Column::Email,
        Column::Action,
    ];

    pub const STAFF: &'static [Column] = &[
        Column::Name,
        Column::Role,
        Column::Department,
        Column::Team,
        Column::Manager,
        Column::PhoneNumber,
        Column::Email,
        Column::Action,
    ];

    /// Column set for a permission level
    pub fn for_level(level: PermissionLevel) -> &'static [Column] {
        match level {
            PermissionLevel::Admin => Self::ADMIN,
            _ => Self::STAFF,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Role => "role",
            Self::Department => "department",
            Self::Team => "team",
            Self::Manager => "manager",
            Self::Salary => "salary",
            Self::HireDate => "hireDate",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
            Self::Action => "action",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Role => "Role",
            Self::Department => "Department",
            Self::Team => "Team",
            Self::Manager => "Manager",
            Self::Salary => "Salary",
            Self::HireDate => "Hire Date",
            Self::PhoneNumber => "Phone Number",
            Self::Email => "Email",
            Self::Action => "",
        }
    }
}

/// Rendered value of one column for one row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Person { name: String, avatar: Option<String> },
    Text(String),
    Empty,
    Actions(ActionMenu),
}

fn text(value: Option<&String>) -> Cell {
    match value {
        Some(v) if !v.is_empty() => Cell::Text(v.clone()),
        _ => Cell::Empty,
    }
}

/// Map a row onto the given columns
///
/// The action column holds a menu only when the tab carries one and the
/// viewer may use menus.
pub fn cells(row: &DirectoryRow, columns: &[Column], viewer: &Viewer, with_menu: bool) -> Vec<Cell> {
    let menus = with_menu && policy::allows(viewer, Capability::UseActionMenu);
    columns
        .iter()
        .map(|column| match column {
            Column::Name => Cell::Person {
                name: row.name.clone(),
                avatar: row.avatar.clone(),
            },
            Column::Role => text(row.role.as_ref()),
            Column::Department => text(row.department.as_ref()),
            Column::Team => Cell::Text(row.team.clone()),
            Column::Manager => text(row.manager.as_ref()),
            Column::Salary => Cell::Text(row.salary.clone()),
            Column::HireDate => text(row.hire_date.as_ref()),
            Column::PhoneNumber => text(row.phone_number.as_ref()),
            Column::Email => text(row.email.as_ref()),
            Column::Action if menus => Cell::Actions(policy::action_menu(viewer, row.manager_id)),
            Column::Action => Cell::Empty,
        })
        .collect()
}
