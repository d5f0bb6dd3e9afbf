//! Permission policy
//!
//! Every permission-dependent branch (tabs, action menus, row navigation,
//! admin-only endpoints) asks [`allows`] or [`action_menu`]; nothing else
//! compares permission numbers.

use serde::{Deserialize, Serialize};

/// Viewer permission level, ordered from most to least privileged
///
/// Serialized as the numeric permission id (1 = admin, 2 = manager, 3 = staff).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum PermissionLevel {
    Admin = 1,
    Manager = 2,
    Staff = 3,
}

impl PermissionLevel {
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Admin),
            2 => Some(Self::Manager),
            3 => Some(Self::Staff),
            _ => None,
        }
    }
}

impl From<PermissionLevel> for u8 {
    fn from(level: PermissionLevel) -> Self {
        level.id()
    }
}

impl TryFrom<u8> for PermissionLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_id(i64::from(value)).ok_or_else(|| format!("unknown permission id {value}"))
    }
}

/// Who is looking: permission level plus the viewer's own employee id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub level: PermissionLevel,
    pub emp_id: Option<i64>,
}

impl Viewer {
    pub fn new(level: PermissionLevel, emp_id: Option<i64>) -> Self {
        Self { level, emp_id }
    }

    /// A viewer with no resolved user; treated as staff without a record
    pub fn anonymous() -> Self {
        Self::new(PermissionLevel::Staff, None)
    }
}

/// What a viewer may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// See the terminated-employees collection
    ViewTerminated,
    /// Turn a terminated record back into an employee
    ReRegister,
    /// Create employees from scratch
    AddEmployee,
    /// See the "My Team" collection
    ViewTeam,
    /// Have action menus rendered on employee rows
    UseActionMenu,
}

/// The single permission decision point
pub fn allows(viewer: &Viewer, capability: Capability) -> bool {
    use PermissionLevel::*;
    match capability {
        Capability::ViewTerminated | Capability::ReRegister | Capability::AddEmployee => {
            viewer.level == Admin
        }
        Capability::ViewTeam => viewer.level < Staff && viewer.emp_id.is_some(),
        Capability::UseActionMenu => viewer.level < Staff,
    }
}

/// One entry of a row's contextual menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    Edit,
    EndEmployment,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit employee",
            Self::EndEmployment => "End employment",
        }
    }
}

/// Contextual menu for one employee row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    pub actions: Vec<RowAction>,
    pub disabled: bool,
}

/// Build the menu a viewer gets on a row whose subject reports to `subject_manager_id`
///
/// Admins act on everyone. Managers get edit and end-employment, enabled
/// only for their direct reports. Everyone else only ever gets edit, and
/// their menu stays disabled.
pub fn action_menu(viewer: &Viewer, subject_manager_id: Option<i64>) -> ActionMenu {
    match viewer.level {
        PermissionLevel::Admin => ActionMenu {
            actions: vec![RowAction::Edit, RowAction::EndEmployment],
            disabled: false,
        },
        PermissionLevel::Manager => {
            let direct_report = viewer.emp_id.is_some() && subject_manager_id == viewer.emp_id;
            ActionMenu {
                actions: vec![RowAction::Edit, RowAction::EndEmployment],
                disabled: !direct_report,
            }
        }
        PermissionLevel::Staff => ActionMenu {
            actions: vec![RowAction::Edit],
            disabled: true,
        },
    }
}

/// Whether clicking a row may open the employee's profile
pub fn may_open_profile(subject_terminated: bool) -> bool {
    !subject_terminated
}
