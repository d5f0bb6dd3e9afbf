//! Resolved references embedded in employee reads

use serde::{Deserialize, Serialize};

/// Role title resolved from `roles`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleRef {
    pub role_title: Option<String>,
}

/// Team name resolved from `teams`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamRef {
    pub team_name: Option<String>,
}

/// Department name resolved from `departments`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentRef {
    pub department_name: Option<String>,
}

/// Manager's name resolved through `manager_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerRef {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
