//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::reference::{DepartmentRef, ManagerRef, RoleRef, TeamRef};

/// Employee record as served by the employee endpoints
///
/// A terminated employee is recognised only by `termination_reason` or
/// `auto_delete_at` being set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub emp_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    #[serde(deserialize_with = "lenient::opt_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub marital_status: Option<String>,
    pub phone_number: Option<String>,

    #[serde(deserialize_with = "lenient::opt_i64")]
    pub role_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub team_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub department_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub manager_id: Option<i64>,
    pub position: Option<String>,
    pub post: Option<String>,
    #[serde(with = "lenient::decimal_opt")]
    pub salary: Option<Decimal>,
    pub employment_type: Option<String>,
    pub compensation_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i32")]
    pub weekly_hours: Option<i32>,
    pub office_location: Option<String>,

    pub street_address: Option<String>,
    pub unit_suite: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub state_province: Option<String>,
    pub postal_zip_code: Option<String>,

    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub emergency_contact_phone_number: Option<String>,

    pub degrees: Option<String>,
    pub field_of_interest: Option<String>,

    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub effective_date: Option<DateTime<Utc>>,
    pub termination_reason: Option<String>,
    pub termination_note: Option<String>,
    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub auto_delete_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub completed_onboarding_at: Option<DateTime<Utc>>,
    /// Profile photo, base64 text
    pub photo: Option<String>,

    pub role: Option<RoleRef>,
    pub team: Option<TeamRef>,
    pub department: Option<DepartmentRef>,
    #[serde(rename = "Manager")]
    pub manager: Option<ManagerRef>,
}

impl Employee {
    /// Whether this record belongs to a terminated employee
    pub fn is_terminated(&self) -> bool {
        let reason = self
            .termination_reason
            .as_deref()
            .is_some_and(|r| !r.is_empty());
        reason || self.auto_delete_at.is_some()
    }

    /// `"{first} {last}"` with absent parts left empty
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

/// New-employee payload
///
/// Every field is always serialized, so absent values travel as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    #[serde(deserialize_with = "lenient::opt_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub marital_status: Option<String>,

    pub email: String,
    pub phone_number: Option<String>,

    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub hire_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub effective_date: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "lenient::opt_i64")]
    pub role_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub team_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub department_id: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub manager_id: Option<i64>,
    pub position: Option<String>,
    pub post: Option<String>,
    #[serde(with = "lenient::decimal")]
    pub salary: Decimal,
    pub employment_type: Option<String>,
    pub compensation_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i32")]
    pub weekly_hours: Option<i32>,
    pub office_location: Option<String>,

    pub street_address: Option<String>,
    pub unit_suite: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub state_province: Option<String>,
    pub postal_zip_code: Option<String>,

    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub emergency_contact_phone_number: Option<String>,

    pub degrees: Option<String>,
    pub field_of_interest: Option<String>,

    pub termination_reason: Option<String>,
    pub termination_note: Option<String>,
    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub auto_delete_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::opt_datetime")]
    pub completed_onboarding_at: Option<DateTime<Utc>>,
    pub photo: Option<String>,
}

/// `POST /employees` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub inputs: NewEmployee,
    /// Origin of the UI that issued the request
    #[serde(default)]
    pub frontend_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terminated_by_reason_or_auto_delete() {
        let mut emp = Employee::default();
        assert!(!emp.is_terminated());

        emp.termination_reason = Some(String::new());
        assert!(!emp.is_terminated());

        emp.termination_reason = Some("Resigned".into());
        assert!(emp.is_terminated());

        let emp = Employee {
            auto_delete_at: Some(Utc::now()),
            ..Default::default()
        };
        assert!(emp.is_terminated());
    }

    #[test]
    fn test_deserialize_form_shaped_record() {
        let emp: Employee = serde_json::from_value(json!({
            "empId": "17",
            "firstName": "Ana",
            "lastName": "Li",
            "roleId": "3",
            "managerId": "",
            "salary": "85000",
            "weeklyHours": "37",
            "dateOfBirth": "1990-04-02",
            "hireDate": "2021-03-07T09:30:00.000Z",
            "role": { "roleTitle": "Analyst" },
            "Manager": { "firstName": "Bo", "lastName": "Chen" }
        }))
        .unwrap();

        assert_eq!(emp.emp_id, 17);
        assert_eq!(emp.role_id, Some(3));
        assert_eq!(emp.manager_id, None);
        assert_eq!(emp.salary, Some(Decimal::from(85_000)));
        assert_eq!(emp.weekly_hours, Some(37));
        assert_eq!(emp.role.unwrap().role_title.as_deref(), Some("Analyst"));
        assert_eq!(emp.manager.unwrap().first_name.as_deref(), Some("Bo"));
    }

    #[test]
    fn test_new_employee_serializes_nulls() {
        let payload = NewEmployee {
            first_name: "Ana".into(),
            last_name: "Li".into(),
            email: "ana.li.1@company.com".into(),
            role_id: Some(3),
            salary: Decimal::from(1200),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["roleId"], json!(3));
        assert_eq!(value["salary"], json!(1200.0));
        assert!(value["terminationReason"].is_null());
        assert!(value["photo"].is_null());
    }
}
