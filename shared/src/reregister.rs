//! Re-registration of terminated employees
//!
//! Turning a terminated record back into an employee always goes through
//! [`build_payload`], whether the server runs it inside its transaction or
//! the client runs it up front to reject incomplete records before touching
//! the network.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::models::{Employee, NewEmployee};

/// Mail domain used for synthesized addresses unless configured otherwise
pub const DEFAULT_EMAIL_DOMAIN: &str = "company.com";

/// Weekly hours assumed when the terminated record has none
pub const DEFAULT_WEEKLY_HOURS: i32 = 40;

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check the fields re-registration cannot do without
pub fn validate(record: &Employee) -> AppResult<()> {
    present(record.first_name.as_deref()).ok_or_else(|| AppError::missing_field("firstName"))?;
    present(record.last_name.as_deref()).ok_or_else(|| AppError::missing_field("lastName"))?;
    present(record.email.as_deref()).ok_or_else(|| AppError::missing_field("email"))?;
    Ok(())
}

/// `first.last.<unix-millis>@domain`, lower-cased with whitespace removed
pub fn synthesize_email(first: &str, last: &str, at: DateTime<Utc>, domain: &str) -> String {
    let part = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    };
    format!(
        "{}.{}.{}@{}",
        part(first),
        part(last),
        at.timestamp_millis(),
        domain
    )
}

/// Build the new-employee payload for a terminated record
///
/// Personal, job, address, emergency-contact and education fields carry
/// over. The email, hire date and effective date are fresh; every
/// termination-specific field and the photo are cleared.
pub fn build_payload(record: &Employee, now: DateTime<Utc>, domain: &str) -> AppResult<NewEmployee> {
    validate(record)?;

    let first_name = record.first_name.clone().unwrap_or_default();
    let last_name = record.last_name.clone().unwrap_or_default();
    let preferred_name = present(record.preferred_name.as_deref())
        .map(str::to_owned)
        .or_else(|| Some(first_name.clone()));

    Ok(NewEmployee {
        email: synthesize_email(&first_name, &last_name, now, domain),
        preferred_name,
        gender: record.gender.clone(),
        nationality: record.nationality.clone(),
        date_of_birth: record.date_of_birth,
        marital_status: record.marital_status.clone(),
        phone_number: record.phone_number.clone(),

        hire_date: Some(now),
        effective_date: Some(now),

        role_id: record.role_id,
        department_id: record.department_id,
        manager_id: record.manager_id,
        position: record.position.clone(),
        post: record.post.clone(),
        salary: record.salary.unwrap_or(Decimal::ZERO),
        employment_type: record.employment_type.clone(),
        compensation_type: record.compensation_type.clone(),
        weekly_hours: Some(record.weekly_hours.unwrap_or(DEFAULT_WEEKLY_HOURS)),
        office_location: record.office_location.clone(),

        street_address: record.street_address.clone(),
        unit_suite: record.unit_suite.clone(),
        city: record.city.clone(),
        country: record.country.clone(),
        state_province: record.state_province.clone(),
        postal_zip_code: record.postal_zip_code.clone(),

        emergency_contact_name: record.emergency_contact_name.clone(),
        emergency_contact_relationship: record.emergency_contact_relationship.clone(),
        emergency_contact_phone_number: record.emergency_contact_phone_number.clone(),

        degrees: record.degrees.clone(),
        field_of_interest: record.field_of_interest.clone(),

        termination_reason: None,
        termination_note: None,
        auto_delete_at: None,
        completed_onboarding_at: None,
        photo: None,

        first_name,
        last_name,
        // The new hire starts without a team
        team_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;
    use serde_json::json;

    fn terminated(value: serde_json::Value) -> Employee {
        serde_json::from_value(value).unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_payload_from_terminated_record() {
        let record = terminated(json!({
            "empId": 5,
            "firstName": "Ana",
            "lastName": "Li",
            "email": "old@x.com",
            "roleId": "3",
            "terminationReason": "Resigned",
            "terminationNote": "Moved away",
            "photo": "aGk="
        }));

        let payload = build_payload(&record, at(), DEFAULT_EMAIL_DOMAIN).unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        let email = value["email"].as_str().unwrap();
        let digits = email
            .strip_prefix("ana.li.")
            .and_then(|rest| rest.strip_suffix("@company.com"))
            .unwrap();
        assert!(!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(value["roleId"], json!(3));
        assert!(value["terminationReason"].is_null());
        assert!(value["terminationNote"].is_null());
        assert!(value["photo"].is_null());
        assert_eq!(value["preferredName"], "Ana");
        assert_eq!(value["weeklyHours"], 40);
        assert_eq!(value["salary"], json!(0.0));
        assert_eq!(payload.hire_date, Some(at()));
        assert_eq!(payload.effective_date, Some(at()));
    }

    #[test]
    fn test_carries_job_and_address_fields() {
        let record = terminated(json!({
            "firstName": "Ana",
            "lastName": "Li",
            "email": "old@x.com",
            "preferredName": "Annie",
            "departmentId": 2,
            "teamId": 4,
            "managerId": "8",
            "salary": "72000.50",
            "weeklyHours": 30,
            "city": "Lisbon",
            "emergencyContactName": "Rui",
            "degrees": "BSc"
        }));

        let payload = build_payload(&record, at(), "example.org").unwrap();
        assert_eq!(payload.preferred_name.as_deref(), Some("Annie"));
        assert_eq!(payload.department_id, Some(2));
        assert_eq!(payload.team_id, None);
        assert_eq!(payload.manager_id, Some(8));
        assert_eq!(payload.salary, Decimal::new(7_200_050, 2));
        assert_eq!(payload.weekly_hours, Some(30));
        assert_eq!(payload.city.as_deref(), Some("Lisbon"));
        assert_eq!(payload.emergency_contact_name.as_deref(), Some("Rui"));
        assert_eq!(payload.degrees.as_deref(), Some("BSc"));
        assert!(payload.email.ends_with("@example.org"));
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let record = terminated(json!({ "firstName": "Ana", "lastName": "Li" }));
        let err = build_payload(&record, at(), DEFAULT_EMAIL_DOMAIN).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmployeeMissingField);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "email");
    }

    #[test]
    fn test_blank_names_count_as_missing() {
        let record = terminated(json!({ "firstName": "  ", "lastName": "Li", "email": "a@b" }));
        assert!(validate(&record).is_err());
    }

    #[test]
    fn test_synthesized_email_is_normalized() {
        let email = synthesize_email("Mary Ann", "O'Neil", at(), "company.com");
        assert_eq!(
            email,
            format!("maryann.o'neil.{}@company.com", at().timestamp_millis())
        );
    }
}
