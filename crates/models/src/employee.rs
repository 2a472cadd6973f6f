use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{is_valid_email, FieldError};

/// Annual allotment granted to every new employee, in working days.
pub const DEFAULT_LEAVE_BALANCE: i64 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeRole {
    Employee,
    Hr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

/// An employee record as persisted in the employee collection.
///
/// `id` is assigned at creation and never changes; "deletion" is modeled as a
/// transition to [`EmployeeStatus::Inactive`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub joining_date: NaiveDate,
    pub leave_balance: i64,
    pub role: EmployeeRole,
    pub status: EmployeeStatus,
}

impl Employee {
    /// Re-run profile validation against the full record (used after a
    /// partial update has been merged in).
    pub fn validate(&self, today: NaiveDate) -> Vec<FieldError> {
        validate_profile(
            &self.name,
            &self.email,
            &self.department,
            Some(self.joining_date),
            today,
        )
    }
}

/// Input for creating an employee. Identity, balance and status are assigned
/// by the directory service, not supplied by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub department: String,
    pub joining_date: Option<NaiveDate>,
    pub role: EmployeeRole,
}

impl EmployeeInput {
    pub fn validate(&self, today: NaiveDate) -> Vec<FieldError> {
        validate_profile(&self.name, &self.email, &self.department, self.joining_date, today)
    }
}

/// Partial update; `None` fields keep the stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub role: Option<EmployeeRole>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    /// Merge this update onto an existing record, yielding the candidate that
    /// full validation then runs against.
    pub fn apply_to(&self, existing: &Employee) -> Employee {
        let mut merged = existing.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(email) = &self.email {
            merged.email = email.clone();
        }
        if let Some(department) = &self.department {
            merged.department = department.clone();
        }
        if let Some(joining_date) = self.joining_date {
            merged.joining_date = joining_date;
        }
        if let Some(role) = self.role {
            merged.role = role;
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        merged
    }
}

fn validate_profile(
    name: &str,
    email: &str,
    department: &str,
    joining_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let name = name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    } else if name.chars().count() < 2 {
        errors.push(FieldError::new("name", "Name must be at least 2 characters"));
    }

    let email = email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if department.trim().is_empty() {
        errors.push(FieldError::new("department", "Department is required"));
    }

    match joining_date {
        None => errors.push(FieldError::new("joiningDate", "Joining date is required")),
        Some(date) if date > today => {
            errors.push(FieldError::new("joiningDate", "Joining date cannot be in the future"));
        }
        Some(_) => {}
    }

    errors
}
