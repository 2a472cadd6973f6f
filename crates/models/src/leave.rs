use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::FieldError;

/// Upper bound on a single request's span, in calendar days.
pub const MAX_LEAVE_DAYS: i64 = 365;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Emergency,
    Maternity,
    Paternity,
}

/// Request lifecycle states. `Pending` is the sole initial state; `Approved`
/// and `Rejected` are terminal. `Cancelled` is a reserved value no operation
/// currently transitions into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// A leave request as persisted in the request collection.
///
/// `employee_name` is a snapshot taken at submission time and is not updated
/// if the employee record is later renamed. `days` is the working-day count
/// computed once at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: String,
    pub status: LeaveStatus,
    pub applied_date: DateTime<Utc>,
    pub days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl LeaveRequest {
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

/// Caller-supplied input for `apply_leave`. Identity, snapshot name, applied
/// timestamp, status and day count are assigned by the leave service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub employee_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub leave_type: Option<LeaveType>,
    pub reason: String,
}

impl LeaveApplication {
    /// Collect field errors for the request itself. Employee resolution and
    /// the active-status check happen in the leave service, which has the
    /// directory at hand.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.start_date.is_none() {
            errors.push(FieldError::new("startDate", "Start date is required"));
        }
        if self.end_date.is_none() {
            errors.push(FieldError::new("endDate", "End date is required"));
        }
        if self.leave_type.is_none() {
            errors.push(FieldError::new("leaveType", "Leave type is required"));
        }
        if self.reason.trim().is_empty() {
            errors.push(FieldError::new("reason", "Reason is required"));
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.push(FieldError::new("endDate", "End date cannot be before start date"));
            }
            if (end - start).num_days() + 1 > MAX_LEAVE_DAYS {
                errors.push(FieldError::new("endDate", "Leave duration cannot exceed 365 days"));
            }
        }

        errors
    }
}
