use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::employee::Employee;
use crate::leave::LeaveRequest;

/// Fixed sick-leave allocation surfaced in the derived balance.
pub const SICK_ALLOCATION: i64 = 10;
/// Fixed personal-leave allocation surfaced in the derived balance.
pub const PERSONAL_ALLOCATION: i64 = 5;
/// Employees whose stored balance drops below this show up on the dashboard.
pub const LOW_BALANCE_THRESHOLD: i64 = 5;

/// Per-employee balance view, derived on read. Never persisted.
///
/// `annual` mirrors the employee's stored allotment; `used` sums the day
/// counts of approved requests; `remaining` is clamped at zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalance {
    pub employee_id: Uuid,
    pub annual: i64,
    pub sick: i64,
    pub personal: i64,
    pub used: i64,
    pub remaining: i64,
}

/// Aggregate counters for the HR dashboard, derived on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveStats {
    pub total_employees: usize,
    pub pending_requests: usize,
    pub approved_requests: usize,
    pub rejected_requests: usize,
    pub total_leaves_taken: i64,
    pub average_leave_per_employee: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: LeaveStats,
    pub recent_requests: Vec<LeaveRequest>,
    pub upcoming_leaves: Vec<LeaveRequest>,
    pub low_balance_employees: Vec<Employee>,
}

/// Round to one decimal place, the precision the dashboard displays.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
