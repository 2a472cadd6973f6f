//! Leave requests: owner of the request collection and the approval workflow.
//!
//! Employee records are resolved through the injected [`EmployeeDirectory`]
//! capability; the only cross-service write is the balance adjustment made
//! during approval.

use std::sync::Arc;

use chrono::Utc;
use common::types::FieldError;
use tracing::{info, instrument};
use uuid::Uuid;

use models::employee::EmployeeStatus;
use models::leave::{LeaveApplication, LeaveRequest, LeaveStatus};
use models::reports::{
    round_one_decimal, DashboardData, LeaveBalance, LeaveStats, LOW_BALANCE_THRESHOLD,
    PERSONAL_ALLOCATION, SICK_ALLOCATION,
};
use models::workdays::working_days;

use crate::directory::EmployeeDirectory;
use crate::errors::ServiceError;
use crate::storage::CollectionStore;

/// Number of entries each dashboard list is capped at.
const DASHBOARD_LIST_LIMIT: usize = 5;

pub struct LeaveService<D: EmployeeDirectory, S: CollectionStore> {
    directory: Arc<D>,
    store: Arc<S>,
    collection: String,
}

impl<D: EmployeeDirectory, S: CollectionStore> LeaveService<D, S> {
    pub fn new(directory: Arc<D>, store: Arc<S>, collection: impl Into<String>) -> Self {
        Self { directory, store, collection: collection.into() }
    }

    fn load(&self) -> Result<Vec<LeaveRequest>, ServiceError> {
        self.store.read(&self.collection)
    }

    fn save(&self, requests: &[LeaveRequest]) -> Result<(), ServiceError> {
        self.store.write(&self.collection, requests)
    }

    /// Submit a new request. Balance sufficiency is deliberately not checked
    /// here; remaining balance is advisory information for the submitter.
    #[instrument(skip(self, input), fields(employee_id = %input.employee_id))]
    pub fn apply_leave(&self, input: LeaveApplication) -> Result<LeaveRequest, ServiceError> {
        let employee = self.directory.get_employee(input.employee_id)?;

        let mut errors = Vec::new();
        if employee.status != EmployeeStatus::Active {
            errors.push(FieldError::new(
                "employeeId",
                "Cannot apply leave for inactive employee",
            ));
        }
        errors.extend(input.validate());
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let (Some(start_date), Some(end_date), Some(leave_type)) =
            (input.start_date, input.end_date, input.leave_type)
        else {
            return Err(ServiceError::field("startDate", "Start date is required"));
        };

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            employee_name: employee.name,
            start_date,
            end_date,
            leave_type,
            reason: input.reason,
            status: LeaveStatus::Pending,
            applied_date: Utc::now(),
            days: working_days(start_date, end_date),
            approved_by: None,
            approved_date: None,
            comments: None,
        };

        let mut requests = self.load()?;
        requests.push(request.clone());
        self.save(&requests)?;

        info!(request_id = %request.id, days = request.days, "leave_applied");
        Ok(request)
    }

    /// Approve a pending request, deducting its day count from the
    /// employee's stored allotment. If the deduction would drive the stored
    /// balance negative the directory rejects it and the request stays
    /// pending.
    #[instrument(skip(self, comments))]
    pub fn approve_leave(
        &self,
        request_id: Uuid,
        approver_id: Uuid,
        comments: Option<String>,
    ) -> Result<LeaveRequest, ServiceError> {
        let mut requests = self.load()?;
        let index = requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| ServiceError::not_found("Leave request not found"))?;

        if !requests[index].is_pending() {
            return Err(ServiceError::invalid_state("Only pending requests can be approved"));
        }

        let balance = self.derive_balance(requests[index].employee_id, &requests)?;
        self.directory
            .adjust_balance(requests[index].employee_id, balance.remaining - requests[index].days)?;

        let request = &mut requests[index];
        request.status = LeaveStatus::Approved;
        request.approved_by = Some(approver_id);
        request.approved_date = Some(Utc::now());
        request.comments = comments;
        let approved = request.clone();
        self.save(&requests)?;

        info!(request_id = %request_id, approver_id = %approver_id, "leave_approved");
        Ok(approved)
    }

    /// Reject a pending request. No balance mutation.
    #[instrument(skip(self, comments))]
    pub fn reject_leave(
        &self,
        request_id: Uuid,
        approver_id: Uuid,
        comments: Option<String>,
    ) -> Result<LeaveRequest, ServiceError> {
        let mut requests = self.load()?;
        let index = requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| ServiceError::not_found("Leave request not found"))?;

        if !requests[index].is_pending() {
            return Err(ServiceError::invalid_state("Only pending requests can be rejected"));
        }

        let request = &mut requests[index];
        request.status = LeaveStatus::Rejected;
        request.approved_by = Some(approver_id);
        request.approved_date = Some(Utc::now());
        request.comments = comments;
        let rejected = request.clone();
        self.save(&requests)?;

        info!(request_id = %request_id, approver_id = %approver_id, "leave_rejected");
        Ok(rejected)
    }

    /// All requests, optionally filtered to one employee, newest first by
    /// applied date. Dashboard "recent" views depend on this ordering.
    pub fn list_requests(&self, employee_id: Option<Uuid>) -> Result<Vec<LeaveRequest>, ServiceError> {
        let mut requests = self.load()?;
        if let Some(id) = employee_id {
            requests.retain(|r| r.employee_id == id);
        }
        requests.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
        Ok(requests)
    }

    /// Derived per-employee balance; never persisted.
    pub fn leave_balance(&self, employee_id: Uuid) -> Result<LeaveBalance, ServiceError> {
        let requests = self.load()?;
        self.derive_balance(employee_id, &requests)
    }

    fn derive_balance(
        &self,
        employee_id: Uuid,
        requests: &[LeaveRequest],
    ) -> Result<LeaveBalance, ServiceError> {
        let employee = self.directory.get_employee(employee_id)?;
        let used: i64 = requests
            .iter()
            .filter(|r| r.employee_id == employee_id && r.status == LeaveStatus::Approved)
            .map(|r| r.days)
            .sum();
        Ok(LeaveBalance {
            employee_id,
            annual: employee.leave_balance,
            sick: SICK_ALLOCATION,
            personal: PERSONAL_ALLOCATION,
            used,
            remaining: (employee.leave_balance - used).max(0),
        })
    }

    /// Aggregate view computed on demand from both collections.
    pub fn dashboard_data(&self) -> Result<DashboardData, ServiceError> {
        let employees = self.directory.list_employees()?;
        let requests = self.list_requests(None)?;

        let active_employees =
            employees.iter().filter(|e| e.status == EmployeeStatus::Active).count();
        let total_leaves_taken: i64 = requests
            .iter()
            .filter(|r| r.status == LeaveStatus::Approved)
            .map(|r| r.days)
            .sum();
        let average_leave_per_employee = if active_employees > 0 {
            round_one_decimal(total_leaves_taken as f64 / active_employees as f64)
        } else {
            0.0
        };

        let stats = LeaveStats {
            total_employees: active_employees,
            pending_requests: requests.iter().filter(|r| r.status == LeaveStatus::Pending).count(),
            approved_requests: requests
                .iter()
                .filter(|r| r.status == LeaveStatus::Approved)
                .count(),
            rejected_requests: requests
                .iter()
                .filter(|r| r.status == LeaveStatus::Rejected)
                .count(),
            total_leaves_taken,
            average_leave_per_employee,
        };

        let recent_requests =
            requests.iter().take(DASHBOARD_LIST_LIMIT).cloned().collect::<Vec<_>>();

        let today = Utc::now().date_naive();
        let mut upcoming_leaves: Vec<LeaveRequest> = requests
            .iter()
            .filter(|r| r.status == LeaveStatus::Approved && r.start_date > today)
            .cloned()
            .collect();
        upcoming_leaves.sort_by(|a, b| a.start_date.cmp(&b.start_date));
        upcoming_leaves.truncate(DASHBOARD_LIST_LIMIT);

        let low_balance_employees = employees
            .into_iter()
            .filter(|e| {
                e.status == EmployeeStatus::Active && e.leave_balance < LOW_BALANCE_THRESHOLD
            })
            .take(DASHBOARD_LIST_LIMIT)
            .collect();

        Ok(DashboardData { stats, recent_requests, upcoming_leaves, low_balance_employees })
    }
}
