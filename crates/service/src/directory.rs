//! Employee directory: owner of the employee collection.
//!
//! All mutations go through this service; the leave service reads employee
//! records and adjusts balances only through the [`EmployeeDirectory`]
//! capability trait, never by touching the collection itself.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use models::employee::{
    Employee, EmployeeInput, EmployeeRole, EmployeeStatus, EmployeeUpdate, DEFAULT_LEAVE_BALANCE,
};

use crate::errors::ServiceError;
use crate::storage::CollectionStore;

/// The slice of directory behavior the leave service depends on. Injected as
/// a capability so leave-workflow tests can substitute a double.
pub trait EmployeeDirectory: Send + Sync {
    fn get_employee(&self, id: Uuid) -> Result<Employee, ServiceError>;
    fn list_employees(&self) -> Result<Vec<Employee>, ServiceError>;
    /// Set the stored balance to an explicit new value; rejects negatives.
    fn adjust_balance(&self, id: Uuid, new_balance: i64) -> Result<Employee, ServiceError>;
}

pub struct EmployeeDirectoryService<S: CollectionStore> {
    store: Arc<S>,
    collection: String,
}

impl<S: CollectionStore> EmployeeDirectoryService<S> {
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self { store, collection: collection.into() }
    }

    fn load(&self) -> Result<Vec<Employee>, ServiceError> {
        self.store.read(&self.collection)
    }

    fn save(&self, employees: &[Employee]) -> Result<(), ServiceError> {
        self.store.write(&self.collection, employees)
    }

    /// All employee records, active and inactive.
    pub fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        self.load()
    }

    pub fn get(&self, id: Uuid) -> Result<Employee, ServiceError> {
        self.load()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ServiceError::not_found("Employee not found"))
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub fn create(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        let errors = input.validate(Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        let Some(joining_date) = input.joining_date else {
            return Err(ServiceError::field("joiningDate", "Joining date is required"));
        };

        let mut employees = self.load()?;
        if has_duplicate_email(&employees, &input.email, None) {
            return Err(ServiceError::field("email", "Email already exists"));
        }

        let employee = Employee {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            department: input.department,
            joining_date,
            leave_balance: DEFAULT_LEAVE_BALANCE,
            role: input.role,
            status: EmployeeStatus::Active,
        };
        employees.push(employee.clone());
        self.save(&employees)?;

        info!(employee_id = %employee.id, "employee_created");
        Ok(employee)
    }

    #[instrument(skip(self, update))]
    pub fn update(&self, id: Uuid, update: EmployeeUpdate) -> Result<Employee, ServiceError> {
        let mut employees = self.load()?;
        let index = employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ServiceError::not_found("Employee not found"))?;

        let merged = update.apply_to(&employees[index]);
        let errors = merged.validate(Utc::now().date_naive());
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        if update.email.is_some() && has_duplicate_email(&employees, &merged.email, Some(id)) {
            return Err(ServiceError::field("email", "Email already exists"));
        }

        employees[index] = merged.clone();
        self.save(&employees)?;

        info!(employee_id = %id, "employee_updated");
        Ok(merged)
    }

    /// Soft delete: flips status to inactive. Idempotent.
    #[instrument(skip(self))]
    pub fn deactivate(&self, id: Uuid) -> Result<Employee, ServiceError> {
        let mut employees = self.load()?;
        let index = employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ServiceError::not_found("Employee not found"))?;

        employees[index].status = EmployeeStatus::Inactive;
        let employee = employees[index].clone();
        self.save(&employees)?;

        info!(employee_id = %id, "employee_deactivated");
        Ok(employee)
    }

    /// Set the stored leave balance to `new_balance`. The only write path the
    /// leave service uses during approval.
    #[instrument(skip(self))]
    pub fn adjust_leave_balance(&self, id: Uuid, new_balance: i64) -> Result<Employee, ServiceError> {
        let mut employees = self.load()?;
        let index = employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ServiceError::not_found("Employee not found"))?;

        if new_balance < 0 {
            return Err(ServiceError::invalid_state("Leave balance cannot be negative"));
        }

        employees[index].leave_balance = new_balance;
        let employee = employees[index].clone();
        self.save(&employees)?;

        info!(employee_id = %id, new_balance, "leave_balance_adjusted");
        Ok(employee)
    }

    /// Login lookup: case-insensitive email match over active employees.
    /// This is the whole authentication model; there are no credentials.
    pub fn authenticate(&self, email: &str) -> Result<Employee, ServiceError> {
        self.load()?
            .into_iter()
            .find(|e| {
                e.status == EmployeeStatus::Active && e.email.eq_ignore_ascii_case(email.trim())
            })
            .ok_or_else(|| ServiceError::not_found("Employee not found or inactive"))
    }

    /// First-run convenience: when the collection is empty, create the three
    /// demo employees the login screen offers. Returns the created records,
    /// or an empty vec when the directory already has data.
    pub fn seed_demo_data(&self) -> Result<Vec<Employee>, ServiceError> {
        if !self.load()?.is_empty() {
            return Ok(Vec::new());
        }

        let demo = [
            ("Sarah Johnson", "admin@company.com", "HR", (2023, 1, 15), EmployeeRole::Hr),
            ("John Smith", "john@company.com", "Engineering", (2023, 3, 1), EmployeeRole::Employee),
            ("Emily Davis", "emily@company.com", "Marketing", (2023, 2, 10), EmployeeRole::Employee),
        ];

        let mut created = Vec::new();
        for (name, email, department, (y, m, d), role) in demo {
            created.push(self.create(EmployeeInput {
                name: name.into(),
                email: email.into(),
                department: department.into(),
                joining_date: NaiveDate::from_ymd_opt(y, m, d),
                role,
            })?);
        }
        info!(count = created.len(), "demo_employees_seeded");
        Ok(created)
    }
}

fn has_duplicate_email(employees: &[Employee], email: &str, exclude: Option<Uuid>) -> bool {
    employees.iter().any(|e| {
        Some(e.id) != exclude && e.email.eq_ignore_ascii_case(email)
    })
}

impl<S: CollectionStore> EmployeeDirectory for EmployeeDirectoryService<S> {
    fn get_employee(&self, id: Uuid) -> Result<Employee, ServiceError> {
        self.get(id)
    }

    fn list_employees(&self) -> Result<Vec<Employee>, ServiceError> {
        self.list()
    }

    fn adjust_balance(&self, id: Uuid, new_balance: i64) -> Result<Employee, ServiceError> {
        self.adjust_leave_balance(id, new_balance)
    }
}

/// Simple in-memory mock directory for leave-workflow tests.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockDirectory {
        employees: Mutex<HashMap<Uuid, Employee>>,
    }

    impl MockDirectory {
        pub fn with_employee(employee: Employee) -> Self {
            let mock = Self::default();
            mock.insert(employee);
            mock
        }

        pub fn insert(&self, employee: Employee) {
            let mut map = self.employees.lock().unwrap();
            map.insert(employee.id, employee);
        }

        pub fn balance_of(&self, id: Uuid) -> Option<i64> {
            let map = self.employees.lock().unwrap();
            map.get(&id).map(|e| e.leave_balance)
        }
    }

    impl EmployeeDirectory for MockDirectory {
        fn get_employee(&self, id: Uuid) -> Result<Employee, ServiceError> {
            let map = self.employees.lock().unwrap();
            map.get(&id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("Employee not found"))
        }

        fn list_employees(&self) -> Result<Vec<Employee>, ServiceError> {
            let map = self.employees.lock().unwrap();
            Ok(map.values().cloned().collect())
        }

        fn adjust_balance(&self, id: Uuid, new_balance: i64) -> Result<Employee, ServiceError> {
            if new_balance < 0 {
                return Err(ServiceError::invalid_state("Leave balance cannot be negative"));
            }
            let mut map = self.employees.lock().unwrap();
            let employee = map
                .get_mut(&id)
                .ok_or_else(|| ServiceError::not_found("Employee not found"))?;
            employee.leave_balance = new_balance;
            Ok(employee.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn directory() -> EmployeeDirectoryService<MemoryStore> {
        EmployeeDirectoryService::new(Arc::new(MemoryStore::new()), "lms_employees")
    }

    fn john_input() -> EmployeeInput {
        EmployeeInput {
            name: "John Smith".into(),
            email: "john@company.com".into(),
            department: "Engineering".into(),
            joining_date: NaiveDate::from_ymd_opt(2023, 3, 1),
            role: EmployeeRole::Employee,
        }
    }

    #[test]
    fn create_assigns_defaults() {
        let dir = directory();
        let employee = dir.create(john_input()).unwrap();
        assert_eq!(employee.leave_balance, 25);
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(dir.list().unwrap().len(), 1);
    }

    #[test]
    fn create_collects_field_errors() {
        let dir = directory();
        let result = dir.create(EmployeeInput {
            name: "J".into(),
            email: "bad".into(),
            department: "".into(),
            joining_date: None,
            role: EmployeeRole::Employee,
        });
        match result {
            Err(ServiceError::Validation(errors)) => assert_eq!(errors.len(), 4),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(dir.list().unwrap().is_empty(), "nothing persisted on failure");
    }

    #[test]
    fn duplicate_email_differing_only_by_case_rejected() {
        let dir = directory();
        let mut first = john_input();
        first.email = "Admin@Company.com".into();
        dir.create(first).unwrap();

        let mut second = john_input();
        second.name = "Sarah Johnson".into();
        second.email = "admin@company.com".into();
        match dir.create(second) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[0].message, "Email already exists");
            }
            other => panic!("expected duplicate-email failure, got {other:?}"),
        }
        assert_eq!(dir.list().unwrap().len(), 1);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let dir = directory();
        assert!(matches!(dir.get(Uuid::new_v4()), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn update_merges_and_revalidates() {
        let dir = directory();
        let employee = dir.create(john_input()).unwrap();

        let updated = dir
            .update(employee.id, EmployeeUpdate {
                department: Some("Platform".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.department, "Platform");
        assert_eq!(updated.email, employee.email);

        let result = dir.update(employee.id, EmployeeUpdate {
            email: Some("broken".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        // failed update must not persist
        assert_eq!(dir.get(employee.id).unwrap().email, "john@company.com");
    }

    #[test]
    fn update_duplicate_email_excludes_own_record() {
        let dir = directory();
        let john = dir.create(john_input()).unwrap();
        let mut other = john_input();
        other.name = "Emily Davis".into();
        other.email = "emily@company.com".into();
        let emily = dir.create(other).unwrap();

        // keeping your own email is fine
        let kept = dir
            .update(john.id, EmployeeUpdate {
                email: Some("John@Company.com".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(kept.email, "John@Company.com");

        // taking someone else's is not
        let result = dir.update(emily.id, EmployeeUpdate {
            email: Some("john@company.com".into()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn deactivate_is_idempotent() {
        let dir = directory();
        let employee = dir.create(john_input()).unwrap();

        let first = dir.deactivate(employee.id).unwrap();
        assert_eq!(first.status, EmployeeStatus::Inactive);
        let second = dir.deactivate(employee.id).unwrap();
        assert_eq!(second.status, EmployeeStatus::Inactive);

        assert!(matches!(dir.deactivate(Uuid::new_v4()), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn negative_balance_adjustment_rejected() {
        let dir = directory();
        let employee = dir.create(john_input()).unwrap();

        let result = dir.adjust_leave_balance(employee.id, -1);
        assert!(matches!(result, Err(ServiceError::InvalidState(_))));
        assert_eq!(dir.get(employee.id).unwrap().leave_balance, 25);

        let adjusted = dir.adjust_leave_balance(employee.id, 0).unwrap();
        assert_eq!(adjusted.leave_balance, 0);
    }

    #[test]
    fn authenticate_matches_active_employees_case_insensitively() {
        let dir = directory();
        let employee = dir.create(john_input()).unwrap();

        let found = dir.authenticate("JOHN@company.COM").unwrap();
        assert_eq!(found.id, employee.id);

        dir.deactivate(employee.id).unwrap();
        assert!(matches!(dir.authenticate("john@company.com"), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn seed_runs_once() {
        let dir = directory();
        let created = dir.seed_demo_data().unwrap();
        assert_eq!(created.len(), 3);
        assert!(dir.authenticate("admin@company.com").is_ok());

        let again = dir.seed_demo_data().unwrap();
        assert!(again.is_empty());
        assert_eq!(dir.list().unwrap().len(), 3);
    }

    #[test]
    fn corrupt_storage_surfaces_as_storage_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_raw("lms_employees", "{broken");
        let dir = EmployeeDirectoryService::new(store, "lms_employees");
        assert!(matches!(dir.list(), Err(ServiceError::Storage(_))));
    }
}
