//! Employee directory.
//!
//! Holds every employee the house has ever registered. Employees are never
//! removed: deactivation hides them from new rosters while historical shifts
//! keep their id and name snapshot.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewEmployee};

/// In-memory employee records keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: HashMap<String, Employee>,
}

impl EmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from existing records, e.g. a configured seed
    /// roster. A later record with a repeated id replaces the earlier one.
    pub fn from_seed(employees: impl IntoIterator<Item = Employee>) -> Self {
        let employees = employees
            .into_iter()
            .map(|employee| (employee.id.clone(), employee))
            .collect();
        Self { employees }
    }

    /// Returns active employees ordered by name, then id.
    pub fn list_active(&self) -> Vec<Employee> {
        let mut active: Vec<Employee> = self
            .employees
            .values()
            .filter(|e| e.is_active)
            .cloned()
            .collect();
        sort_by_name(&mut active);
        active
    }

    /// Returns every employee, active or not, ordered by name, then id.
    pub fn list_all(&self) -> Vec<Employee> {
        let mut all: Vec<Employee> = self.employees.values().cloned().collect();
        sort_by_name(&mut all);
        all
    }

    /// Looks up an employee by id.
    pub fn get(&self, id: &str) -> EngineResult<&Employee> {
        self.employees
            .get(id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Registers a new, active employee.
    ///
    /// The name must not be blank and a personal deduction rate, when
    /// given, must be strictly positive.
    pub fn add(&mut self, new_employee: NewEmployee) -> EngineResult<Employee> {
        let name = validate_name(&new_employee.name)?;
        if let Some(rate) = new_employee.hourly_deduction_rate {
            validate_rate(rate)?;
        }

        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            name,
            role: new_employee.role,
            hourly_deduction_rate: new_employee.hourly_deduction_rate,
            is_active: true,
        };
        info!(employee_id = %employee.id, name = %employee.name, "Employee added");
        self.employees
            .insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    /// Hides an employee from new rosters.
    pub fn deactivate(&mut self, id: &str) -> EngineResult<&Employee> {
        let employee = self.get_mut(id)?;
        employee.is_active = false;
        info!(employee_id = %id, "Employee deactivated");
        Ok(employee)
    }

    /// Makes a deactivated employee available again.
    pub fn reactivate(&mut self, id: &str) -> EngineResult<&Employee> {
        let employee = self.get_mut(id)?;
        employee.is_active = true;
        info!(employee_id = %id, "Employee reactivated");
        Ok(employee)
    }

    /// Changes an employee's display name. Saved shifts keep the old name.
    pub fn rename(&mut self, id: &str, name: &str) -> EngineResult<&Employee> {
        let name = validate_name(name)?;
        let employee = self.get_mut(id)?;
        employee.name = name;
        Ok(employee)
    }

    /// Sets or clears an employee's personal hourly deduction.
    pub fn set_deduction_rate(
        &mut self,
        id: &str,
        rate: Option<Decimal>,
    ) -> EngineResult<&Employee> {
        if let Some(rate) = rate {
            validate_rate(rate)?;
        }
        let employee = self.get_mut(id)?;
        employee.hourly_deduction_rate = rate;
        Ok(employee)
    }

    fn get_mut(&mut self, id: &str) -> EngineResult<&mut Employee> {
        self.employees
            .get_mut(id)
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }
}

fn sort_by_name(employees: &mut [Employee]) {
    employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

fn validate_name(name: &str) -> EngineResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input("name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_rate(rate: Decimal) -> EngineResult<()> {
    if rate <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "hourly_deduction_rate",
            format!("must be greater than zero, got {}", rate),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn employee(id: &str, name: &str, active: bool) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            role: Role::Waiter,
            hourly_deduction_rate: None,
            is_active: active,
        }
    }

    fn create_test_directory() -> EmployeeDirectory {
        EmployeeDirectory::from_seed(vec![
            employee("emp_2", "Eitan", true),
            employee("emp_1", "Noa", true),
            employee("emp_3", "Dana", false),
        ])
    }

    fn new_employee(name: &str, rate: Option<Decimal>) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            role: Role::Bartender,
            hourly_deduction_rate: rate,
        }
    }

    #[test]
    fn test_list_active_hides_inactive_and_sorts_by_name() {
        let directory = create_test_directory();
        let names: Vec<String> = directory
            .list_active()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Eitan", "Noa"]);
    }

    #[test]
    fn test_list_all_includes_inactive() {
        let directory = create_test_directory();
        assert_eq!(directory.list_all().len(), 3);
        assert_eq!(directory.list_all()[0].name, "Dana");
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let directory = create_test_directory();
        match directory.get("nobody").unwrap_err() {
            EngineError::EmployeeNotFound { id } => assert_eq!(id, "nobody"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_add_creates_active_employee() {
        let mut directory = EmployeeDirectory::new();
        let added = directory
            .add(new_employee("  Maya ", Some(Decimal::new(25, 0))))
            .unwrap();

        assert_eq!(added.name, "Maya");
        assert!(added.is_active);
        assert_eq!(directory.get(&added.id).unwrap(), &added);
        assert_eq!(directory.list_active().len(), 1);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut directory = EmployeeDirectory::new();
        let result = directory.add(new_employee("   ", None));
        assert!(matches!(
            result.unwrap_err(),
            EngineError::InvalidInput { field, .. } if field == "name"
        ));
    }

    #[test]
    fn test_add_rejects_non_positive_rate() {
        let mut directory = EmployeeDirectory::new();
        assert!(directory.add(new_employee("Maya", Some(Decimal::ZERO))).is_err());
        assert!(
            directory
                .add(new_employee("Maya", Some(Decimal::new(-1, 0))))
                .is_err()
        );
        assert!(directory.list_all().is_empty());
    }

    #[test]
    fn test_deactivate_and_reactivate() {
        let mut directory = create_test_directory();

        assert!(!directory.deactivate("emp_1").unwrap().is_active);
        assert_eq!(directory.list_active().len(), 1);
        assert!(directory.get("emp_1").is_ok());

        assert!(directory.reactivate("emp_1").unwrap().is_active);
        assert_eq!(directory.list_active().len(), 2);
    }

    #[test]
    fn test_lifecycle_on_unknown_employee_fails() {
        let mut directory = create_test_directory();
        assert!(directory.deactivate("ghost").is_err());
        assert!(directory.reactivate("ghost").is_err());
        assert!(directory.rename("ghost", "Casper").is_err());
    }

    #[test]
    fn test_rename_and_set_rate() {
        let mut directory = create_test_directory();
        directory.rename("emp_1", "Noa L.").unwrap();
        directory
            .set_deduction_rate("emp_1", Some(Decimal::new(30, 0)))
            .unwrap();

        let noa = directory.get("emp_1").unwrap();
        assert_eq!(noa.name, "Noa L.");
        assert_eq!(noa.hourly_deduction_rate, Some(Decimal::new(30, 0)));

        directory.set_deduction_rate("emp_1", None).unwrap();
        assert_eq!(directory.get("emp_1").unwrap().hourly_deduction_rate, None);
    }
}
