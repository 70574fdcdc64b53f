//! Employee model and related types.
//!
//! This module defines the [`Employee`] record, the [`EmployeeUpdate`] used
//! for partial updates, and [`EmployeeSnapshot`], the form in which employees
//! are handed to batch increment calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::deserialize_some;

/// Largest salary accepted, in whole currency units.
pub const MAX_SALARY: i64 = 1_000_000_000_000;

/// Represents a registered employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Externally assigned unique identifier.
    pub employee_id: String,
    /// Full name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Current salary, strictly positive.
    pub current_salary: Decimal,
    /// Completed years of experience.
    pub experience_years: u32,
}

impl Employee {
    /// Checks the registration rules for a new employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use increment_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     employee_id: "E001".to_string(),
    ///     name: "Asha Rao".to_string(),
    ///     phone: None,
    ///     address: None,
    ///     current_salary: Decimal::new(50000, 0),
    ///     experience_years: 3,
    /// };
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(invalid("employee_id", "is required"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "is required"));
        }
        validate_salary(self.current_salary)
    }

    /// Applies the fields present in `update`, leaving the rest unchanged.
    pub fn apply(&mut self, update: &EmployeeUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = phone.clone();
        }
        if let Some(address) = &update.address {
            self.address = address.clone();
        }
        if let Some(salary) = update.current_salary {
            self.current_salary = salary;
        }
        if let Some(years) = update.experience_years {
            self.experience_years = years;
        }
    }
}

/// A partial update of an employee's non-key fields.
///
/// Absent fields are left unchanged. For `phone` and `address` an explicit
/// `null` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New phone, `Some(None)` to clear.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    /// New address, `Some(None)` to clear.
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Option<String>>,
    /// New salary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_salary: Option<Decimal>,
    /// New experience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}

impl EmployeeUpdate {
    /// Returns true if no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.current_salary.is_none()
            && self.experience_years.is_none()
    }

    /// Checks that the update is non-empty and every present field is valid.
    pub fn validate(&self) -> EngineResult<()> {
        if self.is_empty() {
            return Err(EngineError::EmptyUpdate {
                entity: "employee".to_string(),
            });
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(invalid("name", "must not be blank"));
            }
        }
        if let Some(salary) = self.current_salary {
            validate_salary(salary)?;
        }
        Ok(())
    }
}

/// An employee as fed into batch increment calculation.
///
/// `salary_defaulted` records that the caller's salary was missing or not a
/// number and `employee.current_salary` was set to zero in its place.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSnapshot {
    /// The employee record.
    pub employee: Employee,
    /// Whether the salary was defaulted to zero.
    pub salary_defaulted: bool,
}

impl EmployeeSnapshot {
    /// Checks a caller-supplied salary.
    ///
    /// Zero is allowed, since a defaulted salary is zero.
    pub fn validate(&self) -> EngineResult<()> {
        let salary = self.employee.current_salary;
        if salary < Decimal::ZERO {
            return Err(invalid("current_salary", "must not be negative"));
        }
        validate_salary_ceiling(salary)
    }
}

impl From<Employee> for EmployeeSnapshot {
    fn from(employee: Employee) -> Self {
        Self {
            employee,
            salary_defaulted: false,
        }
    }
}

fn validate_salary(salary: Decimal) -> EngineResult<()> {
    if salary <= Decimal::ZERO {
        return Err(invalid("current_salary", "must be a positive number"));
    }
    validate_salary_ceiling(salary)
}

fn validate_salary_ceiling(salary: Decimal) -> EngineResult<()> {
    if salary > Decimal::from(MAX_SALARY) {
        return Err(EngineError::InvalidEmployee {
            field: "current_salary".to_string(),
            message: format!("must not exceed {}", MAX_SALARY),
        });
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            employee_id: "E001".to_string(),
            name: "Asha Rao".to_string(),
            phone: Some("555-0100".to_string()),
            address: None,
            current_salary: dec("50000"),
            experience_years: 3,
        }
    }

    #[test]
    fn test_deserialize_employee_with_numeric_salary() {
        let json = r#"{
            "employee_id": "E001",
            "name": "Asha Rao",
            "current_salary": 50000,
            "experience_years": 3
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.employee_id, "E001");
        assert_eq!(employee.current_salary, dec("50000"));
        assert_eq!(employee.phone, None);
        assert_eq!(employee.address, None);
    }

    #[test]
    fn test_deserialize_employee_with_string_salary() {
        let json = r#"{
            "employee_id": "E002",
            "name": "Ben Ortiz",
            "phone": "555-0101",
            "address": "12 Hill Rd",
            "current_salary": "61250.75",
            "experience_years": 7
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.current_salary, dec("61250.75"));
        assert_eq!(employee.address.as_deref(), Some("12 Hill Rd"));
    }

    #[test]
    fn test_deserialize_rejects_negative_experience() {
        let json = r#"{
            "employee_id": "E003",
            "name": "Chen Li",
            "current_salary": 1000,
            "experience_years": -1
        }"#;

        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_salary_serializes_as_string() {
        let json = serde_json::to_string(&create_test_employee()).unwrap();
        assert!(json.contains("\"current_salary\":\"50000\""));
    }

    #[test]
    fn test_validate_accepts_valid_employee() {
        assert!(create_test_employee().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_id_and_name() {
        let mut employee = create_test_employee();
        employee.employee_id = "  ".to_string();
        assert!(matches!(
            employee.validate(),
            Err(EngineError::InvalidEmployee { ref field, .. }) if field == "employee_id"
        ));

        let mut employee = create_test_employee();
        employee.name = String::new();
        assert!(matches!(
            employee.validate(),
            Err(EngineError::InvalidEmployee { ref field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_salary() {
        let mut employee = create_test_employee();
        employee.current_salary = Decimal::ZERO;
        assert!(matches!(
            employee.validate(),
            Err(EngineError::InvalidEmployee { ref field, .. }) if field == "current_salary"
        ));
    }

    #[test]
    fn test_update_distinguishes_absent_and_null() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(update.phone, Some(None));
        assert_eq!(update.address, None);
        assert!(!update.is_empty());

        let update: EmployeeUpdate = serde_json::from_str(r#"{}"#).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let result = EmployeeUpdate::default().validate();
        assert!(matches!(result, Err(EngineError::EmptyUpdate { .. })));
    }

    #[test]
    fn test_update_rejects_non_positive_salary() {
        let update = EmployeeUpdate {
            current_salary: Some(dec("-1")),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_apply_changes_only_present_fields() {
        let mut employee = create_test_employee();
        let update = EmployeeUpdate {
            phone: Some(None),
            experience_years: Some(4),
            ..Default::default()
        };

        employee.apply(&update);

        assert_eq!(employee.name, "Asha Rao");
        assert_eq!(employee.phone, None);
        assert_eq!(employee.experience_years, 4);
        assert_eq!(employee.current_salary, dec("50000"));
    }

    #[test]
    fn test_snapshot_from_employee_is_not_defaulted() {
        let snapshot = EmployeeSnapshot::from(create_test_employee());
        assert!(!snapshot.salary_defaulted);
    }

    #[test]
    fn test_validate_rejects_salary_above_ceiling() {
        let mut employee = create_test_employee();
        employee.current_salary = dec("79228162514264337593543950335");
        assert!(matches!(
            employee.validate(),
            Err(EngineError::InvalidEmployee { ref field, .. }) if field == "current_salary"
        ));

        employee.current_salary = Decimal::from(MAX_SALARY);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_salary_above_ceiling() {
        let update = EmployeeUpdate {
            current_salary: Some(Decimal::from(MAX_SALARY) + Decimal::ONE),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_snapshot_validation_allows_defaulted_zero() {
        let mut snapshot = EmployeeSnapshot::from(create_test_employee());
        snapshot.employee.current_salary = Decimal::ZERO;
        snapshot.salary_defaulted = true;
        assert!(snapshot.validate().is_ok());

        snapshot.employee.current_salary = dec("-1");
        assert!(snapshot.validate().is_err());

        snapshot.employee.current_salary = Decimal::MAX;
        assert!(snapshot.validate().is_err());
    }
}
