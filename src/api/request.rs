//! Request types for the Increment Engine API.
//!
//! Create and update bodies deserialize straight into the model types
//! ([`Employee`], [`EmployeeUpdate`], [`NewPolicy`], [`PolicyUpdate`]). This
//! module defines the body of `POST /api/increments/calculate`, where the
//! caller supplies its own snapshots.

use serde::{Deserialize, Serialize};

use crate::calculation::parse_salary_or_zero;
use crate::error::EngineResult;
use crate::models::{Employee, EmployeeSnapshot, Policy};

/// Request body for the `/api/increments/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Employees to calculate increments for.
    #[serde(default)]
    pub employees: Vec<EmployeeInput>,
    /// Policies to match against, in priority order.
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl CalculationRequest {
    /// Converts the employees to snapshots and checks every amount.
    ///
    /// Salaries must lie between zero and the salary ceiling and
    /// percentages between zero and the percentage ceiling. Ranges are left
    /// to the matcher, which skips malformed ones.
    pub fn into_snapshots(self) -> EngineResult<(Vec<EmployeeSnapshot>, Vec<Policy>)> {
        for policy in &self.policies {
            policy.validate_percentage()?;
        }
        let employees = self
            .employees
            .into_iter()
            .map(|input| {
                let snapshot = EmployeeSnapshot::from(input);
                snapshot.validate().map(|()| snapshot)
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Ok((employees, self.policies))
    }
}

/// An employee as supplied by the caller.
///
/// `current_salary` is read leniently: anything other than a number or a
/// numeric string becomes zero, and the result is flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    /// Employee id.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Salary as sent.
    #[serde(default)]
    pub current_salary: Option<serde_json::Value>,
    /// Completed years of experience.
    pub experience_years: u32,
}

impl From<EmployeeInput> for EmployeeSnapshot {
    fn from(input: EmployeeInput) -> Self {
        let salary = parse_salary_or_zero(input.current_salary.as_ref());
        EmployeeSnapshot {
            employee: Employee {
                employee_id: input.employee_id,
                name: input.name,
                phone: input.phone,
                address: input.address,
                current_salary: salary.amount,
                experience_years: input.experience_years,
            },
            salary_defaulted: salary.defaulted,
        }
    }
}
