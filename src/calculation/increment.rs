//! Increment calculation.
//!
//! Computes the increment amount and new salary for an employee from the
//! policy matched to them.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::{AppliedIncrement, Employee, IncrementOutcome, IncrementResult, Policy};

/// A salary read from loosely typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryInput {
    /// The salary to calculate with.
    pub amount: Decimal,
    /// True when the input was missing or not a number and `amount` is zero.
    pub defaulted: bool,
}

/// Reads a salary from a JSON value, defaulting to zero.
///
/// Numbers and numeric strings are accepted. A missing value, `null`, or
/// anything that does not parse yields zero with `defaulted` set, so a
/// caller can tell "no salary" apart from a genuine zero.
///
/// # Examples
///
/// ```
/// use increment_engine::calculation::parse_salary_or_zero;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let salary = parse_salary_or_zero(Some(&json!("50000.50")));
/// assert_eq!(salary.amount, Decimal::new(5000050, 2));
/// assert!(!salary.defaulted);
///
/// let salary = parse_salary_or_zero(Some(&json!("n/a")));
/// assert_eq!(salary.amount, Decimal::ZERO);
/// assert!(salary.defaulted);
/// ```
pub fn parse_salary_or_zero(value: Option<&serde_json::Value>) -> SalaryInput {
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Some(serde_json::Value::String(s)) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    };

    match parsed {
        Some(amount) => SalaryInput {
            amount,
            defaulted: false,
        },
        None => SalaryInput {
            amount: Decimal::ZERO,
            defaulted: true,
        },
    }
}

/// Returns `salary * percentage / 100`, or `None` if it overflows.
///
/// Multiplies first and divides second; the result is not rounded.
pub fn increment_amount(salary: Decimal, percentage: Decimal) -> Option<Decimal> {
    salary
        .checked_mul(percentage)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Calculates the increment for an employee under the matched policy.
///
/// With no policy the outcome is [`IncrementOutcome::NoMatch`] and no
/// amounts are computed. If the amounts do not fit in a `Decimal` the
/// outcome is [`IncrementOutcome::Overflow`]. The function is pure: the same
/// inputs always give the same result.
///
/// # Examples
///
/// ```
/// use increment_engine::calculation::calculate_increment;
/// use increment_engine::models::{Employee, Policy};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     employee_id: "E001".to_string(),
///     name: "Asha Rao".to_string(),
///     phone: None,
///     address: None,
///     current_salary: Decimal::new(50000, 0),
///     experience_years: 0,
/// };
/// let policy = Policy {
///     policy_id: 2,
///     category: "Junior".to_string(),
///     experience_range: "0-2 years".to_string(),
///     increment_percentage: Decimal::new(8, 0),
///     eligibility: None,
/// };
///
/// let result = calculate_increment(&employee, Some(&policy));
/// assert_eq!(result.increment_amount(), Some(Decimal::new(4000, 0)));
/// assert_eq!(result.new_salary(), Some(Decimal::new(54000, 0)));
/// ```
pub fn calculate_increment(employee: &Employee, policy: Option<&Policy>) -> IncrementResult {
    let salary = employee.current_salary;

    let outcome = match policy {
        Some(policy) => {
            let amounts = increment_amount(salary, policy.increment_percentage)
                .and_then(|amount| Some((amount, salary.checked_add(amount)?)));
            match amounts {
                Some((amount, new_salary)) => IncrementOutcome::Matched(AppliedIncrement {
                    policy_id: policy.policy_id,
                    category: policy.category.clone(),
                    experience_range: policy.experience_range.clone(),
                    increment_percentage: policy.increment_percentage,
                    increment_amount: amount,
                    new_salary,
                    eligibility: policy.eligibility.clone(),
                }),
                None => IncrementOutcome::Overflow {
                    policy_id: policy.policy_id,
                },
            }
        }
        None => IncrementOutcome::NoMatch,
    };

    IncrementResult {
        employee_id: employee.employee_id.clone(),
        employee_name: employee.name.clone(),
        experience_years: employee.experience_years,
        current_salary: salary,
        salary_defaulted: false,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(salary: &str, experience_years: u32) -> Employee {
        Employee {
            employee_id: "E001".to_string(),
            name: "Asha Rao".to_string(),
            phone: None,
            address: None,
            current_salary: dec(salary),
            experience_years,
        }
    }

    fn create_policy(percentage: &str) -> Policy {
        Policy {
            policy_id: 2,
            category: "Mid-Level".to_string(),
            experience_range: "2-5 years".to_string(),
            increment_percentage: dec(percentage),
            eligibility: Some("Good performance review".to_string()),
        }
    }

    /// IC-001: 8% of 50000
    #[test]
    fn test_eight_percent_of_fifty_thousand() {
        let employee = create_test_employee("50000", 0);
        let result = calculate_increment(&employee, Some(&create_policy("8")));

        assert_eq!(result.increment_amount(), Some(dec("4000")));
        assert_eq!(result.new_salary(), Some(dec("54000")));
        let applied = result.applied().unwrap();
        assert_eq!(applied.category, "Mid-Level");
        assert_eq!(applied.eligibility.as_deref(), Some("Good performance review"));
    }

    /// IC-002: no policy means no amounts
    #[test]
    fn test_no_policy_yields_no_match() {
        let employee = create_test_employee("50000", 100);
        let result = calculate_increment(&employee, None);

        assert_eq!(result.outcome, IncrementOutcome::NoMatch);
        assert_eq!(result.increment_amount(), None);
        assert_eq!(result.new_salary(), None);
        assert_eq!(result.experience_years, 100);
    }

    /// IC-003: zero percent is a match with a zero increment
    #[test]
    fn test_zero_percent_is_distinct_from_no_match() {
        let employee = create_test_employee("50000", 3);
        let result = calculate_increment(&employee, Some(&create_policy("0")));

        assert!(result.is_matched());
        assert_eq!(result.increment_amount(), Some(Decimal::ZERO));
        assert_eq!(result.new_salary(), Some(dec("50000")));
    }

    #[test]
    fn test_full_precision_is_kept() {
        let employee = create_test_employee("33333.33", 3);
        let result = calculate_increment(&employee, Some(&create_policy("7.5")));

        assert_eq!(result.increment_amount(), Some(dec("2499.99975")));
        assert_eq!(result.new_salary(), Some(dec("35833.32975")));
    }

    #[test]
    fn test_new_salary_minus_current_equals_increment() {
        let employee = create_test_employee("48750.10", 4);
        let result = calculate_increment(&employee, Some(&create_policy("12.25")));

        let applied = result.applied().unwrap();
        assert_eq!(
            applied.new_salary - result.current_salary,
            applied.increment_amount
        );
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let employee = create_test_employee("61000", 3);
        let policy = create_policy("8");

        let first = calculate_increment(&employee, Some(&policy));
        let second = calculate_increment(&employee, Some(&policy));

        assert_eq!(first, second);
        assert_eq!(employee.current_salary, dec("61000"));
    }

    #[test]
    fn test_increment_amount_multiplies_before_dividing() {
        assert_eq!(increment_amount(dec("1"), dec("1")), Some(dec("0.01")));
        assert_eq!(increment_amount(dec("12345"), dec("100")), Some(dec("12345")));
    }

    #[test]
    fn test_increment_amount_overflow_is_none() {
        assert_eq!(increment_amount(Decimal::MAX, dec("15")), None);
    }

    #[test]
    fn test_oversized_salary_yields_overflow_outcome() {
        let mut employee = create_test_employee("1", 3);
        employee.current_salary = Decimal::MAX;

        let result = calculate_increment(&employee, Some(&create_policy("15")));

        assert_eq!(result.outcome, IncrementOutcome::Overflow { policy_id: 2 });
        assert_eq!(result.new_salary(), None);
    }

    #[test]
    fn test_new_salary_overflow_is_caught() {
        let mut employee = create_test_employee("1", 3);
        employee.current_salary = Decimal::MAX;

        // The increment itself fits; adding it to the salary does not.
        let result = calculate_increment(&employee, Some(&create_policy("1")));

        assert!(matches!(result.outcome, IncrementOutcome::Overflow { .. }));
    }

    #[test]
    fn test_parse_salary_accepts_numbers_and_strings() {
        assert_eq!(
            parse_salary_or_zero(Some(&json!(50000))),
            SalaryInput {
                amount: dec("50000"),
                defaulted: false
            }
        );
        assert_eq!(parse_salary_or_zero(Some(&json!(1234.5))).amount, dec("1234.5"));
        assert_eq!(parse_salary_or_zero(Some(&json!(" 42.10 "))).amount, dec("42.10"));
    }

    #[test]
    fn test_parse_salary_defaults_missing_and_garbage_to_zero() {
        for value in [None, Some(json!(null)), Some(json!("abc")), Some(json!(true))] {
            let salary = parse_salary_or_zero(value.as_ref());
            assert_eq!(salary.amount, Decimal::ZERO);
            assert!(salary.defaulted, "expected default for {:?}", value);
        }
    }

    #[test]
    fn test_defaulted_salary_gives_zero_increment() {
        let salary = parse_salary_or_zero(None);
        let mut employee = create_test_employee("1", 3);
        employee.current_salary = salary.amount;

        let result = calculate_increment(&employee, Some(&create_policy("8")));

        assert_eq!(result.increment_amount(), Some(Decimal::ZERO));
        assert_eq!(result.new_salary(), Some(Decimal::ZERO));
    }
}
