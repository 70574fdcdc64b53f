//! Increment calculation result models.
//!
//! This module contains the per-employee [`IncrementResult`] and the batch
//! [`IncrementReport`] with its totals and audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The policy-derived part of a matched result.
///
/// Amounts are kept at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedIncrement {
    /// The matched policy.
    pub policy_id: i64,
    /// The matched policy's band label.
    pub category: String,
    /// The matched policy's range, as stored.
    pub experience_range: String,
    /// The matched policy's percentage.
    pub increment_percentage: Decimal,
    /// `current_salary * increment_percentage / 100`.
    pub increment_amount: Decimal,
    /// `current_salary + increment_amount`.
    pub new_salary: Decimal,
    /// The matched policy's eligibility text.
    pub eligibility: Option<String>,
}

/// Whether a policy covered the employee's experience.
///
/// `NoMatch` carries no amounts, so it cannot be confused with a zero
/// increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IncrementOutcome {
    /// A policy matched and the increment was computed.
    Matched(AppliedIncrement),
    /// No policy's range covers the experience.
    NoMatch,
    /// A policy matched but the amounts exceed the decimal range.
    Overflow {
        /// The matched policy.
        policy_id: i64,
    },
}

/// The increment computed for one employee.
///
/// # Example
///
/// ```
/// use increment_engine::models::{IncrementOutcome, IncrementResult};
/// use rust_decimal::Decimal;
///
/// let result = IncrementResult {
///     employee_id: "E100".to_string(),
///     employee_name: "Dev Patel".to_string(),
///     experience_years: 100,
///     current_salary: Decimal::new(70000, 0),
///     salary_defaulted: false,
///     outcome: IncrementOutcome::NoMatch,
/// };
/// assert!(!result.is_matched());
/// assert_eq!(result.increment_amount(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementResult {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// The experience used for matching.
    pub experience_years: u32,
    /// The salary the increment was computed from.
    pub current_salary: Decimal,
    /// True when the supplied salary was missing or not a number and zero
    /// was used instead.
    #[serde(default)]
    pub salary_defaulted: bool,
    /// The match outcome.
    pub outcome: IncrementOutcome,
}

impl IncrementResult {
    /// Returns true if a policy matched.
    pub fn is_matched(&self) -> bool {
        matches!(self.outcome, IncrementOutcome::Matched(_))
    }

    /// Returns the applied increment, if any.
    pub fn applied(&self) -> Option<&AppliedIncrement> {
        match &self.outcome {
            IncrementOutcome::Matched(applied) => Some(applied),
            IncrementOutcome::NoMatch | IncrementOutcome::Overflow { .. } => None,
        }
    }

    /// Returns the increment amount, or `None` when nothing matched.
    pub fn increment_amount(&self) -> Option<Decimal> {
        self.applied().map(|a| a.increment_amount)
    }

    /// Returns the new salary, or `None` when nothing matched.
    pub fn new_salary(&self) -> Option<Decimal> {
        self.applied().map(|a| a.new_salary)
    }
}

/// Amounts prepared for display, truncated to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayAmounts {
    /// Current salary, e.g. `"50000.00"`.
    pub current_salary: String,
    /// Increment amount, e.g. `"4000.00"`.
    pub increment_amount: String,
    /// New salary, e.g. `"54000.00"`.
    pub new_salary: String,
}

/// One line of an increment report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// The full-precision result.
    pub result: IncrementResult,
    /// Display strings; absent when no policy matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayAmounts>,
}

/// Aggregated totals for an increment report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Number of employees processed.
    pub employees: usize,
    /// Employees a policy matched.
    pub matched: usize,
    /// Employees without a computed increment: no match or overflow.
    pub unmatched: usize,
    /// Sum of all current salaries.
    pub total_current_salary: Decimal,
    /// Sum of all increment amounts.
    pub total_increment: Decimal,
    /// `total_current_salary + total_increment`.
    pub total_new_salary: Decimal,
}

/// A single step in the audit trace recording a matching decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data that was tolerated rather than rejected, such as a
/// policy skipped for a malformed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// One step per employee, in input order.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The result of calculating increments for a set of employees against a
/// set of policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced it.
    pub engine_version: String,
    /// One entry per employee, in input order.
    pub results: Vec<ReportEntry>,
    /// Aggregated totals.
    pub totals: ReportTotals,
    /// Audit trace of matching decisions.
    pub audit_trace: AuditTrace,
}
