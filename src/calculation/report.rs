//! Batch increment reports.
//!
//! Runs the matcher and calculator over every employee in a snapshot and
//! gathers the results, totals and an audit trace. Policies are compiled
//! once; each one skipped for a malformed range, and each defaulted salary,
//! becomes a warning.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EmployeeSnapshot, IncrementOutcome, IncrementReport,
    IncrementResult, Policy, ReportEntry, ReportTotals,
};

use super::display::display_amounts;
use super::increment::calculate_increment;
use super::policy_match::{PolicyBand, compile_policies};

/// The version string stamped on every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculates increments for every employee and assembles a report.
///
/// Results are in the same order as `employees`. Policies are matched in
/// the order given.
pub fn build_report(employees: &[EmployeeSnapshot], policies: &[Policy]) -> IncrementReport {
    let start_time = Instant::now();
    let compiled = compile_policies(policies);

    let mut warnings: Vec<AuditWarning> = compiled
        .skipped
        .iter()
        .map(|skipped| AuditWarning {
            code: "MALFORMED_RANGE".to_string(),
            message: format!(
                "Policy {} ('{}') skipped: {}",
                skipped.policy.policy_id, skipped.policy.category, skipped.reason
            ),
            severity: "medium".to_string(),
        })
        .collect();

    let mut results = Vec::with_capacity(employees.len());
    let mut steps = Vec::with_capacity(employees.len());
    let mut step_number: u32 = 1;

    for snapshot in employees {
        let employee = &snapshot.employee;
        let band = compiled.find(employee.experience_years);

        let mut result = calculate_increment(employee, band.map(|b| b.policy));
        result.salary_defaulted = snapshot.salary_defaulted;

        if snapshot.salary_defaulted {
            warnings.push(AuditWarning {
                code: "INVALID_SALARY".to_string(),
                message: format!(
                    "Employee {} has a missing or non-numeric salary; 0 was used",
                    employee.employee_id
                ),
                severity: "high".to_string(),
            });
        }

        if let IncrementOutcome::Overflow { policy_id } = result.outcome {
            warnings.push(AuditWarning {
                code: "AMOUNT_OVERFLOW".to_string(),
                message: format!(
                    "Increment for employee {} under policy {} exceeds the supported range",
                    employee.employee_id, policy_id
                ),
                severity: "high".to_string(),
            });
        }

        steps.push(match_audit_step(&result, band, step_number));
        step_number += 1;

        let display = display_amounts(&result);
        results.push(ReportEntry { result, display });
    }

    let totals = summarize(&results).unwrap_or_else(|partial| {
        warnings.push(AuditWarning {
            code: "TOTAL_OVERFLOW".to_string(),
            message: "Report totals exceed the supported range and are capped".to_string(),
            severity: "high".to_string(),
        });
        partial
    });

    IncrementReport {
        report_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        results,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}

/// Records which band was chosen for one employee and what it produced.
fn match_audit_step(
    result: &IncrementResult,
    band: Option<&PolicyBand<'_>>,
    step_number: u32,
) -> AuditStep {
    let input = serde_json::json!({
        "employee_id": result.employee_id,
        "experience_years": result.experience_years,
        "current_salary": result.current_salary.to_string()
    });

    match (&result.outcome, band) {
        (IncrementOutcome::Matched(applied), Some(band)) => AuditStep {
            step_number,
            rule_id: "policy_match".to_string(),
            rule_name: "Policy Match".to_string(),
            input,
            output: serde_json::json!({
                "policy_id": applied.policy_id,
                "experience_range": band.range.to_string(),
                "increment_percentage": applied.increment_percentage.normalize().to_string(),
                "increment_amount": applied.increment_amount.normalize().to_string(),
                "new_salary": applied.new_salary.normalize().to_string()
            }),
            reasoning: format!(
                "{} years falls in {} ({}); {} x {}% = {}",
                result.experience_years,
                band.range,
                applied.category,
                result.current_salary.normalize(),
                applied.increment_percentage.normalize(),
                applied.increment_amount.normalize()
            ),
        },
        (IncrementOutcome::Overflow { policy_id }, _) => AuditStep {
            step_number,
            rule_id: "policy_match".to_string(),
            rule_name: "Policy Match".to_string(),
            input,
            output: serde_json::json!({ "policy_id": policy_id, "overflow": true }),
            reasoning: format!(
                "{} years matched policy {}, but the increment overflows",
                result.experience_years, policy_id
            ),
        },
        _ => AuditStep {
            step_number,
            rule_id: "policy_match".to_string(),
            rule_name: "Policy Match".to_string(),
            input,
            output: serde_json::json!({ "policy_id": null }),
            reasoning: format!(
                "No policy covers {} years of experience",
                result.experience_years
            ),
        },
    }
}

/// Sums the report totals.
///
/// On overflow the sums saturate and are returned as `Err`.
fn summarize(entries: &[ReportEntry]) -> Result<ReportTotals, ReportTotals> {
    let matched = entries.iter().filter(|e| e.result.is_matched()).count();
    let mut overflowed = false;
    let mut add = |total: Decimal, amount: Decimal| {
        total.checked_add(amount).unwrap_or_else(|| {
            overflowed = true;
            total.saturating_add(amount)
        })
    };

    let total_current_salary = entries
        .iter()
        .map(|e| e.result.current_salary)
        .fold(Decimal::ZERO, &mut add);
    let total_increment = entries
        .iter()
        .filter_map(|e| e.result.increment_amount())
        .fold(Decimal::ZERO, &mut add);
    let total_new_salary = add(total_current_salary, total_increment);

    let totals = ReportTotals {
        employees: entries.len(),
        matched,
        unmatched: entries.len() - matched,
        total_current_salary,
        total_increment,
        total_new_salary,
    };
    if overflowed { Err(totals) } else { Ok(totals) }
}
