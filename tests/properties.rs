//! Property tests for policy matching and increment arithmetic.

use increment_engine::calculation::{
    build_report, calculate_increment, match_policy, truncate_for_display,
};
use increment_engine::models::{Employee, EmployeeSnapshot, ExperienceRange, Policy};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn policy(policy_id: i64, range: String, percentage: Decimal) -> Policy {
    Policy {
        policy_id,
        category: format!("Band {}", policy_id),
        experience_range: range,
        increment_percentage: percentage,
        eligibility: None,
    }
}

fn employee(salary: Decimal, years: u32) -> Employee {
    Employee {
        employee_id: "E001".to_string(),
        name: "Prop Test".to_string(),
        phone: None,
        address: None,
        current_salary: salary,
        experience_years: years,
    }
}

fn salary() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

proptest! {
    #[test]
    fn bounded_range_matches_iff_inside(min in 0u32..50, width in 0u32..50, years in 0u32..150) {
        let max = min + width;
        let policies = vec![policy(1, format!("{}-{} years", min, max), Decimal::ONE)];

        let matched = match_policy(years, &policies).is_some();

        prop_assert_eq!(matched, min <= years && years <= max);
    }

    #[test]
    fn open_ended_range_matches_iff_at_least_min(min in 0u32..100, years in 0u32..200) {
        let policies = vec![policy(1, format!("{}+ years", min), Decimal::ONE)];

        let matched = match_policy(years, &policies).is_some();

        prop_assert_eq!(matched, years >= min);
    }

    #[test]
    fn parsed_range_agrees_with_matcher(min in 0u32..50, width in 0u32..50, years in 0u32..150) {
        let text = format!("{}-{} years", min, min + width);
        let range: ExperienceRange = text.parse().unwrap();
        let policies = vec![policy(1, text, Decimal::ONE)];

        prop_assert_eq!(range.contains(years), match_policy(years, &policies).is_some());
    }

    #[test]
    fn earliest_covering_policy_wins(
        years in 0u32..60,
        below_first in 0u32..10,
        above_first in 0u32..10,
        below_second in 0u32..10,
        first_pct in percentage(),
        second_pct in percentage(),
    ) {
        let first = policy(
            10,
            format!("{}-{} years", years.saturating_sub(below_first), years + above_first),
            first_pct,
        );
        let second = policy(
            20,
            format!("{}+ years", years.saturating_sub(below_second)),
            second_pct,
        );
        let policies = vec![first, second];

        let matched = match_policy(years, &policies).map(|p| p.policy_id);

        prop_assert_eq!(matched, Some(10));
    }

    #[test]
    fn malformed_range_is_skipped(years in 0u32..30, garbage in "[a-z ]{0,12}") {
        let policies = vec![
            policy(1, garbage, Decimal::ONE_HUNDRED),
            policy(2, "0+ years".to_string(), Decimal::ONE),
        ];

        let matched = match_policy(years, &policies).map(|p| p.policy_id);

        prop_assert_eq!(matched, Some(2));
    }

    #[test]
    fn new_salary_minus_current_is_increment(salary in salary(), pct in percentage(), years in 0u32..40) {
        let policies = vec![policy(1, "0+ years".to_string(), pct)];
        let employee = employee(salary, years);

        let result = calculate_increment(&employee, match_policy(years, &policies));

        let increment = result.increment_amount().unwrap();
        let new_salary = result.new_salary().unwrap();
        prop_assert_eq!(new_salary - salary, increment);
    }

    #[test]
    fn zero_percentage_leaves_salary_unchanged(salary in salary(), years in 0u32..40) {
        let policies = vec![policy(1, "0+ years".to_string(), Decimal::ZERO)];
        let employee = employee(salary, years);

        let result = calculate_increment(&employee, match_policy(years, &policies));

        prop_assert_eq!(result.increment_amount(), Some(Decimal::ZERO));
        prop_assert_eq!(result.new_salary(), Some(salary));
    }

    #[test]
    fn calculation_is_idempotent(salary in salary(), pct in percentage(), years in 0u32..40) {
        let policies = vec![
            policy(1, "0-2 years".to_string(), pct),
            policy(2, "3+ years".to_string(), pct),
        ];
        let employee = employee(salary, years);

        let first = calculate_increment(&employee, match_policy(years, &policies));
        let second = calculate_increment(&employee, match_policy(years, &policies));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn reports_repeat_except_identity(salary in salary(), pct in percentage(), years in 0u32..40) {
        let policies = vec![policy(1, "2-5 years".to_string(), pct)];
        let snapshots = vec![EmployeeSnapshot::from(employee(salary, years))];

        let first = build_report(&snapshots, &policies);
        let second = build_report(&snapshots, &policies);

        prop_assert_eq!(first.results, second.results);
        prop_assert_eq!(first.totals, second.totals);
        prop_assert_ne!(first.report_id, second.report_id);
    }

    #[test]
    fn display_truncation_stays_within_a_cent(salary in salary(), pct in percentage()) {
        let amount = salary * pct / Decimal::ONE_HUNDRED;

        let shown = truncate_for_display(amount);

        prop_assert!(shown <= amount);
        prop_assert!(amount - shown < Decimal::new(1, 2));
    }
}
