//! Insert, get, list, update and delete for HR policies.

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{EngineError, EngineResult};
use crate::models::{NewPolicy, Policy, PolicyUpdate};

use super::decimal_column;

const SELECT_COLUMNS: &str = "SELECT policy_id, category, experience_range, increment_percentage, eligibility FROM hr_policies";

pub(super) fn insert_policy(conn: &Connection, policy: &NewPolicy) -> EngineResult<i64> {
    conn.execute(
        "INSERT INTO hr_policies (category, experience_range, increment_percentage, eligibility)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            policy.category,
            policy.experience_range,
            policy.increment_percentage.to_string(),
            policy.eligibility,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(super) fn get_policy(conn: &Connection, policy_id: i64) -> EngineResult<Option<Policy>> {
    let policy = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE policy_id = ?1"),
            params![policy_id],
            row_to_policy,
        )
        .optional()?;
    Ok(policy)
}

pub(super) fn list_policies(conn: &Connection) -> EngineResult<Vec<Policy>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY policy_id ASC"))?;
    let policies = stmt
        .query_map([], row_to_policy)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(policies)
}

pub(super) fn update_policy(
    conn: &Connection,
    policy_id: i64,
    update: &PolicyUpdate,
) -> EngineResult<Policy> {
    let tx = conn.unchecked_transaction()?;

    let mut policy =
        get_policy(&tx, policy_id)?.ok_or(EngineError::PolicyNotFound { policy_id })?;
    policy.apply(update);

    tx.execute(
        "UPDATE hr_policies
         SET category = ?2, experience_range = ?3, increment_percentage = ?4, eligibility = ?5
         WHERE policy_id = ?1",
        params![
            policy.policy_id,
            policy.category,
            policy.experience_range,
            policy.increment_percentage.to_string(),
            policy.eligibility,
        ],
    )?;
    tx.commit()?;

    Ok(policy)
}

pub(super) fn delete_policy(conn: &Connection, policy_id: i64) -> EngineResult<()> {
    let rows = conn.execute(
        "DELETE FROM hr_policies WHERE policy_id = ?1",
        params![policy_id],
    )?;
    if rows == 0 {
        return Err(EngineError::PolicyNotFound { policy_id });
    }
    Ok(())
}

pub(super) fn count_policies(conn: &Connection) -> EngineResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM hr_policies", [], |row| row.get(0))?;
    Ok(count as usize)
}

fn row_to_policy(row: &rusqlite::Row<'_>) -> rusqlite::Result<Policy> {
    Ok(Policy {
        policy_id: row.get(0)?,
        category: row.get(1)?,
        experience_range: row.get(2)?,
        increment_percentage: decimal_column(row, 3)?,
        eligibility: row.get(4)?,
    })
}
