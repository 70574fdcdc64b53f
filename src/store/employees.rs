//! Insert, get, list, update and delete for employees.

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeUpdate};

use super::decimal_column;

const SELECT_COLUMNS: &str =
    "SELECT employee_id, name, phone, address, current_salary, experience_years FROM employees";

pub(super) fn insert_employee(conn: &Connection, employee: &Employee) -> EngineResult<()> {
    let result = conn.execute(
        "INSERT INTO employees (employee_id, name, phone, address, current_salary, experience_years)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            employee.employee_id,
            employee.name,
            employee.phone,
            employee.address,
            employee.current_salary.to_string(),
            employee.experience_years,
        ],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Err(EngineError::DuplicateEmployee {
                employee_id: employee.employee_id.clone(),
            })
        }
        Err(err) => Err(err.into()),
    }
}

pub(super) fn get_employee(conn: &Connection, employee_id: &str) -> EngineResult<Option<Employee>> {
    let employee = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE employee_id = ?1"),
            params![employee_id],
            row_to_employee,
        )
        .optional()?;
    Ok(employee)
}

pub(super) fn list_employees(conn: &Connection) -> EngineResult<Vec<Employee>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY employee_id ASC"))?;
    let employees = stmt
        .query_map([], row_to_employee)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(employees)
}

pub(super) fn update_employee(
    conn: &Connection,
    employee_id: &str,
    update: &EmployeeUpdate,
) -> EngineResult<Employee> {
    let tx = conn.unchecked_transaction()?;

    let mut employee =
        get_employee(&tx, employee_id)?.ok_or_else(|| EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;
    employee.apply(update);

    tx.execute(
        "UPDATE employees
         SET name = ?2, phone = ?3, address = ?4, current_salary = ?5, experience_years = ?6
         WHERE employee_id = ?1",
        params![
            employee.employee_id,
            employee.name,
            employee.phone,
            employee.address,
            employee.current_salary.to_string(),
            employee.experience_years,
        ],
    )?;
    tx.commit()?;

    Ok(employee)
}

pub(super) fn delete_employee(conn: &Connection, employee_id: &str) -> EngineResult<()> {
    let rows = conn.execute(
        "DELETE FROM employees WHERE employee_id = ?1",
        params![employee_id],
    )?;
    if rows == 0 {
        return Err(EngineError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        });
    }
    Ok(())
}

fn row_to_employee(row: &rusqlite::Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        employee_id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        address: row.get(3)?,
        current_salary: decimal_column(row, 4)?,
        experience_years: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::error::EngineError;
    use crate::models::{Employee, EmployeeUpdate};
    use crate::store::Store;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_employee(id: &str) -> Employee {
        Employee {
            employee_id: id.to_string(),
            name: format!("Employee {}", id),
            phone: Some("555-0100".to_string()),
            address: None,
            current_salary: dec("52000.50"),
            experience_years: 4,
        }
    }

    #[test]
    fn test_insert_and_get_round_trips_exact_salary() {
        let store = Store::open_in_memory().unwrap();
        let employee = create_employee("E001");

        store.insert_employee(&employee).unwrap();
        let loaded = store.get_employee("E001").unwrap().unwrap();

        assert_eq!(loaded, employee);
        assert_eq!(loaded.current_salary.to_string(), "52000.50");
    }

    #[test]
    fn test_get_missing_employee_is_none() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_employee("nobody").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_is_conflict_not_overwrite() {
        let store = Store::open_in_memory().unwrap();
        store.insert_employee(&create_employee("E001")).unwrap();

        let mut other = create_employee("E001");
        other.name = "Someone Else".to_string();
        let err = store.insert_employee(&other).unwrap_err();

        assert!(matches!(err, EngineError::DuplicateEmployee { ref employee_id } if employee_id == "E001"));
        assert_eq!(
            store.get_employee("E001").unwrap().unwrap().name,
            "Employee E001"
        );
    }

    #[test]
    fn test_list_orders_by_id() {
        let store = Store::open_in_memory().unwrap();
        for id in ["E3", "E1", "E2"] {
            store.insert_employee(&create_employee(id)).unwrap();
        }

        let ids: Vec<String> = store
            .list_employees()
            .unwrap()
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let store = Store::open_in_memory().unwrap();
        store.insert_employee(&create_employee("E001")).unwrap();

        let update = EmployeeUpdate {
            current_salary: Some(dec("60000")),
            ..Default::default()
        };
        let updated = store.update_employee("E001", &update).unwrap();

        assert_eq!(updated.current_salary, dec("60000"));
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(store.get_employee("E001").unwrap().unwrap(), updated);
    }

    #[test]
    fn test_update_can_clear_phone() {
        let store = Store::open_in_memory().unwrap();
        store.insert_employee(&create_employee("E001")).unwrap();

        let update = EmployeeUpdate {
            phone: Some(None),
            ..Default::default()
        };
        store.update_employee("E001", &update).unwrap();

        assert_eq!(store.get_employee("E001").unwrap().unwrap().phone, None);
    }

    #[test]
    fn test_update_missing_employee_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let update = EmployeeUpdate {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_employee("nobody", &update),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_then_delete_again() {
        let store = Store::open_in_memory().unwrap();
        store.insert_employee(&create_employee("E001")).unwrap();

        store.delete_employee("E001").unwrap();
        assert!(store.get_employee("E001").unwrap().is_none());
        assert!(matches!(
            store.delete_employee("E001"),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }
}
