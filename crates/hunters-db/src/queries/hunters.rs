//! Hunter database queries.
//!
//! Every value that reaches a statement is bound as a parameter, positionally
//! (`?1`) or by name (`:name`). The only text ever spliced into SQL is the
//! static identifier of a [`HunterColumn`].

use hunters_common::{Error, HunterColumn, HunterId, Result};
use rusqlite::{Connection, ErrorCode, Params, Row};

use crate::cursor::{Cursor, Execution};
use crate::models::{validate_fields, Hunter, NewHunter};

const SELECT_HUNTERS: &str = "SELECT id, name, age, unit FROM hunters";

const INSERT_POSITIONAL: &str = "INSERT INTO hunters (name, age, unit) VALUES (?1, ?2, ?3)";

const INSERT_NAMED: &str = "INSERT INTO hunters (name, age, unit) VALUES (:name, :age, :unit)";

fn row_to_hunter(row: &Row<'_>) -> rusqlite::Result<Hunter> {
    Ok(Hunter {
        id: HunterId::new(row.get(0)?),
        name: row.get(1)?,
        age: row.get(2)?,
        unit: row.get(3)?,
    })
}

// Constraint violations mean the row itself was rejected.
fn write_error(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            Error::invalid_input(e.to_string())
        }
        _ => Error::database(e.to_string()),
    }
}

fn query_hunters<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Cursor<Hunter>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| Error::database(e.to_string()))?;

    let hunters = stmt
        .query_map(params, row_to_hunter)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(Cursor::new(conn, hunters))
}

/// Insert one hunter, binding the values by position.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `name` - Hunter name, 1 to 50 characters
/// * `age` - Non-negative age
/// * `unit` - Unit name, 1 to 50 characters
///
/// # Returns
///
/// * `Ok(Execution)` - One affected row and the id assigned to it
/// * `Err(Error)` - If a value is rejected or a database error occurs
pub fn insert_positional(conn: &Connection, name: &str, age: i32, unit: &str) -> Result<Execution> {
    validate_fields(name, age, unit)?;

    let affected = conn
        .execute(INSERT_POSITIONAL, rusqlite::params![name, age, unit])
        .map_err(write_error)?;

    let execution = Execution::after(conn, affected);
    tracing::debug!(?execution, "Inserted hunter (positional)");
    Ok(execution)
}

/// Insert one hunter, binding each column by name.
///
/// # Returns
///
/// * `Ok(Execution)` - One affected row and the id assigned to it
/// * `Err(Error)` - If a value is rejected or a database error occurs
pub fn insert_named(conn: &Connection, hunter: &NewHunter) -> Result<Execution> {
    hunter.validate()?;

    let affected = conn
        .execute(
            INSERT_NAMED,
            rusqlite::named_params! {
                ":name": hunter.name,
                ":age": hunter.age,
                ":unit": hunter.unit,
            },
        )
        .map_err(write_error)?;

    let execution = Execution::after(conn, affected);
    tracing::debug!(?execution, "Inserted hunter (named)");
    Ok(execution)
}

/// Insert a batch of hunters, binding each one by column name.
///
/// The statement is prepared once and executed per row. Every row is
/// validated before the first is written.
///
/// # Returns
///
/// * `Ok(Execution)` - Total affected rows and the id of the last row
/// * `Err(Error)` - If any value is rejected or a database error occurs
pub fn insert_many_named(conn: &Connection, hunters: &[NewHunter]) -> Result<Execution> {
    for hunter in hunters {
        hunter.validate()?;
    }

    let mut stmt = conn
        .prepare(INSERT_NAMED)
        .map_err(|e| Error::database(e.to_string()))?;

    let mut affected = 0;
    for hunter in hunters {
        affected += stmt
            .execute(rusqlite::named_params! {
                ":name": hunter.name,
                ":age": hunter.age,
                ":unit": hunter.unit,
            })
            .map_err(write_error)?;
    }

    let execution = Execution::after(conn, affected);
    tracing::debug!(?execution, "Inserted {} hunters (bulk named)", hunters.len());
    Ok(execution)
}

/// Insert a batch of `(name, age, unit)` tuples, binding by position.
///
/// # Returns
///
/// * `Ok(Execution)` - Total affected rows and the id of the last row
/// * `Err(Error)` - If any value is rejected or a database error occurs
pub fn insert_many_positional(conn: &Connection, rows: &[(&str, i32, &str)]) -> Result<Execution> {
    for &(name, age, unit) in rows {
        validate_fields(name, age, unit)?;
    }

    let mut stmt = conn
        .prepare(INSERT_POSITIONAL)
        .map_err(|e| Error::database(e.to_string()))?;

    let mut affected = 0;
    for &(name, age, unit) in rows {
        affected += stmt
            .execute(rusqlite::params![name, age, unit])
            .map_err(write_error)?;
    }

    let execution = Execution::after(conn, affected);
    tracing::debug!(?execution, "Inserted {} hunters (bulk positional)", rows.len());
    Ok(execution)
}

/// Get a hunter by ID.
///
/// # Returns
///
/// * `Ok(Some(Hunter))` - The hunter if found
/// * `Ok(None)` - If no row has this id
/// * `Err(Error)` - If a database error occurs
pub fn get_by_id(conn: &Connection, id: HunterId) -> Result<Option<Hunter>> {
    let result = conn.query_row(
        &format!("{SELECT_HUNTERS} WHERE id = ?1"),
        [id.get()],
        row_to_hunter,
    );

    match result {
        Ok(hunter) => Ok(Some(hunter)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Select every hunter, ordered by id.
pub fn select_all(conn: &Connection) -> Result<Cursor<Hunter>> {
    query_hunters(conn, &format!("{SELECT_HUNTERS} ORDER BY id"), [])
}

/// Select hunters whose `column` is strictly greater than `bound`.
///
/// # Example
///
/// ```
/// use hunters_common::HunterColumn;
/// use hunters_db::{connection, queries::hunters, schema};
///
/// let conn = connection::open_in_memory().unwrap();
/// schema::ensure_hunters_table(&conn).unwrap();
/// hunters::insert_positional(&conn, "Yoruichi", 25, "Avis").unwrap();
/// hunters::insert_positional(&conn, "Ichigo", 15, "Avis").unwrap();
///
/// let adults = hunters::select_where_greater(&conn, HunterColumn::Age, 17).unwrap();
/// assert_eq!(adults.row_count(), 1);
/// ```
pub fn select_where_greater(
    conn: &Connection,
    column: HunterColumn,
    bound: i64,
) -> Result<Cursor<Hunter>> {
    let sql = format!("{SELECT_HUNTERS} WHERE {} > ?1 ORDER BY id", column.as_sql());
    query_hunters(conn, &sql, [bound])
}

/// Select hunters whose id lies in `low..=high`.
///
/// An inverted interval matches nothing.
pub fn select_id_between(conn: &Connection, low: HunterId, high: HunterId) -> Result<Cursor<Hunter>> {
    query_hunters(
        conn,
        &format!("{SELECT_HUNTERS} WHERE id BETWEEN ?1 AND ?2 ORDER BY id"),
        [low.get(), high.get()],
    )
}

/// Delete a hunter.
///
/// # Returns
///
/// * `Ok(Execution)` - `affected_rows` is 1 if the hunter was deleted, 0 if it did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_by_id(conn: &Connection, id: HunterId) -> Result<Execution> {
    let affected = conn
        .execute("DELETE FROM hunters WHERE id = ?1", [id.get()])
        .map_err(|e| Error::database(e.to_string()))?;

    let execution = Execution::after(conn, affected);
    tracing::debug!(%id, ?execution, "Deleted hunter");
    Ok(execution)
}

/// Overwrite every column except `id` of one hunter.
///
/// # Returns
///
/// * `Ok(Execution)` - `affected_rows` is 1 if the hunter was updated, 0 if it did not exist
/// * `Err(Error)` - If a value is rejected or a database error occurs
pub fn update_by_id(conn: &Connection, id: HunterId, values: &NewHunter) -> Result<Execution> {
    values.validate()?;

    let affected = conn
        .execute(
            "UPDATE hunters SET name = :name, age = :age, unit = :unit WHERE id = :id",
            rusqlite::named_params! {
                ":id": id.get(),
                ":name": values.name,
                ":age": values.age,
                ":unit": values.unit,
            },
        )
        .map_err(write_error)?;

    let execution = Execution::after(conn, affected);
    tracing::debug!(%id, ?execution, "Updated hunter");
    Ok(execution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::open_in_memory;
    use crate::schema::{ensure_hunters_table, table_exists};

    fn setup() -> Connection {
        let conn = open_in_memory().unwrap();
        ensure_hunters_table(&conn).unwrap();
        conn
    }

    fn seed_five(conn: &Connection) {
        insert_many_positional(
            conn,
            &[
                ("Yoruichi", 25, "Avis"),
                ("Ichigo", 15, "Avis"),
                ("Rukia", 150, "Thirteenth"),
                ("Byakuya", 170, "Sixth"),
                ("Kisuke", 210, "Twelfth"),
            ],
        )
        .unwrap();
    }

    fn ids(cursor: &Cursor<Hunter>) -> Vec<i64> {
        cursor.rows().iter().map(|h| h.id.get()).collect()
    }

    #[test]
    fn test_insert_positional() {
        let conn = setup();

        let execution = insert_positional(&conn, "Yoruichi", 25, "Avis").unwrap();
        assert_eq!(execution.affected_rows, 1);
        assert_eq!(execution.last_insert_id, Some(HunterId::new(1)));

        let hunter = get_by_id(&conn, HunterId::new(1)).unwrap().unwrap();
        assert_eq!(hunter.name, "Yoruichi");
        assert_eq!(hunter.age, 25);
        assert_eq!(hunter.unit, "Avis");
    }

    #[test]
    fn test_insert_named() {
        let conn = setup();

        let execution = insert_named(&conn, &NewHunter::new("Ichigo", 15, "Avis")).unwrap();
        assert_eq!(execution.affected_rows, 1);

        let id = execution.last_insert_id.unwrap();
        let hunter = get_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(hunter, NewHunter::new("Ichigo", 15, "Avis").with_id(id));
    }

    #[test]
    fn test_insert_many_named() {
        let conn = setup();
        let batch = vec![
            NewHunter::new("Rukia", 150, "Thirteenth"),
            NewHunter::new("Byakuya", 170, "Sixth"),
            NewHunter::new("Renji", 40, "Sixth"),
        ];

        let execution = insert_many_named(&conn, &batch).unwrap();
        assert_eq!(execution.affected_rows, 3);
        assert_eq!(execution.last_insert_id, Some(HunterId::new(3)));

        let all = select_all(&conn).unwrap();
        let names: Vec<_> = all.rows().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Rukia", "Byakuya", "Renji"]);
    }

    #[test]
    fn test_insert_many_empty_batch() {
        let conn = setup();
        let execution = insert_many_named(&conn, &[]).unwrap();
        assert_eq!(execution.affected_rows, 0);
        assert_eq!(execution.last_insert_id, None);
    }

    #[test]
    fn test_insert_many_rejects_before_writing() {
        let conn = setup();
        let result = insert_many_positional(&conn, &[("Kisuke", 210, "Twelfth"), ("", 1, "Avis")]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(select_all(&conn).unwrap().row_count(), 0);
    }

    #[test]
    fn test_select_all_returns_inserted_rows_in_order() {
        let conn = setup();
        let inserted = [
            NewHunter::new("Yoruichi", 25, "Avis"),
            NewHunter::new("Ichigo", 15, "Avis"),
            NewHunter::new("Rukia", 150, "Thirteenth"),
        ];
        for hunter in &inserted {
            insert_named(&conn, hunter).unwrap();
        }

        let all = select_all(&conn).unwrap();
        assert_eq!(all.row_count(), inserted.len());
        for (row, expected) in all.rows().iter().zip(&inserted) {
            assert_eq!(row.name, expected.name);
            assert_eq!(row.age, expected.age);
            assert_eq!(row.unit, expected.unit);
        }
        assert!(all.rows().windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_two_inserts_get_ids_one_and_two() {
        let conn = setup();
        insert_positional(&conn, "Yoruichi", 25, "Avis").unwrap();
        insert_positional(&conn, "Ichigo", 15, "Avis").unwrap();

        let all = select_all(&conn).unwrap();
        assert_eq!(ids(&all), vec![1, 2]);
        assert_eq!(all.rows()[0].name, "Yoruichi");
        assert_eq!(all.rows()[1].name, "Ichigo");
    }

    #[test]
    fn test_select_where_id_greater() {
        let conn = setup();
        seed_five(&conn);

        let cursor = select_where_greater(&conn, HunterColumn::Id, 1).unwrap();
        assert_eq!(ids(&cursor), vec![2, 3, 4, 5]);
        assert_eq!(cursor.result_count(), 4);
    }

    #[test]
    fn test_select_where_age_greater() {
        let conn = setup();
        seed_five(&conn);

        let cursor = select_where_greater(&conn, HunterColumn::Age, 100).unwrap();
        assert_eq!(ids(&cursor), vec![3, 4, 5]);
    }

    #[test]
    fn test_select_id_between_is_inclusive() {
        let conn = setup();
        seed_five(&conn);

        let cursor = select_id_between(&conn, HunterId::new(2), HunterId::new(4)).unwrap();
        assert_eq!(ids(&cursor), vec![2, 3, 4]);
    }

    #[test]
    fn test_select_id_between_inverted_is_empty() {
        let conn = setup();
        seed_five(&conn);

        let cursor = select_id_between(&conn, HunterId::new(4), HunterId::new(2)).unwrap();
        assert_eq!(cursor.row_count(), 0);
    }

    #[test]
    fn test_cursor_reports_last_insert_id() {
        let conn = setup();
        seed_five(&conn);

        let mut cursor = select_all(&conn).unwrap();
        assert_eq!(cursor.last_insert_id(), Some(HunterId::new(5)));
        assert_eq!(cursor.fetch_all().len(), 5);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_delete_by_id() {
        let conn = setup();
        seed_five(&conn);

        let execution = delete_by_id(&conn, HunterId::new(3)).unwrap();
        assert_eq!(execution.affected_rows, 1);

        let all = select_all(&conn).unwrap();
        assert_eq!(ids(&all), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_delete_missing_id() {
        let conn = setup();
        seed_five(&conn);

        let execution = delete_by_id(&conn, HunterId::new(99)).unwrap();
        assert_eq!(execution.affected_rows, 0);
        assert_eq!(select_all(&conn).unwrap().row_count(), 5);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let conn = setup();
        seed_five(&conn);
        delete_by_id(&conn, HunterId::new(5)).unwrap();

        let execution = insert_positional(&conn, "Renji", 40, "Sixth").unwrap();
        assert_eq!(execution.last_insert_id, Some(HunterId::new(6)));
    }

    #[test]
    fn test_update_by_id_changes_only_target() {
        let conn = setup();
        seed_five(&conn);
        let before = select_all(&conn).unwrap().into_rows();

        let values = NewHunter::new("Ichigo Kurosaki", 17, "Substitute");
        let execution = update_by_id(&conn, HunterId::new(2), &values).unwrap();
        assert_eq!(execution.affected_rows, 1);

        let after = select_all(&conn).unwrap().into_rows();
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(&after) {
            assert_eq!(old.id, new.id);
            if new.id == HunterId::new(2) {
                assert_eq!(new, &values.clone().with_id(new.id));
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_update_missing_id() {
        let conn = setup();
        let execution =
            update_by_id(&conn, HunterId::new(42), &NewHunter::new("Nobody", 1, "None")).unwrap();
        assert_eq!(execution.affected_rows, 0);
    }

    #[test]
    fn test_update_rejects_invalid_values() {
        let conn = setup();
        seed_five(&conn);

        let result = update_by_id(&conn, HunterId::new(1), &NewHunter::new("Yoruichi", -5, "Avis"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(get_by_id(&conn, HunterId::new(1)).unwrap().unwrap().age, 25);
    }

    #[test]
    fn test_constraint_violation_maps_to_invalid_input() {
        let conn = setup();
        let err = conn
            .execute("INSERT INTO hunters (name, age, unit) VALUES ('', 1, 'Avis')", [])
            .map_err(write_error)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_quoted_values_stored_literally() {
        let conn = setup();
        let hostile = [
            NewHunter::new("O'Brien", 30, "Avis"),
            NewHunter::new("; DROP TABLE hunters;", 31, "Avis"),
            NewHunter::new("Robert'); DELETE FROM hunters; --", 32, "x' OR '1'='1"),
        ];

        insert_positional(&conn, &hostile[0].name, hostile[0].age, &hostile[0].unit).unwrap();
        insert_named(&conn, &hostile[1]).unwrap();
        insert_many_named(&conn, &hostile[2..]).unwrap();

        assert!(table_exists(&conn, "hunters").unwrap());
        let all = select_all(&conn).unwrap();
        assert_eq!(all.row_count(), 3);
        for (row, expected) in all.rows().iter().zip(&hostile) {
            assert_eq!(row.name, expected.name);
            assert_eq!(row.unit, expected.unit);
        }
    }

    #[test]
    fn test_uncommitted_transaction_rolls_back() {
        let mut conn = setup();
        {
            let tx = conn.transaction().unwrap();
            insert_positional(&tx, "Yoruichi", 25, "Avis").unwrap();
            // dropped without commit
        }
        assert_eq!(select_all(&conn).unwrap().row_count(), 0);

        let tx = conn.transaction().unwrap();
        insert_positional(&tx, "Yoruichi", 25, "Avis").unwrap();
        tx.commit().unwrap();
        assert_eq!(select_all(&conn).unwrap().row_count(), 1);
    }
}
