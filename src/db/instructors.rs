use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Instructor;

/// Insert an instructor row with the id carried in the record.
pub fn add_instructor(conn: &Connection, instructor: &Instructor) -> Result<()> {
    conn.execute(
        "INSERT INTO Instructors (_id, last_name, first_name, email) VALUES (?1, ?2, ?3, ?4)",
        params![
            instructor.id,
            instructor.last_name,
            instructor.first_name,
            instructor.email
        ],
    )
    .context("failed to insert instructor")?;
    Ok(())
}

/// Retrieve every instructor, in table-scan order.
pub fn fetch_instructors(conn: &Connection) -> Result<Vec<Instructor>> {
    let mut stmt = conn
        .prepare("SELECT _id, last_name, first_name, email FROM Instructors")
        .context("failed to prepare instructor query")?;

    let instructors = stmt
        .query_map([], |row| {
            Ok(Instructor {
                id: row.get(0)?,
                last_name: row.get(1)?,
                first_name: row.get(2)?,
                email: row.get(3)?,
            })
        })
        .context("failed to load instructors")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect instructors")?;

    Ok(instructors)
}

/// Look up a single instructor by id, `None` when no row matches.
pub fn get_instructor(conn: &Connection, id: i64) -> Result<Option<Instructor>> {
    conn.query_row(
        "SELECT _id, last_name, first_name, email FROM Instructors WHERE _id = ?1",
        params![id],
        |row| {
            Ok(Instructor {
                id: row.get(0)?,
                last_name: row.get(1)?,
                first_name: row.get(2)?,
                email: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to look up instructor")
}

/// Overwrite the non-key fields of the row matching the instructor's id.
pub fn update_instructor(conn: &Connection, instructor: &Instructor) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE Instructors SET last_name = ?1, first_name = ?2, email = ?3 WHERE _id = ?4",
            params![
                instructor.last_name,
                instructor.first_name,
                instructor.email,
                instructor.id
            ],
        )
        .context("failed to update instructor")?;

    if updated == 0 {
        Err(anyhow!("Instructor {} not found", instructor.id))
    } else {
        Ok(())
    }
}

/// Remove the row matching the instructor's id.
pub fn delete_instructor(conn: &Connection, instructor: &Instructor) -> Result<()> {
    let deleted = conn
        .execute(
            "DELETE FROM Instructors WHERE _id = ?1",
            params![instructor.id],
        )
        .context("failed to delete instructor")?;

    if deleted == 0 {
        Err(anyhow!("Instructor {} not found", instructor.id))
    } else {
        Ok(())
    }
}

/// Clear the table, returning how many rows were removed.
pub fn delete_all_instructors(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM Instructors", [])
        .context("failed to clear Instructors table")
}
