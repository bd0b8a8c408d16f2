use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Course;

/// Insert a course row. Ids come from the CSV data, so the caller supplies a
/// fully populated record and a duplicate id surfaces as a constraint error.
pub fn add_course(conn: &Connection, course: &Course) -> Result<()> {
    conn.execute(
        "INSERT INTO Courses (_id, alpha, number, title) VALUES (?1, ?2, ?3, ?4)",
        params![course.id, course.alpha, course.number, course.title],
    )
    .context("failed to insert course")?;
    Ok(())
}

/// Retrieve every course. No ordering is imposed; callers that need one sort
/// the result themselves.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare("SELECT _id, alpha, number, title FROM Courses")
        .context("failed to prepare course query")?;

    let courses = stmt
        .query_map([], |row| {
            Ok(Course {
                id: row.get(0)?,
                alpha: row.get(1)?,
                number: row.get(2)?,
                title: row.get(3)?,
            })
        })
        .context("failed to load courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect courses")?;

    Ok(courses)
}

/// Look up a single course by id, returning `None` when no row matches so
/// callers can distinguish "absent" from a genuine query failure.
pub fn get_course(conn: &Connection, id: i64) -> Result<Option<Course>> {
    conn.query_row(
        "SELECT _id, alpha, number, title FROM Courses WHERE _id = ?1",
        params![id],
        |row| {
            Ok(Course {
                id: row.get(0)?,
                alpha: row.get(1)?,
                number: row.get(2)?,
                title: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to look up course")
}

/// Overwrite the non-key fields of the row matching the course's id. We
/// surface an explicit error when nothing was updated instead of silently
/// continuing.
pub fn update_course(conn: &Connection, course: &Course) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE Courses SET alpha = ?1, number = ?2, title = ?3 WHERE _id = ?4",
            params![course.alpha, course.number, course.title, course.id],
        )
        .context("failed to update course")?;

    if updated == 0 {
        Err(anyhow!("Course {} not found", course.id))
    } else {
        Ok(())
    }
}

/// Remove the row matching the course's id.
pub fn delete_course(conn: &Connection, course: &Course) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM Courses WHERE _id = ?1", params![course.id])
        .context("failed to delete course")?;

    if deleted == 0 {
        Err(anyhow!("Course {} not found", course.id))
    } else {
        Ok(())
    }
}

/// Clear the table, returning how many rows were removed.
pub fn delete_all_courses(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM Courses", [])
        .context("failed to clear Courses table")
}
