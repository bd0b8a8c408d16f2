use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Offering;

use super::courses::get_course;
use super::instructors::get_instructor;

/// Raw Offerings row before the course and instructor references are
/// resolved into full records.
struct OfferingRow {
    crn: i64,
    semester_code: i64,
    course_id: i64,
    instructor_id: i64,
}

impl OfferingRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(OfferingRow {
            crn: row.get(0)?,
            semester_code: row.get(1)?,
            course_id: row.get(2)?,
            instructor_id: row.get(3)?,
        })
    }
}

/// Insert an offering row. Only the course and instructor ids are persisted;
/// the embedded records are the caller's hydrated view.
pub fn add_offering(conn: &Connection, offering: &Offering) -> Result<()> {
    conn.execute(
        "INSERT INTO Offerings (crn, semester_code, course_id, instructor_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            offering.crn,
            offering.semester_code,
            offering.course.id,
            offering.instructor.id
        ],
    )
    .context("failed to insert offering")?;
    Ok(())
}

/// Retrieve every offering with its course and instructor resolved. Each row
/// costs two extra point lookups, which is fine at classroom data volumes; a
/// dangling reference turns the whole read into an error naming the missing
/// row.
pub fn fetch_offerings(conn: &Connection) -> Result<Vec<Offering>> {
    let mut stmt = conn
        .prepare("SELECT crn, semester_code, course_id, instructor_id FROM Offerings")
        .context("failed to prepare offering query")?;

    let rows = stmt
        .query_map([], OfferingRow::from_row)
        .context("failed to load offerings")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect offerings")?;

    let mut offerings = Vec::with_capacity(rows.len());
    for row in rows {
        offerings.push(resolve(conn, row)?);
    }

    Ok(offerings)
}

/// Look up a single offering by CRN, resolving its references. Returns
/// `None` when no row matches.
pub fn get_offering(conn: &Connection, crn: i64) -> Result<Option<Offering>> {
    let row = conn
        .query_row(
            "SELECT crn, semester_code, course_id, instructor_id FROM Offerings WHERE crn = ?1",
            params![crn],
            OfferingRow::from_row,
        )
        .optional()
        .context("failed to look up offering")?;

    match row {
        Some(row) => Ok(Some(resolve(conn, row)?)),
        None => Ok(None),
    }
}

/// Overwrite the non-key fields of the row matching the offering's CRN.
pub fn update_offering(conn: &Connection, offering: &Offering) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE Offerings SET semester_code = ?1, course_id = ?2, instructor_id = ?3
             WHERE crn = ?4",
            params![
                offering.semester_code,
                offering.course.id,
                offering.instructor.id,
                offering.crn
            ],
        )
        .context("failed to update offering")?;

    if updated == 0 {
        Err(anyhow!("Offering {} not found", offering.crn))
    } else {
        Ok(())
    }
}

/// Remove the row matching the offering's CRN.
pub fn delete_offering(conn: &Connection, offering: &Offering) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM Offerings WHERE crn = ?1", params![offering.crn])
        .context("failed to delete offering")?;

    if deleted == 0 {
        Err(anyhow!("Offering {} not found", offering.crn))
    } else {
        Ok(())
    }
}

/// Clear the table, returning how many rows were removed.
pub fn delete_all_offerings(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM Offerings", [])
        .context("failed to clear Offerings table")
}

/// Hydrate a raw row by looking up its course and instructor.
fn resolve(conn: &Connection, row: OfferingRow) -> Result<Offering> {
    let course = get_course(conn, row.course_id)?.ok_or_else(|| {
        anyhow!(
            "Course {} referenced by offering {} does not exist",
            row.course_id,
            row.crn
        )
    })?;
    let instructor = get_instructor(conn, row.instructor_id)?.ok_or_else(|| {
        anyhow!(
            "Instructor {} referenced by offering {} does not exist",
            row.instructor_id,
            row.crn
        )
    })?;

    Ok(Offering {
        crn: row.crn,
        semester_code: row.semester_code,
        course,
        instructor,
    })
}
