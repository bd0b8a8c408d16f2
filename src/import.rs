//! CSV importers for the catalog data files. Each importer reads a
//! line-oriented, comma-delimited source with no header and no quoting
//! support, builds the corresponding records, and inserts them through the
//! persistence layer. Offerings reference courses and instructors by id, so
//! [`import_offerings`] must run after the other two importers have
//! populated their tables.

use std::io::BufRead;
use std::num::ParseIntError;

use rusqlite::Connection;
use thiserror::Error;
use tracing::warn;

use crate::db::{add_course, add_instructor, add_offering, get_course, get_instructor};
use crate::models::{Course, Instructor, Offering};

/// Every well-formed row in all three files carries exactly four fields.
const FIELDS_PER_ROW: usize = 4;

/// Errors that abort an import. A row with the wrong field count is not
/// among them: such rows are skipped with a warning and the import
/// continues.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading the CSV source failed.
    #[error("failed to read CSV input: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric field did not parse as an integer.
    #[error("line {line}: {field} is not an integer (got \"{value}\")")]
    Field {
        /// 1-based line number within the source.
        line: usize,
        /// Which positional field was malformed.
        field: &'static str,
        /// The offending text, already trimmed.
        value: String,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// An offering row referenced a course id with no matching row.
    #[error("line {line}: offering references unknown course {id}")]
    MissingCourse { line: usize, id: i64 },

    /// An offering row referenced an instructor id with no matching row.
    #[error("line {line}: offering references unknown instructor {id}")]
    MissingInstructor { line: usize, id: i64 },

    /// The store rejected a row, e.g. a duplicate key.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Import courses from `id,alpha,number,title` rows. Returns the number of
/// rows inserted.
pub fn import_courses(conn: &Connection, reader: impl BufRead) -> Result<usize, ImportError> {
    let mut imported = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let fields = match split_row(&line, line_no) {
            Some(fields) => fields,
            None => continue,
        };

        let course = Course {
            id: parse_int(fields[0], "id", line_no)?,
            alpha: fields[1].to_string(),
            number: fields[2].to_string(),
            title: fields[3].to_string(),
        };
        add_course(conn, &course)?;
        imported += 1;
    }

    Ok(imported)
}

/// Import instructors from `id,last_name,first_name,email` rows. Returns
/// the number of rows inserted.
pub fn import_instructors(conn: &Connection, reader: impl BufRead) -> Result<usize, ImportError> {
    let mut imported = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let fields = match split_row(&line, line_no) {
            Some(fields) => fields,
            None => continue,
        };

        let instructor = Instructor {
            id: parse_int(fields[0], "id", line_no)?,
            last_name: fields[1].to_string(),
            first_name: fields[2].to_string(),
            email: fields[3].to_string(),
        };
        add_instructor(conn, &instructor)?;
        imported += 1;
    }

    Ok(imported)
}

/// Import offerings from `crn,semester_code,course_id,instructor_id` rows,
/// resolving both references against the already-imported tables before
/// inserting. Returns the number of rows inserted.
pub fn import_offerings(conn: &Connection, reader: impl BufRead) -> Result<usize, ImportError> {
    let mut imported = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let fields = match split_row(&line, line_no) {
            Some(fields) => fields,
            None => continue,
        };

        let crn = parse_int(fields[0], "crn", line_no)?;
        let semester_code = parse_int(fields[1], "semester_code", line_no)?;
        let course_id = parse_int(fields[2], "course_id", line_no)?;
        let instructor_id = parse_int(fields[3], "instructor_id", line_no)?;

        let course = get_course(conn, course_id)?.ok_or(ImportError::MissingCourse {
            line: line_no,
            id: course_id,
        })?;
        let instructor =
            get_instructor(conn, instructor_id)?.ok_or(ImportError::MissingInstructor {
                line: line_no,
                id: instructor_id,
            })?;

        add_offering(
            conn,
            &Offering {
                crn,
                semester_code,
                course,
                instructor,
            },
        )?;
        imported += 1;
    }

    Ok(imported)
}

/// Split a row on commas and trim each field. Trailing empty fields are
/// dropped before the count check, so a row ending in a bare comma counts
/// as short. Rows without exactly four fields (blank lines included) are
/// skipped with a diagnostic so one bad line cannot sink the rest of the
/// file.
fn split_row(line: &str, line_no: usize) -> Option<[&str; FIELDS_PER_ROW]> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }

    match <[&str; FIELDS_PER_ROW]>::try_from(fields) {
        Ok(fields) => Some(fields.map(str::trim)),
        Err(_) => {
            warn!(line = line_no, content = line, "skipping malformed CSV row");
            None
        }
    }
}

/// Parse an integer field. A bad number aborts the whole import; only a
/// wrong field count is recoverable.
fn parse_int(value: &str, field: &'static str, line_no: usize) -> Result<i64, ImportError> {
    value.parse().map_err(|source| ImportError::Field {
        line: line_no,
        field,
        value: value.to_string(),
        source,
    })
}
