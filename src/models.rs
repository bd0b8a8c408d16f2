//! Domain records that mirror the SQLite schema and travel between the
//! importer, the persistence layer, and the driver's log output. These types
//! stay light-weight data holders so the other layers can focus on parsing
//! and persistence logic.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// A catalog course such as "CS 273". Courses exist independently of any
/// particular semester; offerings reference them by id.
pub struct Course {
    /// Primary key. Ids come from the CSV data rather than the database, so
    /// the importer inserts them verbatim instead of relying on rowid
    /// allocation.
    pub id: i64,
    /// Short subject-area code ("CS", "MATH") prefixing the course number.
    pub alpha: String,
    /// Course number kept as text: catalogs use suffixes like "273H" that do
    /// not survive an integer round-trip.
    pub number: String,
    /// Full catalog title.
    pub title: String,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.alpha, self.number, self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// An instructor who can be assigned to offerings.
pub struct Instructor {
    /// Primary key, provided by the CSV data like [`Course::id`].
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} <{}>", self.last_name, self.first_name, self.email)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One course section in one semester. The table stores only the course and
/// instructor ids; reads resolve both into the full records carried here, so
/// an `Offering` in memory is always fully hydrated.
pub struct Offering {
    /// Course Reference Number, unique across all offerings.
    pub crn: i64,
    /// Integer encoding of the academic term (e.g. 201830).
    pub semester_code: i64,
    /// The course this section belongs to.
    pub course: Course,
    /// The instructor teaching this section.
    pub instructor: Instructor,
}

impl fmt::Display for Offering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CRN {} (term {}): {} with {}",
            self.crn, self.semester_code, self.course, self.instructor
        )
    }
}
