//! Catalog data shipped inside the binary. The CSV files are embedded at
//! compile time so the application needs no data directory to run; tests
//! import the same constants the driver does.

/// Courses, one `id,alpha,number,title` row per line.
pub const COURSES_CSV: &str = include_str!("assets/courses.csv");

/// Instructors, one `id,last_name,first_name,email` row per line.
pub const INSTRUCTORS_CSV: &str = include_str!("assets/instructors.csv");

/// Offerings, one `crn,semester_code,course_id,instructor_id` row per line.
pub const OFFERINGS_CSV: &str = include_str!("assets/offerings.csv");
