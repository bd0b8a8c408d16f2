//! Persistence module split across logical submodules: connection and schema
//! lifecycle in one place, one query module per entity kind.

mod connection;
mod courses;
mod instructors;
mod offerings;

pub use connection::{default_db_path, ensure_schema, open_database, reset_database};
pub use courses::{
    add_course, delete_all_courses, delete_course, fetch_courses, get_course, update_course,
};
pub use instructors::{
    add_instructor, delete_all_instructors, delete_instructor, fetch_instructors, get_instructor,
    update_instructor,
};
pub use offerings::{
    add_offering, delete_all_offerings, delete_offering, fetch_offerings, get_offering,
    update_offering,
};
