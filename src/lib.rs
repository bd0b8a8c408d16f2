//! Core library surface for the course catalog loader.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces:
//! embedded CSV data, the SQLite persistence layer, and the importers that
//! connect the two.
pub mod assets;
pub mod db;
pub mod import;
pub mod models;

/// Convenience re-exports for the persistence layer. These functions are
/// typically used by `main.rs` to initialize the embedded SQLite store and
/// read back what the importers loaded.
pub use db::{
    default_db_path, fetch_courses, fetch_instructors, fetch_offerings, open_database,
    reset_database,
};

/// The importers that turn bundled CSV data into store rows.
pub use import::{import_courses, import_instructors, import_offerings, ImportError};

/// The three record types the other layers manipulate.
pub use models::{Course, Instructor, Offering};
