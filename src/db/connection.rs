use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::Connection;
use tracing::debug;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".course-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";
/// Current schema version, stamped into `PRAGMA user_version`. Bumping it
/// drops and recreates all three tables on the next open; the catalog is
/// reloaded from the bundled CSVs on every launch, so there is nothing worth
/// migrating.
const SCHEMA_VERSION: i64 = 1;

/// Resolve the absolute path to the SQLite database inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// Delete the database file if it exists. The driver calls this on every
/// launch before reimporting, so a missing file is not an error.
pub fn reset_database(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "deleted existing database file");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("failed to delete database file"),
    }
}

/// Open (creating if necessary) the database at `path`, bring the schema up
/// to the current version, and return a live connection. Foreign key
/// enforcement is switched off on the connection, so the Offerings
/// references stay declaration-only: the importer resolves them before
/// inserting, and reads report dangling ids explicitly.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    ensure_schema_at(&conn, SCHEMA_VERSION)?;
    Ok(conn)
}

/// Prepare an already-open connection: switch off foreign key enforcement
/// and create the three catalog tables if they do not exist yet, dropping
/// stale ones first when the stored schema version does not match the
/// current one.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    ensure_schema_at(conn, SCHEMA_VERSION)
}

fn ensure_schema_at(conn: &Connection, version: i64) -> Result<()> {
    // The bundled SQLite turns foreign_keys on by default; the Offerings
    // references stay declaration-only.
    conn.execute("PRAGMA foreign_keys = OFF", [])
        .context("failed to disable foreign key enforcement")?;

    let stored: i64 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("failed to read schema version")?;

    if stored != 0 && stored != version {
        // Offerings goes first; it references the other two tables.
        conn.execute_batch(
            "DROP TABLE IF EXISTS Offerings;
             DROP TABLE IF EXISTS Courses;
             DROP TABLE IF EXISTS Instructors;",
        )
        .context("failed to drop outdated tables")?;
        debug!(from = stored, to = version, "schema version changed, dropped all tables");
    }

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Courses (
            _id INTEGER PRIMARY KEY,
            alpha TEXT,
            number TEXT,
            title TEXT
        )",
        [],
    )
    .context("failed to create Courses table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Instructors (
            _id INTEGER PRIMARY KEY,
            first_name TEXT,
            last_name TEXT,
            email TEXT
        )",
        [],
    )
    .context("failed to create Instructors table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Offerings (
            crn INTEGER PRIMARY KEY,
            semester_code INTEGER,
            course_id INTEGER,
            instructor_id INTEGER,
            FOREIGN KEY(course_id) REFERENCES Courses(_id),
            FOREIGN KEY(instructor_id) REFERENCES Instructors(_id)
        )",
        [],
    )
    .context("failed to create Offerings table")?;

    conn.pragma_update(None, "user_version", version)
        .context("failed to stamp schema version")?;
    debug!(version, "schema ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .expect("should prepare table listing");
        stmt.query_map([], |row| row.get(0))
            .expect("should list tables")
            .map(|name| name.expect("should read table name"))
            .collect()
    }

    #[test]
    fn fresh_database_gets_all_three_tables() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        ensure_schema_at(&conn, 1).expect("schema creation should succeed");

        assert_eq!(table_names(&conn), ["Courses", "Instructors", "Offerings"]);

        let stored: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .expect("should read user_version");
        assert_eq!(stored, 1);
    }

    #[test]
    fn foreign_key_enforcement_is_switched_off() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        ensure_schema(&conn).expect("schema creation should succeed");

        let enforced: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(enforced, 0, "references are declaration-only");

        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("catalog.sqlite");
        let conn = open_database(&path).expect("should create database");

        let enforced: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(enforced, 0, "references are declaration-only");
    }

    #[test]
    fn reopening_at_same_version_keeps_rows() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        ensure_schema_at(&conn, 1).expect("schema creation should succeed");

        conn.execute(
            "INSERT INTO Courses (_id, alpha, number, title) VALUES (1, 'CS', '150', 'Programming')",
            [],
        )
        .expect("insert should succeed");

        ensure_schema_at(&conn, 1).expect("second run should succeed");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Courses", [], |row| row.get(0))
            .expect("should count courses");
        assert_eq!(count, 1);
    }

    #[test]
    fn version_bump_drops_and_recreates_tables() {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        ensure_schema_at(&conn, 1).expect("schema creation should succeed");

        conn.execute(
            "INSERT INTO Courses (_id, alpha, number, title) VALUES (1, 'CS', '150', 'Programming')",
            [],
        )
        .expect("insert should succeed");

        ensure_schema_at(&conn, 2).expect("upgrade should succeed");

        assert_eq!(table_names(&conn), ["Courses", "Instructors", "Offerings"]);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Courses", [], |row| row.get(0))
            .expect("should count courses");
        assert_eq!(count, 0, "upgrade recreates tables from scratch");
    }

    #[test]
    fn reset_database_tolerates_missing_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("missing.sqlite");
        reset_database(&path).expect("missing file should not be an error");
    }

    #[test]
    fn reset_database_removes_existing_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("catalog.sqlite");

        let conn = open_database(&path).expect("should create database");
        drop(conn);
        assert!(path.exists());

        reset_database(&path).expect("reset should succeed");
        assert!(!path.exists());
    }
}
