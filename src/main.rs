//! Binary entry point that glues the SQLite-backed catalog store to the CSV
//! importers. The bootstrapping pipeline is deliberately linear: reset the
//! database file, bring up the schema, import the bundled data in dependency
//! order, then log every record that was loaded.
use tracing::info;
use tracing_subscriber::EnvFilter;

use course_catalog::{
    assets, default_db_path, fetch_courses, fetch_instructors, fetch_offerings, import_courses,
    import_instructors, import_offerings, open_database, reset_database,
};

/// Rebuild the catalog database from the bundled CSVs and log its contents.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_path = default_db_path()?;
    info!(path = %db_path.display(), "rebuilding course catalog");

    // Whatever the previous run left behind is discarded; the bundled CSVs
    // are the single source of truth for the catalog.
    reset_database(&db_path)?;
    let conn = open_database(&db_path)?;

    let courses = import_courses(&conn, assets::COURSES_CSV.as_bytes())?;
    let instructors = import_instructors(&conn, assets::INSTRUCTORS_CSV.as_bytes())?;
    let offerings = import_offerings(&conn, assets::OFFERINGS_CSV.as_bytes())?;
    info!(courses, instructors, offerings, "import complete");

    for course in fetch_courses(&conn)? {
        info!("{course}");
    }
    for instructor in fetch_instructors(&conn)? {
        info!("{instructor}");
    }
    for offering in fetch_offerings(&conn)? {
        info!("{offering}");
    }

    Ok(())
}
