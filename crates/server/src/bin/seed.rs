//! Loads the sample college data into the database named by `DATABASE_URL`.

use database::{db::connect_from_env, seed::seed};
use migration::{Migrator, MigratorTrait};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Seeding failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = connect_from_env().await?;
    Migrator::up(&db, None).await?;

    let summary = seed(&db).await?;
    log::info!(
        "Seeded {} students, {} faculty, {} courses, {} enrollments and {} teaching assignments",
        summary.students,
        summary.faculty,
        summary.courses,
        summary.enrollments,
        summary.teachings
    );

    Ok(())
}
