//! Demo data seeding command.
//!
//! Inserts a demo collective, user, and a couple of chores through the
//! same repositories the application uses, so the routines get exercised
//! end to end. Safe to re-run: duplicates are reported and skipped.

use chrono::NaiveDate;
use tracing::{info, warn};

use coclean_core::Email;
use coclean_web::config::CoCleanConfig;
use coclean_web::db::{
    self, ChoreRepository, CollectiveRepository, RepositoryError, UserRepository,
};
use coclean_web::models::{NewChore, NewCollective, NewUser};

use super::CommandError;

const DEMO_COLLECTIVE: &str = "Kollektivet";
const DEMO_PASSWORD: &str = "demo-password";

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the database
/// rejects an operation for a reason other than a duplicate.
pub async fn run() -> Result<(), CommandError> {
    let config = CoCleanConfig::from_env()?;
    let pool = db::create_pool(&config.database).await?;

    let collective = NewCollective {
        name: DEMO_COLLECTIVE.to_owned(),
        description: "Demo collective".to_owned(),
        school: "Oslo Met".to_owned(),
        password: DEMO_PASSWORD.to_owned(),
    };

    match CollectiveRepository::new(&pool).create(&collective).await {
        Ok(()) => info!(name = DEMO_COLLECTIVE, "Created demo collective"),
        Err(RepositoryError::Conflict(_)) => {
            warn!(name = DEMO_COLLECTIVE, "Collective already exists, skipping");
        }
        Err(err) => return Err(err.into()),
    }

    let email = Email::parse("demo@coclean.example")
        .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
    let user = NewUser {
        name: "Demo".to_owned(),
        surname: "User".to_owned(),
        email,
        password: "demo-password".to_owned(),
    };

    match UserRepository::new(&pool).create(&user).await {
        Ok(()) => info!("Created demo user"),
        Err(RepositoryError::Conflict(_)) => warn!("Demo user already exists, skipping"),
        Err(err) => return Err(err.into()),
    }

    let start_date = NaiveDate::from_ymd_opt(2026, 1, 5)
        .ok_or_else(|| RepositoryError::DataCorruption("invalid seed date".to_owned()))?;

    for (title, description, frequency_days) in [
        ("Dishes", "Empty and refill the dishwasher", 1),
        ("Trash", "Take out the bins", 3),
        ("Bathroom", "Full clean of the shared bathroom", 7),
    ] {
        let chore = NewChore {
            collective: DEMO_COLLECTIVE.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            start_date,
            frequency_days,
        };

        match ChoreRepository::new(&pool).create(&chore).await {
            Ok(()) => info!(title, "Created demo chore"),
            Err(RepositoryError::Conflict(_)) => warn!(title, "Chore already exists, skipping"),
            Err(err) => return Err(err.into()),
        }
    }

    info!("Seeding complete");
    Ok(())
}
