#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh, migrated in-memory database private to the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig::with_url("sqlite::memory:");
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn sample_input(name: &str) -> common::types::CardInput {
    common::types::CardInput {
        cardholder_name: name.into(),
        card_number: "4111111111111111".into(),
        expiry_month: "12".into(),
        expiry_year: "2030".into(),
        cvc: "123".into(),
    }
}
