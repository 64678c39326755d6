use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use common::types::CardInput;

use crate::errors::ServiceError;

/// Persistence operations on card records.
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<models::card::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<models::card::Model>, ServiceError>;
    async fn create(&self, input: &CardInput) -> Result<models::card::Model, ServiceError>;
    /// Fails with `NotFound` when no row has `id`.
    async fn update(&self, id: Uuid, input: &CardInput) -> Result<models::card::Model, ServiceError>;
    /// Returns the row as it was before removal; `NotFound` when absent.
    async fn delete(&self, id: Uuid) -> Result<models::card::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCardRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCardRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CardRepository for SeaOrmCardRepository {
    async fn list(&self) -> Result<Vec<models::card::Model>, ServiceError> {
        crate::db::card_service::list_cards(&self.db).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<models::card::Model>, ServiceError> {
        crate::db::card_service::get_card(&self.db, id).await
    }

    async fn create(&self, input: &CardInput) -> Result<models::card::Model, ServiceError> {
        crate::db::card_service::create_card(&self.db, input).await
    }

    async fn update(&self, id: Uuid, input: &CardInput) -> Result<models::card::Model, ServiceError> {
        crate::db::card_service::update_card(&self.db, id, input).await
    }

    async fn delete(&self, id: Uuid) -> Result<models::card::Model, ServiceError> {
        crate::db::card_service::delete_card(&self.db, id).await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    use crate::card::ENTITY;

    #[derive(Default)]
    pub struct MockCardRepository {
        rows: Mutex<Vec<models::card::Model>>, // insertion order
    }

    impl MockCardRepository {
        pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl CardRepository for MockCardRepository {
        async fn list(&self) -> Result<Vec<models::card::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn get(&self, id: Uuid) -> Result<Option<models::card::Model>, ServiceError> {
            Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
        }

        async fn create(&self, input: &CardInput) -> Result<models::card::Model, ServiceError> {
            let row = models::card::Model {
                id: Uuid::new_v4(),
                cardholder_name: input.cardholder_name.clone(),
                card_number: input.card_number.clone(),
                expiry_month: input.expiry_month.clone(),
                expiry_year: input.expiry_year.clone(),
                cvc: input.cvc.clone(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn update(&self, id: Uuid, input: &CardInput) -> Result<models::card::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|c| c.id == id).ok_or_else(|| ServiceError::not_found(ENTITY))?;
            row.cardholder_name = input.cardholder_name.clone();
            row.card_number = input.card_number.clone();
            row.expiry_month = input.expiry_month.clone();
            row.expiry_year = input.expiry_year.clone();
            row.cvc = input.cvc.clone();
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<models::card::Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let pos = rows.iter().position(|c| c.id == id).ok_or_else(|| ServiceError::not_found(ENTITY))?;
            Ok(rows.remove(pos))
        }
    }
}
