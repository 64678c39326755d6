use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, debug, instrument};

use common::types::CardInput;

use super::ENTITY;
use crate::errors::ServiceError;
use crate::card::repository::CardRepository;

/// Card application service, independent of the web framework.
pub struct CardService<R: CardRepository> {
    repo: Arc<R>,
}

impl<R: CardRepository> CardService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All cards, storage order. Empty when nothing is stored.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<models::card::Model>, ServiceError> {
        let cards = self.repo.list().await?;
        debug!(count = cards.len(), "cards_listed");
        Ok(cards)
    }

    /// Fetch one card.
    ///
    /// # Examples
    /// ```
    /// use service::card::{service::CardService, repository::mock::MockCardRepository};
    /// use std::sync::Arc;
    /// let svc = CardService::new(Arc::new(MockCardRepository::default()));
    /// let err = tokio_test::block_on(svc.get(uuid::Uuid::new_v4())).unwrap_err();
    /// assert_eq!(err.to_string(), "Card not found");
    /// ```
    #[instrument(skip(self), fields(card_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<models::card::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found(ENTITY))
    }

    /// Store a new card under a server-generated id.
    ///
    /// # Examples
    /// ```
    /// use service::card::{service::CardService, repository::mock::MockCardRepository};
    /// use common::types::CardInput;
    /// use std::sync::Arc;
    /// let svc = CardService::new(Arc::new(MockCardRepository::default()));
    /// let input = CardInput { cardholder_name: "Jane Doe".into(), card_number: "4111111111111111".into(), expiry_month: "12".into(), expiry_year: "2030".into(), cvc: "123".into() };
    /// let card = tokio_test::block_on(svc.create(&input)).unwrap();
    /// assert!(!card.id.is_nil());
    /// assert_eq!(card.cardholder_name, "Jane Doe");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &CardInput) -> Result<models::card::Model, ServiceError> {
        let card = self.repo.create(input).await?;
        info!(card_id = %card.id, "card_created");
        Ok(card)
    }

    /// Overwrite every mutable field. Nothing is written when the id is unknown.
    #[instrument(skip(self, input), fields(card_id = %id))]
    pub async fn update(&self, id: Uuid, input: &CardInput) -> Result<models::card::Model, ServiceError> {
        let card = self.repo.update(id, input).await?;
        info!(card_id = %card.id, "card_updated");
        Ok(card)
    }

    /// Hard delete; returns the record as it was.
    #[instrument(skip(self), fields(card_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<models::card::Model, ServiceError> {
        let card = self.repo.delete(id).await?;
        info!(card_id = %card.id, "card_deleted");
        Ok(card)
    }
}
