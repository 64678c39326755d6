use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::card::{repository::SeaOrmCardRepository, service::CardService};

#[derive(Clone)]
pub struct ServerState {
    pub cards: Arc<CardService<SeaOrmCardRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmCardRepository::new(db));
        Self { cards: Arc::new(CardService::new(repo)) }
    }
}
