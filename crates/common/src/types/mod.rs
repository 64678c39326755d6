use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// A stored card as it travels over the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvc: String,
}

/// Request body for create and update. Any `id` sent by the caller is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvc: String,
}

impl From<Card> for CardInput {
    fn from(card: Card) -> Self {
        Self {
            cardholder_name: card.cardholder_name,
            card_number: card.card_number,
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
            cvc: card.cvc,
        }
    }
}
