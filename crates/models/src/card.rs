use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use common::types::{Card, CardInput};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "card")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvc: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Card {
    fn from(m: Model) -> Self {
        Card {
            id: m.id,
            cardholder_name: m.cardholder_name,
            card_number: m.card_number,
            expiry_month: m.expiry_month,
            expiry_year: m.expiry_year,
            cvc: m.cvc,
        }
    }
}

impl ActiveModel {
    /// Overwrite every mutable column from `input`; the id is left alone.
    pub fn overwrite(&mut self, input: &CardInput) {
        self.cardholder_name = Set(input.cardholder_name.clone());
        self.card_number = Set(input.card_number.clone());
        self.expiry_month = Set(input.expiry_month.clone());
        self.expiry_year = Set(input.expiry_year.clone());
        self.cvc = Set(input.cvc.clone());
    }
}

/// Insert a new card under a freshly generated id.
pub async fn create<C: ConnectionTrait>(db: &C, input: &CardInput) -> Result<Model, errors::ModelError> {
    let mut am = ActiveModel { id: Set(Uuid::new_v4()), ..Default::default() };
    am.overwrite(input);
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
