//! Create `card` table.
//! One row per payment card record, keyed by a server-assigned UUID.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Card::Table)
                    .if_not_exists()
                    .col(uuid(Card::Id).primary_key())
                    .col(string(Card::CardholderName))
                    .col(string(Card::CardNumber))
                    .col(string(Card::ExpiryMonth))
                    .col(string(Card::ExpiryYear))
                    .col(string(Card::Cvc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Card::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Card {
    Table,
    Id,
    CardholderName,
    CardNumber,
    ExpiryMonth,
    ExpiryYear,
    Cvc,
}
