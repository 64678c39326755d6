use sea_orm::{DatabaseConnection, EntityTrait, ActiveModelTrait};
use uuid::Uuid;
use common::types::CardInput;
use models::card::{self, Entity as CardEntity};
use crate::card::ENTITY;
use crate::errors::ServiceError;

/// List every card in storage order.
pub async fn list_cards(db: &DatabaseConnection) -> Result<Vec<card::Model>, ServiceError> {
    let rows = CardEntity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Get a card by id.
pub async fn get_card(db: &DatabaseConnection, id: Uuid) -> Result<Option<card::Model>, ServiceError> {
    let found = CardEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Insert a card; the id is always generated here.
pub async fn create_card(db: &DatabaseConnection, input: &CardInput) -> Result<card::Model, ServiceError> {
    let created = card::create(db, input).await?;
    Ok(created)
}

/// Overwrite all mutable fields of an existing card.
pub async fn update_card(db: &DatabaseConnection, id: Uuid, input: &CardInput) -> Result<card::Model, ServiceError> {
    let current = CardEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found(ENTITY)); };
    let mut am: card::ActiveModel = existing.into();
    am.overwrite(input);
    let updated = am.update(db).await.map_err(|e| match e {
        sea_orm::DbErr::RecordNotUpdated => ServiceError::not_found(ENTITY),
        other => ServiceError::Db(other.to_string()),
    })?;
    Ok(updated)
}

/// Delete a card and hand back the row as it was before removal.
pub async fn delete_card(db: &DatabaseConnection, id: Uuid) -> Result<card::Model, ServiceError> {
    let current = CardEntity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some(existing) = current else { return Err(ServiceError::not_found(ENTITY)); };
    let res = CardEntity::delete_by_id(id).exec(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    // a concurrent delete may have won between the read and the write
    if res.rows_affected == 0 { return Err(ServiceError::not_found(ENTITY)); }
    Ok(existing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, sample_input};
    use std::collections::HashSet;

    #[tokio::test]
    async fn card_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let a = create_card(&db, &sample_input("Jane Doe")).await?;
        let found = get_card(&db, a.id).await?.unwrap();
        assert_eq!(found, a);

        let mut next = sample_input("J. Doe");
        next.cvc = "456".into();
        let updated = update_card(&db, a.id, &next).await?;
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.cardholder_name, "J. Doe");
        assert_eq!(updated.cvc, "456");
        assert_eq!(get_card(&db, a.id).await?.unwrap(), updated);

        let deleted = delete_card(&db, a.id).await?;
        assert_eq!(deleted, updated);
        let after = get_card(&db, a.id).await?;
        assert!(after.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ghost = Uuid::new_v4();

        assert!(get_card(&db, ghost).await?.is_none());
        assert!(update_card(&db, ghost, &sample_input("x")).await.unwrap_err().is_not_found());
        assert!(delete_card(&db, ghost).await.unwrap_err().is_not_found());
        assert!(list_cards(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_returns_exactly_stored_ids() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut expected = HashSet::new();
        for i in 0..5 {
            expected.insert(create_card(&db, &sample_input(&format!("holder {i}"))).await?.id);
        }
        let gone = create_card(&db, &sample_input("gone")).await?;
        delete_card(&db, gone.id).await?;

        let listed: Vec<Uuid> = list_cards(&db).await?.into_iter().map(|c| c.id).collect();
        assert_eq!(listed.len(), expected.len());
        assert_eq!(listed.into_iter().collect::<HashSet<_>>(), expected);
        Ok(())
    }

    #[tokio::test]
    async fn second_delete_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_card(&db, &sample_input("once")).await?;
        delete_card(&db, a.id).await?;
        assert!(delete_card(&db, a.id).await.unwrap_err().is_not_found());
        Ok(())
    }
}
