use tracing::{debug, info};
use uuid::Uuid;

use common::types::{Card, CardInput};

use crate::api::CardsApi;
use crate::errors::ClientError;

/// The form bound to the UI: a blank draft (no id) or a loaded record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub id: Option<Uuid>,
    pub input: CardInput,
}

impl CardForm {
    pub fn blank() -> Self { Self::default() }

    pub fn is_draft(&self) -> bool { self.id.is_none() }
}

impl From<&Card> for CardForm {
    fn from(card: &Card) -> Self {
        Self { id: Some(card.id), input: CardInput::from(card.clone()) }
    }
}

/// List plus form. The list is only ever replaced by a fresh fetch, never patched,
/// and every fetch resets the form to a blank draft.
pub struct CardBoard<A: CardsApi> {
    api: A,
    cards: Vec<Card>,
    form: CardForm,
}

impl<A: CardsApi> CardBoard<A> {
    pub fn new(api: A) -> Self {
        Self { api, cards: Vec::new(), form: CardForm::blank() }
    }

    pub fn api(&self) -> &A { &self.api }

    pub fn cards(&self) -> &[Card] { &self.cards }

    pub fn form(&self) -> &CardForm { &self.form }

    pub fn form_mut(&mut self) -> &mut CardForm { &mut self.form }

    /// Fetch the full list and reset the form. On failure nothing changes.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let cards = self.api.list().await?;
        debug!(count = cards.len(), "cards loaded");
        self.cards = cards;
        self.form = CardForm::blank();
        Ok(())
    }

    /// Create when the form is a draft, otherwise update by the form's id;
    /// then reload. Returns what the server stored.
    pub async fn submit(&mut self) -> Result<Card, ClientError> {
        let saved = match self.form.id {
            None => self.api.add(&self.form.input).await?,
            Some(id) => self.api.update(id, &self.form.input).await?,
        };
        info!(card_id = %saved.id, "card saved");
        self.load().await?;
        Ok(saved)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<Card, ClientError> {
        let deleted = self.api.delete(id).await?;
        info!(card_id = %deleted.id, "card deleted");
        self.load().await?;
        Ok(deleted)
    }

    /// Load `card` into the form for editing, replacing whatever was there.
    pub fn populate(&mut self, card: &Card) {
        self.form = CardForm::from(card);
    }

    pub fn reset_form(&mut self) {
        self.form = CardForm::blank();
    }
}
