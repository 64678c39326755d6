//! Interactive terminal form over [`CardBoard`].

use dialoguer::{console::style, theme::ColorfulTheme, Confirm, Input, Select};

use common::types::Card;

use crate::api::CardsApi;
use crate::board::{CardBoard, CardForm};

const ACTIONS: [&str; 5] = ["Add card", "Edit card", "Delete card", "Refresh", "Quit"];

/// One line per card for the list view.
pub fn render_row(card: &Card) -> String {
    format!(
        "{}  {:<24} {:<20} {}/{}  cvc {}",
        card.id, card.cardholder_name, card.card_number, card.expiry_month, card.expiry_year, card.cvc
    )
}

pub fn render_list(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(no cards)".to_string();
    }
    cards.iter().map(render_row).collect::<Vec<_>>().join("\n")
}

/// Run the list/form loop until the user quits. Request failures are printed
/// and the loop carries on with whatever state the board still holds.
pub async fn run<A: CardsApi>(board: &mut CardBoard<A>) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    report(board.load().await);

    loop {
        println!("\n{}\n{}", style("Cards").bold(), render_list(board.cards()));

        let choice = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => {
                board.reset_form();
                edit_form(&theme, board.form_mut())?;
                report(board.submit().await.map(|_| ()));
            }
            Some(1) => {
                let Some(card) = pick(&theme, board.cards(), "Edit which card?")? else { continue };
                board.populate(&card);
                edit_form(&theme, board.form_mut())?;
                report(board.submit().await.map(|_| ()));
            }
            Some(2) => {
                let Some(card) = pick(&theme, board.cards(), "Delete which card?")? else { continue };
                let sure = Confirm::with_theme(&theme)
                    .with_prompt(format!("Delete card of {}?", card.cardholder_name))
                    .default(false)
                    .interact()?;
                if sure {
                    report(board.delete(card.id).await.map(|_| ()));
                }
            }
            Some(3) => report(board.load().await),
            _ => return Ok(()),
        }
    }
}

fn report<E: std::fmt::Display>(res: Result<(), E>) {
    if let Err(e) = res {
        eprintln!("{} {}", style("✖").red().bold(), style(e.to_string()).bold());
    }
}

fn pick(theme: &ColorfulTheme, cards: &[Card], prompt: &str) -> anyhow::Result<Option<Card>> {
    if cards.is_empty() {
        println!("no cards yet");
        return Ok(None);
    }
    let rows: Vec<String> = cards.iter().map(render_row).collect();
    let idx = Select::with_theme(theme).with_prompt(prompt).items(&rows).default(0).interact_opt()?;
    Ok(idx.and_then(|i| cards.get(i).cloned()))
}

/// Prompt for every field, pre-filled with the form's current values.
fn edit_form(theme: &ColorfulTheme, form: &mut CardForm) -> anyhow::Result<()> {
    let heading = match form.id {
        Some(id) => format!("Editing {}", id),
        None => "New card".to_string(),
    };
    println!("{}", style(heading).cyan());

    let input = &mut form.input;
    input.cardholder_name = field(theme, "Cardholder name", &input.cardholder_name)?;
    input.card_number = field(theme, "Card number", &input.card_number)?;
    input.expiry_month = field(theme, "Expiry month", &input.expiry_month)?;
    input.expiry_year = field(theme, "Expiry year", &input.expiry_year)?;
    input.cvc = field(theme, "CVC", &input.cvc)?;
    Ok(())
}

fn field(theme: &ColorfulTheme, prompt: &str, current: &str) -> anyhow::Result<String> {
    let value = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}
