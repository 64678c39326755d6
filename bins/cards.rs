//! # Cards CLI
//!
//! Talks to the cards API. One-shot subcommands print JSON; `shell` opens the
//! interactive list/form.

use clap::{Args, Parser, Subcommand};
use client::api::{CardsApi, HttpCardsApi, DEFAULT_BASE_URL};
use client::board::CardBoard;
use common::types::CardInput;
use dialoguer::console::style;
use uuid::Uuid;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cards",
    version,
    about = "List, add, edit and delete payment card records",
    long_about = None
)]
pub struct CardsCli {
    #[command(subcommand)]
    pub command: Command,
    /// Base URL of the cards API
    #[arg(long, global = true, env = "CARDS_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// list every card
    List,
    /// show one card
    Show { id: Uuid },
    /// create a card
    Add(CardFields),
    /// overwrite every field of a card
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: CardFields,
    },
    /// delete a card
    Delete { id: Uuid },
    /// interactive list and form
    Shell,
}

#[derive(Args, Debug, Clone)]
pub struct CardFields {
    #[arg(long)]
    pub cardholder_name: String,
    #[arg(long)]
    pub card_number: String,
    #[arg(long)]
    pub expiry_month: String,
    #[arg(long)]
    pub expiry_year: String,
    #[arg(long)]
    pub cvc: String,
}

impl From<CardFields> for CardInput {
    fn from(f: CardFields) -> Self {
        CardInput {
            cardholder_name: f.cardholder_name,
            card_number: f.card_number,
            expiry_month: f.expiry_month,
            expiry_year: f.expiry_year,
            cvc: f.cvc,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    let cli = CardsCli::parse();
    if cli.debug {
        common::utils::logging::init_logging_default();
    }

    match run(cli.clone()).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{} {}", style("✖").red().bold(), style(e.to_string()).bold());
            if cli.debug {
                return Err(e);
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: CardsCli) -> Result<(), anyhow::Error> {
    let api = HttpCardsApi::new(cli.base_url);
    match cli.command {
        Command::List => print_json(&api.list().await?),
        Command::Show { id } => print_json(&api.get(id).await?),
        Command::Add(fields) => print_json(&api.add(&fields.into()).await?),
        Command::Update { id, fields } => print_json(&api.update(id, &fields.into()).await?),
        Command::Delete { id } => print_json(&api.delete(id).await?),
        Command::Shell => {
            let mut board = CardBoard::new(api);
            client::shell::run(&mut board).await
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
