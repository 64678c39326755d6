use axum::extract::Request;
use axum::ServiceExt;
use tokio::net::TcpListener;
use uuid::Uuid;

use client::api::{CardsApi, HttpCardsApi};
use client::board::CardBoard;
use common::types::CardInput;
use models::db::DatabaseConfig;
use server::{routes, startup, state::ServerState};

async fn start_server() -> anyhow::Result<String> {
    let db = startup::prepare_database(&DatabaseConfig::with_url("sqlite::memory:")).await?;
    let app = routes::build_app(ServerState::new(db), startup::build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(format!("http://{}/", addr))
}

fn jane() -> CardInput {
    CardInput {
        cardholder_name: "Jane Doe".into(),
        card_number: "4111111111111111".into(),
        expiry_month: "12".into(),
        expiry_year: "2030".into(),
        cvc: "123".into(),
    }
}

#[tokio::test]
async fn http_api_round_trip() -> anyhow::Result<()> {
    let api = HttpCardsApi::new(start_server().await?);

    assert!(api.list().await?.is_empty());
    let created = api.add(&jane()).await?;
    assert_eq!(CardInput::from(created.clone()), jane());
    assert_eq!(api.get(created.id).await?, created);

    let mut next = jane();
    next.cardholder_name = "J. Doe".into();
    let updated = api.update(created.id, &next).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.cardholder_name, "J. Doe");

    assert_eq!(api.delete(created.id).await?, updated);
    let err = api.get(created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Card not found");
    Ok(())
}

#[tokio::test]
async fn http_api_unknown_ids() -> anyhow::Result<()> {
    let api = HttpCardsApi::new(start_server().await?);
    let ghost = Uuid::new_v4();
    assert!(api.update(ghost, &jane()).await.unwrap_err().is_not_found());
    assert!(api.delete(ghost).await.unwrap_err().is_not_found());
    Ok(())
}

#[tokio::test]
async fn board_drives_real_server() -> anyhow::Result<()> {
    let mut board = CardBoard::new(HttpCardsApi::new(start_server().await?));
    board.load().await?;
    assert!(board.cards().is_empty());

    board.form_mut().input = jane();
    let created = board.submit().await?;
    assert_eq!(board.cards().len(), 1);
    assert!(board.form().is_draft());

    board.populate(&created);
    board.form_mut().input.expiry_year = "2032".into();
    board.submit().await?;
    assert_eq!(board.cards()[0].expiry_year, "2032");
    assert_eq!(board.cards()[0].id, created.id);

    board.delete(created.id).await?;
    assert!(board.cards().is_empty());
    Ok(())
}
