use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use common::types::{Card, CardInput};

use crate::errors::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// The five card calls the UI makes.
#[async_trait]
pub trait CardsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Card>, ClientError>;
    async fn get(&self, id: Uuid) -> Result<Card, ClientError>;
    async fn add(&self, input: &CardInput) -> Result<Card, ClientError>;
    async fn update(&self, id: Uuid, input: &CardInput) -> Result<Card, ClientError>;
    async fn delete(&self, id: Uuid) -> Result<Card, ClientError>;
}

/// `CardsApi` over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpCardsApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCardsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn cards_url(&self) -> String { format!("{}/api/cards", self.base_url) }

    fn card_url(&self, id: Uuid) -> String { format!("{}/api/cards/{}", self.base_url, id) }
}

async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ClientError> {
    let status = res.status();
    if status == StatusCode::NOT_FOUND {
        let body = res.text().await?;
        return Err(ClientError::NotFound(if body.is_empty() { "not found".into() } else { body }));
    }
    if !status.is_success() {
        let body = res.text().await?;
        return Err(ClientError::Status { status: status.as_u16(), body });
    }
    Ok(res.json::<T>().await?)
}

#[async_trait]
impl CardsApi for HttpCardsApi {
    async fn list(&self) -> Result<Vec<Card>, ClientError> {
        let res = self.http.get(self.cards_url()).send().await?;
        read_json(res).await
    }

    async fn get(&self, id: Uuid) -> Result<Card, ClientError> {
        let res = self.http.get(self.card_url(id)).send().await?;
        read_json(res).await
    }

    async fn add(&self, input: &CardInput) -> Result<Card, ClientError> {
        let res = self.http.post(self.cards_url()).json(input).send().await?;
        if let Some(loc) = res.headers().get(reqwest::header::LOCATION) {
            debug!(location = ?loc, "card created");
        }
        read_json(res).await
    }

    async fn update(&self, id: Uuid, input: &CardInput) -> Result<Card, ClientError> {
        let res = self.http.put(self.card_url(id)).json(input).send().await?;
        read_json(res).await
    }

    async fn delete(&self, id: Uuid) -> Result<Card, ClientError> {
        let res = self.http.delete(self.card_url(id)).send().await?;
        read_json(res).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one request with `head`, promising more body than it sends, then hangs up.
    async fn truncated_responder(head: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = sock.read(&mut buf).await;
            let reply = format!("{head}\r\nContent-Length: 64\r\nConnection: close\r\n\r\nCard not");
            let _ = sock.write_all(reply.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn cut_off_not_found_body_is_a_transport_error() {
        let base = truncated_responder("HTTP/1.1 404 Not Found").await;
        let err = HttpCardsApi::new(base).get(Uuid::nil()).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn cut_off_error_body_is_a_transport_error() {
        let base = truncated_responder("HTTP/1.1 500 Internal Server Error").await;
        let err = HttpCardsApi::new(base).list().await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)), "got {err:?}");
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let api = HttpCardsApi::new("http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.cards_url(), "http://localhost:8080/api/cards");
        let id = Uuid::nil();
        assert_eq!(api.card_url(id), format!("http://localhost:8080/api/cards/{}", id));
    }
}
