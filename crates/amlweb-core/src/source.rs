//! Transaction data sources
//!
//! The dashboard only needs "give me the full list"; [`TransactionSource`]
//! is that seam. [`HttpTransactionSource`] is the real implementation and
//! tests substitute their own.

use std::time::Duration;

use amlweb_config::Config;
use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::error::FetchError;
use crate::models::{decode_transactions, Transaction};

/// Something that can produce the complete, ordered transaction list
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch and decode every transaction
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, FetchError>;

    /// Short description used in log messages
    fn describe(&self) -> String;
}

/// Fetches the transaction list with a single plain `GET`
pub struct HttpTransactionSource {
    http_client: HttpClient,
    url: String,
}

impl HttpTransactionSource {
    /// Create a source for `url` with an optional request timeout
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let url = url.into();
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| FetchError::Network {
            url: url.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { http_client, url })
    }

    /// Create a source from the `source` section of the configuration
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.source.url.clone(), config.source_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout { url: self.url.clone() }
        } else if error.is_decode() {
            FetchError::InvalidBody {
                message: error.to_string(),
            }
        } else {
            FetchError::Network {
                url: self.url.clone(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, FetchError> {
        log::debug!("GET {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| self.map_transport_error(e))?;
        let transactions = decode_transactions(payload)?;
        log::debug!("Decoded {} transactions from {}", transactions.len(), self.url);
        Ok(transactions)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, ErrorCode};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Serve `router` on an ephemeral port and return the transactions URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/transactions", addr)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                Json(json!([
                    [1, "US dollar", "UK pounds", "USA", "UK", "Cash Deposit", 1500.5, "Not Laundering"],
                    [2, "Euro", "Yen", "Germany", "Japan", "Cross-border", 320, "Laundering"]
                ]))
            }),
        );
        let url = serve(router).await;

        let source = HttpTransactionSource::new(url.clone(), Some(Duration::from_secs(5))).unwrap();
        assert_eq!(source.describe(), url);

        let transactions = source.fetch_transactions().await.unwrap();
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, 1);
        assert_eq!(transactions[1].payment_currency, "Euro");
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let router = Router::new().route(
            "/transactions",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = serve(router).await;

        let source = HttpTransactionSource::new(url.clone(), None).unwrap();
        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err, FetchError::Status { url, status: 500 });
    }

    #[tokio::test]
    async fn test_fetch_not_json() {
        let router = Router::new().route("/transactions", get(|| async { "<html>maintenance</html>" }));
        let url = serve(router).await;

        let source = HttpTransactionSource::new(url, None).unwrap();
        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidBody);
    }

    #[tokio::test]
    async fn test_fetch_wrong_shape() {
        let router = Router::new().route("/transactions", get(|| async { Json(json!({"error": "nope"})) }));
        let url = serve(router).await;

        let source = HttpTransactionSource::new(url, None).unwrap();
        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err, FetchError::Decode(DecodeError::NotAList { found: "object" }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpTransactionSource::new(format!("http://{}/transactions", addr), None).unwrap();
        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let router = Router::new().route(
            "/transactions",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([]))
            }),
        );
        let url = serve(router).await;

        let source = HttpTransactionSource::new(url.clone(), Some(Duration::from_millis(100))).unwrap();
        let err = source.fetch_transactions().await.unwrap_err();
        assert_eq!(err, FetchError::Timeout { url });
    }

    #[test]
    fn test_from_config() {
        let config = Config::default();
        let source = HttpTransactionSource::from_config(&config).unwrap();
        assert_eq!(source.url(), "http://127.0.0.1:5000/transactions");
    }
}
