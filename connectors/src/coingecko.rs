use crate::{ConnectorConfig, PriceConnector};
use async_trait::async_trait;
use common::{
    models::{Coin, CurrentPrice, Fiat},
    Error, Result,
};
use reqwest::redirect::Policy;
use serde_json::Value;
use tracing::{debug, error, warn};

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

const MAX_REDIRECTS: usize = 10;

/// Build the simple price query for one coin/fiat pair.
///
/// Both parts come from the fixed coin and fiat tables, so nothing needs
/// escaping.
pub fn price_url(base_url: &str, coin: Coin, fiat: Fiat) -> String {
    format!(
        "{}/simple/price?ids={}&vs_currencies={}",
        base_url,
        coin.id(),
        fiat.code()
    )
}

/// Look up `root[coin id][fiat code]` in a simple price response.
pub fn lookup_price(body: &str, coin: Coin, fiat: Fiat) -> Result<f64> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| Error::ParseError(format!("Failed to parse CoinGecko response: {}", e)))?;

    let quote = root
        .get(coin.id())
        .ok_or_else(|| Error::NotFound(format!("No \"{}\" entry in response", coin.id())))?;

    let value = quote.get(fiat.code()).ok_or_else(|| {
        Error::NotFound(format!("No \"{}\" price for \"{}\"", fiat.code(), coin.id()))
    })?;

    value
        .as_f64()
        .ok_or_else(|| Error::ParseError(format!("Price is not a number: {}", value)))
}

/// Same as [`lookup_price`], but any failure yields a price of 0.0.
///
/// The reason is only visible at debug level; callers print whatever comes
/// back.
pub fn extract_price(body: &str, coin: Coin, fiat: Fiat) -> f64 {
    match lookup_price(body, coin, fiat) {
        Ok(price) => price,
        Err(e) => {
            debug!("Using price 0.0 for {}/{}: {}", coin, fiat, e);
            0.0
        }
    }
}

pub struct CoinGeckoConnector {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoConnector {
    pub fn new(config: ConnectorConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url,
        })
    }

    /// GET `url` and return the body as text.
    ///
    /// Transport failures are logged and whatever was received before the
    /// failure is returned, possibly an empty string. Non-2xx responses are
    /// not treated as failures.
    pub async fn fetch_text(&self, url: &str) -> String {
        debug!("Fetching CoinGecko price: {}", url);

        let mut response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("CoinGecko request failed: {}", e);
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("CoinGecko responded with {} for {}", status, url);
        }

        let mut buf = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    error!(
                        "Failed to read CoinGecko response after {} bytes: {}",
                        buf.len(),
                        e
                    );
                    break;
                }
            }
        }

        debug!("Received {} bytes from CoinGecko", buf.len());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[async_trait]
impl PriceConnector for CoinGeckoConnector {
    async fn get_current_price(&self, coin: Coin, fiat: Fiat) -> Result<CurrentPrice> {
        let url = price_url(&self.base_url, coin, fiat);
        let body = self.fetch_text(&url).await;
        let price = extract_price(&body, coin, fiat);

        Ok(CurrentPrice::new(coin, fiat, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn http_response(status: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
            status,
            body.len(),
            extra_headers,
            body
        )
    }

    /// Serve `responses` to consecutive connections and hand back the raw
    /// request heads that were received.
    async fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                requests.push(String::from_utf8_lossy(&head).into_owned());
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            requests
        });

        (base_url, handle)
    }

    fn connector(base_url: &str) -> CoinGeckoConnector {
        CoinGeckoConnector::new(ConnectorConfig {
            base_url: base_url.to_string(),
            ..ConnectorConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_price_url_for_every_pair() {
        let expected = [
            (Coin::Btc, "bitcoin"),
            (Coin::Xmr, "monero"),
            (Coin::Ltc, "litecoin"),
            (Coin::Eth, "ethereum"),
        ];

        for (coin, id) in expected {
            for fiat in Fiat::ALL {
                assert_eq!(
                    price_url(COINGECKO_API_URL, coin, fiat),
                    format!(
                        "https://api.coingecko.com/api/v3/simple/price?ids={}&vs_currencies={}",
                        id,
                        fiat.code()
                    )
                );
            }
        }

        assert_eq!(
            price_url(COINGECKO_API_URL, Coin::Xmr, Fiat::Gbp),
            "https://api.coingecko.com/api/v3/simple/price?ids=monero&vs_currencies=gbp"
        );
    }

    #[test]
    fn test_extract_price() {
        let body = r#"{"bitcoin":{"usd":43123.5}}"#;
        assert_eq!(extract_price(body, Coin::Btc, Fiat::Usd), 43123.5);

        let body = r#"{"monero":{"gbp":142}}"#;
        assert_eq!(extract_price(body, Coin::Xmr, Fiat::Gbp), 142.0);
    }

    #[test]
    fn test_extract_price_defaults_to_zero() {
        let cases = [
            "",
            "not json",
            r#"{"bitcoin":{"usd":43123.5}"#,
            r#"{"ethereum":{"usd":2300.1}}"#,
            r#"{"bitcoin":{"eur":39000.0}}"#,
            r#"{"bitcoin":{"usd":"43123.5"}}"#,
            r#"{"bitcoin":null}"#,
            r#"{"error":"coin not found"}"#,
        ];

        for body in cases {
            assert_eq!(extract_price(body, Coin::Btc, Fiat::Usd), 0.0, "body: {body}");
        }
    }

    #[test]
    fn test_lookup_price_reports_why() {
        assert!(matches!(
            lookup_price("<html>", Coin::Btc, Fiat::Usd),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            lookup_price("{}", Coin::Btc, Fiat::Usd),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            lookup_price(r#"{"bitcoin":{"usd":true}}"#, Coin::Btc, Fiat::Usd),
            Err(Error::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_get_current_price_from_server() {
        let (base_url, server) = serve(vec![http_response(
            "200 OK",
            "",
            r#"{"litecoin":{"eur":61.25}}"#,
        )])
        .await;

        let quote = connector(&base_url)
            .get_current_price(Coin::Ltc, Fiat::Eur)
            .await
            .unwrap();
        assert_eq!(quote.price, 61.25);
        assert_eq!(quote.coin, Coin::Ltc);
        assert_eq!(quote.fiat, Fiat::Eur);

        let requests = server.await.unwrap();
        assert!(requests[0]
            .starts_with("GET /simple/price?ids=litecoin&vs_currencies=eur HTTP/1.1\r\n"));
        assert!(requests[0]
            .to_ascii_lowercase()
            .contains(&format!("user-agent: {}", crate::config::DEFAULT_USER_AGENT)));
    }

    #[tokio::test]
    async fn test_redirects_are_followed() {
        let (base_url, server) = serve(vec![
            http_response("302 Found", "Location: /moved\r\n", ""),
            http_response("200 OK", "", r#"{"ethereum":{"usd":2500.0}}"#),
        ])
        .await;

        let quote = connector(&base_url)
            .get_current_price(Coin::Eth, Fiat::Usd)
            .await
            .unwrap();
        assert_eq!(quote.price, 2500.0);

        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].starts_with("GET /moved HTTP/1.1\r\n"));
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_returned() {
        let body = r#"{"status":{"error_code":429,"error_message":"rate limited"}}"#;
        let (base_url, server) =
            serve(vec![http_response("429 Too Many Requests", "", body)]).await;

        let connector = connector(&base_url);
        let text = connector.fetch_text(&format!("{}/simple/price", base_url)).await;
        assert_eq!(text, body);
        assert_eq!(extract_price(&text, Coin::Btc, Fiat::Usd), 0.0);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_truncated_body_keeps_received_bytes() {
        let sent = r#"{"bitcoin":{"usd":4"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            sent.len() + 64,
            sent
        );
        let (base_url, server) = serve(vec![response]).await;

        let connector = connector(&base_url);
        let text = connector.fetch_text(&format!("{}/simple/price", base_url)).await;
        assert_eq!(text, sent);
        assert_eq!(extract_price(&text, Coin::Btc, Fiat::Usd), 0.0);

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_failure_yields_zero_price() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let connector = connector(&base_url);
        assert_eq!(connector.fetch_text(&base_url).await, "");

        let quote = connector
            .get_current_price(Coin::Btc, Fiat::Gbp)
            .await
            .unwrap();
        assert_eq!(quote.price, 0.0);
    }
}
