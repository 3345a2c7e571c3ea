use crate::models::{Coin, Fiat};
use chrono::{DateTime, Utc};

/// Current price quote from the provider
#[derive(Debug, Clone)]
pub struct CurrentPrice {
    pub coin: Coin,
    pub fiat: Fiat,
    /// Price of one coin in the fiat currency. 0.0 when the provider
    /// response did not contain a usable number.
    pub price: f64,
    /// Timestamp when this price was fetched
    pub timestamp: DateTime<Utc>,
}

impl CurrentPrice {
    pub fn new(coin: Coin, fiat: Fiat, price: f64) -> Self {
        Self {
            coin,
            fiat,
            price,
            timestamp: Utc::now(),
        }
    }
}
