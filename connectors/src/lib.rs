pub mod coingecko;
pub mod config;

pub use coingecko::CoinGeckoConnector;
pub use config::ConnectorConfig;

use async_trait::async_trait;
use common::{
    models::{Coin, CurrentPrice, Fiat},
    Result,
};

/// Trait defining the interface for price providers
#[async_trait]
pub trait PriceConnector: Send + Sync {
    /// Get the current price of one coin in the given fiat currency
    async fn get_current_price(&self, coin: Coin, fiat: Fiat) -> Result<CurrentPrice>;
}
