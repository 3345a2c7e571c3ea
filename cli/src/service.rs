use common::{models::ConversionRequest, Result};
use connectors::PriceConnector;
use std::sync::Arc;
use tracing::debug;

use crate::args::{self, Invocation};
use crate::output;

/// Result of one invocation
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The usage text was requested
    Help,
    /// The formatted conversion line
    Converted(String),
}

/// Validate `argv` and, only if it asks for a conversion, create the
/// connector and fetch the price once.
pub async fn run<F>(argv: &[String], connect: F) -> Result<Outcome>
where
    F: FnOnce() -> Result<Arc<dyn PriceConnector>>,
{
    let request = match args::parse(argv)? {
        Invocation::Help => return Ok(Outcome::Help),
        Invocation::Convert(request) => request,
    };

    let service = ConvertService::new(connect()?);
    service.convert(&request).await.map(Outcome::Converted)
}

/// Service converting a validated request into its output line
pub struct ConvertService {
    /// Price provider
    connector: Arc<dyn PriceConnector>,
}

impl ConvertService {
    pub fn new(connector: Arc<dyn PriceConnector>) -> Self {
        Self { connector }
    }

    /// Fetch the current price for the request and render it
    pub async fn convert(&self, request: &ConversionRequest) -> Result<String> {
        debug!(
            "Converting {}/{} (holdings: {:?}, direction: {})",
            request.coin, request.fiat, request.holdings, request.direction
        );

        let quote = self
            .connector
            .get_current_price(request.coin, request.fiat)
            .await?;

        debug!(
            "Price of {} in {} at {}: {}",
            quote.coin,
            quote.fiat,
            quote.timestamp.to_rfc3339(),
            quote.price
        );

        Ok(output::render(request, quote.price))
    }
}
