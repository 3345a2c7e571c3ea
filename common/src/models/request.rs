use crate::models::{Coin, Direction, Fiat};

/// A validated conversion built once from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    pub coin: Coin,
    pub fiat: Fiat,
    /// Amount of coin (ctf) or fiat (ftc) the user holds, if given
    pub holdings: Option<f64>,
    pub direction: Direction,
}

/// What the converter prints for a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Price of a single coin
    Price,
    /// Value of the given holdings in the requested direction
    Holdings(f64),
}

impl ConversionRequest {
    pub fn new(coin: Coin, fiat: Fiat) -> Self {
        Self {
            coin,
            fiat,
            holdings: None,
            direction: Direction::default(),
        }
    }

    pub fn with_holdings(mut self, holdings: f64) -> Self {
        self.holdings = Some(holdings);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn display_mode(&self) -> DisplayMode {
        match self.holdings {
            Some(amount) => DisplayMode::Holdings(amount),
            None => DisplayMode::Price,
        }
    }
}
