use crate::{Error, Result};

/// Supported cryptocurrencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Btc,
    Xmr,
    Ltc,
    Eth,
}

impl Coin {
    /// All coins in the order they are listed in the usage text
    pub const ALL: [Coin; 4] = [Coin::Btc, Coin::Xmr, Coin::Ltc, Coin::Eth];

    /// Ticker symbol as typed on the command line (e.g., "btc")
    pub fn symbol(&self) -> &'static str {
        match self {
            Coin::Btc => "btc",
            Coin::Xmr => "xmr",
            Coin::Ltc => "ltc",
            Coin::Eth => "eth",
        }
    }

    /// Provider identifier for the coin (e.g., "bitcoin")
    pub fn id(&self) -> &'static str {
        match self {
            Coin::Btc => "bitcoin",
            Coin::Xmr => "monero",
            Coin::Ltc => "litecoin",
            Coin::Eth => "ethereum",
        }
    }

    /// Look up a coin by its symbol. Matching is exact and case-sensitive.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        // symbols longer than three characters (e.g. "doge") are not supported yet
        if symbol.len() > 3 {
            return Err(Error::InvalidCoin(symbol.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|coin| coin.symbol() == symbol)
            .ok_or_else(|| Error::InvalidCoin(symbol.to_string()))
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Supported fiat currencies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Fiat {
    Gbp,
    #[default]
    Usd,
    Eur,
}

impl Fiat {
    pub const ALL: [Fiat; 3] = [Fiat::Gbp, Fiat::Usd, Fiat::Eur];

    /// Currency code, also used as the provider key (e.g., "usd")
    pub fn code(&self) -> &'static str {
        match self {
            Fiat::Gbp => "gbp",
            Fiat::Usd => "usd",
            Fiat::Eur => "eur",
        }
    }

    /// Currency sign printed in front of fiat amounts
    pub fn glyph(&self) -> &'static str {
        match self {
            Fiat::Gbp => "\u{a3}",
            Fiat::Usd => "$",
            Fiat::Eur => "\u{20ac}",
        }
    }

    /// Look up a fiat currency by its three letter code.
    pub fn from_code(code: &str) -> Result<Self> {
        if code.len() != 3 {
            return Err(Error::InvalidFiat(code.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|fiat| fiat.code() == code)
            .ok_or_else(|| Error::InvalidFiat(code.to_string()))
    }
}

impl std::fmt::Display for Fiat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Conversion orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    CryptoToFiat,
    FiatToCrypto,
}

impl Direction {
    pub fn token(&self) -> &'static str {
        match self {
            Direction::CryptoToFiat => "ctf",
            Direction::FiatToCrypto => "ftc",
        }
    }

    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "ctf" => Ok(Direction::CryptoToFiat),
            "ftc" => Ok(Direction::FiatToCrypto),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
