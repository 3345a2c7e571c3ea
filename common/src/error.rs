use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Expected between 1 and 4 arguments, got {0}")]
    InvalidArgumentCount(usize),

    #[error("Invalid coin \"{0}\"")]
    InvalidCoin(String),

    #[error("Invalid fiat currency \"{0}\"")]
    InvalidFiat(String),

    #[error("Invalid amount \"{0}\"")]
    InvalidAmount(String),

    #[error("No such conversion \"{0}\"")]
    InvalidDirection(String),

    #[error("Usage error: {0}")]
    Usage(String),
}

impl Error {
    /// True for errors caused by bad command-line input, which are answered
    /// with the usage text instead of a bare failure.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgumentCount(_)
                | Error::InvalidCoin(_)
                | Error::InvalidFiat(_)
                | Error::InvalidAmount(_)
                | Error::InvalidDirection(_)
                | Error::Usage(_)
        )
    }
}
