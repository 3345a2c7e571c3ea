//! Command-line parsing for `crypto-conv <coin> [<fiat> [<amount> [<direction>]]]`.
use clap::Parser;
use common::{
    models::{Coin, ConversionRequest, Direction, Fiat},
    Error, Result,
};
use tracing::warn;

/// Raw positional arguments, validated by [`parse`].
#[derive(Debug, Parser)]
#[command(
    name = "crypto-conv",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Coin symbol: btc, xmr, ltc or eth
    coin: String,

    /// Fiat currency code: gbp, usd or eur
    fiat: Option<String>,

    /// Holdings to convert
    amount: Option<String>,

    /// ctf (crypto -> fiat) or ftc (fiat -> crypto)
    direction: Option<String>,
}

/// What the user asked for.
#[derive(Debug, PartialEq)]
pub enum Invocation {
    /// Print the usage text and nothing else
    Help,
    Convert(ConversionRequest),
}

/// Parse the full argument list, program name included.
pub fn parse(argv: &[String]) -> Result<Invocation> {
    match argv.len() {
        0 | 1 => return Ok(Invocation::Help),
        2 if matches!(argv[1].as_str(), "-h" | "--help") => return Ok(Invocation::Help),
        2..=5 => {}
        n => return Err(Error::InvalidArgumentCount(n - 1)),
    }

    // A leading "--" makes clap take every following token as a plain
    // value, including "--" itself and anything starting with '-'.
    let tokens = argv[..1]
        .iter()
        .map(String::as_str)
        .chain(std::iter::once("--"))
        .chain(argv[1..].iter().map(String::as_str));

    let args = Args::try_parse_from(tokens).map_err(|e| {
        let message = e.to_string();
        let first = message.lines().next().unwrap_or_default();
        Error::Usage(first.trim_start_matches("error: ").to_string())
    })?;

    let coin = Coin::from_symbol(&args.coin)?;

    let fiat = match args.fiat.as_deref() {
        Some(code) => Fiat::from_code(code)?,
        None => Fiat::default(),
    };

    let mut request = ConversionRequest::new(coin, fiat);

    if let Some(raw) = args.amount.as_deref() {
        request = request.with_holdings(parse_amount(raw)?);
    }

    if let Some(token) = args.direction.as_deref() {
        request = request.with_direction(Direction::from_token(token)?);
    }

    Ok(Invocation::Convert(request))
}

/// Parse a holdings amount. Only negative values are rejected; text that is
/// not a number falls back to its numeric prefix, or 0.
fn parse_amount(raw: &str) -> Result<f64> {
    let (amount, exact) = parse_leading_f64(raw);

    if amount < 0.0 {
        return Err(Error::InvalidAmount(raw.to_string()));
    }

    if !exact {
        warn!("Amount \"{}\" is not a number, using {}", raw, amount);
    }

    Ok(amount)
}

/// Parse the longest leading number of `raw`, skipping leading whitespace.
/// Returns the value and whether the whole input was consumed.
fn parse_leading_f64(raw: &str) -> (f64, bool) {
    let trimmed = raw.trim_start();
    let len = float_prefix_len(trimmed);

    if len == 0 {
        return (0.0, false);
    }

    match trimmed[..len].parse::<f64>() {
        Ok(value) => (value, trimmed[len..].trim().is_empty()),
        Err(_) => (0.0, false),
    }
}

/// Length of the longest prefix shaped like a decimal float, `inf`,
/// `infinity` or `nan` (optionally signed). Always an ASCII boundary.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    for word in ["infinity", "inf", "nan"] {
        let matched = bytes
            .get(i..i + word.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(word.as_bytes()));
        if matched {
            return i + word.len();
        }
    }

    let int = digits(i);
    i += int;

    let mut frac = 0;
    if bytes.get(i) == Some(&b'.') {
        frac = digits(i + 1);
        if int + frac > 0 {
            i += 1 + frac;
        }
    }

    if int + frac == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp = digits(j);
        if exp > 0 {
            i = j + exp;
        }
    }

    i
}
