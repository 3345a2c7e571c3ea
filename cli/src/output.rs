use common::models::{Coin, ConversionRequest, Direction, DisplayMode, Fiat};
use std::io::{self, Write};

/// Format with 11 decimal places. Non-finite values print as `inf`, `-inf`
/// and `nan`.
pub fn fixed(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.11}", value)
    }
}

/// Render the single result line for a request at the given coin price.
///
/// A zero price in the fiat to crypto direction divides by zero and prints
/// `inf` (or `nan` for zero holdings).
pub fn render(request: &ConversionRequest, price: f64) -> String {
    let coin = request.coin.symbol();
    let glyph = request.fiat.glyph();

    match request.display_mode() {
        DisplayMode::Price => format!("1 {} = {}{}", coin, glyph, fixed(price)),
        DisplayMode::Holdings(holdings) => match request.direction {
            Direction::CryptoToFiat => format!(
                "{} {} = {}{}",
                fixed(holdings),
                coin,
                glyph,
                fixed(holdings * price)
            ),
            Direction::FiatToCrypto => format!(
                "{}{} = {} {}",
                glyph,
                fixed(holdings),
                fixed(holdings / price),
                coin
            ),
        },
    }
}

pub fn help_text(program: &str) -> String {
    let coins: Vec<&str> = Coin::ALL.iter().map(Coin::symbol).collect();
    let fiats: Vec<&str> = Fiat::ALL.iter().map(Fiat::code).collect();

    format!(
        "Usage:\n{program} <coin> <fiat> <amount> <conversion>\n\n\
         Example: {program} xmr gbp 360 ftc\n\
         This will convert 360 Great British Pounds to Monero\n\n\
         Valid conversions are:\n\
         {ftc} (fiat -> crypto)\n\
         {ctf} (crypto -> fiat)\n\n\
         Available coins:\n\
         {coins}\n\n\
         Available fiat currencies:\n\
         {fiats}\n",
        program = program,
        ftc = Direction::FiatToCrypto,
        ctf = Direction::CryptoToFiat,
        coins = coins.join("\n"),
        fiats = fiats.join("\n"),
    )
}

/// Write `text` to `out`. A closed pipe on the reading side is not an error.
pub fn write_to<W: Write>(mut out: W, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
