mod coin;
mod price;
mod request;

pub use coin::{Coin, Direction, Fiat};
pub use price::CurrentPrice;
pub use request::{ConversionRequest, DisplayMode};
