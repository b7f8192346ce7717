use std::str::FromStr;

use rust_decimal::Decimal;

use crate::account::InvalidArgument;

/// Parses a decimal amount from text, e.g. `"1.5"` or `" 300 "`.
///
/// Sign and range are not checked here, that is up to the operation
/// consuming the amount.
pub fn parse_amount(raw: &str) -> Result<Decimal, InvalidArgument> {
    Decimal::from_str(raw.trim()).map_err(|_| InvalidArgument::NotANumber)
}
