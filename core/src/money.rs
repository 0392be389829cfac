// carta/src/money.rs

//! Prices are carried as integer cents; these helpers convert to and from
//! the two-decimal form the menus and dashboards show.

/// Highest price a product may carry: 1,000,000.00.
pub const MAX_PRICE_CENTS: u64 = 100_000_000;

/// Renders cents as a two-decimal amount, e.g. `19500` -> `"195.00"`.
pub fn format_cents(cents: u64) -> String {
  format!("{}.{:02}", cents / 100, cents % 100)
}

/// Parses a price typed into a form ("85", "85.5", "85.50") into cents.
///
/// Returns `None` for non-numeric, non-finite or negative input. Amounts with
/// more than two decimals are rounded to the nearest cent.
pub fn parse_price_cents(input: &str) -> Option<u64> {
  let value: f64 = input.trim().parse().ok()?;
  if !value.is_finite() || value < 0.0 {
    return None;
  }
  let cents = (value * 100.0).round();
  if cents > u64::MAX as f64 {
    return None;
  }
  Some(cents as u64)
}
