use crate::error::{MortgageError, Result};
use log::info;
use std::str::FromStr;

pub const MAX_AMOUNT: f64 = 10_000_000.;
pub const MAX_RATE: f64 = 30.;
pub const MAX_MONTHS: i64 = 600;

/// Validated loan parameters, ready for the payment calculator.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanTerms {
    pub amount: f64,       // loan principal, whole cents
    pub rate_percent: f64, // annual interest rate as a percent (i.e., 4.2, 6.0)
    pub months: u32,       // term of loan in months
}

impl LoanTerms {
    /// Parses and range checks the three raw command line values.
    ///
    /// All three values are parsed before any range check runs, so a
    /// malformed `months` is reported even when `amount` is out of range.
    pub fn parse(amount: &str, interest: &str, months: &str) -> Result<Self> {
        let amount: f64 = parse_field("amount", amount)?;
        let rate_percent: f64 = parse_field("interest", interest)?;
        let months: i64 = parse_field("months", months)?;

        check_range("amount", amount, 0., MAX_AMOUNT)?;
        check_range("interest", rate_percent, 0., MAX_RATE)?;
        check_range("months", months as f64, 0., MAX_MONTHS as f64)?;

        let terms = Self {
            amount: to_cents(amount),
            rate_percent,
            months: months as u32,
        };
        info!(
            "validated loan: amount {}, interest {}%, months {}",
            terms.amount, terms.rate_percent, terms.months
        );
        Ok(terms)
    }
}

fn parse_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| MortgageError::Parse {
        field,
        value: raw.to_string(),
    })
}

// NaN is never contained in a range, so it is rejected here as well
fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(MortgageError::Range { field, min, max })
    }
}

fn to_cents(amt: f64) -> f64 {
    (amt * 100.).round() / 100.
}
