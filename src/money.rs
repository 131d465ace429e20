use std::fmt;
use std::ops::SubAssign;
use std::str::FromStr;
use thiserror::Error;

const CENTS_PER_DOLLAR: i64 = 100;

/// An amount of US dollars, stored as a whole number of cents so that
/// withdrawals never accumulate floating-point error.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Usd(i64);

impl Usd {
    pub const ZERO: Usd = Usd(0);

    pub const fn from_cents(cents: i64) -> Usd {
        Usd(cents)
    }

    /// Returns `None` if the amount does not fit in an `i64` number of cents
    pub fn from_dollars(dollars: i64) -> Option<Usd> {
        dollars.checked_mul(CENTS_PER_DOLLAR).map(Usd)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_sub(self, rhs: Usd) -> Option<Usd> {
        self.0.checked_sub(rhs.0).map(Usd)
    }
}

impl SubAssign for Usd {
    fn sub_assign(&mut self, rhs: Usd) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per = CENTS_PER_DOLLAR.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / per, magnitude % per)
    }
}

impl FromStr for Usd {
    type Err = ParseUsdError;

    /// Parses `[-][$]DOLLARS[.CENTS]`, where `CENTS` is one or two digits
    fn from_str(s: &str) -> Result<Usd, ParseUsdError> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let (whole, frac) = match rest.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (rest, None),
        };
        let dollars = parse_digits(whole)?;
        let cents = match frac {
            None => 0,
            Some(f) if f.len() > 2 => return Err(ParseUsdError::Precision),
            Some(f) => {
                let c = parse_digits(f)?;
                if f.len() == 1 {
                    c * 10
                } else {
                    c
                }
            }
        };
        let total = dollars
            .checked_mul(CENTS_PER_DOLLAR)
            .and_then(|c| c.checked_add(cents))
            .ok_or(ParseUsdError::Overflow)?;
        Ok(Usd(if negative { -total } else { total }))
    }
}

fn parse_digits(s: &str) -> Result<i64, ParseUsdError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseUsdError::Invalid);
    }
    s.parse::<i64>().map_err(|_| ParseUsdError::Overflow)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseUsdError {
    #[error("expected an amount of the form [-][$]DOLLARS[.CENTS]")]
    Invalid,
    #[error("amounts may have at most two decimal places")]
    Precision,
    #[error("amount is too large")]
    Overflow,
}
