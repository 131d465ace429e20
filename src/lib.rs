//! A PIN-gated bank account that borrows its owner and its dates.
//!
//! ```
//! use bankacct::{Account, Person, Pin, Usd};
//! use time::macros::date;
//!
//! let owner = Person::new("Ada", "Lovelace");
//! let opened = date!(2023 - 11 - 16);
//! let mut acct = Account::open("123456", &opened, &owner, Usd::from_cents(10_000), Pin::new(4321))?;
//! acct.withdraw(Usd::from_cents(3000), Pin::new(4321))?;
//! assert_eq!(acct.balance(), Usd::from_cents(7000));
//! assert!(acct.describe().ends_with("and is still open."));
//! # Ok::<(), bankacct::AccountError>(())
//! ```
mod account;
mod date;
mod money;
mod owner;
pub use crate::account::{Account, AccountError, AccountId, ErrorKind, Pin};
pub use crate::date::{parse_ymd, CalendarDate};
pub use crate::money::{ParseUsdError, Usd};
pub use crate::owner::{Owner, Person};
