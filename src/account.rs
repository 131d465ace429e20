use crate::date::CalendarDate;
use crate::money::Usd;
use crate::owner::Owner;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// An account number: a string of exactly six or seven characters
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AccountId(String);

impl AccountId {
    pub const MIN_LEN: usize = 6;
    pub const MAX_LEN: usize = 7;

    pub fn new<S: Into<String>>(id: S) -> Result<AccountId, AccountError> {
        let id = id.into();
        let length = id.chars().count();
        if (AccountId::MIN_LEN..=AccountId::MAX_LEN).contains(&length) {
            Ok(AccountId(id))
        } else {
            Err(AccountError::InvalidId { length })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The secret that authorizes withdrawals.  Compared by plain equality.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Pin(i32);

impl Pin {
    pub const fn new(pin: i32) -> Pin {
        Pin(pin)
    }
}

impl From<i32> for Pin {
    fn from(pin: i32) -> Pin {
        Pin(pin)
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// A bank account belonging to an externally-owned `Owner`, opened (and
/// possibly closed) on externally-owned dates.
///
/// The balance is the only thing that changes after construction, and it
/// only changes through [`Account::withdraw`].
#[derive(Debug)]
pub struct Account<'a, O: ?Sized, D> {
    id: AccountId,
    opened_on: &'a D,
    // Invariant: if `Some`, not before `opened_on`
    closed_on: Option<&'a D>,
    owner: &'a O,
    balance: Usd,
    pin: Pin,
}

impl<'a, O: Owner + ?Sized, D: CalendarDate> Account<'a, O, D> {
    /// Create an account that may already be closed.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not six or seven characters long, or if `closed_on`
    /// falls before `opened_on`.
    pub fn new<S: Into<String>>(
        id: S,
        opened_on: &'a D,
        closed_on: Option<&'a D>,
        owner: &'a O,
        balance: Usd,
        pin: Pin,
    ) -> Result<Account<'a, O, D>, AccountError> {
        let id = AccountId::new(id)?;
        if closed_on.is_some_and(|closed| closed < opened_on) {
            return Err(AccountError::ClosedBeforeOpened);
        }
        debug!(account = %id, %balance, open = closed_on.is_none(), "account created");
        Ok(Account {
            id,
            opened_on,
            closed_on,
            owner,
            balance,
            pin,
        })
    }

    /// Create an account that is still open.
    ///
    /// # Errors
    ///
    /// Fails if `id` is not six or seven characters long.
    pub fn open<S: Into<String>>(
        id: S,
        opened_on: &'a D,
        owner: &'a O,
        balance: Usd,
        pin: Pin,
    ) -> Result<Account<'a, O, D>, AccountError> {
        Account::new(id, opened_on, None, owner, balance, pin)
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn opened_on(&self) -> &'a D {
        self.opened_on
    }

    pub fn closed_on(&self) -> Option<&'a D> {
        self.closed_on
    }

    pub fn owner(&self) -> &'a O {
        self.owner
    }

    pub fn balance(&self) -> Usd {
        self.balance
    }

    pub fn is_open(&self) -> bool {
        self.closed_on.is_none()
    }

    /// Withdraw `amount` from the account if `pin` matches the account's PIN.
    ///
    /// The PIN is checked first, then that the balance covers `amount`, then
    /// that `amount` is not negative.  Withdrawing zero is allowed.
    ///
    /// # Errors
    ///
    /// On any failure the balance is left untouched.
    pub fn withdraw(&mut self, amount: Usd, pin: Pin) -> Result<(), AccountError> {
        if pin != self.pin {
            warn!(account = %self.id, "withdrawal refused: PIN mismatch");
            return Err(AccountError::Unauthorized);
        }
        if let Err(e) = self.validate_amount(amount) {
            warn!(account = %self.id, %amount, "withdrawal refused: {e}");
            return Err(e);
        }
        self.balance -= amount;
        debug!(account = %self.id, %amount, balance = %self.balance, "withdrawal applied");
        Ok(())
    }

    fn validate_amount(&self, amount: Usd) -> Result<(), AccountError> {
        if amount > self.balance {
            Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            })
        } else if amount.is_negative() {
            Err(AccountError::NegativeAmount { amount })
        } else {
            Ok(())
        }
    }

    /// Summarize the account in one sentence, e.g. "Ada Lovelace had $70.00
    /// USD in account #123456 which he opened on Thursday 2023-11-16 and is
    /// still open."
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<O: Owner + ?Sized, D: CalendarDate> fmt::Display for Account<'_, O, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} had ${} USD in account #{} which he opened on {} {}",
            self.owner.full_name(),
            self.balance,
            self.id,
            self.opened_on.weekday_label(),
            self.opened_on,
        )?;
        match self.closed_on {
            Some(closed) => write!(f, " and closed {} {closed}.", closed.weekday_label()),
            None => write!(f, " and is still open."),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AccountError {
    #[error(
        "account number must be {min} or {max} characters, got {length}",
        min = AccountId::MIN_LEN,
        max = AccountId::MAX_LEN
    )]
    InvalidId { length: usize },
    #[error("account cannot be closed before it was opened")]
    ClosedBeforeOpened,
    #[error("amount cannot be negative (got ${amount})")]
    NegativeAmount { amount: Usd },
    #[error("invalid PIN")]
    Unauthorized,
    #[error("insufficient funds: requested ${requested}, available ${available}")]
    InsufficientFunds { requested: Usd, available: Usd },
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::InvalidId { .. }
            | AccountError::ClosedBeforeOpened
            | AccountError::NegativeAmount { .. } => ErrorKind::InvalidArgument,
            AccountError::Unauthorized => ErrorKind::Unauthorized,
            AccountError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    Unauthorized,
    InsufficientFunds,
}
