use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::string::FromUtf8Error;

/// Identifies which account an operation was looking for when it failed to
/// find it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AccountRole {
    /// The single account named by a deposit, withdrawal or lookup.
    Target,
    /// The account a transfer debits.
    Source,
    /// The account a transfer credits.
    Destination,
}

/// Failures raised by a single account while validating an amount.
#[derive(Debug, PartialEq)]
pub enum AccountError {
    InvalidAmount(f64),
    InsufficientFunds(f64, f64),
    BalanceOverflow(f64, f64),
}

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
}

#[derive(Debug)]
pub enum LedgerError {
    InvalidAmount(f64),
    InsufficientFunds(f64, f64),
    BalanceOverflow(f64, f64),
    AccountNotFound(AccountRole, u32),
    InvalidOwnerName,
    SameAccountTransfer(u32),
    NumberSpaceExhausted,
    Storage(StorageError),
}

#[derive(Debug)]
pub enum StatementError {
    SerializeError(csv::Error),
    EncodingError(FromUtf8Error),
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Target => write!(f, "account"),
            AccountRole::Source => write!(f, "source account"),
            AccountRole::Destination => write!(f, "destination account"),
        }
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::InvalidAmount(amount) => {
                write!(f, "amount must be positive, got {}", amount)
            }
            AccountError::InsufficientFunds(wanted, had) => write!(
                f,
                "insufficient funds to complete this transaction wanted={:.2} had={:.2}",
                wanted, had
            ),
            AccountError::BalanceOverflow(amount, had) => write!(
                f,
                "amount {} would push the balance out of range had={:.2}",
                amount, had
            ),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "failed to access data file: {}", err),
            StorageError::Json(err) => write!(f, "failed to parse account data: {}", err),
        }
    }
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidAmount(amount) => {
                write!(f, "amount must be positive, got {}", amount)
            }
            LedgerError::InsufficientFunds(wanted, had) => write!(
                f,
                "insufficient funds to complete this transaction wanted={:.2} had={:.2}",
                wanted, had
            ),
            LedgerError::BalanceOverflow(amount, had) => write!(
                f,
                "amount {} would push the balance out of range had={:.2}",
                amount, had
            ),
            LedgerError::AccountNotFound(role, id) => write!(f, "{} {} not found", role, id),
            LedgerError::InvalidOwnerName => write!(f, "owner name cannot be empty"),
            LedgerError::SameAccountTransfer(id) => {
                write!(f, "cannot transfer from account {} to itself", id)
            }
            LedgerError::NumberSpaceExhausted => {
                write!(f, "no account numbers left to assign")
            }
            LedgerError::Storage(err) => write!(f, "changes were not saved: {}", err),
        }
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StatementError::SerializeError(err) => {
                write!(f, "failed to serialize statement record: {}", err)
            }
            StatementError::EncodingError(err) => write!(f, "failed to encode csv report: {}", err),
        }
    }
}

impl From<AccountError> for LedgerError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidAmount(amount) => LedgerError::InvalidAmount(amount),
            AccountError::InsufficientFunds(wanted, had) => {
                LedgerError::InsufficientFunds(wanted, had)
            }
            AccountError::BalanceOverflow(amount, had) => LedgerError::BalanceOverflow(amount, had),
        }
    }
}

impl From<StorageError> for LedgerError {
    fn from(err: StorageError) -> Self {
        LedgerError::Storage(err)
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Json(err)
    }
}

impl From<tempfile::PersistError> for StorageError {
    fn from(err: tempfile::PersistError) -> Self {
        StorageError::Io(err.error)
    }
}

impl From<csv::Error> for StatementError {
    fn from(err: csv::Error) -> Self {
        StatementError::SerializeError(err)
    }
}

impl From<FromUtf8Error> for StatementError {
    fn from(err: FromUtf8Error) -> Self {
        StatementError::EncodingError(err)
    }
}

impl Error for AccountError {}
impl Error for LedgerError {}
impl Error for StatementError {}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Json(err) => Some(err),
        }
    }
}
