use crate::errors::AccountError;
use serde::{Deserialize, Serialize};
use std::fmt;

const PRECISION: f64 = 10_000.0;

/// A single owner's balance record.
///
/// The serialized form is the flat record persisted in the data file. It is
/// deserialized as-is, so a hand-edited file can produce a negative balance;
/// the checks below only guard mutations made through the ledger.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Account {
    account_number: u32,
    owner_name: String,
    balance: f64,
}

impl Account {
    pub fn new(account_number: u32, owner_name: impl Into<String>) -> Self {
        Self {
            account_number,
            owner_name: owner_name.into(),
            balance: 0.0,
        }
    }

    pub fn account_number(&self) -> u32 {
        self.account_number
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Credits `amount` and returns the new balance.
    ///
    /// The amount MUST be a finite, positive number that survives rounding
    /// to the ledger's precision, and the resulting balance MUST stay finite.
    pub fn deposit(&mut self, amount: f64) -> Result<f64, AccountError> {
        Self::validate_amount(amount)?;
        self.balance = self.credited(amount)?;
        Ok(self.balance)
    }

    /// Debits `amount` and returns the new balance.
    ///
    /// The amount MUST be a finite, positive number no greater than the
    /// current balance. A failed withdrawal leaves the balance untouched.
    pub fn withdraw(&mut self, amount: f64) -> Result<f64, AccountError> {
        Self::validate_amount(amount)?;
        self.balance = self.debited(amount)?;
        Ok(self.balance)
    }

    pub fn view(&self) -> AccountView {
        AccountView {
            account_number: self.account_number,
            owner_name: self.owner_name.clone(),
            balance: self.balance,
        }
    }

    pub(crate) fn validate_amount(amount: f64) -> Result<(), AccountError> {
        // Amounts below the stored precision would round away to nothing.
        if !amount.is_finite() || Self::round(amount) <= 0.0 {
            return Err(AccountError::InvalidAmount(amount));
        }

        Ok(())
    }

    /// The balance after crediting `amount`, without applying it.
    pub(crate) fn credited(&self, amount: f64) -> Result<f64, AccountError> {
        self.checked_balance(self.balance + amount, amount)
    }

    /// The balance after debiting `amount`, without applying it.
    pub(crate) fn debited(&self, amount: f64) -> Result<f64, AccountError> {
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds(amount, self.balance));
        }

        self.checked_balance(self.balance - amount, amount)
    }

    pub(crate) fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    fn checked_balance(&self, balance: f64, amount: f64) -> Result<f64, AccountError> {
        let balance = Self::round(balance);
        if !balance.is_finite() {
            return Err(AccountError::BalanceOverflow(amount, self.balance));
        }

        Ok(balance)
    }

    fn round(value: f64) -> f64 {
        (value * PRECISION).round() / PRECISION
    }
}

/// A read-only snapshot of an account handed out to callers of the ledger.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AccountView {
    pub account_number: u32,
    pub owner_name: String,
    pub balance: f64,
}

impl fmt::Display for AccountView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Account Number: {}", self.account_number)?;
        writeln!(f, "  Owner Name: {}", self.owner_name)?;
        write!(f, "  Balance: ${:.2}", self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_open_with_zero_balance() {
        let account = Account::new(1, "Alice");

        assert_eq!(account.account_number(), 1);
        assert_eq!(account.owner_name(), "Alice");
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn should_deposit_and_return_new_balance() {
        let mut account = Account::new(1, "Alice");

        assert_eq!(account.deposit(100.0), Ok(100.0));
        assert_eq!(account.deposit(0.5), Ok(100.5));
        assert_eq!(account.balance(), 100.5);
    }

    #[test]
    fn should_reject_non_positive_deposits() {
        let mut account = Account::new(1, "Alice");
        account.deposit(10.0).unwrap();

        // Zero, negative, non-finite and sub-precision amounts are all
        // refused and leave the balance untouched.
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.00004] {
            assert!(matches!(
                account.deposit(amount),
                Err(AccountError::InvalidAmount(_))
            ));
            assert_eq!(account.balance(), 10.0);
        }
    }

    #[test]
    fn should_accept_smallest_representable_amount() {
        let mut account = Account::new(1, "Alice");

        assert_eq!(account.deposit(0.0001), Ok(0.0001));
        assert!(matches!(
            account.withdraw(0.00004),
            Err(AccountError::InvalidAmount(_))
        ));
        assert_eq!(account.withdraw(0.0001), Ok(0.0));
    }

    #[test]
    fn should_refuse_deposit_that_overflows_balance() {
        let mut account = Account::new(1, "Alice");
        account.deposit(10.0).unwrap();

        // A finite amount can still push the rounded balance to infinity,
        // which cannot be persisted.
        assert!(matches!(
            account.deposit(1e305),
            Err(AccountError::BalanceOverflow(_, _))
        ));
        assert_eq!(account.balance(), 10.0);
    }

    #[test]
    fn should_withdraw_and_return_new_balance() {
        let mut account = Account::new(1, "Alice");
        account.deposit(100.0).unwrap();

        assert_eq!(account.withdraw(40.0), Ok(60.0));
        assert_eq!(account.withdraw(60.0), Ok(0.0));
    }

    #[test]
    fn should_fail_to_withdraw_more_than_balance() {
        let mut account = Account::new(1, "Alice");
        account.deposit(25.0).unwrap();

        assert_eq!(
            account.withdraw(25.01),
            Err(AccountError::InsufficientFunds(25.01, 25.0))
        );
        assert_eq!(account.balance(), 25.0);
    }

    #[test]
    fn should_fail_to_withdraw_non_positive_amount() {
        let mut account = Account::new(1, "Alice");
        account.deposit(25.0).unwrap();

        assert_eq!(
            account.withdraw(-5.0),
            Err(AccountError::InvalidAmount(-5.0))
        );
        assert_eq!(account.balance(), 25.0);
    }

    #[test]
    fn should_round_away_floating_point_drift() {
        let mut account = Account::new(1, "Alice");
        account.deposit(0.1).unwrap();
        account.deposit(0.2).unwrap();

        // 0.1 + 0.2 is not exactly 0.3 in binary floating point; the stored
        // balance is rounded so the full amount can be withdrawn again.
        assert_eq!(account.balance(), 0.3);
        assert_eq!(account.withdraw(0.3), Ok(0.0));
    }

    #[test]
    fn should_serialize_to_flat_record() {
        let mut account = Account::new(7, "Bob");
        account.deposit(12.5).unwrap();

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"account_number": 7, "owner_name": "Bob", "balance": 12.5})
        );
    }

    #[test]
    fn should_deserialize_without_validation() {
        let account: Account = serde_json::from_str(
            r#"{"account_number": 3, "owner_name": "Eve", "balance": -4.0, "extra": true}"#,
        )
        .unwrap();

        assert_eq!(account.account_number(), 3);
        assert_eq!(account.balance(), -4.0);
    }

    #[test]
    fn should_render_view() {
        let mut account = Account::new(2, "Bob");
        account.deposit(40.0).unwrap();

        assert_eq!(
            account.view().to_string(),
            "  Account Number: 2\n  Owner Name: Bob\n  Balance: $40.00"
        );
    }
}
