use crate::account::{Account, AccountView};
use crate::errors::{AccountRole, LedgerError, StatementError, StorageError};
use crate::storage::{JsonStore, LedgerDocument, LedgerSnapshot};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A Ledger owns every account, hands out account numbers and keeps the data
/// file in step with its in-memory state.
///
/// Every mutating operation either completes and is saved, or fails and
/// leaves both memory and disk exactly as they were. When a save fails the
/// in-memory change is rolled back before the error is returned.
#[derive(Debug)]
pub struct Ledger {
    accounts: BTreeMap<u32, Account>,

    /// Always greater than every account number in `accounts`.
    next_account_number: u32,

    /// Where the ledger is persisted. An in-memory ledger has no store.
    store: Option<JsonStore>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            accounts: BTreeMap::new(),
            next_account_number: 1,
            store: None,
        }
    }
}

impl Ledger {
    /// Opens the ledger persisted at `path`.
    ///
    /// A missing file yields an empty ledger. A file that cannot be read or
    /// parsed is logged and also yields an empty ledger; the path is kept, so
    /// the next successful mutation overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        match Ledger::try_from(path.clone()) {
            Ok(ledger) => ledger,
            Err(err) => {
                error!(
                    path = %path.display(),
                    error = %err,
                    "failed to load accounts, starting with an empty ledger"
                );
                Self {
                    store: Some(JsonStore::new(path)),
                    ..Self::default()
                }
            }
        }
    }

    /// The data file this ledger saves to, if any.
    pub fn data_file(&self) -> Option<&Path> {
        self.store.as_ref().map(JsonStore::path)
    }

    pub fn next_account_number(&self) -> u32 {
        self.next_account_number
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Opens a new account with a zero balance and returns its number.
    ///
    /// The owner name MUST contain something other than whitespace; it is
    /// stored trimmed. A rejected name does not consume an account number.
    pub fn create_account(&mut self, owner_name: &str) -> Result<u32, LedgerError> {
        let owner_name = owner_name.trim();
        if owner_name.is_empty() {
            return Err(LedgerError::InvalidOwnerName);
        }

        let previous_next = self.next_account_number;
        let account_number = self.generate_account_number()?;
        self.accounts
            .insert(account_number, Account::new(account_number, owner_name));

        self.persist_or_rollback(|ledger| {
            ledger.accounts.remove(&account_number);
            ledger.next_account_number = previous_next;
        })?;

        debug!(account = account_number, owner = owner_name, "account created");
        Ok(account_number)
    }

    /// Credits an existing account and returns its new balance.
    pub fn deposit(&mut self, account_number: u32, amount: f64) -> Result<f64, LedgerError> {
        let account = self.account_mut(AccountRole::Target, account_number)?;
        let previous = account.balance();
        let new_balance = account.deposit(amount)?;

        self.persist_or_rollback(|ledger| ledger.set_balance_of(account_number, previous))?;

        debug!(account = account_number, amount, new_balance, "deposit applied");
        Ok(new_balance)
    }

    /// Debits an existing account and returns its new balance.
    pub fn withdraw(&mut self, account_number: u32, amount: f64) -> Result<f64, LedgerError> {
        let account = self.account_mut(AccountRole::Target, account_number)?;
        let previous = account.balance();
        let new_balance = account.withdraw(amount)?;

        self.persist_or_rollback(|ledger| ledger.set_balance_of(account_number, previous))?;

        debug!(account = account_number, amount, new_balance, "withdrawal applied");
        Ok(new_balance)
    }

    /// Moves `amount` from one account to another.
    ///
    /// All preconditions are checked before either balance is touched, and
    /// both sides are saved by a single write: a transfer either updates both
    /// accounts or neither.
    pub fn transfer(&mut self, from: u32, to: u32, amount: f64) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SameAccountTransfer(from));
        }
        Account::validate_amount(amount)?;

        let source = self
            .accounts
            .get(&from)
            .ok_or(LedgerError::AccountNotFound(AccountRole::Source, from))?;
        let destination = self
            .accounts
            .get(&to)
            .ok_or(LedgerError::AccountNotFound(AccountRole::Destination, to))?;

        // Both new balances are computed before either side is touched.
        let source_balance = source.balance();
        let destination_balance = destination.balance();
        let debited = source.debited(amount)?;
        let credited = destination.credited(amount)?;

        self.set_balance_of(from, debited);
        self.set_balance_of(to, credited);

        self.persist_or_rollback(|ledger| {
            ledger.set_balance_of(from, source_balance);
            ledger.set_balance_of(to, destination_balance);
        })?;

        debug!(from, to, amount, "transfer applied");
        Ok(())
    }

    pub fn get_account(&self, account_number: u32) -> Result<AccountView, LedgerError> {
        self.accounts
            .get(&account_number)
            .map(Account::view)
            .ok_or(LedgerError::AccountNotFound(AccountRole::Target, account_number))
    }

    /// Every account, in ascending account number order.
    pub fn list_accounts(&self) -> Vec<AccountView> {
        self.accounts.values().map(Account::view).collect()
    }

    /// Attempts to generate a CSV statement report for all accounts known to
    /// the Ledger.
    pub fn generate_account_statements(&self) -> Result<String, StatementError> {
        let mut buf = Vec::new();
        {
            // Headers are written by hand so an empty ledger still produces
            // them.
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buf);
            wtr.write_record(["account_number", "owner_name", "balance"])?;

            for account in self.accounts.values() {
                wtr.serialize(account.view())?;
            }

            wtr.flush().map_err(csv::Error::from)?;
        }

        Ok(String::from_utf8(buf)?)
    }

    /// Mints the next free account number and advances the counter past it.
    ///
    /// Numbers run from 1 up to, but excluding, `u32::MAX` so the counter can
    /// always hold `chosen + 1`. Once that range is used up creation fails
    /// rather than wrapping around onto live accounts.
    fn generate_account_number(&mut self) -> Result<u32, LedgerError> {
        let mut candidate = self.next_account_number.max(1);
        loop {
            if candidate == u32::MAX {
                return Err(LedgerError::NumberSpaceExhausted);
            }
            if !self.accounts.contains_key(&candidate) {
                break;
            }
            candidate += 1;
        }

        self.next_account_number = candidate + 1;
        Ok(candidate)
    }

    fn account_mut(
        &mut self,
        role: AccountRole,
        account_number: u32,
    ) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&account_number)
            .ok_or(LedgerError::AccountNotFound(role, account_number))
    }

    fn set_balance_of(&mut self, account_number: u32, balance: f64) {
        if let Some(account) = self.accounts.get_mut(&account_number) {
            account.set_balance(balance);
        }
    }

    /// Replaces the in-memory state with a document read from disk.
    ///
    /// The stored counter is raised past the highest account number present,
    /// so a stale or corrupted counter can never lead to a reissued number.
    fn restore(&mut self, document: LedgerDocument) {
        self.accounts = document
            .accounts
            .into_iter()
            .map(|account| (account.account_number(), account))
            .collect();

        let highest = self.accounts.keys().next_back().copied().unwrap_or(0);
        self.next_account_number = document
            .next_account_number
            .max(highest.saturating_add(1));
    }

    fn snapshot(&self) -> LedgerSnapshot<'_> {
        LedgerSnapshot {
            next_account_number: self.next_account_number,
            accounts: self.accounts.values().collect(),
        }
    }

    /// Saves the ledger, undoing the caller's mutation with `rollback` if the
    /// write fails.
    fn persist_or_rollback<F>(&mut self, rollback: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut Self),
    {
        let store = match &self.store {
            Some(store) => store,
            None => return Ok(()),
        };

        let saved = store.save(&self.snapshot());
        if let Err(err) = saved {
            error!(
                path = %store.path().display(),
                error = %err,
                "failed to save accounts, rolling back"
            );
            rollback(self);
            return Err(err.into());
        }

        Ok(())
    }
}

impl TryFrom<PathBuf> for Ledger {
    type Error = StorageError;

    /// Loads the ledger persisted at the provided PathBuf.
    ///
    /// A missing file is not an error and yields an empty ledger bound to that
    /// path. Read and parse failures are returned to the caller.
    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        let store = JsonStore::new(path);
        let document = store.load()?;

        let mut ledger = Ledger::default();
        match document {
            Some(document) => {
                ledger.restore(document);
                info!(
                    path = %store.path().display(),
                    accounts = ledger.len(),
                    "accounts loaded"
                );
            }
            None => info!(
                path = %store.path().display(),
                "data file not found, starting with an empty ledger"
            ),
        }
        ledger.store = Some(store);

        Ok(ledger)
    }
}
