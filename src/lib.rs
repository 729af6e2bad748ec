//! A terminal-driven ledger for bank accounts.
//!
//! The [`engine::Ledger`] owns every [`account::Account`], assigns account
//! numbers and saves the whole ledger to a JSON data file after each change.
//! The [`menu`] and [`console`] modules are the interactive front end.

pub mod account;
pub mod args;
pub mod console;
pub mod engine;
pub mod errors;
pub mod menu;
pub mod storage;
