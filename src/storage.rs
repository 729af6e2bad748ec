use crate::account::Account;
use crate::errors::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default location of the data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/accounts.json";

/// The full ledger state as read back from the data file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct LedgerDocument {
    #[serde(default = "first_account_number")]
    pub next_account_number: u32,

    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// The full ledger state as written to the data file. Borrows the accounts
/// so that saving never copies the ledger.
#[derive(Debug, Serialize)]
pub struct LedgerSnapshot<'a> {
    pub next_account_number: u32,
    pub accounts: Vec<&'a Account>,
}

fn first_account_number() -> u32 {
    1
}

/// A JSON document on disk holding the whole ledger.
///
/// Every save rewrites the entire document. The new contents are written to
/// a temporary file next to the target and renamed over it, so a crash
/// mid-write leaves the previous document intact.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, returning `None` when the file does not exist.
    pub fn load(&self) -> Result<Option<LedgerDocument>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Overwrites the document, creating the containing directory if needed.
    pub fn save(&self, snapshot: &LedgerSnapshot<'_>) -> Result<(), StorageError> {
        let dir = self.directory();
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        file.as_file().sync_all()?;
        file.persist(&self.path)?;

        Ok(())
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
