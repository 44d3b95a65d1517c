//! The record store that owns the customer and purchase datasets on disk.
//!
//! The store keeps no in-memory copy of the data: every operation reads the
//! dataset files again, so the files are always the single source of truth.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use crate::{Error, customer::CUSTOMER_HEADER, purchase::PURCHASE_HEADER};

/// The file name of the customer dataset inside the data directory.
pub const CUSTOMERS_FILE_NAME: &str = "customers.csv";
/// The file name of the purchase dataset inside the data directory.
pub const PURCHASES_FILE_NAME: &str = "purchases.csv";

/// The locations of the two flat datasets that make up the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    data_dir: PathBuf,
    customers_path: PathBuf,
    purchases_path: PathBuf,
}

impl RecordStore {
    /// Create a store for the datasets in `data_dir`.
    ///
    /// Nothing is touched on disk until [RecordStore::initialize] or one of
    /// the read/write functions is called.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();

        Self {
            customers_path: data_dir.join(CUSTOMERS_FILE_NAME),
            purchases_path: data_dir.join(PURCHASES_FILE_NAME),
            data_dir,
        }
    }

    /// Create the data directory and write the header row of any dataset
    /// file that does not exist yet.
    ///
    /// Existing files are left untouched.
    ///
    /// # Errors
    /// Returns an [Error::IoError] if the directory or files cannot be created.
    pub fn initialize(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.data_dir)?;

        for (path, header) in [
            (&self.customers_path, CUSTOMER_HEADER.as_slice()),
            (&self.purchases_path, PURCHASE_HEADER.as_slice()),
        ] {
            if path.exists() {
                continue;
            }

            tracing::info!("Creating dataset {}", path.display());
            let mut writer = csv::Writer::from_path(path)?;
            writer.write_record(header)?;
            writer.flush()?;
        }

        Ok(())
    }

    /// The path of the customer dataset.
    pub fn customers_path(&self) -> &Path {
        &self.customers_path
    }

    /// The path of the purchase dataset.
    pub fn purchases_path(&self) -> &Path {
        &self.purchases_path
    }
}

/// Acquire the lock that serializes every read-modify-write sequence against the store.
///
/// # Errors
/// Returns [Error::StoreLockError] if the lock was poisoned by a panicking request.
pub(crate) fn lock_store(store: &Mutex<RecordStore>) -> Result<MutexGuard<'_, RecordStore>, Error> {
    store.lock().map_err(|error| {
        tracing::error!("Could not acquire record store lock: {error}");
        Error::StoreLockError
    })
}
