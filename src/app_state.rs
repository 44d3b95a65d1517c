//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{Error, store::RecordStore, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// New purchases are dated with today's date in this timezone.
    pub local_timezone: String,

    /// The customer and purchase datasets.
    ///
    /// Every request holds this lock for its whole read-modify-write sequence
    /// so concurrent writers cannot overwrite each other's changes.
    pub store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    /// Create a new [AppState] backed by `store`.
    ///
    /// This function will initialize the store by creating any missing dataset files.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the store cannot be initialized or the timezone is not known.
    pub fn new(store: RecordStore, local_timezone: &str) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        store.initialize()?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            store: Arc::new(Mutex::new(store)),
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::{AppState, Error, store::RecordStore};

    #[test]
    fn new_initializes_store() {
        let temp_dir = TempDir::new().expect("could not create temp directory");
        let store = RecordStore::new(temp_dir.path());

        AppState::new(store.clone(), "Pacific/Auckland").expect("could not create app state");

        assert!(store.customers_path().exists());
        assert!(store.purchases_path().exists());
    }

    #[test]
    fn new_rejects_unknown_timezone() {
        let temp_dir = TempDir::new().expect("could not create temp directory");

        let result = AppState::new(RecordStore::new(temp_dir.path()), "Not/AZone");

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }
}
