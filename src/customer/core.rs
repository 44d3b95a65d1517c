//! Defines the customer dataset and the functions for reading and appending to it.

use std::{
    collections::HashMap,
    fs::{File, OpenOptions},
    io::ErrorKind,
};

use serde::Deserialize;

use crate::{Error, store::RecordStore};

/// The header row of the customer dataset.
pub const CUSTOMER_HEADER: [&str; 2] = ["phone", "name"];

/// The registered customers, keyed by phone number.
pub type Customers = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct CustomerRow {
    phone: String,
    name: String,
}

/// Read every customer in the dataset.
///
/// A missing dataset file means no customers have been registered yet and
/// results in an empty mapping. If a phone number appears on more than one
/// row, the name on the last row is kept.
///
/// # Errors
/// Returns an [Error::InvalidCsv] if any row cannot be parsed.
pub fn read_customers(store: &RecordStore) -> Result<Customers, Error> {
    let file = match File::open(store.customers_path()) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Customers::new()),
        Err(error) => return Err(error.into()),
    };

    let mut reader = csv::Reader::from_reader(file);
    let mut customers = Customers::new();

    for row in reader.deserialize() {
        let CustomerRow { phone, name } = row?;

        if let Some(previous_name) = customers.insert(phone.clone(), name) {
            tracing::warn!(
                "Customer {phone} appears more than once in the dataset, \
                replacing the name \"{previous_name}\" with the later row"
            );
        }
    }

    Ok(customers)
}

/// Append a single customer row to the dataset.
///
/// This does not check whether `phone` is already registered, callers must
/// do that first. The header row is written if the file is new or empty.
///
/// # Errors
/// Returns an [Error::IoError] if the dataset cannot be opened or written.
pub fn write_customer(phone: &str, name: &str, store: &RecordStore) -> Result<(), Error> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store.customers_path())?;
    let is_empty = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if is_empty {
        writer.write_record(CUSTOMER_HEADER)?;
    }

    writer.write_record([phone, name])?;
    writer.flush()?;

    tracing::debug!("Registered customer {phone}");

    Ok(())
}
