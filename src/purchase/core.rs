//! Defines the core data model and dataset functions for purchases.

use std::{
    fs::{self, File},
    io::ErrorKind,
};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, store::RecordStore};

// ============================================================================
// MODELS
// ============================================================================

/// The header row of the purchase dataset.
pub const PURCHASE_HEADER: [&str; 5] = ["id", "date", "phone", "amount", "profit"];

/// Alias for the integer type used for purchase IDs.
pub type PurchaseId = i64;

time::serde::format_description!(purchase_date, Date, "[year]-[month]-[day]");

/// A single purchase made by a customer.
///
/// To create a new `Purchase`, use [Purchase::build] and [append_purchase].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// The ID of the purchase, unique across the dataset.
    pub id: PurchaseId,
    /// The day the purchase was recorded.
    #[serde(with = "purchase_date")]
    pub date: Date,
    /// The phone number of the customer who made the purchase.
    pub phone: String,
    /// How much the customer paid.
    pub amount: f64,
    /// How much was earned from the purchase, may be negative.
    pub profit: f64,
}

impl Purchase {
    /// Create a new purchase.
    ///
    /// Shortcut for [PurchaseBuilder] for discoverability.
    pub fn build(phone: &str, amount: f64, profit: f64, date: Date) -> PurchaseBuilder {
        PurchaseBuilder {
            phone: phone.to_owned(),
            amount,
            profit,
            date,
        }
    }
}

/// The fields of a purchase that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseBuilder {
    /// The phone number of the customer making the purchase.
    pub phone: String,
    /// How much the customer paid.
    pub amount: f64,
    /// How much was earned from the purchase.
    pub profit: f64,
    /// The day the purchase is recorded.
    pub date: Date,
}

impl PurchaseBuilder {
    fn finalize(self, id: PurchaseId) -> Purchase {
        Purchase {
            id,
            date: self.date,
            phone: self.phone,
            amount: self.amount,
            profit: self.profit,
        }
    }
}

/// Round `value` to two decimal places, the precision money is stored at.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// DATASET FUNCTIONS
// ============================================================================

/// Read every purchase in the dataset, in the order they are stored.
///
/// A missing dataset file results in an empty list.
///
/// # Errors
/// Returns an [Error::InvalidCsv] if any row is malformed, e.g. a non-numeric
/// ID, amount or profit. No rows are returned in that case.
pub fn read_purchases(store: &RecordStore) -> Result<Vec<Purchase>, Error> {
    let file = match File::open(store.purchases_path()) {
        Ok(file) => file,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(error.into()),
    };

    csv::Reader::from_reader(file)
        .deserialize()
        .collect::<Result<Vec<Purchase>, csv::Error>>()
        .map_err(|error| {
            tracing::error!(
                "Could not parse {}: {error}",
                store.purchases_path().display()
            );
            Error::from(error)
        })
}

/// Replace the purchase dataset with `purchases`.
///
/// The rows are written to a temporary file next to the dataset which is then
/// renamed over it, so an interrupted write never leaves a partial dataset.
/// Amounts and profits are written with exactly two decimal places.
///
/// # Errors
/// Returns an [Error::IoError] if the temporary file cannot be written or renamed.
pub fn write_purchases_file(purchases: &[Purchase], store: &RecordStore) -> Result<(), Error> {
    let dataset_path = store.purchases_path();
    let temp_path = dataset_path.with_extension("csv.tmp");

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&temp_path)?;
    writer.write_record(PURCHASE_HEADER)?;

    for purchase in purchases {
        writer.write_record([
            purchase.id.to_string(),
            purchase.date.to_string(),
            purchase.phone.clone(),
            format!("{:.2}", purchase.amount),
            format!("{:.2}", purchase.profit),
        ])?;
    }

    let file = writer
        .into_inner()
        .map_err(|error| Error::IoError(error.to_string()))?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, dataset_path)?;

    tracing::debug!("Wrote {} purchases to the dataset", purchases.len());

    Ok(())
}

/// Record a new purchase and return it.
///
/// The new purchase gets the ID one greater than the largest existing ID, or
/// 1 if there are no purchases. The full dataset is rewritten.
///
/// # Errors
/// Returns an error if the dataset cannot be read or written, or
/// [Error::PurchaseIdsExhausted] if the largest ID is already [PurchaseId::MAX].
pub fn append_purchase(builder: PurchaseBuilder, store: &RecordStore) -> Result<Purchase, Error> {
    let mut purchases = read_purchases(store)?;
    let next_id = purchases
        .iter()
        .map(|purchase| purchase.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(Error::PurchaseIdsExhausted)?;

    let purchase = builder.finalize(next_id);
    purchases.push(purchase.clone());
    write_purchases_file(&purchases, store)?;

    tracing::debug!("Recorded purchase {} for {}", purchase.id, purchase.phone);

    Ok(purchase)
}
