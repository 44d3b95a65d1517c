//! Aggregates a customer's purchases into the summary returned by every endpoint.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    customer::read_customers,
    purchase::{Purchase, read_purchases, round_to_cents},
    store::RecordStore,
};

/// Purchases with an amount at or above this value count as large purchases.
pub const PURCHASE_THRESHOLD: f64 = 300.0;

/// The totals for one customer together with all of their purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The customer's phone number.
    pub phone: String,
    /// The customer's name.
    pub name: String,
    /// The sum of the amounts of all the customer's purchases.
    pub total_value: f64,
    /// How many purchases the customer has made.
    pub num_purchases: usize,
    /// How many purchases had an amount of at least [PURCHASE_THRESHOLD].
    pub num_over_thresh: usize,
    /// The sum of the profit of all the customer's purchases.
    pub total_profit: f64,
    /// The customer's purchases in the order they are stored.
    pub purchases: Vec<Purchase>,
}

/// Build the summary for the customer with `phone` from `purchases`.
///
/// Purchases are matched on the exact phone string and keep their storage order.
pub fn build_summary(phone: &str, name: &str, purchases: &[Purchase]) -> Summary {
    let purchases: Vec<Purchase> = purchases
        .iter()
        .filter(|purchase| purchase.phone == phone)
        .cloned()
        .collect();

    let total_value: f64 = purchases.iter().map(|purchase| purchase.amount).sum();
    let total_profit: f64 = purchases.iter().map(|purchase| purchase.profit).sum();
    let num_over_thresh = purchases
        .iter()
        .filter(|purchase| purchase.amount >= PURCHASE_THRESHOLD)
        .count();

    Summary {
        phone: phone.to_owned(),
        name: name.to_owned(),
        total_value: round_to_cents(total_value),
        num_purchases: purchases.len(),
        num_over_thresh,
        total_profit: round_to_cents(total_profit),
        purchases,
    }
}

/// Read the purchase dataset and build the summary for the customer with `phone`.
///
/// # Errors
/// Returns an error if the purchase dataset cannot be read.
pub fn summarize_customer(phone: &str, name: &str, store: &RecordStore) -> Result<Summary, Error> {
    let purchases = read_purchases(store)?;

    Ok(build_summary(phone, name, &purchases))
}

/// Build the summary for the customer who owns the purchases made with `phone`.
///
/// Purchases are not required to have a matching customer row. An orphaned
/// purchase is summarized under an empty name instead of failing the request.
///
/// # Errors
/// Returns an error if either dataset cannot be read.
pub fn summarize_purchase_owner(phone: &str, store: &RecordStore) -> Result<Summary, Error> {
    let customers = read_customers(store)?;
    let name = match customers.get(phone) {
        Some(name) => name.as_str(),
        None => {
            tracing::warn!("Purchases for {phone} have no matching customer record");
            ""
        }
    };

    summarize_customer(phone, name, store)
}
