//! Defines the endpoint for recording a purchase for a customer.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    customer::{read_customers, write_customer},
    purchase::{Purchase, append_purchase},
    store::{RecordStore, lock_store},
    summary::{Summary, summarize_customer},
    timezone::today,
};

/// The state needed to record a purchase.
#[derive(Debug, Clone)]
pub struct CreatePurchaseState {
    /// The datasets holding customers and purchases.
    pub store: Arc<Mutex<RecordStore>>,
    /// The canonical timezone used to date new purchases.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreatePurchaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The request body for recording a purchase.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PurchaseForm {
    /// How much the customer paid, must be greater than zero.
    pub amount: Option<f64>,
    /// The name to register the customer with. Only required when the phone
    /// number has no customer yet, ignored otherwise.
    pub name: Option<String>,
    /// How much was earned from the purchase, defaults to zero.
    pub profit: Option<f64>,
}

/// A route handler for recording a purchase for the customer with `phone`.
///
/// The customer is registered first if the phone number has not been seen before.
/// Responds with the customer's summary including the new purchase.
pub async fn create_purchase_endpoint(
    State(state): State<CreatePurchaseState>,
    Path(phone): Path<String>,
    Json(form): Json<PurchaseForm>,
) -> Result<Json<Summary>, Error> {
    let date = today(&state.local_timezone)?;
    let store = lock_store(&state.store)?;

    add_purchase(&phone, form, date, &store).map(Json)
}

fn add_purchase(
    phone: &str,
    form: PurchaseForm,
    date: Date,
    store: &RecordStore,
) -> Result<Summary, Error> {
    let amount = match form.amount {
        Some(amount) if amount > 0.0 => amount,
        _ => return Err(Error::InvalidPurchaseAmount),
    };

    let customers = read_customers(store)?;
    let name = match customers.get(phone) {
        Some(name) => name.clone(),
        None => {
            let name = form.name.as_deref().unwrap_or_default().trim();

            if name.is_empty() {
                return Err(Error::MissingCustomerName);
            }

            write_customer(phone, name, store)?;
            tracing::info!("Registered new customer {phone}");
            name.to_owned()
        }
    };

    append_purchase(
        Purchase::build(phone, amount, form.profit.unwrap_or(0.0), date),
        store,
    )?;

    summarize_customer(phone, &name, store)
}
