//! Defines the endpoint for editing the amount and profit of a purchase.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    purchase::{PurchaseId, read_purchases, write_purchases_file},
    store::{RecordStore, lock_store},
    summary::{Summary, summarize_purchase_owner},
};

/// The state needed to edit a purchase.
#[derive(Debug, Clone)]
pub struct EditPurchaseState {
    /// The datasets holding customers and purchases.
    pub store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for EditPurchaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The request body for editing a purchase.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EditPurchaseForm {
    /// The new amount, must be greater than zero.
    pub amount: Option<f64>,
    /// The new profit. The current profit is kept if this is not given.
    pub profit: Option<f64>,
}

/// A route handler for replacing the amount and profit of a purchase.
///
/// Responds with the summary of the customer who made the purchase.
pub async fn edit_purchase_endpoint(
    State(state): State<EditPurchaseState>,
    Path(purchase_id): Path<PurchaseId>,
    Json(form): Json<EditPurchaseForm>,
) -> Result<Json<Summary>, Error> {
    let store = lock_store(&state.store)?;

    edit_purchase(purchase_id, form, &store).map(Json)
}

fn edit_purchase(
    id: PurchaseId,
    form: EditPurchaseForm,
    store: &RecordStore,
) -> Result<Summary, Error> {
    let amount = match form.amount {
        Some(amount) if amount > 0.0 => amount,
        _ => return Err(Error::InvalidAmount),
    };

    let mut purchases = read_purchases(store)?;
    let purchase = purchases
        .iter_mut()
        .find(|purchase| purchase.id == id)
        .ok_or(Error::PurchaseNotFound)?;

    purchase.amount = amount;
    if let Some(profit) = form.profit {
        purchase.profit = profit;
    }
    let phone = purchase.phone.clone();

    write_purchases_file(&purchases, store)?;
    tracing::info!("Updated purchase {id}");

    summarize_purchase_owner(&phone, store)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        Error,
        customer::write_customer,
        purchase::{
            Purchase, append_purchase,
            edit_endpoint::{EditPurchaseForm, edit_purchase},
            read_purchases,
        },
        store::RecordStore,
    };

    fn must_create_store_with_purchase() -> (TempDir, RecordStore, Purchase) {
        let temp_dir = TempDir::new().expect("could not create temp directory");
        let store = RecordStore::new(temp_dir.path());
        store.initialize().expect("could not initialize store");
        write_customer("5551234", "Alice", &store).unwrap();
        let purchase = append_purchase(
            Purchase::build("5551234", 100.0, 10.0, date!(2025 - 10 - 19)),
            &store,
        )
        .unwrap();

        (temp_dir, store, purchase)
    }

    #[test]
    fn replaces_amount_and_profit() {
        let (_temp_dir, store, purchase) = must_create_store_with_purchase();

        let summary = edit_purchase(
            purchase.id,
            EditPurchaseForm {
                amount: Some(350.0),
                profit: Some(-20.0),
            },
            &store,
        )
        .expect("could not edit purchase");

        assert_eq!(summary.name, "Alice");
        assert_eq!(summary.total_value, 350.0);
        assert_eq!(summary.total_profit, -20.0);
        assert_eq!(summary.num_over_thresh, 1);
        assert_eq!(
            read_purchases(&store).unwrap(),
            vec![Purchase {
                amount: 350.0,
                profit: -20.0,
                ..purchase
            }]
        );
    }

    #[test]
    fn missing_profit_keeps_current_profit() {
        let (_temp_dir, store, purchase) = must_create_store_with_purchase();

        let summary = edit_purchase(
            purchase.id,
            EditPurchaseForm {
                amount: Some(120.0),
                profit: None,
            },
            &store,
        )
        .expect("could not edit purchase");

        assert_eq!(summary.purchases[0].profit, 10.0);
        assert_eq!(summary.purchases[0].amount, 120.0);
    }

    #[test]
    fn same_edit_twice_gives_same_summary() {
        let (_temp_dir, store, purchase) = must_create_store_with_purchase();
        let form = EditPurchaseForm {
            amount: Some(42.42),
            profit: Some(4.2),
        };

        let first = edit_purchase(purchase.id, form.clone(), &store).unwrap();
        let second = edit_purchase(purchase.id, form, &store).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn invalid_amount_leaves_purchase_unchanged() {
        let (_temp_dir, store, purchase) = must_create_store_with_purchase();
        let before = fs::read_to_string(store.purchases_path()).unwrap();

        for amount in [None, Some(0.0), Some(-5.0)] {
            let result = edit_purchase(
                purchase.id,
                EditPurchaseForm {
                    amount,
                    profit: Some(1.0),
                },
                &store,
            );

            assert_eq!(result, Err(Error::InvalidAmount));
        }

        assert_eq!(fs::read_to_string(store.purchases_path()).unwrap(), before);
    }

    #[test]
    fn invalid_amount_is_checked_before_id() {
        let (_temp_dir, store, _purchase) = must_create_store_with_purchase();

        let result = edit_purchase(
            999,
            EditPurchaseForm {
                amount: Some(-5.0),
                profit: None,
            },
            &store,
        );

        assert_eq!(result, Err(Error::InvalidAmount));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (_temp_dir, store, _purchase) = must_create_store_with_purchase();

        let result = edit_purchase(
            999,
            EditPurchaseForm {
                amount: Some(5.0),
                profit: None,
            },
            &store,
        );

        assert_eq!(result, Err(Error::PurchaseNotFound));
    }

    #[test]
    fn orphaned_purchase_is_summarized_without_name() {
        let temp_dir = TempDir::new().expect("could not create temp directory");
        let store = RecordStore::new(temp_dir.path());
        store.initialize().unwrap();
        let purchase = append_purchase(
            Purchase::build("5551234", 100.0, 10.0, date!(2025 - 10 - 19)),
            &store,
        )
        .unwrap();

        let summary = edit_purchase(
            purchase.id,
            EditPurchaseForm {
                amount: Some(5.0),
                profit: None,
            },
            &store,
        )
        .expect("could not edit purchase");

        assert_eq!(summary.name, "");
        assert_eq!(summary.phone, "5551234");
        assert_eq!(summary.num_purchases, 1);
    }

    #[test]
    fn form_fields_are_optional() {
        let form: EditPurchaseForm =
            serde_json::from_str(r#"{"amount": 12.5}"#).expect("could not parse form");

        assert_eq!(form.amount, Some(12.5));
        assert_eq!(form.profit, None);
    }
}
