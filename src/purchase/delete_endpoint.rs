//! Defines the endpoint for deleting a purchase.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};

use crate::{
    AppState, Error,
    purchase::{PurchaseId, read_purchases, write_purchases_file},
    store::{RecordStore, lock_store},
    summary::{Summary, summarize_purchase_owner},
};

/// The state needed to delete a purchase.
#[derive(Debug, Clone)]
pub struct DeletePurchaseState {
    /// The datasets holding customers and purchases.
    store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for DeletePurchaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting a purchase, responds with the summary of the
/// customer who made the purchase.
pub async fn delete_purchase_endpoint(
    State(state): State<DeletePurchaseState>,
    Path(purchase_id): Path<PurchaseId>,
) -> Result<Json<Summary>, Error> {
    let store = lock_store(&state.store)?;

    delete_purchase(purchase_id, &store).map(Json)
}

fn delete_purchase(id: PurchaseId, store: &RecordStore) -> Result<Summary, Error> {
    let mut purchases = read_purchases(store)?;
    let index = purchases
        .iter()
        .position(|purchase| purchase.id == id)
        .ok_or(Error::PurchaseNotFound)?;

    let deleted = purchases.remove(index);
    write_purchases_file(&purchases, store)?;
    tracing::info!("Deleted purchase {id}");

    summarize_purchase_owner(&deleted.phone, store)
}
