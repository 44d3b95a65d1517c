//! Purchases: the data model, the purchase dataset, and the endpoints for
//! editing and deleting individual purchases.

mod core;
mod delete_endpoint;
mod edit_endpoint;

pub use core::{
    PURCHASE_HEADER, Purchase, PurchaseBuilder, PurchaseId, append_purchase, read_purchases,
    round_to_cents, write_purchases_file,
};
pub use delete_endpoint::delete_purchase_endpoint;
pub use edit_endpoint::{EditPurchaseForm, edit_purchase_endpoint};
