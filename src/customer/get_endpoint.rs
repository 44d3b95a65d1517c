//! Defines the endpoint for looking up a customer's purchase summary.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};

use crate::{
    AppState, Error,
    customer::read_customers,
    store::{RecordStore, lock_store},
    summary::{Summary, summarize_customer},
};

/// The state needed to look up a customer.
#[derive(Debug, Clone)]
pub struct GetCustomerState {
    /// The datasets holding customers and purchases.
    pub store: Arc<Mutex<RecordStore>>,
}

impl FromRef<AppState> for GetCustomerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler for getting the summary of the customer registered under `phone`.
///
/// Responds with 404 if no customer has that phone number.
pub async fn get_customer_endpoint(
    State(state): State<GetCustomerState>,
    Path(phone): Path<String>,
) -> Result<Json<Summary>, Error> {
    let store = lock_store(&state.store)?;

    get_customer_summary(&phone, &store).map(Json)
}

fn get_customer_summary(phone: &str, store: &RecordStore) -> Result<Summary, Error> {
    let customers = read_customers(store)?;
    let name = customers.get(phone).ok_or(Error::CustomerNotFound)?;

    summarize_customer(phone, name, store)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use tempfile::TempDir;
    use time::macros::date;

    use crate::{
        Error,
        customer::{
            get_endpoint::{GetCustomerState, get_customer_endpoint, get_customer_summary},
            write_customer,
        },
        purchase::{Purchase, append_purchase},
        store::RecordStore,
    };

    fn must_create_store() -> (TempDir, RecordStore) {
        let temp_dir = TempDir::new().expect("could not create temp directory");
        let store = RecordStore::new(temp_dir.path());
        store.initialize().expect("could not initialize store");

        (temp_dir, store)
    }

    #[test]
    fn unknown_phone_is_not_found() {
        let (_temp_dir, store) = must_create_store();

        let result = get_customer_summary("0000000", &store);

        assert_eq!(result, Err(Error::CustomerNotFound));
    }

    #[test]
    fn known_customer_without_purchases_has_empty_summary() {
        let (_temp_dir, store) = must_create_store();
        write_customer("5551234", "Alice", &store).unwrap();

        let summary = get_customer_summary("5551234", &store).expect("could not get summary");

        assert_eq!(summary.name, "Alice");
        assert_eq!(summary.num_purchases, 0);
        assert!(summary.purchases.is_empty());
    }

    #[tokio::test]
    async fn endpoint_returns_summary_with_purchases() {
        let (_temp_dir, store) = must_create_store();
        write_customer("5551234", "Alice", &store).unwrap();
        let purchase = append_purchase(
            Purchase::build("5551234", 320.0, 32.0, date!(2025 - 10 - 19)),
            &store,
        )
        .unwrap();
        let state = GetCustomerState {
            store: Arc::new(Mutex::new(store)),
        };

        let summary = get_customer_endpoint(State(state), Path("5551234".to_owned()))
            .await
            .expect("could not get customer")
            .0;

        assert_eq!(summary.total_value, 320.0);
        assert_eq!(summary.num_over_thresh, 1);
        assert_eq!(summary.purchases, vec![purchase]);
    }
}
