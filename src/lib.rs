//! A minimal customer and purchase ledger served as a JSON REST API.
//!
//! Customers are identified by phone number. Each purchase records an amount
//! and a profit, and every endpoint responds with a [Summary] of the customer's
//! purchases. Both datasets are stored as flat CSV files in a data directory.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod customer;
mod endpoints;
mod error;
mod logging;
mod purchase;
mod routing;
mod store;
mod summary;
#[cfg(test)]
mod test_utils;
mod timezone;

pub use app_state::AppState;
pub use customer::{Customers, PurchaseForm, read_customers, write_customer};
pub use endpoints::format_endpoint;
pub use error::{Error, ErrorMessage};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use purchase::{
    EditPurchaseForm, Purchase, PurchaseBuilder, PurchaseId, append_purchase, read_purchases,
    write_purchases_file,
};
pub use routing::build_router;
pub use store::RecordStore;
pub use summary::{PURCHASE_THRESHOLD, Summary, build_summary, summarize_customer};
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
