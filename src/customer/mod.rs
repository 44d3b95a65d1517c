//! Customer lookup and purchase registration for customers identified by phone number.

mod core;
mod create_purchase_endpoint;
mod get_endpoint;

pub use core::{CUSTOMER_HEADER, Customers, read_customers, write_customer};
pub use create_purchase_endpoint::{PurchaseForm, create_purchase_endpoint};
pub use get_endpoint::get_customer_endpoint;
