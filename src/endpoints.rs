//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/customers/{phone}', use [format_endpoint].

use std::fmt::Display;

/// The route for looking up a customer's purchase summary.
pub const CUSTOMER: &str = "/customers/{phone}";
/// The route for recording a purchase for a customer.
pub const CUSTOMER_PURCHASE: &str = "/customers/{phone}/purchase";
/// The route for editing or deleting a single purchase.
pub const PURCHASE: &str = "/purchases/{purchase_id}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/customers/{phone}', '{phone}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, value: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}
