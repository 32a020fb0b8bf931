/// Suffix appended to transporter names.
const TRANSPORTER_SUFFIX: &str = "_TRANSPORTER";

/// Returns the injection token for the message transporter called `name`.
///
/// # Examples
///
/// ```
/// use gateway_core::transporter_token;
///
/// assert_eq!(transporter_token("orders"), "ORDERS_TRANSPORTER");
/// assert_eq!(transporter_token("Billing-Events"), "BILLING-EVENTS_TRANSPORTER");
/// ```
pub fn transporter_token(name: &str) -> String {
    let mut token = name.to_uppercase();
    token.push_str(TRANSPORTER_SUFFIX);
    token
}
