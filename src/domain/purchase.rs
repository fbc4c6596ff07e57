use super::money::Currency;
use super::order::OrderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Card fields in the gateway's wire shape. Billing address fields are
/// optional; absent ones are omitted from the request entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub cardholder_name: String,
    pub number: String,
    pub cvc: String,
    pub exp_month: u8,
    pub exp_year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
}

/// The normalized purchase handed over by the host checkout. Owned by the
/// host; the adapter only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Major currency units, e.g. 10.00 for ten euro.
    pub amount: Decimal,
    pub currency: Currency,
    /// Caller-supplied idempotency key for this purchase attempt.
    pub purchase_key: String,
    pub card: CardDetails,
}

/// A checkout submission: the purchase plus the CSRF token the host
/// embedded in its form. Verification happens before any payment logic.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub gateway_nonce: String,
    pub purchase: PurchaseRecord,
}

/// An admin-triggered refund action against an existing order. The host
/// tells the adapter whether the actor may manage the order and whether a
/// gateway refund was actually requested alongside the status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundCommand {
    pub order: OrderId,
    pub requested: bool,
    pub can_manage: bool,
}
