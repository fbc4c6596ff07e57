use super::money::Currency;
use super::order::{ChargeId, GatewayId, Order, OrderId};
use super::purchase::CardDetails;
use super::settings::ApiKey;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Structured error object reported by the remote gateway. Declines arrive
/// through this type too: a declined card is an expected outcome, and the
/// message is recorded verbatim on the order for auditability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Charge-creation request: amount in integral minor units, plus the full
/// card fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeRequest {
    pub amount: i64,
    pub currency: Currency,
    pub card: CardDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeResponse {
    pub id: ChargeId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub charge_id: ChargeId,
}

/// The gateway reports the refunded amount and currency authoritatively;
/// callers must not recompute them locally.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundResponse {
    pub id: ChargeId,
    pub amount: i64,
    pub currency: Currency,
}

/// The remote charge/refund API. The credential is passed into every call
/// rather than baked into ambient state; real implementations wrap the
/// vendor SDK, tests substitute stubs.
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    async fn create_charge(
        &self,
        credential: &ApiKey,
        request: ChargeRequest,
    ) -> std::result::Result<ChargeResponse, GatewayError>;

    async fn refund_charge(
        &self,
        credential: &ApiKey,
        request: RefundRequest,
    ) -> std::result::Result<RefundResponse, GatewayError>;
}

/// Order persistence, owned by the host commerce system. The host also
/// guarantees at-most-one-writer-at-a-time per order.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Creates a pending order and assigns its id.
    async fn create(&self, gateway: GatewayId, purchase_key: &str) -> Result<Order>;
    async fn get(&self, id: OrderId) -> Result<Option<Order>>;
    async fn store(&self, order: Order) -> Result<()>;
    async fn all_orders(&self) -> Result<Vec<Order>>;
}

/// CSRF token check for checkout submissions. Fails closed: an
/// unverifiable request never reaches payment logic.
pub trait NonceVerifier: Send + Sync {
    fn verify(&self, nonce: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    RefundCompleted { order: OrderId },
    RefundFailed { order: OrderId, message: String },
}

/// Notification channel for collaborators that react to refund outcomes.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GatewayEvent);
}

pub type ChargeGatewayBox = Box<dyn ChargeGateway>;
pub type OrderStoreBox = Box<dyn OrderStore>;
pub type NonceVerifierBox = Box<dyn NonceVerifier>;
pub type EventSinkBox = Box<dyn EventSink>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_request_wire_shape() {
        let request = RefundRequest {
            charge_id: ChargeId::new("ch_123"),
        };
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["chargeId"], "ch_123");
    }

    #[test]
    fn test_charge_request_wire_shape() {
        let request = ChargeRequest {
            amount: 1000,
            currency: Currency::new("EUR").unwrap(),
            card: CardDetails {
                cardholder_name: "Test Buyer".to_string(),
                number: "4242424242424242".to_string(),
                cvc: "123".to_string(),
                exp_month: 11,
                exp_year: 2027,
                address_line1: None,
                address_city: None,
                address_state: None,
                address_zip: None,
                address_country: None,
            },
        };
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["amount"], 1000);
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["card"]["number"], "4242424242424242");
    }
}
