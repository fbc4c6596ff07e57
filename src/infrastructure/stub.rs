use crate::domain::money::Currency;
use crate::domain::order::ChargeId;
use crate::domain::ports::{
    ChargeGateway, ChargeRequest, ChargeResponse, EventSink, GatewayError, GatewayEvent,
    NonceVerifier, RefundRequest, RefundResponse,
};
use crate::domain::settings::ApiKey;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Deterministic stand-in for the remote SecurionPay API.
///
/// Issues sequential charge ids and remembers what was charged, so a
/// later refund reports the authoritative amount and currency back. Card
/// numbers ending in `0002` are declined, mirroring the gateway's test
/// cards; refunds of unknown charge ids fail the way the real API does.
#[derive(Default, Clone)]
pub struct StubGateway {
    inner: Arc<RwLock<StubInner>>,
}

#[derive(Default)]
struct StubInner {
    next_charge: u64,
    charges: HashMap<String, (i64, Currency)>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChargeGateway for StubGateway {
    async fn create_charge(
        &self,
        _credential: &ApiKey,
        request: ChargeRequest,
    ) -> Result<ChargeResponse, GatewayError> {
        if request.card.number.ends_with("0002") {
            return Err(GatewayError::new("The card was declined."));
        }

        let mut inner = self.inner.write().await;
        inner.next_charge += 1;
        let id = format!("ch_{}", inner.next_charge);
        inner
            .charges
            .insert(id.clone(), (request.amount, request.currency));
        Ok(ChargeResponse {
            id: ChargeId::new(id),
        })
    }

    async fn refund_charge(
        &self,
        _credential: &ApiKey,
        request: RefundRequest,
    ) -> Result<RefundResponse, GatewayError> {
        let inner = self.inner.read().await;
        match inner.charges.get(request.charge_id.as_str()) {
            Some((amount, currency)) => Ok(RefundResponse {
                id: request.charge_id.clone(),
                amount: *amount,
                currency: currency.clone(),
            }),
            None => Err(GatewayError::new(format!(
                "Charge '{}' does not exist",
                request.charge_id
            ))),
        }
    }
}

/// Accepts exactly the nonce the host embedded in its checkout form.
pub struct StaticNonceVerifier {
    expected: String,
}

impl StaticNonceVerifier {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl NonceVerifier for StaticNonceVerifier {
    fn verify(&self, nonce: &str) -> bool {
        nonce == self.expected
    }
}

/// Reports gateway events to the log stream.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: GatewayEvent) {
        match event {
            GatewayEvent::RefundCompleted { order } => {
                tracing::info!(order, "refund completed event");
            }
            GatewayEvent::RefundFailed { order, message } => {
                tracing::warn!(order, "refund failed event: {message}");
            }
        }
    }
}
