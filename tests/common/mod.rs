use async_trait::async_trait;
use rust_decimal::Decimal;
use securionpay_adapter::application::adapter::GatewayAdapter;
use securionpay_adapter::domain::money::Currency;
use securionpay_adapter::domain::order::{ChargeId, OrderId};
use securionpay_adapter::domain::ports::{
    ChargeGateway, ChargeRequest, ChargeResponse, EventSink, GatewayError, GatewayEvent,
    RefundRequest, RefundResponse,
};
use securionpay_adapter::domain::purchase::{
    CardDetails, CheckoutRequest, PurchaseRecord, RefundCommand,
};
use securionpay_adapter::domain::settings::ApiKey;
use securionpay_adapter::infrastructure::in_memory::InMemoryOrderStore;
use securionpay_adapter::infrastructure::stub::StaticNonceVerifier;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted gateway that counts remote calls and records the last charge
/// request it saw.
#[derive(Clone)]
pub struct CountingGateway {
    pub charge_calls: Arc<AtomicUsize>,
    pub refund_calls: Arc<AtomicUsize>,
    pub last_charge: Arc<Mutex<Option<ChargeRequest>>>,
    charge_result: Result<ChargeResponse, GatewayError>,
    refund_result: Result<RefundResponse, GatewayError>,
}

impl CountingGateway {
    fn scripted(
        charge_result: Result<ChargeResponse, GatewayError>,
        refund_result: Result<RefundResponse, GatewayError>,
    ) -> Self {
        Self {
            charge_calls: Arc::new(AtomicUsize::new(0)),
            refund_calls: Arc::new(AtomicUsize::new(0)),
            last_charge: Arc::new(Mutex::new(None)),
            charge_result,
            refund_result,
        }
    }

    pub fn approving(charge_id: &str, amount: i64, currency: &str) -> Self {
        Self::scripted(
            Ok(ChargeResponse {
                id: ChargeId::new(charge_id),
            }),
            Ok(RefundResponse {
                id: ChargeId::new(charge_id),
                amount,
                currency: Currency::new(currency).unwrap(),
            }),
        )
    }

    pub fn declining(message: &str) -> Self {
        Self::scripted(
            Err(GatewayError::new(message)),
            Err(GatewayError::new(message)),
        )
    }

    pub fn failing_refunds(charge_id: &str, message: &str) -> Self {
        Self::scripted(
            Ok(ChargeResponse {
                id: ChargeId::new(charge_id),
            }),
            Err(GatewayError::new(message)),
        )
    }

    pub fn charge_count(&self) -> usize {
        self.charge_calls.load(Ordering::SeqCst)
    }

    pub fn refund_count(&self) -> usize {
        self.refund_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChargeGateway for CountingGateway {
    async fn create_charge(
        &self,
        _credential: &ApiKey,
        request: ChargeRequest,
    ) -> Result<ChargeResponse, GatewayError> {
        self.charge_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_charge.lock().unwrap() = Some(request);
        self.charge_result.clone()
    }

    async fn refund_charge(
        &self,
        _credential: &ApiKey,
        _request: RefundRequest,
    ) -> Result<RefundResponse, GatewayError> {
        self.refund_calls.fetch_add(1, Ordering::SeqCst);
        self.refund_result.clone()
    }
}

#[derive(Default, Clone)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<GatewayEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GatewayEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: GatewayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn adapter_with(
    store: &InMemoryOrderStore,
    gateway: &CountingGateway,
    events: &RecordingEventSink,
) -> GatewayAdapter {
    GatewayAdapter::new(
        Box::new(store.clone()),
        Box::new(gateway.clone()),
        Box::new(StaticNonceVerifier::new("edd-gateway")),
        Box::new(events.clone()),
    )
}

pub fn api_key() -> ApiKey {
    ApiKey::from_setting("sk_test_abc").unwrap()
}

pub fn checkout_request(amount: Decimal, currency: &str) -> CheckoutRequest {
    CheckoutRequest {
        gateway_nonce: "edd-gateway".to_string(),
        purchase: PurchaseRecord {
            amount,
            currency: Currency::new(currency).unwrap(),
            purchase_key: "pk_1".to_string(),
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
        },
    }
}

pub fn refund_command(order: OrderId) -> RefundCommand {
    RefundCommand {
        order,
        requested: true,
        can_manage: true,
    }
}
