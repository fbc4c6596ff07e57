use crate::domain::money::{Currency, to_minor_units};
use crate::domain::order::{ChargeId, GatewayId, OrderId};
use crate::domain::ports::{
    ChargeGatewayBox, ChargeRequest, EventSinkBox, GatewayEvent, NonceVerifierBox, OrderStoreBox,
    RefundRequest,
};
use crate::domain::purchase::{CheckoutRequest, RefundCommand};
use crate::domain::settings::ApiKey;
use crate::error::{PaymentError, Result};

/// Outcome of a checkout attempt. A decline is an expected outcome and is
/// reported here rather than as an error; the host decides where to send
/// the customer next.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Completed { order: OrderId, charge: ChargeId },
    Failed { order: OrderId },
}

/// Why a refund request was skipped without touching the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundSkip {
    Permission,
    NotRequested,
    AlreadyProcessed,
    OtherGateway,
    MissingCredential,
    NoChargeReference,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefundDisposition {
    Skipped(RefundSkip),
    Refunded { amount: i64, currency: Currency },
    Failed { message: String },
}

/// Translates host purchase and refund actions into remote gateway calls
/// and interprets the results into order-status transitions.
///
/// The adapter owns no credential: the host passes the key into every
/// operation, and its absence makes both paths refuse safely without any
/// network traffic. Each operation runs to completion sequentially,
/// awaiting the store and the gateway in turn.
pub struct GatewayAdapter {
    orders: OrderStoreBox,
    gateway: ChargeGatewayBox,
    nonces: NonceVerifierBox,
    events: EventSinkBox,
}

impl GatewayAdapter {
    pub fn new(
        orders: OrderStoreBox,
        gateway: ChargeGatewayBox,
        nonces: NonceVerifierBox,
        events: EventSinkBox,
    ) -> Self {
        Self {
            orders,
            gateway,
            nonces,
            events,
        }
    }

    /// Handles a checkout submission for this gateway.
    ///
    /// The nonce is verified before anything else; a pending order is
    /// recorded, charged exactly once, and transitioned to completed or
    /// failed depending on the gateway's answer. A declined charge is
    /// terminal for this purchase attempt; no retry happens here.
    pub async fn process_purchase(
        &self,
        request: CheckoutRequest,
        credential: Option<&ApiKey>,
    ) -> Result<CheckoutOutcome> {
        if !self.nonces.verify(&request.gateway_nonce) {
            return Err(PaymentError::NonceVerification);
        }

        let purchase = request.purchase;

        // A failing insert aborts the flow before any gateway traffic.
        let mut order = self
            .orders
            .create(GatewayId::Securionpay, &purchase.purchase_key)
            .await?;

        let Some(key) = credential else {
            tracing::warn!(order = order.id, "no API key configured, refusing charge");
            return Err(PaymentError::MissingCredential);
        };

        let amount = to_minor_units(purchase.amount, &purchase.currency)?;
        let charge_request = ChargeRequest {
            amount,
            currency: purchase.currency,
            card: purchase.card,
        };

        match self.gateway.create_charge(key, charge_request).await {
            Ok(charge) => {
                order.complete(charge.id.clone());
                order.add_note(format!("Transaction ID : {}", charge.id));
                self.orders.store(order.clone()).await?;
                tracing::info!(order = order.id, charge = %charge.id, "charge completed");
                Ok(CheckoutOutcome::Completed {
                    order: order.id,
                    charge: charge.id,
                })
            }
            Err(err) => {
                order.add_note(err.message.clone());
                order.fail();
                self.orders.store(order.clone()).await?;
                tracing::warn!(order = order.id, "charge declined: {}", err.message);
                Ok(CheckoutOutcome::Failed { order: order.id })
            }
        }
    }

    /// Possibly refunds an order in SecurionPay after an admin marked it
    /// refunded in the host.
    ///
    /// Each guard is a skip, not an error, and they run in a fixed order:
    /// permission, actual request, the refund-processed latch, gateway
    /// ownership, credential, stored charge reference. Only when all pass
    /// is the gateway called. A failed remote refund leaves the latch
    /// unset so a later, correctly targeted retry stays possible.
    pub async fn maybe_refund(
        &self,
        command: RefundCommand,
        credential: Option<&ApiKey>,
    ) -> Result<RefundDisposition> {
        if !command.can_manage {
            return Ok(RefundDisposition::Skipped(RefundSkip::Permission));
        }
        if !command.requested {
            return Ok(RefundDisposition::Skipped(RefundSkip::NotRequested));
        }

        let mut order = self
            .orders
            .get(command.order)
            .await?
            .ok_or_else(|| PaymentError::Store(format!("order {} not found", command.order)))?;

        if order.refund_processed {
            return Ok(RefundDisposition::Skipped(RefundSkip::AlreadyProcessed));
        }
        if order.gateway != GatewayId::Securionpay {
            return Ok(RefundDisposition::Skipped(RefundSkip::OtherGateway));
        }
        let Some(key) = credential else {
            return Ok(RefundDisposition::Skipped(RefundSkip::MissingCredential));
        };
        let Some(charge_id) = order.charge_id.clone() else {
            return Ok(RefundDisposition::Skipped(RefundSkip::NoChargeReference));
        };

        match self.gateway.refund_charge(key, RefundRequest { charge_id }).await {
            Ok(refund) => {
                order.latch_refund();
                order.add_note(format!(
                    "SecurionPay successfully refunded {} {}",
                    refund.amount, refund.currency
                ));
                self.orders.store(order).await?;
                self.events.emit(GatewayEvent::RefundCompleted {
                    order: command.order,
                });
                tracing::info!(order = command.order, "refund completed");
                Ok(RefundDisposition::Refunded {
                    amount: refund.amount,
                    currency: refund.currency,
                })
            }
            Err(err) => {
                order.add_note(format!("SecurionPay refund failed : {}", err.message));
                self.orders.store(order).await?;
                self.events.emit(GatewayEvent::RefundFailed {
                    order: command.order,
                    message: err.message.clone(),
                });
                tracing::warn!(order = command.order, "refund failed: {}", err.message);
                Ok(RefundDisposition::Failed {
                    message: err.message,
                })
            }
        }
    }
}
