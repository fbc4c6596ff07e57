use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

pub type OrderId = u32;

/// Opaque charge reference issued by the remote gateway. Stored on the
/// order after a successful charge; required input to any later refund.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChargeId(String);

impl ChargeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which gateway an order was placed through. Compared by exact equality
/// when deciding whether a refund belongs to this adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayId {
    Securionpay,
    Paypal,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// An order owned by the host commerce system. The adapter only mutates
/// its status and the attached gateway metadata; the ordered notes log
/// records every charge and refund outcome for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub gateway: GatewayId,
    pub purchase_key: String,
    pub status: OrderStatus,
    pub charge_id: Option<ChargeId>,
    pub refund_processed: bool,
    pub notes: Vec<String>,
}

impl Order {
    pub fn pending(id: OrderId, gateway: GatewayId, purchase_key: &str) -> Self {
        Self {
            id,
            gateway,
            purchase_key: purchase_key.to_string(),
            status: OrderStatus::Pending,
            charge_id: None,
            refund_processed: false,
            notes: Vec::new(),
        }
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Records a successful charge: stores the reference and completes
    /// the order.
    pub fn complete(&mut self, charge_id: ChargeId) {
        self.charge_id = Some(charge_id);
        self.status = OrderStatus::Completed;
    }

    pub fn fail(&mut self) {
        self.status = OrderStatus::Failed;
    }

    /// Sets the refund-processed latch. Once set it is never cleared, so
    /// repeated refund requests become no-ops.
    pub fn latch_refund(&mut self) {
        self.refund_processed = true;
        self.status = OrderStatus::Refunded;
    }
}
