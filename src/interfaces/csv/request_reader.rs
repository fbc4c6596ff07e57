use crate::domain::money::Currency;
use crate::domain::order::OrderId;
use crate::domain::purchase::{CardDetails, CheckoutRequest, PurchaseRecord, RefundCommand};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    Purchase,
    Refund,
}

/// One row of the request stream. Purchase rows carry the card and amount
/// columns; refund rows only name the target order.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RequestRecord {
    pub op: OpType,
    pub key: Option<String>,
    pub nonce: Option<String>,
    pub order: Option<OrderId>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub card_name: Option<String>,
    pub card_number: Option<String>,
    pub cvc: Option<String>,
    pub exp_month: Option<u8>,
    pub exp_year: Option<u16>,
}

fn require<T>(value: Option<T>, column: &str) -> Result<T> {
    value.ok_or_else(|| PaymentError::Validation(format!("purchase is missing {column}")))
}

impl RequestRecord {
    pub fn into_checkout(self) -> Result<CheckoutRequest> {
        let amount = require(self.amount, "amount")?;
        let currency = Currency::new(&require(self.currency, "currency")?)?;
        let purchase_key = require(self.key, "key")?;
        let card = CardDetails {
            cardholder_name: require(self.card_name, "card_name")?,
            number: require(self.card_number, "card_number")?,
            cvc: require(self.cvc, "cvc")?,
            exp_month: require(self.exp_month, "exp_month")?,
            exp_year: require(self.exp_year, "exp_year")?,
            address_line1: None,
            address_city: None,
            address_state: None,
            address_zip: None,
            address_country: None,
        };

        // A missing nonce stays empty and fails verification downstream.
        Ok(CheckoutRequest {
            gateway_nonce: self.nonce.unwrap_or_default(),
            purchase: PurchaseRecord {
                amount,
                currency,
                purchase_key,
                card,
            },
        })
    }

    /// A refund row is an admin acting deliberately from the host UI, so
    /// the request and permission flags are set.
    pub fn into_refund(self) -> Result<RefundCommand> {
        let order = self
            .order
            .ok_or_else(|| PaymentError::Validation("refund is missing order".to_string()))?;
        Ok(RefundCommand {
            order,
            requested: true,
            can_manage: true,
        })
    }
}

pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<RequestRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
