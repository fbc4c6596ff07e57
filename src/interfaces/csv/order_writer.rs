use crate::domain::order::{Order, OrderId, OrderStatus};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct OrderRow<'a> {
    order: OrderId,
    status: OrderStatus,
    charge: &'a str,
    refunded: bool,
}

pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_orders(&mut self, orders: &[Order]) -> Result<()> {
        for order in orders {
            let row = OrderRow {
                order: order.id,
                status: order.status,
                charge: order
                    .charge_id
                    .as_ref()
                    .map(|charge| charge.as_str())
                    .unwrap_or(""),
                refunded: order.refund_processed,
            };
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
