//! Order-Level Aggregator
//!
//! Folds computed lines into order totals. The summary is always rebuilt from
//! the full line set; there is no incremental update path to drift out of
//! sync when lines are added, edited or removed out of order.

use super::line_calculator::OrderLineComputed;
use crate::money::{to_decimal, to_f64};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Order totals over every line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub line_count: usize,
    /// Sum of quantity × unit price
    pub total_gross_amount: f64,
    /// Sum of amount before tax
    pub total_net_amount: f64,
    pub total_discount_amount: f64,
    pub total_tax_amount: f64,
    pub total_withholding_amount: f64,
    pub total_charges: f64,
    /// Sum of line totals (grand total)
    pub total_line_amount: f64,
}

#[derive(Default)]
struct Totals {
    gross: Decimal,
    net: Decimal,
    discount: Decimal,
    tax: Decimal,
    withholding: Decimal,
    charges: Decimal,
    line: Decimal,
}

impl Totals {
    fn add(mut self, line: &OrderLineComputed) -> Self {
        accumulate(&mut self.gross, line.gross_amount);
        accumulate(&mut self.net, line.amount_before_tax);
        accumulate(&mut self.discount, line.discount_amount);
        accumulate(&mut self.tax, line.tax_amount);
        accumulate(&mut self.withholding, line.withholding_amount);
        accumulate(&mut self.charges, line.charges);
        accumulate(&mut self.line, line.line_total);
        self
    }
}

/// Overflowing totals degrade to zero instead of panicking
fn accumulate(total: &mut Decimal, amount: f64) {
    *total = total.checked_add(to_decimal(amount)).unwrap_or_else(|| {
        tracing::warn!(amount = amount, "Order total overflowed, reporting 0.00");
        Decimal::ZERO
    });
}

/// Sum every line into an [`OrderSummary`]
///
/// An empty slice yields the all-zero summary.
pub fn aggregate(lines: &[OrderLineComputed]) -> OrderSummary {
    let totals = lines.iter().fold(Totals::default(), Totals::add);

    OrderSummary {
        line_count: lines.len(),
        total_gross_amount: to_f64(totals.gross),
        total_net_amount: to_f64(totals.net),
        total_discount_amount: to_f64(totals.discount),
        total_tax_amount: to_f64(totals.tax),
        total_withholding_amount: to_f64(totals.withholding),
        total_charges: to_f64(totals.charges),
        total_line_amount: to_f64(totals.line),
    }
}
