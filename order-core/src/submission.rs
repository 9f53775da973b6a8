//! Sale order submission payload
//!
//! Body sent to the order API when a sale order is saved. Field names follow
//! the API's schema (`orderNum`, `lineAmt`, `netAmtAfterTax`,
//! `withholdingTax`); every amount comes straight from the pricing engine.

use crate::order::{OrderLine, SaleOrder};
use crate::pricing::OrderLineComputed;
use crate::status::OrderStatus;
use serde::{Deserialize, Serialize};

/// One line of the submission body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLine {
    /// 1-based position on the order
    pub line_num: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount_pct: f64,
    pub discount_amt: f64,
    /// Quantity × unit price
    pub line_amt: f64,
    /// Amount before tax
    pub net_amt: f64,
    pub tax_pct: f64,
    pub tax_amt: f64,
    pub withholding_pct: f64,
    pub withholding_tax: f64,
    pub charges: f64,
    /// Line total
    pub net_amt_after_tax: f64,
}

impl SubmissionLine {
    fn new(line_num: u32, line: &OrderLine, computed: &OrderLineComputed) -> Self {
        let input = line.input.sanitized();
        Self {
            line_num,
            item_code: line.item_code.clone(),
            description: line.description.clone(),
            quantity: input.quantity,
            unit_price: input.unit_price,
            discount_pct: input.discount_pct,
            discount_amt: computed.discount_amount,
            line_amt: computed.gross_amount,
            net_amt: computed.amount_before_tax,
            tax_pct: input.tax_pct,
            tax_amt: computed.tax_amount,
            withholding_pct: input.withholding_pct,
            withholding_tax: computed.withholding_amount,
            charges: computed.charges,
            net_amt_after_tax: computed.line_total,
        }
    }
}

/// Full submission body for one sale order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrderSubmission {
    pub order_num: String,
    pub status: OrderStatus,
    pub line_count: usize,
    pub gross_amt: f64,
    pub discount_amt: f64,
    pub net_amt: f64,
    pub tax_amt: f64,
    pub withholding_tax: f64,
    pub charges_amt: f64,
    pub net_amt_after_tax: f64,
    pub lines: Vec<SubmissionLine>,
}

impl SaleOrderSubmission {
    /// Build the body from the order's current inputs
    pub fn build(order: &SaleOrder) -> Self {
        let computed = order.computed_lines();
        let summary = crate::pricing::aggregate(&computed);

        let lines = order
            .lines()
            .iter()
            .zip(&computed)
            .zip(1u32..)
            .map(|((line, computed), num)| SubmissionLine::new(num, line, computed))
            .collect();

        Self {
            order_num: order.order_num().to_string(),
            status: order.status(),
            line_count: summary.line_count,
            gross_amt: summary.total_gross_amount,
            discount_amt: summary.total_discount_amount,
            net_amt: summary.total_net_amount,
            tax_amt: summary.total_tax_amount,
            withholding_tax: summary.total_withholding_amount,
            charges_amt: summary.total_charges,
            net_amt_after_tax: summary.total_line_amount,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{OrderLineInput, RawOrderLine};

    fn order() -> SaleOrder {
        let mut order = SaleOrder::new("SO-1001");
        order.add_line(OrderLineInput {
            quantity: 10.0,
            unit_price: 100.0,
            discount_pct: 10.0,
            tax_pct: 18.0,
            withholding_pct: 2.0,
            charges: 5.0,
        });
        order.add_line(OrderLineInput {
            quantity: 1.0,
            unit_price: 250.5,
            // Out-of-range inputs are reported as the engine used them
            discount_pct: 120.0,
            ..Default::default()
        });
        order
    }

    #[test]
    fn test_build_submission() {
        let body = SaleOrderSubmission::build(&order());

        assert_eq!(body.order_num, "SO-1001");
        assert_eq!(body.status, OrderStatus::Draft);
        assert_eq!(body.line_count, 2);
        assert_eq!(body.lines[0].line_num, 1);
        assert_eq!(body.lines[1].line_num, 2);

        let first = &body.lines[0];
        assert_eq!(first.line_amt, 1000.0);
        assert_eq!(first.net_amt, 900.0);
        assert_eq!(first.tax_amt, 162.0);
        assert_eq!(first.withholding_tax, 18.0);
        assert_eq!(first.net_amt_after_tax, 1085.0);

        let second = &body.lines[1];
        assert_eq!(second.discount_pct, 100.0);
        assert_eq!(second.net_amt_after_tax, 0.0);

        assert_eq!(body.gross_amt, 1250.5);
        assert_eq!(body.net_amt, 900.0);
        assert_eq!(body.net_amt_after_tax, 1085.0);
    }

    #[test]
    fn test_submission_wire_names() {
        let json = serde_json::to_value(SaleOrderSubmission::build(&order())).unwrap();

        assert_eq!(json["orderNum"], "SO-1001");
        assert_eq!(json["status"], "DRAFT");
        assert_eq!(json["withholdingTax"], 18.0);
        assert_eq!(json["netAmtAfterTax"], 1085.0);
        assert_eq!(json["lines"][0]["lineAmt"], 1000.0);
        assert_eq!(json["lines"][0]["netAmtAfterTax"], 1085.0);
        assert_eq!(json["lines"][0]["withholdingTax"], 18.0);
    }

    #[test]
    fn test_item_details_pass_through() {
        let raw: RawOrderLine = serde_json::from_str(
            r#"{"itemCode": "SKU-7", "description": "Steel bolt M8", "quantity": "4", "unitPrice": "2"}"#,
        )
        .unwrap();
        let mut order = SaleOrder::new("SO-1002");
        order.add_line(OrderLine::from_raw(&raw));
        order.add_line(OrderLineInput {
            quantity: 1.0,
            unit_price: 3.0,
            ..Default::default()
        });

        let body = SaleOrderSubmission::build(&order);
        assert_eq!(body.lines[0].item_code.as_deref(), Some("SKU-7"));
        assert_eq!(body.lines[0].description.as_deref(), Some("Steel bolt M8"));
        assert_eq!(body.lines[0].line_amt, 8.0);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["lines"][0]["itemCode"], "SKU-7");
        assert_eq!(json["lines"][0]["description"], "Steel bolt M8");
        assert!(json["lines"][1].get("itemCode").is_none());
    }

    #[test]
    fn test_empty_order_submission() {
        let body = SaleOrderSubmission::build(&SaleOrder::new("SO-EMPTY"));
        assert_eq!(body.line_count, 0);
        assert!(body.lines.is_empty());
        assert_eq!(body.net_amt_after_tax, 0.0);
    }
}
