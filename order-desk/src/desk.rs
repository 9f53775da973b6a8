//! Order document processing
//!
//! An order document is the JSON a sale-order screen would hold before
//! saving: the order number, its current status, raw line fields as typed,
//! and optionally the status the user asked to move to.

use order_core::error::{ApiResponse, AppError, AppResult};
use order_core::{
    LineDisplay, OrderLine, OrderStatus, RawOrderLine, SaleOrder, SaleOrderSubmission,
};
use serde::{Deserialize, Serialize};

/// Incoming order document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    #[serde(default)]
    pub order_num: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub lines: Vec<RawOrderLine>,
    #[serde(default)]
    pub target_status: Option<OrderStatus>,
}

/// Result of processing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReport {
    /// Body for the order API
    pub submission: SaleOrderSubmission,
    /// Per-line amounts formatted for display
    pub lines: Vec<LineDisplay>,
    /// Status actions to enable next
    pub allowed_actions: Vec<OrderStatus>,
}

impl OrderDocument {
    pub fn parse(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::invalid_format(format!("invalid order document: {}", e))
                .with_detail("line", e.line())
                .with_detail("column", e.column())
        })
    }

    /// Build the sale order at its stored status
    pub fn to_order(&self) -> AppResult<SaleOrder> {
        let order_num = self
            .order_num
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::required_field("orderNum"))?;

        let mut order = SaleOrder::with_status(order_num, self.status.unwrap_or_default());
        for raw in &self.lines {
            order.add_line(OrderLine::from_raw(raw));
        }
        Ok(order)
    }
}

/// Price a document and apply its requested status change
pub fn process_document(raw: &str) -> AppResult<OrderReport> {
    let document = OrderDocument::parse(raw)?;
    let mut order = document.to_order()?;

    if let Some(target) = document.target_status {
        order.transition(target)?;
    }

    let lines = order
        .computed_lines()
        .iter()
        .map(|line| line.display())
        .collect();
    let submission = SaleOrderSubmission::build(&order);

    tracing::info!(
        order_num = %submission.order_num,
        status = %submission.status,
        line_count = submission.line_count,
        total = submission.net_amt_after_tax,
        "Order priced"
    );

    Ok(OrderReport {
        submission,
        lines,
        allowed_actions: order.allowed_actions().to_vec(),
    })
}

/// Wrap [`process_document`] in a response envelope
pub fn respond(raw: &str) -> ApiResponse<OrderReport> {
    match process_document(raw) {
        Ok(report) => ApiResponse::success(report),
        Err(err) => {
            tracing::warn!(code = %err.code, message = %err.message, "Order document rejected");
            err.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_core::ErrorCode;

    const DOCUMENT: &str = r#"{
        "orderNum": "SO-1001",
        "status": "Draft",
        "lines": [
            {"quantity": "10", "unitPrice": "100", "discountPct": "10",
             "taxPct": "18", "withholdingPct": "2", "charges": "5"},
            {"quantity": "", "unitPrice": "abc"},
            {"quantity": 1, "unitPrice": 250.5}
        ]
    }"#;

    #[test]
    fn test_process_document() {
        let report = process_document(DOCUMENT).unwrap();

        assert_eq!(report.submission.order_num, "SO-1001");
        assert_eq!(report.submission.line_count, 3);
        assert_eq!(report.submission.net_amt_after_tax, 1335.5);
        assert_eq!(report.lines[0].line_total, "1085.00");
        assert_eq!(report.lines[1].line_total, "0.00");
        assert_eq!(report.lines[2].line_total, "250.50");
        assert_eq!(
            report.allowed_actions,
            vec![
                OrderStatus::Confirmed,
                OrderStatus::Cancelled,
                OrderStatus::AdminMode,
                OrderStatus::AnyMode
            ]
        );
    }

    #[test]
    fn test_status_defaults_to_draft() {
        let report = process_document(r#"{"orderNum": "SO-2"}"#).unwrap();
        assert_eq!(report.submission.status, OrderStatus::Draft);
        assert_eq!(report.submission.line_count, 0);
    }

    #[test]
    fn test_target_status_applied() {
        let report = process_document(
            r#"{"orderNum": "SO-3", "status": "DELIVERED", "targetStatus": "INVOICED"}"#,
        )
        .unwrap();
        assert_eq!(report.submission.status, OrderStatus::Invoiced);
        assert_eq!(
            report.allowed_actions,
            vec![OrderStatus::AdminMode, OrderStatus::AnyMode]
        );
    }

    #[test]
    fn test_invalid_target_status_rejected() {
        let err = process_document(
            r#"{"orderNum": "SO-4", "status": "INVOICED", "targetStatus": "DRAFT"}"#,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_non_numeric_json_values_read_as_zero() {
        let report = process_document(
            r#"{
                "orderNum": "SO-8",
                "lines": [
                    {"itemCode": "SKU-1", "quantity": true, "unitPrice": "100", "charges": "5"},
                    {"quantity": 2, "unitPrice": {}, "taxPct": [18], "charges": null}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(report.lines[0].gross_amount, "0.00");
        assert_eq!(report.lines[0].line_total, "5.00");
        assert_eq!(report.lines[1].line_total, "0.00");
        assert_eq!(report.submission.net_amt_after_tax, 5.0);
        assert_eq!(report.submission.lines[0].item_code.as_deref(), Some("SKU-1"));
    }

    #[test]
    fn test_missing_order_num() {
        let err = process_document(r#"{"orderNum": "  ", "lines": []}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = process_document(r#"{"lines": []}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_malformed_json_and_unknown_status() {
        let err = process_document("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.details.unwrap().contains_key("line"));

        let err = process_document(r#"{"orderNum": "SO-5", "status": "PENDING"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_respond_envelopes() {
        let ok = respond(DOCUMENT);
        assert!(ok.is_success());
        assert!(ok.data.is_some());

        let failed = respond(r#"{"orderNum": "SO-6", "status": "CANCELLED", "targetStatus": "SHIPPED"}"#);
        assert_eq!(failed.code, Some(4008));
        assert!(failed.data.is_none());
        let details = failed.details.unwrap();
        assert_eq!(details.get("from").unwrap(), "CANCELLED");
    }
}
