//! Sale order aggregate
//!
//! Holds only canonical inputs: the order number, the status and the lines
//! (item details plus numeric inputs). Every derived amount is recomputed from those on request, and the
//! status can only move through [`crate::status::apply_transition`].

use crate::error::{AppError, AppResult};
use crate::pricing::{
    OrderLineComputed, OrderLineInput, OrderSummary, RawOrderLine, aggregate, compute_line,
};
use crate::status::{OrderStatus, TransitionError, allowed_transitions, apply_transition};

/// One line of a sale order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderLine {
    pub item_code: Option<String>,
    pub description: Option<String>,
    pub input: OrderLineInput,
}

impl OrderLine {
    /// Normalise a line as typed into the form
    ///
    /// Blank item codes and descriptions are dropped.
    pub fn from_raw(raw: &RawOrderLine) -> Self {
        Self {
            item_code: non_blank(raw.item_code.as_deref()),
            description: non_blank(raw.description.as_deref()),
            input: OrderLineInput::from_raw(raw),
        }
    }
}

impl From<OrderLineInput> for OrderLine {
    fn from(input: OrderLineInput) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleOrder {
    order_num: String,
    status: OrderStatus,
    lines: Vec<OrderLine>,
}

impl SaleOrder {
    /// New order, created as `Draft`
    pub fn new(order_num: impl Into<String>) -> Self {
        Self::with_status(order_num, OrderStatus::Draft)
    }

    /// Restore an order previously persisted at `status`
    pub fn with_status(order_num: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            order_num: order_num.into(),
            status,
            lines: Vec::new(),
        }
    }

    pub fn order_num(&self) -> &str {
        &self.order_num
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add_line(&mut self, line: impl Into<OrderLine>) {
        self.lines.push(line.into());
    }

    /// Replace the line at `index`
    pub fn update_line(&mut self, index: usize, line: impl Into<OrderLine>) -> AppResult<()> {
        let slot = self
            .lines
            .get_mut(index)
            .ok_or_else(|| AppError::line_not_found(index))?;
        *slot = line.into();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> AppResult<OrderLine> {
        if index >= self.lines.len() {
            return Err(AppError::line_not_found(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Move to `target` if the transition table allows it
    pub fn transition(&mut self, target: OrderStatus) -> Result<OrderStatus, TransitionError> {
        self.status = apply_transition(self.status, target)?;
        Ok(self.status)
    }

    /// Statuses the order may move to next (enabled action buttons)
    pub fn allowed_actions(&self) -> &'static [OrderStatus] {
        allowed_transitions(self.status)
    }

    pub fn computed_lines(&self) -> Vec<OrderLineComputed> {
        self.lines.iter().map(|line| compute_line(&line.input)).collect()
    }

    /// Totals over the full current line set
    pub fn summary(&self) -> OrderSummary {
        aggregate(&self.computed_lines())
    }
}
