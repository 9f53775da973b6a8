//! Line Pricing Engine
//!
//! Computes the derived amounts of one sale-order line in a fixed order:
//!
//! 1. gross = quantity × unit_price
//! 2. discount = gross × discount% / 100
//! 3. before_tax = gross − discount
//! 4. tax = before_tax × tax% / 100
//! 5. withholding (TCS/TDS) = before_tax × withholding% / 100
//! 6. line_total = before_tax + tax + withholding + charges
//!
//! Intermediate values keep full `Decimal` precision and each step is rounded
//! to 2 decimal places once, at output. The returned `amount_before_tax` and
//! `line_total` are assembled from the rounded parts, so the returned fields
//! add up to the cent.

use crate::money::{
    PercentKind, RawNumber, clamp_percent, clamp_percent_value, format_money, non_negative,
    round_money, to_decimal, to_f64, to_non_negative_number,
};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical numeric inputs of one order line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub quantity: f64,
    pub unit_price: f64,
    /// Percentage in [0, 100]
    pub discount_pct: f64,
    /// Percentage, not capped
    pub tax_pct: f64,
    /// TCS/TDS percentage, not capped
    pub withholding_pct: f64,
    /// Flat charge added after tax
    pub charges: f64,
}

/// Line fields as typed into the form, before normalisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOrderLine {
    /// Catalogue code; carried to the submission, never priced
    pub item_code: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<RawNumber>,
    pub unit_price: Option<RawNumber>,
    pub discount_pct: Option<RawNumber>,
    pub tax_pct: Option<RawNumber>,
    pub withholding_pct: Option<RawNumber>,
    pub charges: Option<RawNumber>,
}

impl OrderLineInput {
    /// Normalise raw form input; malformed fields become `0`
    pub fn from_raw(raw: &RawOrderLine) -> Self {
        Self {
            quantity: to_non_negative_number(raw.quantity.as_ref()),
            unit_price: to_non_negative_number(raw.unit_price.as_ref()),
            discount_pct: clamp_percent(raw.discount_pct.as_ref(), PercentKind::Discount),
            tax_pct: clamp_percent(raw.tax_pct.as_ref(), PercentKind::Rate),
            withholding_pct: clamp_percent(raw.withholding_pct.as_ref(), PercentKind::Rate),
            charges: to_non_negative_number(raw.charges.as_ref()),
        }
    }

    /// Same policy as [`Self::from_raw`], applied to already-typed values
    pub fn sanitized(&self) -> Self {
        Self {
            quantity: non_negative(self.quantity),
            unit_price: non_negative(self.unit_price),
            discount_pct: clamp_percent_value(self.discount_pct, PercentKind::Discount),
            tax_pct: clamp_percent_value(self.tax_pct, PercentKind::Rate),
            withholding_pct: clamp_percent_value(self.withholding_pct, PercentKind::Rate),
            charges: non_negative(self.charges),
        }
    }
}

impl From<&RawOrderLine> for OrderLineInput {
    fn from(raw: &RawOrderLine) -> Self {
        Self::from_raw(raw)
    }
}

/// Derived amounts of one line, each rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineComputed {
    pub gross_amount: f64,
    pub discount_amount: f64,
    pub amount_before_tax: f64,
    pub tax_amount: f64,
    pub withholding_amount: f64,
    pub charges: f64,
    pub line_total: f64,
}

/// Display strings for a computed line, always formatted as `"x.yy"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDisplay {
    pub gross_amount: String,
    pub discount_amount: String,
    pub amount_before_tax: String,
    pub tax_amount: String,
    pub withholding_amount: String,
    pub charges: String,
    pub line_total: String,
}

impl OrderLineComputed {
    pub fn display(&self) -> LineDisplay {
        LineDisplay {
            gross_amount: format_money(self.gross_amount),
            discount_amount: format_money(self.discount_amount),
            amount_before_tax: format_money(self.amount_before_tax),
            tax_amount: format_money(self.tax_amount),
            withholding_amount: format_money(self.withholding_amount),
            charges: format_money(self.charges),
            line_total: format_money(self.line_total),
        }
    }
}

/// `base × percent / 100`, `None` on overflow
#[inline]
fn percent_of(base: Decimal, percent: Decimal) -> Option<Decimal> {
    base.checked_mul(percent)?.checked_div(Decimal::ONE_HUNDRED)
}

#[inline]
fn output(value: Option<Decimal>) -> f64 {
    value.map(to_f64).unwrap_or_default()
}

/// Compute every derived amount of one line
///
/// Total over any input: negative or non-finite values are treated as `0`,
/// and a step that overflows `Decimal` yields `0.00` for itself and every
/// step that depends on it.
pub fn compute_line(input: &OrderLineInput) -> OrderLineComputed {
    let line = input.sanitized();

    let quantity = to_decimal(line.quantity);
    let unit_price = to_decimal(line.unit_price);
    let discount_pct = to_decimal(line.discount_pct);
    let tax_pct = to_decimal(line.tax_pct);
    let withholding_pct = to_decimal(line.withholding_pct);
    let charges = to_decimal(line.charges);

    let gross = quantity.checked_mul(unit_price);
    let discount = gross.and_then(|g| percent_of(g, discount_pct));
    let before_tax = gross
        .zip(discount)
        .and_then(|(g, d)| g.checked_sub(d));
    let tax = before_tax.and_then(|b| percent_of(b, tax_pct));
    let withholding = before_tax.and_then(|b| percent_of(b, withholding_pct));

    // Returned amounts: every step rounded once, sums built from rounded parts
    let gross_out = gross.map(round_money);
    let discount_out = discount.map(round_money);
    let before_tax_out = gross_out
        .zip(discount_out)
        .and_then(|(g, d)| g.checked_sub(d));
    let tax_out = tax.map(round_money);
    let withholding_out = withholding.map(round_money);
    let charges_out = round_money(charges);
    let line_total = before_tax_out
        .zip(tax_out)
        .zip(withholding_out)
        .and_then(|((b, t), w)| b.checked_add(t)?.checked_add(w)?.checked_add(charges_out));

    if line_total.is_none() {
        tracing::warn!(
            quantity = line.quantity,
            unit_price = line.unit_price,
            "Line amount overflowed, degraded fields reported as 0.00"
        );
    }

    OrderLineComputed {
        gross_amount: output(gross_out),
        discount_amount: output(discount_out),
        amount_before_tax: output(before_tax_out),
        tax_amount: output(tax_out),
        withholding_amount: output(withholding_out),
        charges: to_f64(charges_out),
        line_total: output(line_total),
    }
}

/// Normalise raw form input and compute the line in one step
pub fn compute_raw_line(raw: &RawOrderLine) -> OrderLineComputed {
    compute_line(&OrderLineInput::from_raw(raw))
}
