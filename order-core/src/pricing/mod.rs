//! Order line pricing
//!
//! Line-level amounts are computed by [`compute_line`]; order totals are
//! folded from computed lines by [`aggregate`].

mod line_calculator;
mod order_calculator;

pub use line_calculator::*;
pub use order_calculator::*;
