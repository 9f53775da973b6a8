//! Sale order pricing core
//!
//! Pure, synchronous computation shared by every order screen:
//!
//! - [`money`]: forgiving numeric parsing, percentage clamping, rounding
//! - [`pricing`]: per-line amounts and order totals
//! - [`status`]: the order status transition table
//! - [`order`]: sale order aggregate that recomputes totals on demand
//! - [`submission`]: payload for the order API
//!
//! Nothing here performs I/O or holds shared state; all functions are safe
//! to call from any thread.

pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod status;
pub mod submission;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use money::RawNumber;
pub use order::{OrderLine, SaleOrder};
pub use pricing::{
    LineDisplay, OrderLineComputed, OrderLineInput, OrderSummary, RawOrderLine, aggregate,
    compute_line,
};
pub use status::{
    OrderStatus, TransitionError, allowed_transitions, apply_transition, is_transition_allowed,
};
pub use submission::{SaleOrderSubmission, SubmissionLine};
