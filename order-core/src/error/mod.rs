//! Unified error system for the order core
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`AppError`]: Error type with code, message and optional details
//! - [`ApiResponse`]: Envelope handed to whatever transport sits on top
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 9xxx: System errors
//!
//! Malformed numeric input is never an error in this crate; it degrades to
//! zero in [`crate::money`]. The only domain error is a rejected status
//! transition.
//!
//! # Example
//!
//! ```
//! use order_core::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::OrderLineNotFound, "line 3 not found")
//!     .with_detail("index", 3);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(4006));
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
