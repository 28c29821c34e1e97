//! HTTP API module for the Tip Distribution Engine.
//!
//! This module exposes shift calculation, the shift ledger, the employee
//! directory and the archive reports as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateShiftRequest, DateRangeQuery, EmployeeListQuery, NewEmployeeRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
