//! HTTP API module for the Increment Engine.
//!
//! This module provides the REST endpoints for managing employees and HR
//! policies and for producing increment reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeInput};
pub use response::{ActionResponse, ApiError, ApiErrorResponse};
pub use state::AppState;
