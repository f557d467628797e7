//! Request handlers.
//!
//! Handlers extract and shape HTTP input, delegate to the services held in
//! [`AppState`](crate::state::AppState) and map errors via
//! [`AppError`](crate::error::AppError).

pub mod claim;
pub mod form;
pub mod found_items;
pub mod graph_data;
pub mod items;
pub mod upload;
