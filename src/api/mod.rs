//! HTTP API layer
//!
//! Client functions for the prediction backend and error mapping.

pub mod client;
pub mod error;

pub use client::*;
pub use error::ApiError;
