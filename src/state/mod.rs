//! State Management
//!
//! Global application state backed by Leptos signals, the response entities
//! it holds, and the pure helpers that derive chart/table data from them.

pub mod global;

pub use global::{provide_global_state, GlobalState};
