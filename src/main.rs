//! ONCF Dashboard
//!
//! Passenger traffic prediction dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - CSV upload (passengers, events, holidays) to the prediction backend
//! - Model training and prediction (Linear Regression / Random Forest / XGBoost)
//! - Chart and table visualization of merged data and predictions
//! - Prediction history with CSV export
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All CSV merging, feature engineering and model training
//! happens in the external backend; this crate is the presentation layer
//! talking to it over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod export;
mod format;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
