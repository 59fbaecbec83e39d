//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod file_upload;
pub mod loading;
pub mod nav;
pub mod prediction_table;
pub mod stat_card;
pub mod toast;

pub use chart::{Chart, ChartKind, ChartTypeToggle};
pub use file_upload::FileUpload;
pub use loading::{ListSkeleton, Loading};
pub use nav::Nav;
pub use prediction_table::PredictionTable;
pub use stat_card::StatCard;
pub use toast::Toast;
