//! Platform-agnostic dashboard utilities.

pub mod config;
pub mod errors;
pub mod export;
pub mod format;
pub mod page;
pub mod platform;
pub mod storage;
pub mod timing;
pub mod toast;
pub mod validation;

pub use config::DashboardConfig;
pub use errors::{handle_api_error, ApiError, ExportError, StorageError, ValidationError};
pub use export::{export_stats_as_json, ExportDelivery, StatsSnapshot};
pub use format::{format_date, format_number};
pub use platform::print_page;
pub use storage::{init_page, load_api_key, save_api_key, KeyValueStore};
pub use toast::{Severity, ToastId, ToastSink, ToastStack};
pub use validation::{validate_form, FormData};
