//! Shared UI crate for the HeyReach Exporter dashboard. Formatting, toasts,
//! validation, API key persistence and exports live here; platform crates only
//! launch the app.

pub mod core;
pub mod i18n;
pub mod views;

pub mod components {
    // Toast renderer and handle (components/toast_host.rs)
    pub mod toast_host;
    pub use toast_host::use_toaster;
    pub use toast_host::ToastHost;
    pub use toast_host::Toaster;
}
