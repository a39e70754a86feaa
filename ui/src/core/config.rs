//! Dashboard configuration, read once at startup and passed down explicitly.

use super::toast::ToastTiming;

/// Global the server sets when it already holds an API key.
pub const API_KEY_CONFIGURED_GLOBAL: &str = "API_KEY_CONFIGURED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardConfig {
    /// The server has an API key configured, so the form may omit one.
    pub api_key_configured: bool,
    pub toast: ToastTiming,
}

impl DashboardConfig {
    /// Reads `window.API_KEY_CONFIGURED` using JavaScript truthiness.
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> Self {
        let api_key_configured = web_sys::window()
            .and_then(|window| {
                js_sys::Reflect::get(&window, &API_KEY_CONFIGURED_GLOBAL.into()).ok()
            })
            .map(|value| value.is_truthy())
            .unwrap_or(false);
        tracing::debug!(api_key_configured, "dashboard config loaded");
        Self {
            api_key_configured,
            ..Self::default()
        }
    }

    /// Non-browser targets have no server-provided globals.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_window() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_a_key() {
        let config = DashboardConfig::from_window();
        assert!(!config.api_key_configured);
        assert_eq!(config.toast, ToastTiming::default());
    }
}
