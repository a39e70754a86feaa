//! Submission checks for the export form.

use serde::{Deserialize, Serialize};

use super::config::DashboardConfig;
use super::errors::ValidationError;

/// Fields submitted by the export form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl FormData {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    /// An empty string counts as missing; whitespace does not.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

/// Requires an API key unless the server already has one configured.
pub fn validate_form(form: &FormData, config: &DashboardConfig) -> Result<(), ValidationError> {
    if !form.has_api_key() && !config.api_key_configured {
        return Err(ValidationError::ApiKeyRequired);
    }
    Ok(())
}
