use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::toast_host::{use_toaster, Toaster};
use crate::core::config::DashboardConfig;
use crate::core::export::{export_stats_as_json, ExportDelivery};
use crate::core::format::{format_date, format_number};
use crate::core::page::{
    API_KEY_INPUT_ID, STAT_AVG_MESSAGES_ID, STAT_HOT_LEADS_ID, STAT_REPLY_RATE_ID, STAT_TOTAL_ID,
};
use crate::core::storage::{self, save_api_key};
use crate::core::toast::Severity;
use crate::core::validation::{validate_form, FormData};
use crate::core::{platform, StorageError};
use crate::{i18n, t};

/// Global the server may set with the current campaign figures.
pub const STATS_GLOBAL: &str = "HEYREACH_STATS";

/// Headline figures rendered into the stat cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total: Option<f64>,
    /// Percentage, 0–100.
    #[serde(default)]
    pub reply_rate: Option<f64>,
    #[serde(default)]
    pub hot_leads: Option<f64>,
    #[serde(default)]
    pub avg_messages: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl DashboardStats {
    /// Reads `window.HEYREACH_STATS`; missing or malformed data yields empty stats.
    #[cfg(target_arch = "wasm32")]
    pub fn from_window() -> Self {
        let raw = web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &STATS_GLOBAL.into()).ok())
            .filter(|value| !value.is_undefined() && !value.is_null())
            .and_then(|value| js_sys::JSON::stringify(&value).ok())
            .and_then(|json| json.as_string());
        match raw.as_deref().map(serde_json::from_str::<Self>) {
            Some(Ok(stats)) => stats,
            Some(Err(err)) => {
                tracing::warn!(%err, "ignoring malformed {STATS_GLOBAL}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_window() -> Self {
        Self::default()
    }

    pub fn total_label(&self) -> String {
        display_or_dash(self.total.map(format_number))
    }

    pub fn reply_rate_label(&self) -> String {
        display_or_dash(self.reply_rate.map(|rate| format!("{}\u{a0}%", format_number(rate))))
    }

    pub fn hot_leads_label(&self) -> String {
        display_or_dash(self.hot_leads.map(format_number))
    }

    pub fn avg_messages_label(&self) -> String {
        display_or_dash(self.avg_messages.map(format_number))
    }
}

fn display_or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn Dashboard(stats: DashboardStats) -> Element {
    i18n::init();

    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    let toaster = use_toaster();

    // Runs once after the first render, when the `api_key` input exists.
    use_effect(restore_saved_key);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let submitted = evt
            .values()
            .get(API_KEY_INPUT_ID)
            .map(|value| value.as_value())
            .unwrap_or_default();
        submit_api_key(toaster, &config, submitted);
    };

    let export_stats = stats.clone();
    let on_export = move |_| export_current_stats(toaster, &export_stats);

    let updated = stats.updated_at.as_deref().map(format_date);

    rsx! {
        main { class: "dashboard",
            header { class: "dashboard__header",
                h1 { {t!("dashboard-title")} }
                p { class: "dashboard__subtitle", {t!("dashboard-subtitle")} }
            }

            form { class: "dashboard__form", onsubmit: onsubmit,
                label { r#for: API_KEY_INPUT_ID, {t!("api-key-label")} }
                input {
                    id: API_KEY_INPUT_ID,
                    name: API_KEY_INPUT_ID,
                    r#type: "password",
                    autocomplete: "off",
                    placeholder: t!("api-key-placeholder"),
                }
                button { r#type: "submit", class: "button button--primary", {t!("api-key-save")} }
                if config.api_key_configured {
                    p { class: "dashboard__hint", {t!("api-key-configured")} }
                }
            }

            section { class: "dashboard__stats",
                StatCard { id: STAT_TOTAL_ID, label: t!("stat-total-label"), value: stats.total_label() }
                StatCard { id: STAT_REPLY_RATE_ID, label: t!("stat-reply-rate-label"), value: stats.reply_rate_label() }
                StatCard { id: STAT_HOT_LEADS_ID, label: t!("stat-hot-leads-label"), value: stats.hot_leads_label() }
                StatCard { id: STAT_AVG_MESSAGES_ID, label: t!("stat-avg-messages-label"), value: stats.avg_messages_label() }
            }

            if let Some(date) = updated {
                p { class: "dashboard__updated", {t!("stats-updated", date = date)} }
            }

            div { class: "dashboard__actions",
                button { r#type: "button", class: "button", onclick: on_export, {t!("action-export-json")} }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| platform::print_page(),
                    {t!("action-print")}
                }
            }
        }
    }
}

#[component]
fn StatCard(id: &'static str, label: String, value: String) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-card__label", "{label}" }
            span { class: "stat-card__value", id: "{id}", "{value}" }
        }
    }
}

fn submit_api_key(toaster: Toaster, config: &DashboardConfig, submitted: String) {
    let form = FormData {
        api_key: Some(submitted).filter(|key| !key.is_empty()),
    };
    if let Err(err) = validate_form(&form, config) {
        toaster.show(err.to_string(), Severity::Error);
        return;
    }

    let key = form.api_key.unwrap_or_default();
    let saved = storage::default_store().and_then(|mut store| save_api_key(&mut store, &key));
    match saved {
        Ok(true) => {
            toaster.show(t!("api-key-saved"), Severity::Success);
        }
        Ok(false) => {
            toaster.show(t!("api-key-unchanged"), Severity::Info);
        }
        Err(err) => report_storage_error(toaster, err),
    }
}

fn report_storage_error(toaster: Toaster, err: StorageError) {
    tracing::warn!(%err, "api key not saved");
    toaster.show(err.to_string(), Severity::Error);
}

#[cfg(target_arch = "wasm32")]
fn restore_saved_key() {
    let Some(mut page) = crate::core::page::BrowserPage::current() else {
        return;
    };
    match storage::default_store() {
        Ok(store) => storage::init_page(&store, &mut page),
        Err(err) => tracing::warn!(%err, "saved api key unavailable"),
    }
}

/// Only the browser has a live `api_key` input to fill.
#[cfg(not(target_arch = "wasm32"))]
fn restore_saved_key() {}

fn export_current_stats(toaster: Toaster, stats: &DashboardStats) {
    let outcome = {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = stats;
            match crate::core::page::BrowserPage::current() {
                Some(page) => export_stats_as_json(&page),
                None => Err(crate::core::ExportError::Delivery("document unavailable".into())),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            export_stats_as_json(&rendered_page(stats))
        }
    };

    match outcome {
        Ok(ExportDelivery::Download { .. }) => {
            toaster.show(t!("export-started"), Severity::Info);
        }
        Ok(ExportDelivery::Saved { path }) => {
            toaster.show(t!("export-saved", path = path), Severity::Success);
        }
        Err(err) => {
            tracing::error!(%err, "stats export failed");
            toaster.show(err.to_string(), Severity::Error);
        }
    }
}

/// The stat cards as they would appear in the document.
#[cfg(not(target_arch = "wasm32"))]
fn rendered_page(stats: &DashboardStats) -> crate::core::page::StaticPage {
    crate::core::page::StaticPage::new()
        .with_input(API_KEY_INPUT_ID)
        .with_text(STAT_TOTAL_ID, stats.total_label())
        .with_text(STAT_REPLY_RATE_ID, stats.reply_rate_label())
        .with_text(STAT_HOT_LEADS_ID, stats.hot_leads_label())
        .with_text(STAT_AVG_MESSAGES_ID, stats.avg_messages_label())
}
