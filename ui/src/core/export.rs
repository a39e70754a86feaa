//! Snapshot of the dashboard's headline stats, exported as a JSON download.

use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

use super::errors::ExportError;
use super::page::{
    Page, STAT_AVG_MESSAGES_ID, STAT_HOT_LEADS_ID, STAT_REPLY_RATE_ID, STAT_TOTAL_ID,
};
use super::platform::{self, Platform};
use super::timing;

pub const EXPORT_MIME: &str = "application/json";

/// Stat values as displayed on the page; `None` when the element is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total: Option<String>,
    pub reply_rate: Option<String>,
    pub hot_leads: Option<String>,
    pub avg_messages: Option<String>,
    /// ISO-8601 UTC with milliseconds, e.g. `2026-10-16T09:30:00.123Z`.
    pub timestamp: String,
}

impl StatsSnapshot {
    pub fn capture(page: &impl Page, at: OffsetDateTime) -> Self {
        Self {
            total: page.text_content(STAT_TOTAL_ID),
            reply_rate: page.text_content(STAT_REPLY_RATE_ID),
            hot_leads: page.text_content(STAT_HOT_LEADS_ID),
            avg_messages: page.text_content(STAT_AVG_MESSAGES_ID),
            timestamp: iso_timestamp(at),
        }
    }

    /// Two-space indented JSON.
    pub fn to_pretty_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn iso_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .format(&format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

pub fn export_filename(epoch_ms: u64) -> String {
    format!("heyreach_stats_{epoch_ms}.json")
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDelivery {
    /// The browser took over the download.
    Download { filename: String },
    /// Written to disk.
    Saved { path: String },
}

/// Captures the stats on `page` and hands them to the user as a JSON file.
pub fn export_stats_as_json(page: &impl Page) -> Result<ExportDelivery, ExportError> {
    let snapshot = StatsSnapshot::capture(page, timing::now_utc());
    let json = snapshot.to_pretty_json()?;
    let filename = export_filename(timing::now_ms());

    tracing::info!(%filename, platform = ?Platform::current(), "exporting stats");
    let delivered = platform::download_bytes(&filename, EXPORT_MIME, json.into_bytes())
        .map_err(ExportError::Delivery)?;
    Ok(match delivered {
        Some(path) => ExportDelivery::Saved { path },
        None => ExportDelivery::Download { filename },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::StaticPage;
    use time::{format_description::well_known::Rfc3339, macros::datetime};

    #[test]
    fn absent_elements_serialise_as_null() {
        let snapshot = StatsSnapshot::capture(&StaticPage::new(), timing::now_utc());
        let value: serde_json::Value =
            serde_json::from_str(&snapshot.to_pretty_json().unwrap()).unwrap();

        for field in ["total", "reply_rate", "hot_leads", "avg_messages"] {
            assert!(value[field].is_null(), "{field} should be null");
        }
        let stamp = value["timestamp"].as_str().unwrap();
        assert!(OffsetDateTime::parse(stamp, &Rfc3339).is_ok());
        assert!(stamp.ends_with('Z'));
    }

    #[test]
    fn present_elements_are_copied_verbatim() {
        let page = StaticPage::new()
            .with_text(STAT_TOTAL_ID, "1\u{202F}204")
            .with_text(STAT_REPLY_RATE_ID, "12,5 %")
            .with_text(STAT_HOT_LEADS_ID, "37");
        let snapshot = StatsSnapshot::capture(&page, datetime!(2026-10-16 09:30:00.123 UTC));

        assert_eq!(snapshot.total.as_deref(), Some("1\u{202F}204"));
        assert_eq!(snapshot.reply_rate.as_deref(), Some("12,5 %"));
        assert_eq!(snapshot.hot_leads.as_deref(), Some("37"));
        assert_eq!(snapshot.avg_messages, None);
        assert_eq!(snapshot.timestamp, "2026-10-16T09:30:00.123Z");
    }

    #[test]
    fn json_is_pretty_printed_in_field_order() {
        let snapshot = StatsSnapshot {
            total: Some("5".into()),
            reply_rate: None,
            hot_leads: None,
            avg_messages: None,
            timestamp: "2026-01-01T00:00:00.000Z".into(),
        };
        let json = snapshot.to_pretty_json().unwrap();
        assert!(json.starts_with("{\n  \"total\": \"5\",\n  \"reply_rate\": null"));
    }

    #[test]
    fn timestamps_convert_to_utc() {
        let stamp = iso_timestamp(datetime!(2026-10-16 11:30:00 +2));
        assert_eq!(stamp, "2026-10-16T09:30:00.000Z");
    }

    #[test]
    fn filename_embeds_epoch_millis() {
        assert_eq!(export_filename(1_792_141_200_123), "heyreach_stats_1792141200123.json");
    }
}
