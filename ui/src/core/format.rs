//! Formatting helpers for presenting dashboard figures in French.

use time::{
    format_description::well_known::Rfc3339,
    macros::format_description,
    Date, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

/// Grouping separator used by the French locale (narrow no-break space).
pub const GROUP_SEPARATOR: char = '\u{202F}';

const MAX_FRACTION_DIGITS: usize = 3;

/// Rendered when a date input cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Formats a number with French digit grouping: `1234567.891` → `1 234 567,891`.
///
/// At most three fraction digits are kept (rounded half away from zero) and
/// trailing zeros are dropped. Negative values keep their sign even when they
/// round to zero (`-0.0001` → `-0`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-∞" } else { "∞" }.to_string();
    }

    let rendered = format!("{:.*}", MAX_FRACTION_DIGITS, round_half_away(value.abs()));
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + 4);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

fn round_half_away(value: f64) -> f64 {
    let scale = 10f64.powi(MAX_FRACTION_DIGITS as i32);
    let scaled = value * scale;
    if scaled.is_finite() && scaled.abs() < 1e15 {
        scaled.round() / scale
    } else {
        value
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Formats a date-like string as `16 octobre 2026 à 14:05` in the viewer's offset.
///
/// Falls back to UTC when the local offset cannot be determined.
pub fn format_date(input: &str) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_date_in(input, offset)
}

/// Same as [`format_date`] with an explicit display offset.
pub fn format_date_in(input: &str, offset: UtcOffset) -> String {
    match parse_date_input(input.trim(), offset) {
        Some(moment) => render_french(moment.to_offset(offset)),
        None => INVALID_DATE.to_string(),
    }
}

/// Accepts RFC 3339 (seconds optional), naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// (local time) and `YYYY-MM-DD` (UTC midnight).
fn parse_date_input(input: &str, local: UtcOffset) -> Option<OffsetDateTime> {
    if input.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(parsed);
    }
    if let Some(naive) = input.strip_suffix(&['Z', 'z'][..]).and_then(parse_naive) {
        return Some(naive.assume_utc());
    }
    let minute_offset = format_description!(
        "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
    );
    if let Ok(parsed) = OffsetDateTime::parse(input, &minute_offset) {
        return Some(parsed);
    }
    if let Some(naive) = parse_naive(input) {
        return Some(naive.assume_offset(local));
    }

    Date::parse(input, &format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn parse_naive(input: &str) -> Option<PrimitiveDateTime> {
    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    naive_formats
        .into_iter()
        .find_map(|description| PrimitiveDateTime::parse(input, &description).ok())
}

fn render_french(moment: OffsetDateTime) -> String {
    format!(
        "{} {} {} à {:02}:{:02}",
        moment.day(),
        french_month(moment.month()),
        moment.year(),
        moment.hour(),
        moment.minute()
    )
}

fn french_month(month: Month) -> &'static str {
    match month {
        Month::January => "janvier",
        Month::February => "février",
        Month::March => "mars",
        Month::April => "avril",
        Month::May => "mai",
        Month::June => "juin",
        Month::July => "juillet",
        Month::August => "août",
        Month::September => "septembre",
        Month::October => "octobre",
        Month::November => "novembre",
        Month::December => "décembre",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn groups_thousands_with_narrow_space() {
        assert_eq!(format_number(1234567.0), "1\u{202F}234\u{202F}567");
        assert_ne!(format_number(1234567.0), "1234567");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1\u{202F}000");
    }

    #[test]
    fn keeps_three_fraction_digits_with_comma() {
        assert_eq!(format_number(12.5), "12,5");
        assert_eq!(format_number(0.12345), "0,123");
        assert_eq!(format_number(0.0625), "0,063");
        assert_eq!(format_number(42.0), "42");
    }

    #[test]
    fn negatives_and_non_finite() {
        assert_eq!(format_number(-4321.75), "-4\u{202F}321,75");
        assert_eq!(format_number(-0.0001), "-0");
        assert_eq!(format_number(-0.0), "-0");
        assert_eq!(format_number(0.0001), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn renders_rfc3339_in_requested_offset() {
        let text = format_date_in("2026-10-16T12:05:00Z", offset!(+2));
        assert_eq!(text, "16 octobre 2026 à 14:05");
    }

    #[test]
    fn zoned_timestamps_may_omit_seconds() {
        assert_eq!(
            format_date_in("2026-10-16T12:05Z", offset!(+2)),
            "16 octobre 2026 à 14:05"
        );
        assert_eq!(
            format_date_in("2026-10-16T12:05+02:00", UtcOffset::UTC),
            "16 octobre 2026 à 10:05"
        );
    }

    #[test]
    fn naive_timestamps_are_local() {
        let text = format_date_in("2026-03-01T08:07", offset!(-5));
        assert_eq!(text, "1 mars 2026 à 08:07");
    }

    #[test]
    fn date_only_is_utc_midnight() {
        assert_eq!(format_date_in("2026-08-15", UtcOffset::UTC), "15 août 2026 à 00:00");
        assert_eq!(format_date_in("2026-08-15", offset!(-1)), "14 août 2026 à 23:00");
    }

    #[test]
    fn unparseable_input_is_permissive() {
        assert_eq!(format_date_in("not a date", UtcOffset::UTC), INVALID_DATE);
        assert_eq!(format_date_in("", UtcOffset::UTC), INVALID_DATE);
        assert_eq!(format_date("2026-13-45"), INVALID_DATE);
    }
}
