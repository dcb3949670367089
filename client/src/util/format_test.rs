use time::macros::{datetime, offset};

use super::*;

// =============================================================
// format_bytes
// =============================================================

#[test]
fn format_bytes_zero() {
    assert_eq!(format_bytes(0.0), "0 B");
}

#[test]
fn format_bytes_kilobytes_with_fraction() {
    assert_eq!(format_bytes(1536.0), "1.5 KB");
}

#[test]
fn format_bytes_exact_gigabyte() {
    assert_eq!(format_bytes(1_073_741_824.0), "1 GB");
}

#[test]
fn format_bytes_stays_in_bytes_below_one_kilobyte() {
    assert_eq!(format_bytes(1.0), "1 B");
    assert_eq!(format_bytes(1023.0), "1023 B");
    assert_eq!(format_bytes(0.5), "0.5 B");
}

#[test]
fn format_bytes_rounds_to_two_decimals() {
    assert_eq!(format_bytes(1_234_567.0), "1.18 MB");
    assert_eq!(format_bytes(1025.0), "1 KB");
}

#[test]
fn format_bytes_caps_at_terabytes() {
    let two_pb = 2.0 * 1024f64.powi(5);
    assert_eq!(format_bytes(two_pb), "2048 TB");
    assert_eq!(format_bytes(1024f64.powi(4)), "1 TB");
}

#[test]
fn format_bytes_falsy_inputs_render_zero() {
    assert_eq!(format_bytes(f64::NAN), "0 B");
    assert_eq!(format_bytes(-512.0), "0 B");
    assert_eq!(format_bytes(f64::INFINITY), "0 B");
}

// =============================================================
// format_time
// =============================================================

#[test]
fn format_time_zh_cn_layout() {
    let ts = datetime!(2024-01-05 09:03:07 UTC);
    assert_eq!(format_time(ts, Locale::ZhCn), "2024/01/05 09:03:07");
}

#[test]
fn format_time_en_us_uses_twelve_hour_clock() {
    assert_eq!(format_time(datetime!(2024-01-05 09:03:07 UTC), Locale::EnUs), "01/05/2024, 09:03:07 AM");
    assert_eq!(format_time(datetime!(2024-01-05 00:15:00 UTC), Locale::EnUs), "01/05/2024, 12:15:00 AM");
    assert_eq!(format_time(datetime!(2024-01-05 12:00:01 UTC), Locale::EnUs), "01/05/2024, 12:00:01 PM");
    assert_eq!(format_time(datetime!(2024-12-31 23:59:59 UTC), Locale::EnUs), "12/31/2024, 11:59:59 PM");
}

#[test]
fn format_time_european_layouts() {
    let ts = datetime!(2024-01-05 17:03:07 UTC);
    assert_eq!(format_time(ts, Locale::EnGb), "05/01/2024, 17:03:07");
    assert_eq!(format_time(ts, Locale::DeDe), "05.01.2024, 17:03:07");
    assert_eq!(format_time(ts, Locale::JaJp), "2024/01/05 17:03:07");
}

#[test]
fn format_time_uses_timestamp_offset() {
    let ts = datetime!(2024-01-05 23:30:00 +08:00);
    assert_eq!(format_time(ts, Locale::ZhCn), "2024/01/05 23:30:00");
}

// =============================================================
// Locale parsing
// =============================================================

#[test]
fn locale_parses_tags_and_language_codes() {
    assert_eq!("zh-CN".parse::<Locale>().unwrap(), Locale::ZhCn);
    assert_eq!("en_gb".parse::<Locale>().unwrap(), Locale::EnGb);
    assert_eq!("de".parse::<Locale>().unwrap(), Locale::DeDe);
    assert_eq!("EN".parse::<Locale>().unwrap(), Locale::EnUs);
    assert_eq!(Locale::default(), Locale::ZhCn);
}

#[test]
fn locale_rejects_unknown_tag() {
    let err = "fr-FR".parse::<Locale>().unwrap_err();
    assert_eq!(err, UnknownLocale("fr-FR".to_owned()));
}

// =============================================================
// Timestamp parsing
// =============================================================

#[test]
fn parse_naive_iso_as_utc() {
    assert_eq!(parse_timestamp("2024-01-05T09:03:07"), Some(datetime!(2024-01-05 09:03:07 UTC)));
    assert_eq!(
        parse_timestamp("2024-01-05T09:03:07.250000"),
        Some(datetime!(2024-01-05 09:03:07.25 UTC))
    );
    assert_eq!(parse_timestamp("2024-01-05 09:03:07"), Some(datetime!(2024-01-05 09:03:07 UTC)));
}

#[test]
fn parse_rfc3339_keeps_offset() {
    assert_eq!(parse_timestamp("2024-01-05T09:03:07+08:00"), Some(datetime!(2024-01-05 09:03:07 +08:00)));
    assert_eq!(parse_timestamp("2024-01-05T09:03:07Z"), Some(datetime!(2024-01-05 09:03:07 UTC)));
}

#[test]
fn parse_date_only_and_epoch_millis() {
    assert_eq!(parse_timestamp("2024-01-05"), Some(datetime!(2024-01-05 00:00:00 UTC)));
    assert_eq!(parse_timestamp("1704445387000"), Some(datetime!(2024-01-05 09:03:07 UTC)));
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(parse_timestamp(""), None);
    assert_eq!(parse_timestamp("yesterday"), None);
    assert_eq!(parse_timestamp("2024-13-40T99:00:00"), None);
}

#[test]
fn format_timestamp_shifts_to_display_offset() {
    let rendered = format_timestamp("2024-01-05T20:00:00", Locale::ZhCn, offset!(+8));
    assert_eq!(rendered.as_deref(), Some("2024/01/06 04:00:00"));
    assert_eq!(format_timestamp("not a time", Locale::ZhCn, UtcOffset::UTC), None);
}
