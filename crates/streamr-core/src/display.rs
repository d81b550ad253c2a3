//! Display formatting for record fields (view counts, dates, durations).

use crate::records::ViewCount;
use crate::time::UploadDate;

/// Label used when a date is missing or unreadable
pub const DATE_UNKNOWN: &str = "Date unknown";

/// Label used when a view count is missing
pub const VIEWS_UNKNOWN: &str = "N/A";

/// Format a view count compactly: `1.2M`, `3.4K`, `999`.
///
/// Text counts that do not parse as numbers ("200k") are returned verbatim.
pub fn format_views(views: Option<&ViewCount>) -> String {
    let value = match views {
        None => return VIEWS_UNKNOWN.to_string(),
        Some(ViewCount::Count(n)) => *n as f64,
        Some(ViewCount::Text(text)) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return text.clone(),
        },
    };

    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        group_thousands(value.trunc() as i64)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

/// Format an upload date as `M/D/YYYY`, or pass a label through.
pub fn format_upload_date(date: Option<&UploadDate>) -> String {
    match date {
        None => DATE_UNKNOWN.to_string(),
        Some(UploadDate::Label(label)) => label.clone(),
        Some(UploadDate::At(ts)) => ts
            .to_datetime()
            .map(|dt| dt.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| DATE_UNKNOWN.to_string()),
    }
}

/// Format a media duration in whole seconds as `m:ss`.
pub fn format_duration(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    #[test]
    fn test_format_views_scales() {
        assert_eq!(format_views(None), "N/A");
        assert_eq!(format_views(Some(&ViewCount::Count(999))), "999");
        assert_eq!(format_views(Some(&ViewCount::Count(1_500))), "1.5K");
        assert_eq!(format_views(Some(&ViewCount::Count(2_000_000))), "2.0M");
    }

    #[test]
    fn test_format_views_text() {
        assert_eq!(format_views(Some(&ViewCount::Text("200k".into()))), "200k");
        assert_eq!(format_views(Some(&ViewCount::Text("4200".into()))), "4.2K");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1000), "-1,000");
    }

    #[test]
    fn test_format_upload_date() {
        assert_eq!(format_upload_date(None), DATE_UNKNOWN);
        let label = UploadDate::Label("yesterday".into());
        assert_eq!(format_upload_date(Some(&label)), "yesterday");
        // 2024-01-05T00:00:00Z
        let at = UploadDate::At(Timestamp(1_704_412_800_000));
        assert_eq!(format_upload_date(Some(&at)), "1/5/2024");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3_600), "60:00");
    }
}
