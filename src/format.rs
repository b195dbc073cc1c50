//! Display Formatting
//!
//! Metadata text for list rows.

use chrono::{DateTime, Utc};

use crate::models::Codebook;

/// `1234567` → `1,234,567`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn char_count_text(codebook: &Codebook) -> String {
    format!("{} characters", thousands(codebook.metadata.characters.unwrap_or(0)))
}

pub fn file_count_text(n: usize) -> String {
    format!("{} file{}", n, if n == 1 { "" } else { "s" })
}

/// Unix seconds → `YYYY-MM-DD HH:MM UTC`; zero/negative/absent → empty
pub fn unix_date_text(ts: Option<f64>) -> String {
    match ts.filter(|t| *t > 0.0) {
        Some(t) => DateTime::<Utc>::from_timestamp(t as i64, 0)
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
        None => String::new(),
    }
}

/// ISO-8601 timestamp → `YYYY-MM-DD`, passing unparseable input through
pub fn iso_date_text(iso: Option<&str>) -> String {
    match iso {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| s.to_string()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_file_count_text() {
        assert_eq!(file_count_text(0), "0 files");
        assert_eq!(file_count_text(1), "1 file");
        assert_eq!(file_count_text(3), "3 files");
    }

    #[test]
    fn test_unix_date_text() {
        assert_eq!(unix_date_text(None), "");
        assert_eq!(unix_date_text(Some(0.0)), "");
        assert_eq!(unix_date_text(Some(1_700_000_000.0)), "2023-11-14 22:13 UTC");
    }

    #[test]
    fn test_iso_date_text() {
        assert_eq!(iso_date_text(Some("2025-03-01T10:00:00Z")), "2025-03-01");
        assert_eq!(iso_date_text(Some("yesterday")), "yesterday");
        assert_eq!(iso_date_text(None), "");
    }
}
