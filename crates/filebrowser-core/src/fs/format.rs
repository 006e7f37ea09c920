//! Human-readable formatting for sizes and timestamps.

use std::fmt::Write;
use std::time::SystemTime;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::error::{CoreError, CoreResult};
use crate::fs::metadata::DEFAULT_DATE_FORMAT;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Formats a byte count as `"512 B"`, `"1.5 KB"`, `"10.0 MB"` or `"2.0 GB"`.
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Formats a raw byte count with thousands separators, e.g. `"1,536 bytes"`.
pub fn format_byte_count(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped} bytes")
}

/// Formats `time` in the local timezone using a `strftime`-style pattern.
///
/// A pattern chrono cannot render falls back to [`DEFAULT_DATE_FORMAT`].
pub fn format_timestamp(time: SystemTime, pattern: &str) -> String {
    let local: DateTime<Local> = time.into();
    let mut out = String::new();
    if write!(out, "{}", local.format(pattern)).is_err() {
        tracing::warn!(pattern, "unrenderable date format, using default");
        out.clear();
        let _ = write!(out, "{}", local.format(DEFAULT_DATE_FORMAT));
    }
    out
}

/// Checks that `pattern` only contains specifiers chrono understands.
///
/// # Errors
///
/// Returns [`CoreError::ConfigParse`] naming the pattern otherwise.
pub fn validate_date_format(pattern: &str) -> CoreResult<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(CoreError::ConfigParse(format!(
            "invalid date format: {pattern:?}"
        )));
    }
    Ok(())
}

/// Parses a size string such as `"10MB"`, `"512 KB"`, `"1GB"` or `"4096"`.
///
/// Units are binary (1 KB = 1024 bytes) and case-insensitive.
///
/// # Errors
///
/// Returns [`CoreError::ConfigParse`] if the number or the unit is not recognised.
pub fn parse_size(s: &str) -> CoreResult<u64> {
    let trimmed = s.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    let value: u64 = number
        .parse()
        .map_err(|_| CoreError::ConfigParse(format!("invalid size: {s:?}")))?;

    let multiplier = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => KB,
        "M" | "MB" => MB,
        "G" | "GB" => GB,
        other => {
            return Err(CoreError::ConfigParse(format!(
                "unknown size unit {other:?} in {s:?}"
            )))
        }
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| CoreError::ConfigParse(format!("size overflows: {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn format_size_kilobytes() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }

    #[test]
    fn format_size_megabytes() {
        assert_eq!(format_size(10 * MB), "10.0 MB");
    }

    #[test]
    fn format_size_gigabytes() {
        assert_eq!(format_size(3 * GB), "3.0 GB");
    }

    #[test]
    fn byte_count_groups_thousands() {
        assert_eq!(format_byte_count(0), "0 bytes");
        assert_eq!(format_byte_count(999), "999 bytes");
        assert_eq!(format_byte_count(1536), "1,536 bytes");
        assert_eq!(format_byte_count(10_485_760), "10,485,760 bytes");
    }

    #[test]
    fn timestamp_uses_pattern() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400 * 365);
        let formatted = format_timestamp(time, "%Y");
        assert!(formatted == "1970" || formatted == "1971");
    }

    #[test]
    fn timestamp_with_unknown_specifier_falls_back() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400 * 365);
        let formatted = format_timestamp(time, "%Q");
        assert_eq!(formatted, format_timestamp(time, DEFAULT_DATE_FORMAT));
    }

    #[test]
    fn validate_date_format_accepts_known_specifiers() {
        assert!(validate_date_format("%Y-%m-%d %H:%M:%S").is_ok());
        assert!(validate_date_format("%d/%m/%Y").is_ok());
        assert!(validate_date_format("plain text").is_ok());
    }

    #[test]
    fn validate_date_format_rejects_unknown_specifiers() {
        assert!(matches!(
            validate_date_format("%Q"),
            Err(CoreError::ConfigParse(_))
        ));
        assert!(matches!(
            validate_date_format("%Y-%"),
            Err(CoreError::ConfigParse(_))
        ));
    }

    #[test]
    fn parse_size_units() {
        assert_eq!(parse_size("10MB").unwrap(), 10 * MB);
        assert_eq!(parse_size("512 kb").unwrap(), 512 * KB);
        assert_eq!(parse_size("1G").unwrap(), GB);
        assert_eq!(parse_size("4096").unwrap(), 4096);
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(matches!(parse_size("MB"), Err(CoreError::ConfigParse(_))));
        assert!(matches!(parse_size("10XB"), Err(CoreError::ConfigParse(_))));
        assert!(matches!(parse_size(""), Err(CoreError::ConfigParse(_))));
    }
}
