// Display helpers for call records

use chrono::DateTime;

/// Display-only USD -> INR rate used for cost columns
pub const USD_TO_INR: f64 = 83.0;

/// Placeholder shown for missing values
pub const MISSING_VALUE: &str = "—";

/// `"{m}m {s}s"` between two RFC 3339 timestamps, `"N/A"` if either is missing
pub fn format_duration(started_at: Option<&str>, ended_at: Option<&str>) -> String {
    let (Some(started), Some(ended)) = (started_at, ended_at) else {
        return "N/A".to_string();
    };
    let (Ok(started), Ok(ended)) = (
        DateTime::parse_from_rfc3339(started),
        DateTime::parse_from_rfc3339(ended),
    ) else {
        return "N/A".to_string();
    };

    let secs = (ended - started).num_seconds().max(0);
    format!("{}m {}s", secs / 60, secs % 60)
}

/// USD cost rendered in rupees
pub fn format_cost(cost: Option<f64>) -> String {
    match cost {
        Some(usd) => format!("₹{:.2}", usd * USD_TO_INR),
        None => MISSING_VALUE.to_string(),
    }
}

/// `"customer-ended-call"` -> `"Customer Ended Call"`
pub fn format_ended_reason(reason: &str) -> String {
    reason
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            format_duration(Some("2024-05-01T10:00:00Z"), Some("2024-05-01T10:02:05Z")),
            "2m 5s"
        );
        assert_eq!(format_duration(None, Some("2024-05-01T10:02:05Z")), "N/A");
        assert_eq!(format_duration(Some("garbage"), Some("2024-05-01T10:02:05Z")), "N/A");
        // Negative spans clamp to zero
        assert_eq!(
            format_duration(Some("2024-05-01T10:05:00Z"), Some("2024-05-01T10:00:00Z")),
            "0m 0s"
        );
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(Some(0.5)), "₹41.50");
        assert_eq!(format_cost(Some(0.0)), "₹0.00");
        assert_eq!(format_cost(None), MISSING_VALUE);
    }

    #[test]
    fn test_format_ended_reason() {
        assert_eq!(format_ended_reason("customer-ended-call"), "Customer Ended Call");
        assert_eq!(format_ended_reason("voicemail"), "Voicemail");
    }
}
