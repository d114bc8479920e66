// Failure export (CSV)

use super::constants::FAILURES_CSV_HEADER;
use crate::domain::CallResult;

/// Render failed calls as `phone,error` CSV
///
/// Returns `None` when nothing failed so the caller can say so instead of
/// writing an empty file. The error column is always quoted; embedded quotes
/// are doubled.
pub fn failures_csv<'a>(results: impl IntoIterator<Item = &'a CallResult>) -> Option<String> {
    let rows: Vec<String> = results
        .into_iter()
        .filter(|r| !r.ok)
        .map(|r| {
            let error = r.error.as_deref().unwrap_or_default().replace('"', "\"\"");
            format!("{},\"{}\"", r.to, error)
        })
        .collect();

    if rows.is_empty() {
        return None;
    }

    let mut csv = String::from(FAILURES_CSV_HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(&row);
    }
    Some(csv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhoneNumber;

    fn number(s: &str) -> PhoneNumber {
        PhoneNumber::parse(s).unwrap()
    }

    #[test]
    fn test_no_failures_is_none() {
        let results = vec![CallResult::success(number("+918267818161"), None)];
        assert_eq!(failures_csv(&results), None);
        assert_eq!(failures_csv(&Vec::new()), None);
    }

    #[test]
    fn test_rows_only_for_failures() {
        let results = vec![
            CallResult::success(number("+918267818161"), Some("c1".into())),
            CallResult::failure(number("+918267818162"), "busy, try later"),
            CallResult::failure(number("+918267818163"), "said \"no\""),
        ];
        let csv = failures_csv(&results).unwrap();
        assert_eq!(
            csv,
            "phone,error\n+918267818162,\"busy, try later\"\n+918267818163,\"said \"\"no\"\"\""
        );
    }
}
