//! Query types for the call log endpoints

use serde::Serialize;

/// Filters for `GET /calls/list`; only set fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallListQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<u32>,
}

impl CallListQuery {
    /// Query-string pairs in wire naming (`search` is sent as `q`)
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(search) = non_empty(&self.search) {
            pairs.push(("q", search));
        }
        if let Some(status) = non_empty(&self.status) {
            pairs.push(("status", status));
        }
        if let Some(from) = non_empty(&self.from) {
            pairs.push(("from", from));
        }
        if let Some(to) = non_empty(&self.to) {
            pairs.push(("to", to));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_set_fields_are_sent() {
        assert!(CallListQuery::default().to_pairs().is_empty());

        let query = CallListQuery {
            page: Some(2),
            search: Some("+9182".into()),
            status: Some(String::new()),
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![("page", "2".to_string()), ("q", "+9182".to_string())]
        );
    }
}
