use serde::Deserialize;

use crate::repositories::exams::{ListExams, SortOrder};

pub(super) const DEFAULT_LIMIT: i64 = 30;

/// Raw listing parameters. Every field stays a string until
/// [`ListExamsQuery::into_filter`] so a malformed value falls back to its
/// default instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListExamsQuery {
    #[serde(default)]
    pub(super) order: Option<String>,
    #[serde(default)]
    pub(super) limit: Option<String>,
    #[serde(default)]
    pub(super) page: Option<String>,
    #[serde(default)]
    pub(super) location: Option<String>,
    #[serde(default)]
    pub(super) date: Option<String>,
}

impl ListExamsQuery {
    pub(super) fn into_filter(self) -> ListExams {
        ListExams {
            order: parse_order(self.order.as_deref()),
            limit: parse_positive(self.limit.as_deref(), DEFAULT_LIMIT),
            page: parse_positive(self.page.as_deref(), 1),
            location: self.location.filter(|value| !value.is_empty()),
            date: self.date.filter(|value| !value.is_empty()),
        }
    }
}

fn parse_order(raw: Option<&str>) -> SortOrder {
    match raw {
        Some(value) if value.eq_ignore_ascii_case("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    }
}

fn parse_positive(raw: Option<&str>, default: i64) -> i64 {
    match raw.and_then(|value| value.parse::<i64>().ok()) {
        Some(value) if value > 0 => value,
        _ => default,
    }
}
