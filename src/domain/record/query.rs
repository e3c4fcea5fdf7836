//! Query shaper - ordering and truncation of listed records

use std::cmp::Ordering;

use serde_json::Value;

use super::entity::Record;

/// Sort order requested as `field` (ascending) or `-field` (descending)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Parses `-field` / `field`; empty input and a bare `-` mean no ordering
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        let (field, descending) = match raw.strip_prefix('-') {
            Some(field) => (field, true),
            None => (raw, false),
        };

        if field.is_empty() {
            return None;
        }

        Some(Self {
            field: field.to_string(),
            descending,
        })
    }
}

/// Ordering and truncation applied to a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub order_by: Option<OrderBy>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order_by(mut self, order_by: &str) -> Self {
        self.order_by = OrderBy::parse(order_by);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sorts, then truncates
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let sorted = sort(records, self.order_by.as_ref());
        limit(sorted, self.limit)
    }
}

/// Stable sort by one field. Ties keep their input order in both directions.
pub fn sort(mut records: Vec<Record>, order_by: Option<&OrderBy>) -> Vec<Record> {
    let Some(order_by) = order_by else {
        return records;
    };

    let field = order_by.field.as_str();

    if order_by.descending {
        records.sort_by(|a, b| compare_values(b.get(field), a.get(field)));
    } else {
        records.sort_by(|a, b| compare_values(a.get(field), b.get(field)));
    }

    records
}

/// Keeps the first `n` records. `None` leaves the list untouched; zero and
/// negative counts yield an empty list.
pub fn limit(mut records: Vec<Record>, n: Option<i64>) -> Vec<Record> {
    match n {
        None => records,
        Some(n) if n <= 0 => Vec::new(),
        Some(n) => {
            let n = usize::try_from(n).unwrap_or(usize::MAX);
            records.truncate(n);
            records
        }
    }
}

/// Total order over optional JSON values.
///
/// Numbers, booleans and absent/`null` values compare numerically, with
/// `false`/absent as 0 and `true` as 1. Absent otherwise compares as the empty
/// string. Remaining mixed types order by type: booleans, numbers, strings,
/// arrays, objects.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(Value::Number(x)), Some(Value::Number(y))) = (a, b) {
        return compare_numbers(x, y);
    }

    if let (Some(x), Some(y)) = (numeric(a), numeric(b)) {
        return x.total_cmp(&y);
    }

    let a = normalize(a);
    let b = normalize(b);

    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                let ord = compare_values(Some(x), Some(y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => None,
    }
}

static EMPTY: Value = Value::String(String::new());

fn normalize(value: Option<&Value>) -> &Value {
    match value {
        None | Some(Value::Null) => &EMPTY,
        Some(value) => value,
    }
}

fn compare_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a.cmp(&b);
    }

    let a = a.as_f64().unwrap_or(0.0);
    let b = b.as_f64().unwrap_or(0.0);
    a.total_cmp(&b)
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::Null | Value::String(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
    }
}
