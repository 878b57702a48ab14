//! `$filter`, `$orderBy`, `$skip` and `$top` over JSON records.
//!
//! Filtering understands a single `field eq value` comparison, which is all
//! the tests need. Values are `'quoted strings'`, numbers, `true`, `false`
//! or `null`.

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::ErrorResult;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "$filter")]
    pub filter: Option<String>,
    #[serde(rename = "$include")]
    pub include: Option<String>,
    #[serde(rename = "$top")]
    pub top: Option<usize>,
    #[serde(rename = "$skip")]
    pub skip: Option<usize>,
    #[serde(rename = "$orderBy")]
    pub order_by: Option<String>,
}

impl ListParams {
    /// Whether `$include` names `child`, compared case-insensitively.
    pub fn includes(&self, child: &str) -> bool {
        self.include
            .as_deref()
            .map(|list| list.split(',').any(|c| c.trim().eq_ignore_ascii_case(child)))
            .unwrap_or(false)
    }
}

/// Build the `FetchResult` envelope for `records` served at `path`.
pub fn page(records: Vec<Value>, params: &ListParams, path: &str) -> Result<Value, ErrorResult> {
    let mut records = match params.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(filter) => {
            let (field, expected) = parse_filter(filter)?;
            records
                .into_iter()
                .filter(|record| record.get(&field).map_or(expected.is_null(), |v| v == &expected))
                .collect()
        }
        None => records,
    };

    if let Some(order_by) = params.order_by.as_deref().filter(|o| !o.trim().is_empty()) {
        let clauses = parse_order_by(order_by)?;
        records.sort_by(|a, b| {
            clauses
                .iter()
                .map(|(field, descending)| {
                    let ord = compare(a.get(field), b.get(field));
                    if *descending { ord.reverse() } else { ord }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }

    let count = records.len();
    let skip = params.skip.unwrap_or(0);
    let top = params.top.unwrap_or(0);
    let value: Vec<Value> = records
        .into_iter()
        .skip(skip)
        .take(if top == 0 { usize::MAX } else { top })
        .collect();

    let mut envelope = json!({ "@recordsetCount": count, "value": value });
    let next = skip.saturating_add(top);
    if top > 0 && next < count {
        envelope["@nextLink"] = json!(format!("{path}?$top={top}&$skip={next}"));
    }
    Ok(envelope)
}

fn parse_filter(filter: &str) -> Result<(String, Value), ErrorResult> {
    let mut parts = filter.trim().splitn(3, ' ');
    let (Some(field), Some(op), Some(raw)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ErrorResult::invalid_query(format!("cannot parse filter: {filter}")));
    };
    if !op.eq_ignore_ascii_case("eq") {
        return Err(ErrorResult::invalid_query(format!("unsupported operator: {op}")));
    }
    let raw = raw.trim();
    let value = if let Some(text) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        Value::String(text.to_string())
    } else {
        serde_json::from_str(raw)
            .map_err(|_| ErrorResult::invalid_query(format!("cannot parse value: {raw}")))?
    };
    Ok((field.to_string(), value))
}

fn parse_order_by(order_by: &str) -> Result<Vec<(String, bool)>, ErrorResult> {
    order_by
        .split(',')
        .map(|clause| {
            let mut words = clause.split_whitespace();
            let field = words
                .next()
                .ok_or_else(|| ErrorResult::invalid_query("empty orderBy clause"))?;
            let descending = match words.next() {
                None => false,
                Some(dir) if dir.eq_ignore_ascii_case("asc") => false,
                Some(dir) if dir.eq_ignore_ascii_case("desc") => true,
                Some(dir) => {
                    return Err(ErrorResult::invalid_query(format!("unknown sort direction: {dir}")))
                }
            };
            Ok((field.to_string(), descending))
        })
        .collect()
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
