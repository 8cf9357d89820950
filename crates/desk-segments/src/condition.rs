//! Condition Evaluator
//!
//! Evaluates one atomic condition against a record's JSON projection.
//! Pure: no storage access, no mutation. The only rule with teeth is
//! fail-closed evaluation: an unknown operator, an unknown kind, an
//! unparseable comparison value or a missing field make the condition
//! not match, they never raise.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use desk_crm::{Condition, Operator, ValueKind};
use serde_json::Value;
use tracing::warn;

/// Does `doc` satisfy `cond`?
///
/// `doc` is the record's JSON projection (camelCase field names);
/// dotted condition fields descend nested objects.
pub fn matches(doc: &Value, cond: &Condition) -> bool {
    let field = lookup_path(doc, &cond.field);

    match cond.operator {
        Operator::Unknown => false,
        // Presence checks ignore the declared kind
        Operator::IsSet => field.map(is_present).unwrap_or(false),
        Operator::IsNotSet => !field.map(is_present).unwrap_or(false),
        Operator::IsTrue => field.map(coerce_bool).unwrap_or(false),
        Operator::IsFalse => field.map(|v| is_present(v) && !coerce_bool(v)).unwrap_or(false),
        _ => match cond.kind {
            ValueKind::String => match_string(field, cond),
            ValueKind::Number => match_number(field, cond),
            ValueKind::Date => match_date(field, cond),
            ValueKind::Boolean => match_boolean(field, cond),
            ValueKind::Unknown => false,
        },
    }
}

/// Resolve a dotted field path against the document.
///
/// Returns `None` (the "field absent" sentinel) when any path element
/// is missing or traverses a non-object.
fn lookup_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Present and non-empty
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        _ => true,
    }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Each scalar the field contributes to comparison: a plain value
/// yields itself, an array yields its elements (any-element semantics).
fn scalars(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn match_string(field: Option<&Value>, cond: &Condition) -> bool {
    let texts: Vec<String> = field
        .map(|v| scalars(v).into_iter().filter_map(as_text).collect())
        .unwrap_or_default();

    match cond.operator {
        // Equality is case-sensitive
        Operator::Equals => texts.iter().any(|t| t == &cond.value),
        Operator::NotEquals => !texts.iter().any(|t| t == &cond.value),
        // Substring tests are case-insensitive
        Operator::Contains => {
            let needle = cond.value.to_lowercase();
            texts.iter().any(|t| t.to_lowercase().contains(&needle))
        }
        Operator::NotContains => {
            let needle = cond.value.to_lowercase();
            !texts.iter().any(|t| t.to_lowercase().contains(&needle))
        }
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn match_number(field: Option<&Value>, cond: &Condition) -> bool {
    let expected: f64 = match cond.value.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            warn!(value = %cond.value, field = %cond.field, "unparseable numeric condition value");
            return false;
        }
    };

    let numbers: Vec<f64> = match field {
        Some(v) => scalars(v).into_iter().filter_map(as_number).collect(),
        None => return matches!(cond.operator, Operator::NotEquals),
    };

    match cond.operator {
        Operator::Equals => numbers.iter().any(|n| (n - expected).abs() < f64::EPSILON),
        Operator::NotEquals => !numbers.iter().any(|n| (n - expected).abs() < f64::EPSILON),
        Operator::GreaterThan => numbers.iter().any(|n| *n > expected),
        Operator::LessThan => numbers.iter().any(|n| *n < expected),
        _ => false,
    }
}

fn match_date(field: Option<&Value>, cond: &Condition) -> bool {
    let expected = match parse_date(&cond.value) {
        Some(d) => d,
        None => {
            warn!(value = %cond.value, field = %cond.field, "unparseable date condition value");
            return false;
        }
    };

    let dates: Vec<DateTime<Utc>> = match field {
        Some(v) => scalars(v)
            .into_iter()
            .filter_map(|v| v.as_str().and_then(parse_date))
            .collect(),
        None => return matches!(cond.operator, Operator::NotEquals),
    };

    match cond.operator {
        Operator::Equals => dates.iter().any(|d| *d == expected),
        Operator::NotEquals => !dates.iter().any(|d| *d == expected),
        Operator::GreaterThan => dates.iter().any(|d| *d > expected),
        Operator::LessThan => dates.iter().any(|d| *d < expected),
        _ => false,
    }
}

fn match_boolean(field: Option<&Value>, cond: &Condition) -> bool {
    let expected = match cond.value.trim().to_lowercase().as_str() {
        "true" => true,
        "false" => false,
        _ => return false,
    };

    let actual = match field {
        Some(v) => coerce_bool(v),
        None => return matches!(cond.operator, Operator::NotEquals) && expected,
    };

    match cond.operator {
        Operator::Equals => actual == expected,
        Operator::NotEquals => actual != expected,
        _ => false,
    }
}

/// Flexible date parsing for condition values and filter bounds.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` (the format the front end
/// sends for form windows) and bare `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
