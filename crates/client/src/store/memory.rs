//! In-process remote store.
//!
//! Answers the narrow request subset this crate emits (single-column `eq`,
//! `ilike` and `imatch` filters, single-column ordering, many-to-one embeds) over JSON rows
//! held in memory. Failures can be injected per table or globally so callers
//! can exercise the error half of the envelope.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{Cardinality, Direction, Embed, Envelope, Filter, FilterOp, Method, RemoteStore, Request};
use crate::error::{BackendError, SINGLE_ROW_ERROR_CODE};

type Row = Map<String, Value>;

/// In-memory implementation of [`RemoteStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, Vec<Row>>,
    table_failures: HashMap<String, BackendError>,
    global_failure: Option<BackendError>,
    requests: Vec<Request>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to a table. Non-object values are ignored.
    pub async fn seed(&self, table: &str, rows: impl IntoIterator<Item = Value>) {
        let mut state = self.state.lock().await;
        let target = state.tables.entry(table.to_string()).or_default();
        target.extend(rows.into_iter().filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        }));
    }

    /// Snapshot of a table's rows.
    pub async fn rows(&self, table: &str) -> Vec<Value> {
        let state = self.state.lock().await;
        state
            .tables
            .get(table)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Answer every request against `table` with `error`.
    pub async fn fail_table(&self, table: &str, error: BackendError) {
        self.state
            .lock()
            .await
            .table_failures
            .insert(table.to_string(), error);
    }

    /// Answer every request with `error`.
    pub async fn fail_all(&self, error: BackendError) {
        self.state.lock().await.global_failure = Some(error);
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        let mut state = self.state.lock().await;
        state.table_failures.clear();
        state.global_failure = None;
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<Request> {
        self.state.lock().await.requests.clone()
    }
}

impl RemoteStore for MemoryStore {
    async fn execute(&self, request: Request) -> Envelope {
        let mut state = self.state.lock().await;
        state.requests.push(request.clone());

        if let Some(error) = state
            .global_failure
            .clone()
            .or_else(|| state.table_failures.get(request.table_name()).cloned())
        {
            return Envelope::err(error);
        }

        match state.apply(&request) {
            Ok(data) => Envelope::ok(data),
            Err(error) => Envelope::err(error),
        }
    }
}

impl MemoryState {
    fn apply(&mut self, request: &Request) -> Result<Value, BackendError> {
        let matchers = request
            .filters()
            .iter()
            .map(Matcher::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let matches = |row: &Row| matchers.iter().all(|m| m.matches(row));
        let table = request.table_name().to_string();

        let affected: Vec<Row> = match request.method() {
            Method::Select => {
                let mut rows: Vec<Row> = self
                    .tables
                    .get(&table)
                    .map(|rows| rows.iter().filter(|r| matches(r)).cloned().collect())
                    .unwrap_or_default();
                if let Some(order) = request.ordering() {
                    rows.sort_by(|a, b| {
                        compare_for_order(a.get(&order.column), b.get(&order.column), order.direction)
                    });
                }
                rows
            }
            Method::Insert(body) => {
                let new_rows = insert_rows(body)?;
                self.tables
                    .entry(table)
                    .or_default()
                    .extend(new_rows.iter().cloned());
                new_rows
            }
            Method::Update(patch) => {
                let Value::Object(patch) = patch else {
                    return Err(invalid_body("update body must be a JSON object"));
                };
                let now = timestamp();
                let mut updated = Vec::new();
                for row in self.tables.entry(table).or_default().iter_mut() {
                    if matches(&*row) {
                        for (key, value) in patch {
                            row.insert(key.clone(), value.clone());
                        }
                        if row.contains_key("updated_at") && !patch.contains_key("updated_at") {
                            row.insert("updated_at".to_string(), now.clone());
                        }
                        updated.push(row.clone());
                    }
                }
                updated
            }
            Method::Delete => {
                let rows = self.tables.entry(table).or_default();
                let (removed, kept): (Vec<Row>, Vec<Row>) =
                    rows.drain(..).partition(|r| matches(r));
                *rows = kept;
                removed
            }
        };

        if !request.returns_rows() {
            return Ok(Value::Null);
        }

        let shaped: Vec<Value> = affected
            .into_iter()
            .map(|row| {
                let mut projected = project(&row, request.columns());
                for embed in request.embeds() {
                    projected.insert(embed.alias.clone(), self.resolve_embed(&row, embed));
                }
                Value::Object(projected)
            })
            .collect();

        shape(shaped, request.cardinality())
    }

    fn resolve_embed(&self, row: &Row, embed: &Embed) -> Value {
        let Some(key) = row.get(&embed.foreign_key).filter(|v| !v.is_null()) else {
            return Value::Null;
        };
        self.tables
            .get(&embed.table)
            .and_then(|rows| rows.iter().find(|r| r.get("id") == Some(key)))
            .map_or(Value::Null, |related| {
                Value::Object(project(related, &embed.columns))
            })
    }
}

/// Compiled form of a [`Filter`].
enum Matcher<'a> {
    Eq { column: &'a str, value: &'a Value },
    Pattern { column: &'a str, regex: Regex },
}

impl<'a> Matcher<'a> {
    fn compile(filter: &'a Filter) -> Result<Self, BackendError> {
        match &filter.op {
            FilterOp::Eq(value) => Ok(Self::Eq {
                column: &filter.column,
                value,
            }),
            FilterOp::ILike(pattern) => Self::pattern(&filter.column, &like_to_regex(pattern)),
            FilterOp::IMatch(pattern) => Self::pattern(&filter.column, &format!("(?i){pattern}")),
        }
    }

    fn pattern(column: &'a str, regex: &str) -> Result<Self, BackendError> {
        let regex = Regex::new(regex).map_err(|e| {
            BackendError::new("2201B", format!("invalid regular expression: {e}")).with_status(400)
        })?;
        Ok(Self::Pattern { column, regex })
    }

    fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Eq { column, value } => {
                let actual = row.get(*column).unwrap_or(&Value::Null);
                values_equal(actual, value)
            }
            Self::Pattern { column, regex } => row
                .get(*column)
                .and_then(Value::as_str)
                .is_some_and(|s| regex.is_match(s)),
        }
    }
}

/// Translate an `ilike` pattern into an anchored case-insensitive regex.
fn like_to_regex(pattern: &str) -> String {
    let mut out = String::from("(?is)^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            '%' | '*' => out.push_str(".*"),
            '_' => out.push('.'),
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }
    out.push('$');
    out
}

fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        // `eq` filters travel as text on the wire, so a string filter matches
        // a number or boolean column by its textual form.
        (Value::Number(_) | Value::Bool(_), Value::String(s)) => actual.to_string() == *s,
        _ => actual == expected,
    }
}

/// Ascending puts nulls last, descending puts them first.
fn compare_for_order(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let ordering = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    };
    match direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn project(row: &Row, columns: &str) -> Row {
    let columns = columns.trim();
    if columns.is_empty() || columns == "*" {
        return row.clone();
    }
    columns
        .split(',')
        .map(str::trim)
        .filter_map(|column| row.get(column).map(|v| (column.to_string(), v.clone())))
        .collect()
}

fn insert_rows(body: &Value) -> Result<Vec<Row>, BackendError> {
    let rows = match body {
        Value::Object(row) => vec![row.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row.clone()),
                _ => Err(invalid_body("insert array must contain only objects")),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(invalid_body("insert body must be an object or array")),
    };

    let now = timestamp();
    Ok(rows
        .into_iter()
        .map(|mut row| {
            row.entry("id")
                .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
            row.entry("created_at").or_insert_with(|| now.clone());
            row.entry("updated_at").or_insert_with(|| now.clone());
            row
        })
        .collect())
}

fn shape(rows: Vec<Value>, cardinality: Cardinality) -> Result<Value, BackendError> {
    match cardinality {
        Cardinality::Many => Ok(Value::Array(rows)),
        Cardinality::Single | Cardinality::MaybeSingle => {
            let count = rows.len();
            let mut rows = rows.into_iter();
            match (rows.next(), count) {
                (None, _) if cardinality == Cardinality::MaybeSingle => Ok(Value::Null),
                (Some(row), 1) => Ok(row),
                _ => Err(BackendError::new(
                    SINGLE_ROW_ERROR_CODE,
                    "JSON object requested, multiple (or no) rows returned",
                )
                .with_status(406)
                .with_details(format!("The result contains {count} rows"))),
            }
        }
    }
}

fn invalid_body(message: &str) -> BackendError {
    BackendError::new("PGRST102", message).with_status(400)
}

fn timestamp() -> Value {
    // Fixed width so string order matches time order.
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}
