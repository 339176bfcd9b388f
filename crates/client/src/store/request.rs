//! Query-builder request model.
//!
//! A [`Request`] is plain data describing one call against one collection:
//! the method, the selected columns (plus embedded related rows), the
//! filters, the ordering and the expected cardinality. Stores translate it
//! to their own wire format.
//!
//! ```rust
//! use discover_zimbabwe_client::store::{Direction, Embed, Request};
//!
//! let request = Request::table("cart_items")
//!     .select("*")
//!     .embed(Embed::one("destination", "destinations", "destination_id"))
//!     .eq("user_id", "b1946ac9-2c4f-4e7e-8c45-59c1f0e3b6a1")
//!     .order("created_at", Direction::Descending);
//! assert_eq!(request.table_name(), "cart_items");
//! ```

use serde_json::Value;

/// Operation performed by a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// Read rows.
    Select,
    /// Insert one row (object) or several (array).
    Insert(Value),
    /// Patch every matching row with the given object.
    Update(Value),
    /// Delete every matching row.
    Delete,
}

impl Method {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete => "delete",
        }
    }
}

/// How many rows the caller expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Zero or more rows, returned as an array.
    #[default]
    Many,
    /// Exactly one row, returned as an object; anything else is an error.
    Single,
    /// Zero or one row, returned as an object or `null`.
    MaybeSingle,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Single-column ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Filter operator.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Column equals value.
    Eq(Value),
    /// Case-insensitive pattern match, `%` or `*` any run, `_` any character.
    ILike(String),
    /// Case-insensitive POSIX regular expression search.
    IMatch(String),
}

/// Predicate on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
}

impl Filter {
    /// Equality filter.
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq(value.into()),
        }
    }

    /// Case-insensitive pattern filter.
    #[must_use]
    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::ILike(pattern.into()),
        }
    }

    /// Case-insensitive regular expression filter.
    #[must_use]
    pub fn imatch(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::IMatch(pattern.into()),
        }
    }

    /// Case-insensitive substring filter; `needle` is matched literally.
    ///
    /// Sent as an escaped `imatch` rather than `ilike`, which has no way to
    /// match a literal `*`.
    #[must_use]
    pub fn contains(column: impl Into<String>, needle: &str) -> Self {
        Self::imatch(column, regex::escape(needle))
    }
}

/// A many-to-one related row returned nested inside each selected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    /// Key under which the related row appears.
    pub alias: String,
    /// Related collection.
    pub table: String,
    /// Column on the parent row referencing the related row's `id`.
    pub foreign_key: String,
    /// Columns selected from the related row.
    pub columns: String,
}

impl Embed {
    /// Embed every column of the row referenced by `foreign_key`.
    #[must_use]
    pub fn one(
        alias: impl Into<String>,
        table: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            table: table.into(),
            foreign_key: foreign_key.into(),
            columns: "*".to_string(),
        }
    }
}

/// One call against one remote collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    table: String,
    method: Method,
    columns: String,
    embeds: Vec<Embed>,
    filters: Vec<Filter>,
    order: Option<Order>,
    cardinality: Cardinality,
    returning: bool,
}

impl Request {
    /// Start a request against `table`; defaults to selecting every column.
    #[must_use]
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            method: Method::Select,
            columns: "*".to_string(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: None,
            cardinality: Cardinality::Many,
            returning: false,
        }
    }

    /// Select columns. On a write this asks for the affected rows back.
    #[must_use]
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        if !matches!(self.method, Method::Select) {
            self.returning = true;
        }
        self
    }

    /// Insert the given row(s).
    #[must_use]
    pub fn insert(mut self, rows: Value) -> Self {
        self.method = Method::Insert(rows);
        self
    }

    /// Patch matching rows.
    #[must_use]
    pub fn update(mut self, patch: Value) -> Self {
        self.method = Method::Update(patch);
        self
    }

    /// Delete matching rows.
    #[must_use]
    pub fn delete(mut self) -> Self {
        self.method = Method::Delete;
        self
    }

    /// Embed a related row.
    #[must_use]
    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an equality filter.
    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Filter::eq(column, value))
    }

    /// Add a case-insensitive pattern filter.
    #[must_use]
    pub fn ilike(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(Filter::ilike(column, pattern))
    }

    /// Order results by one column.
    #[must_use]
    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// Expect exactly one row.
    #[must_use]
    pub const fn single(mut self) -> Self {
        self.cardinality = Cardinality::Single;
        self
    }

    /// Expect zero or one row.
    #[must_use]
    pub const fn maybe_single(mut self) -> Self {
        self.cardinality = Cardinality::MaybeSingle;
        self
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn columns(&self) -> &str {
        &self.columns
    }

    #[must_use]
    pub fn embeds(&self) -> &[Embed] {
        &self.embeds
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub const fn ordering(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Whether rows should be returned: always for reads, on request for writes.
    #[must_use]
    pub const fn returns_rows(&self) -> bool {
        matches!(self.method, Method::Select) || self.returning
    }
}
