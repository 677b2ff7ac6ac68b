//! Statement and clause AST types.

use core::fmt;

use serde::Serialize;

use super::expression::Expr;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// ASC or DESC.
    pub direction: OrderDirection,
}

/// Join kind.
///
/// The `LEFT OUTER` style spellings are distinct kinds so the
/// analyzer reports joins exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinType {
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    Full,
    FullOuter,
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::LeftOuter => "LEFT OUTER",
            Self::Right => "RIGHT",
            Self::RightOuter => "RIGHT OUTER",
            Self::Full => "FULL",
            Self::FullOuter => "FULL OUTER",
            Self::Cross => "CROSS",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table reference in FROM, INSERT, UPDATE, or DELETE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableRef {
    /// A named table, optionally schema-qualified and aliased.
    Table {
        name: String,
        alias: Option<String>,
        schema: Option<String>,
    },
    /// A parenthesized subquery with an optional alias.
    Subquery {
        query: Box<Query>,
        alias: Option<String>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: None,
            schema: None,
        }
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Table { alias, .. } | Self::Subquery { alias, .. } => alias.as_deref(),
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Join {
    /// The kind of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: TableRef,
    /// The ON condition. Always present except for CROSS joins.
    pub on: Option<Expr>,
}

/// The FROM clause: base tables plus the joins that follow them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FromClause {
    /// Comma-separated base table references.
    pub tables: Vec<TableRef>,
    /// Joins, in source order.
    pub joins: Vec<Join>,
}

/// A select-list item: an expression with an optional alias.
///
/// The bare `*` wildcard is an [`Expr::Wildcard`] without alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectColumn {
    /// The selected expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates an unaliased select item.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }
}

/// LIMIT with optional OFFSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limit {
    /// Maximum row count.
    pub count: i64,
    /// Rows to skip.
    pub offset: Option<i64>,
}

/// A common table expression inside WITH.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cte {
    /// The CTE name.
    pub name: String,
    /// Optional explicit column names.
    pub columns: Option<Vec<String>>,
    /// The inner query.
    pub query: Query,
}

/// A WITH clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithClause {
    /// Whether RECURSIVE was written.
    pub recursive: bool,
    /// The CTE list, in source order.
    pub ctes: Vec<Cte>,
}

/// A SELECT statement body.
///
/// `order_by` and `limit` stay empty on the inner selects of a UNION
/// chain; the outermost [`UnionQuery`] carries them instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    /// The WITH clause, attached to the first SELECT of the query.
    pub with: Option<WithClause>,
    /// Whether DISTINCT was written.
    pub distinct: bool,
    /// The select list.
    pub columns: Vec<SelectColumn>,
    /// The FROM clause. Absent for expression-only selects.
    pub from: Option<FromClause>,
    /// The WHERE condition.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderBy>,
    /// LIMIT/OFFSET.
    pub limit: Option<Limit>,
}

impl SelectStatement {
    /// Creates an empty SELECT body.
    #[must_use]
    pub fn new(columns: Vec<SelectColumn>) -> Self {
        Self {
            with: None,
            distinct: false,
            columns,
            from: None,
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
        }
    }
}

/// A UNION of two queries.
///
/// Chains are right-associative: `a UNION b UNION c` parses as
/// `Union(a, Union(b, c))`. Only the outermost node may carry
/// `order_by`/`limit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionQuery {
    /// The left query.
    pub left: Query,
    /// The right query.
    pub right: Query,
    /// Whether this is UNION ALL.
    pub all: bool,
    /// ORDER BY applied to the combined result.
    pub order_by: Vec<OrderBy>,
    /// LIMIT applied to the combined result.
    pub limit: Option<Limit>,
}

impl UnionQuery {
    /// Returns the spelled union kind.
    #[must_use]
    pub const fn union_type(&self) -> &'static str {
        if self.all {
            "UNION ALL"
        } else {
            "UNION"
        }
    }
}

/// A query: a single SELECT or a UNION chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Query {
    /// A single SELECT.
    Select(Box<SelectStatement>),
    /// A UNION of queries.
    Union(Box<UnionQuery>),
}

impl Query {
    /// The first (leftmost) SELECT of this query.
    #[must_use]
    pub fn first_select(&self) -> &SelectStatement {
        match self {
            Self::Select(select) => select,
            Self::Union(union) => union.left.first_select(),
        }
    }
}

/// An INSERT statement (VALUES form).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Target table name.
    pub table: String,
    /// Explicit column list, empty when omitted.
    pub columns: Vec<String>,
    /// One value list per row.
    pub rows: Vec<Vec<Expr>>,
}

/// A `column = value` assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Target table name.
    pub table: String,
    /// SET assignments, in source order.
    pub assignments: Vec<Assignment>,
    /// The WHERE condition.
    pub where_clause: Option<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Target table name.
    pub table: String,
    /// The WHERE condition.
    pub where_clause: Option<Expr>,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// A SELECT or UNION chain.
    Select(Query),
    /// An INSERT statement.
    Insert(InsertStatement),
    /// An UPDATE statement.
    Update(UpdateStatement),
    /// A DELETE statement.
    Delete(DeleteStatement),
}

impl Statement {
    /// Returns the statement kind as an upper-case tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
        }
    }
}
