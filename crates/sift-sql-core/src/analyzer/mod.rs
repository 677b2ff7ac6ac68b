//! Structural analysis of SELECT queries.
//!
//! Walks a parsed query and produces a flat description of its
//! conditions, output fields, tables, joins, grouping, ordering, and
//! limit, plus a weighted complexity score.

mod complexity;

pub use complexity::{complexity, Complexity, ComplexityLevel};

use serde::Serialize;

use crate::ast::{
    BinaryOp, Expr, Join, OrderDirection, Quantifier, Query, SelectColumn, TableRef, UnaryOp,
};

/// Function names treated as aggregates.
const AGGREGATE_FUNCTIONS: [&str; 6] = ["COUNT", "SUM", "AVG", "MAX", "MIN", "GROUP_CONCAT"];

/// Semantic category of a WHERE condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionKind {
    /// `=`, `!=`, `<>`.
    Equality,
    /// `<`, `>`, `<=`, `>=`.
    Comparison,
    /// LIKE / ILIKE.
    Pattern,
    /// IN.
    List,
    /// BETWEEN.
    Range,
    /// Everything else the classifier sees, IS [NOT] included.
    Other,
}

impl ConditionKind {
    /// Returns the category tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equality => "equality",
            Self::Comparison => "comparison",
            Self::Pattern => "pattern",
            Self::List => "list",
            Self::Range => "range",
            Self::Other => "other",
        }
    }

    const fn of(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Eq | BinaryOp::NotEq => Self::Equality,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => Self::Comparison,
            BinaryOp::Like | BinaryOp::Ilike => Self::Pattern,
            BinaryOp::In => Self::List,
            BinaryOp::Between => Self::Range,
            _ => Self::Other,
        }
    }
}

/// One flattened WHERE condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    /// Rendered left side.
    pub field: String,
    /// Operator spelling, quantifier included (e.g. `"= ANY"`).
    pub operator: String,
    /// Rendered right side.
    pub value: String,
    /// Semantic category.
    pub kind: ConditionKind,
}

/// Shape of a select-list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Column,
    Function,
    Case,
    Expression,
}

/// One select-list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    /// Column name, function name, or rendered expression.
    pub name: String,
    /// Alias, when written.
    pub alias: Option<String>,
    /// Shape of the item.
    pub kind: FieldKind,
    /// Qualifying table for column references.
    pub table: Option<String>,
    /// Rendered text for non-column items.
    pub expression: Option<String>,
    /// Whether the item is an aggregate call.
    pub aggregate: bool,
}

/// One table pulled from FROM or a join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    /// Table name; `"subquery"` for derived tables without one.
    pub name: String,
    /// Alias, when written.
    pub alias: Option<String>,
    /// Schema qualifier, when written.
    pub schema: Option<String>,
}

/// A binary ON condition, rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinCondition {
    pub left: String,
    pub operator: String,
    pub right: String,
}

/// One join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinSummary {
    /// Join kind as written (`LEFT`, `LEFT OUTER`, …).
    pub kind: String,
    /// Joined table name.
    pub table: String,
    /// Joined table alias.
    pub alias: Option<String>,
    /// The ON condition when it is a simple binary comparison.
    pub condition: Option<JoinCondition>,
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBySummary {
    /// Rendered sort expression.
    pub field: String,
    /// ASC or DESC.
    pub direction: OrderDirection,
}

/// LIMIT/OFFSET values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitSummary {
    pub count: i64,
    pub offset: Option<i64>,
}

/// The structural description of a SELECT query.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryAnalysis {
    /// Flattened WHERE conditions.
    pub conditions: Vec<Condition>,
    /// Select-list items.
    pub fields: Vec<FieldSummary>,
    /// Tables from FROM and every join.
    pub tables: Vec<TableSummary>,
    /// Joins, in source order.
    pub joins: Vec<JoinSummary>,
    /// ORDER BY entries of the outermost query.
    pub order_by: Vec<OrderBySummary>,
    /// Rendered GROUP BY expressions.
    pub group_by: Vec<String>,
    /// LIMIT/OFFSET of the outermost query.
    pub limit: Option<LimitSummary>,
}

/// Analyzes a SELECT query.
///
/// For a UNION chain, ORDER BY and LIMIT come from the outermost
/// node and everything else from the first SELECT.
#[must_use]
pub fn analyze(query: &Query) -> QueryAnalysis {
    let select = query.first_select();
    let mut analysis = QueryAnalysis::default();

    if let Some(where_clause) = &select.where_clause {
        collect_conditions(where_clause, &mut analysis.conditions);
    }

    for column in &select.columns {
        analysis.fields.push(field_summary(column));
    }

    if let Some(from) = &select.from {
        for table in &from.tables {
            analysis.tables.push(table_summary(table));
        }
        for join in &from.joins {
            analysis.tables.push(table_summary(&join.table));
            analysis.joins.push(join_summary(join));
        }
    }

    let (order_by, limit) = match query {
        Query::Select(select) => (&select.order_by, select.limit),
        Query::Union(union) => (&union.order_by, union.limit),
    };
    analysis.order_by = order_by
        .iter()
        .map(|item| OrderBySummary {
            field: item.expr.to_string(),
            direction: item.direction,
        })
        .collect();
    analysis.limit = limit.map(|limit| LimitSummary {
        count: limit.count,
        offset: limit.offset,
    });

    analysis.group_by = select.group_by.iter().map(Expr::to_string).collect();

    analysis
}

/// Flattens a WHERE subtree into leaf conditions, descending through
/// AND/OR and unary NOT.
fn collect_conditions(expr: &Expr, out: &mut Vec<Condition>) {
    match expr {
        Expr::Binary {
            op: BinaryOp::And | BinaryOp::Or,
            left,
            right,
            ..
        } => {
            collect_conditions(left, out);
            collect_conditions(right, out);
        }
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
        } => collect_conditions(operand, out),
        Expr::Binary {
            left,
            op,
            quantifier,
            right,
        } => out.push(condition(left, *op, *quantifier, right)),
        _ => {}
    }
}

fn condition(left: &Expr, op: BinaryOp, quantifier: Option<Quantifier>, right: &Expr) -> Condition {
    Condition {
        field: left.to_string(),
        operator: Expr::operator_string(op, quantifier),
        value: right.to_string(),
        kind: ConditionKind::of(op),
    }
}

fn field_summary(column: &SelectColumn) -> FieldSummary {
    let alias = column.alias.clone();
    match &column.expr {
        Expr::Wildcard { table } => FieldSummary {
            name: String::from("*"),
            alias,
            kind: FieldKind::Column,
            table: table.clone(),
            expression: None,
            aggregate: false,
        },
        Expr::Column { table, name } => FieldSummary {
            name: name.clone(),
            alias,
            kind: FieldKind::Column,
            table: table.clone(),
            expression: None,
            aggregate: false,
        },
        Expr::Function(call) => FieldSummary {
            name: call.name.clone(),
            alias,
            kind: FieldKind::Function,
            table: None,
            expression: Some(column.expr.to_string()),
            aggregate: is_aggregate(&call.name),
        },
        Expr::WindowFunction { function, .. } => FieldSummary {
            name: function.name.clone(),
            alias,
            kind: FieldKind::Function,
            table: None,
            expression: Some(column.expr.to_string()),
            aggregate: is_aggregate(&function.name),
        },
        Expr::Case { .. } => FieldSummary {
            name: alias.clone().unwrap_or_else(|| String::from("CASE")),
            alias,
            kind: FieldKind::Case,
            table: None,
            expression: Some(column.expr.to_string()),
            aggregate: false,
        },
        other => FieldSummary {
            name: alias.clone().unwrap_or_else(|| other.to_string()),
            alias,
            kind: FieldKind::Expression,
            table: None,
            expression: Some(other.to_string()),
            aggregate: false,
        },
    }
}

fn is_aggregate(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    AGGREGATE_FUNCTIONS.contains(&upper.as_str())
}

fn table_summary(table: &TableRef) -> TableSummary {
    match table {
        TableRef::Table {
            name,
            alias,
            schema,
        } => TableSummary {
            name: name.clone(),
            alias: alias.clone(),
            schema: schema.clone(),
        },
        TableRef::Subquery { alias, .. } => TableSummary {
            name: alias.clone().unwrap_or_else(|| String::from("subquery")),
            alias: alias.clone(),
            schema: None,
        },
    }
}

fn join_summary(join: &Join) -> JoinSummary {
    let condition = match &join.on {
        Some(Expr::Binary {
            left,
            op,
            quantifier,
            right,
        }) => Some(JoinCondition {
            left: left.to_string(),
            operator: Expr::operator_string(*op, *quantifier),
            right: right.to_string(),
        }),
        _ => None,
    };
    let summary = table_summary(&join.table);
    JoinSummary {
        kind: String::from(join.join_type.as_str()),
        table: summary.name,
        alias: summary.alias,
        condition,
    }
}
