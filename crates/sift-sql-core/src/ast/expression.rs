//! Expression AST types.

use core::fmt;

use serde::Serialize;

use super::statement::Query;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Null => write!(f, "NULL"),
        }
    }
}

/// Binary operators.
///
/// `<>` is normalized to `NotEq` during lexing. `Is` / `IsNot` always
/// take a NULL literal on the right; `In` takes a value list or a
/// subquery; `Between` takes a [`Expr::Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Predicates
    Like,
    Ilike,
    In,
    Between,
    Is,
    IsNot,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }

    /// Returns true for `=`, `!=`, `<`, `<=`, `>`, `>=`.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// Logical NOT.
    Not,
    /// Arithmetic negation (`-`).
    Neg,
    /// Arithmetic identity (`+`).
    Pos,
    /// EXISTS over a parenthesized subquery.
    Exists,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
            Self::Pos => "+",
            Self::Exists => "EXISTS",
        }
    }
}

/// Subquery quantifier after a comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quantifier {
    /// `ANY (SELECT …)`.
    Any,
    /// `ALL (SELECT …)`.
    All,
}

impl Quantifier {
    /// Returns the SQL representation of the quantifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::All => "ALL",
        }
    }
}

/// Units for INTERVAL literals and window frame bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum IntervalUnit {
    Year,
    Month,
    /// The default unit when none is written.
    #[default]
    Day,
    Hour,
    Minute,
    Second,
}

impl IntervalUnit {
    /// Returns the SQL representation of the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
        }
    }

    /// Case-insensitive lookup from a surface spelling.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "YEAR" => Some(Self::Year),
            "MONTH" => Some(Self::Month),
            "DAY" => Some(Self::Day),
            "HOUR" => Some(Self::Hour),
            "MINUTE" => Some(Self::Minute),
            "SECOND" => Some(Self::Second),
            _ => None,
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCall {
    /// The function name as written.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Marks the two-argument `EXTRACT(field FROM source)` form.
    pub extract: bool,
}

impl FunctionCall {
    /// Creates a plain function call.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            distinct: false,
            extract: false,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extract {
            return write!(f, "{}({} FROM {})", self.name, self.args[0], self.args[1]);
        }
        write!(f, "{}(", self.name)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// A `WHEN cond THEN result` arm of a CASE expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhenClause {
    /// The condition (or comparand for a simple CASE).
    pub condition: Expr,
    /// The result expression.
    pub result: Expr,
}

/// Direction of a window frame bound offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameDirection {
    Preceding,
    Following,
}

impl FrameDirection {
    /// Returns the SQL representation of the direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
        }
    }
}

/// Frame measurement units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameUnits {
    Rows,
    Range,
}

/// One bound of a window frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FrameBound {
    /// `UNBOUNDED PRECEDING`.
    UnboundedPreceding,
    /// `UNBOUNDED FOLLOWING`.
    UnboundedFollowing,
    /// `CURRENT ROW`.
    CurrentRow,
    /// A numeric offset, e.g. `3 PRECEDING`.
    Offset {
        value: Box<Expr>,
        direction: FrameDirection,
    },
    /// An interval offset, e.g. `INTERVAL 7 DAY PRECEDING`.
    Interval {
        value: Box<Expr>,
        unit: IntervalUnit,
        direction: FrameDirection,
    },
}

/// A window frame: `ROWS`/`RANGE` with one or two bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// ROWS or RANGE.
    pub units: FrameUnits,
    /// The frame start bound.
    pub start: FrameBound,
    /// The frame end bound, when written as `BETWEEN … AND …`.
    pub end: Option<FrameBound>,
}

/// An `OVER (…)` window specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OverClause {
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY items inside the window.
    pub order_by: Vec<super::statement::OrderBy>,
    /// Optional frame specification.
    pub frame: Option<Frame>,
}

/// A SQL expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference, optionally qualified with a table name.
    Column {
        /// Table name or alias.
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// Wildcard (`*` or `t.*`).
    Wildcard {
        /// Table qualifier.
        table: Option<String>,
    },

    /// A binary expression.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        /// `ANY` / `ALL` after a comparison operator.
        quantifier: Option<Quantifier>,
        right: Box<Expr>,
    },

    /// A unary prefix expression.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// A function call.
    Function(FunctionCall),

    /// A function call with an `OVER (…)` window specification.
    WindowFunction {
        function: FunctionCall,
        over: OverClause,
    },

    /// A CASE expression. At least one WHEN arm is guaranteed.
    Case {
        /// The scrutinee of a simple CASE.
        operand: Option<Box<Expr>>,
        when_clauses: Vec<WhenClause>,
        else_clause: Option<Box<Expr>>,
    },

    /// An INTERVAL literal.
    Interval {
        value: Box<Expr>,
        unit: IntervalUnit,
    },

    /// A parenthesized subquery.
    Subquery {
        query: Box<Query>,
        alias: Option<String>,
    },

    /// A parenthesized value list, the right side of `IN (…)`.
    ValueList(Vec<Expr>),

    /// The `low AND high` range on the right side of BETWEEN.
    Range { start: Box<Expr>, end: Box<Expr> },
}

impl Expr {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a binary expression without quantifier.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            quantifier: None,
            right: Box::new(right),
        }
    }

    /// Returns the operator string including any quantifier
    /// (e.g. `"= ANY"`).
    #[must_use]
    pub fn operator_string(op: BinaryOp, quantifier: Option<Quantifier>) -> String {
        match quantifier {
            Some(q) => format!("{} {}", op.as_str(), q.as_str()),
            None => String::from(op.as_str()),
        }
    }
}

impl fmt::Display for Expr {
    /// Readable rendering used by the analyzer: `table.name`
    /// qualification, operator spellings, and a `(subquery)`
    /// placeholder for nested queries.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Column { table, name } => match table {
                Some(table) => write!(f, "{table}.{name}"),
                None => write!(f, "{name}"),
            },
            Self::Wildcard { table } => match table {
                Some(table) => write!(f, "{table}.*"),
                None => write!(f, "*"),
            },
            Self::Binary {
                left,
                op,
                quantifier,
                right,
            } => match quantifier {
                Some(q) => write!(f, "{left} {op} {} {right}", q.as_str()),
                None => write!(f, "{left} {op} {right}"),
            },
            Self::Unary { op, operand } => match op {
                UnaryOp::Not | UnaryOp::Exists => write!(f, "{} {operand}", op.as_str()),
                UnaryOp::Neg | UnaryOp::Pos => write!(f, "{}{operand}", op.as_str()),
            },
            Self::Function(call) => write!(f, "{call}"),
            Self::WindowFunction { function, .. } => write!(f, "{function} OVER (…)"),
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                write!(f, "CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for when in when_clauses {
                    write!(f, " WHEN {} THEN {}", when.condition, when.result)?;
                }
                if let Some(else_clause) = else_clause {
                    write!(f, " ELSE {else_clause}")?;
                }
                write!(f, " END")
            }
            Self::Interval { value, unit } => {
                write!(f, "INTERVAL {value} {}", unit.as_str())
            }
            Self::Subquery { .. } => write!(f, "(subquery)"),
            Self::ValueList(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            Self::Range { start, end } => write!(f, "{start} AND {end}"),
        }
    }
}
