//! Abstract syntax tree types.
//!
//! Closed sum types per category (statements, expressions, clauses);
//! ownership is tree-shaped and nodes are immutable once built. All
//! nodes derive `Serialize`, giving a generic tree form for
//! diagnostics and tests.

mod expression;
mod statement;

pub use expression::{
    BinaryOp, Expr, Frame, FrameBound, FrameDirection, FrameUnits, FunctionCall, IntervalUnit,
    Literal, OverClause, Quantifier, UnaryOp, WhenClause,
};
pub use statement::{
    Assignment, Cte, DeleteStatement, FromClause, InsertStatement, Join, JoinType, Limit, OrderBy,
    OrderDirection, Query, SelectColumn, SelectStatement, Statement, TableRef, UnionQuery,
    UpdateStatement, WithClause,
};
