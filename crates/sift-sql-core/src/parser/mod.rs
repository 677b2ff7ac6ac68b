//! SQL parser.
//!
//! A hand-written recursive descent parser with Pratt expression
//! parsing covering the DML/DQL subset of SQL that the analyzer
//! understands.
//!
//! # Parsing approach
//!
//! Statements (`SELECT`, `INSERT`, `UPDATE`, `DELETE`, and `WITH`
//! prefixed queries) are parsed by dedicated recursive-descent
//! methods. Expressions use a Pratt (top-down operator precedence)
//! parser driven by a pair of binding-power tables. The token stream
//! is materialized up front; a single
//! backtrack point exists where a parenthesis in FROM turns out not
//! to open a subquery.
//!
//! # Supported statements
//!
//! | Statement | Notes |
//! |-----------|-------|
//! | `SELECT`  | Full DQL incl. `UNION [ALL]` chains and `WITH` CTEs |
//! | `INSERT`  | `VALUES` rows with optional column list |
//! | `UPDATE`  | `SET` assignments, optional `WHERE` |
//! | `DELETE`  | `FROM` with optional `WHERE` |
//!
//! # SELECT clauses
//!
//! `DISTINCT`, select list with aliases (including aliasable
//! keywords such as date parts and function names), `FROM` (tables,
//! schema-qualified tables, subqueries, aliases), joins (`INNER`,
//! `LEFT [OUTER]`, `RIGHT [OUTER]`, `FULL [OUTER]`, `CROSS`),
//! `WHERE`, `GROUP BY`, `HAVING`, `ORDER BY` (`ASC`/`DESC`), `LIMIT`
//! with optional `OFFSET`. On a `UNION` chain the trailing
//! `ORDER BY`/`LIMIT` belong to the outermost node only.
//!
//! # Expressions
//!
//! - **Literals**: integers, floats, strings, booleans, `NULL`
//! - **References**: `col`, `t.col`, `*`, `t.*`
//! - **Operators**: `+ - * / % ||`, comparisons, `AND`/`OR`,
//!   `LIKE`/`ILIKE`, unary `NOT` / `-` / `+`
//! - **Special forms**: `IS [NOT] NULL`, `BETWEEN … AND …`,
//!   `IN (list)` / `IN (subquery)`, comparison + `ANY`/`ALL`
//!   subqueries, `CASE`/`WHEN`/`THEN`/`ELSE`/`END`, `EXISTS (…)`,
//!   `INTERVAL <value> [unit]`, `EXTRACT(field FROM source)`
//! - **Window functions**: `call OVER ([PARTITION BY …] [ORDER BY …]
//!   [ROWS|RANGE frame])` with `UNBOUNDED`/`CURRENT ROW`/offset/
//!   interval bounds
//! - **Subqueries**: scalar `(SELECT …)` in expressions

mod core;
mod pratt;

pub use core::Parser;
