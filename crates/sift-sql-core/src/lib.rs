//! # sift-sql-core
//!
//! A SQL front-end: a hand-written lexer and recursive descent parser
//! producing a typed AST with precise diagnostics, plus a structural
//! analyzer that describes SELECT queries (conditions, output fields,
//! tables, joins, grouping, ordering) and scores their complexity.
//!
//! The pipeline is linear and pure: SQL text → [`lexer`] → tokens →
//! [`parser`] → AST → (optionally) [`analyzer`] → query description.
//! Nothing here executes SQL or validates it against a schema; the
//! library stops at syntactic form.
//!
//! ## Parsing
//!
//! ```rust
//! use sift_sql_core::{parse_sql, ParseOptions};
//!
//! let report = parse_sql("SELECT name FROM users WHERE age > 18", &ParseOptions::default());
//! assert!(report.success);
//! assert_eq!(report.tables, vec!["users"]);
//! assert_eq!(report.columns, vec!["name", "age"]);
//! ```
//!
//! ## Analysis
//!
//! ```rust
//! use sift_sql_core::{analyze_sql, ParseOptions};
//!
//! let report = analyze_sql(
//!     "SELECT u.name, COUNT(o.id) FROM users u LEFT JOIN orders o ON u.id = o.user_id GROUP BY u.name",
//!     &ParseOptions::default(),
//! );
//! let complexity = report.complexity.expect("query parses");
//! assert_eq!(report.analysis.joins.len(), 1);
//! assert!(complexity.score > 0);
//! ```
//!
//! ## Diagnostics
//!
//! Failures carry a stable kind, a message, and a 1-based line and
//! column pointing at the offending token:
//!
//! ```rust
//! use sift_sql_core::{parse_sql, ParseOptions};
//!
//! let report = parse_sql("SELECT * FROM", &ParseOptions::default());
//! let error = &report.errors[0];
//! assert_eq!(error.to_string(), "Unexpected end of input: expected table name at line 1, column 14");
//! ```

pub mod analyzer;
mod api;
pub mod ast;
mod error;
pub mod lexer;
pub mod parser;

pub use analyzer::{analyze, complexity, Complexity, ComplexityLevel, QueryAnalysis};
pub use api::{
    analyze_sql, extract_columns, extract_tables, parse_sql, validate_sql, AnalyzeReport,
    ParseOptions, ParseReport, QueryInfo, Validation,
};
pub use ast::{Expr, Query, Statement};
pub use error::{ErrorContext, SqlError, SqlErrorKind};
pub use lexer::{tokenize, Keyword, LexOptions, Lexer, Location, Span, Token, TokenKind};
pub use parser::Parser;
