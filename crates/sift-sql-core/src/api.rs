//! Facade entry points.
//!
//! Each function is total: it returns a typed envelope carrying
//! either the parsed result or the single diagnostic that stopped it.
//! No partial ASTs are surfaced from failed parses.

use serde::Serialize;
use tracing::debug;

use crate::analyzer::{self, Complexity, QueryAnalysis, TableSummary};
use crate::ast::{Expr, FrameBound, Query, SelectStatement, Statement, TableRef};
use crate::error::SqlError;
use crate::lexer::{LexOptions, Lexer, Token};
use crate::parser::Parser;

/// Options for the parse facade.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Reject trailing tokens after the statement.
    pub strict: bool,
    /// Retain comment tokens in the returned token list.
    pub include_comments: bool,
    /// Return the token list alongside the AST.
    pub include_tokens: bool,
    /// Informational dialect label; the grammar is dialect-agnostic.
    pub dialect: Option<String>,
}

/// The result envelope of [`parse_sql`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    /// Whether parsing succeeded.
    pub success: bool,
    /// The parsed statement on success.
    pub ast: Option<Statement>,
    /// Every table name in the AST, in order, duplicates preserved.
    pub tables: Vec<String>,
    /// De-duplicated column names in first-appearance order.
    pub columns: Vec<String>,
    /// The token list, when requested.
    pub tokens: Option<Vec<Token>>,
    /// Diagnostics; exactly one entry on failure.
    pub errors: Vec<SqlError>,
}

/// The result envelope of [`validate_sql`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    /// Whether the input parses.
    pub valid: bool,
    /// Diagnostics; exactly one entry when invalid.
    pub errors: Vec<SqlError>,
}

/// Statement kind and source text of an analyzed query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryInfo {
    /// `SELECT`, `INSERT`, `UPDATE`, or `DELETE`.
    pub kind: String,
    /// The input SQL.
    pub sql: String,
}

/// The result envelope of [`analyze_sql`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeReport {
    /// Whether parsing (and thus analysis) succeeded.
    pub success: bool,
    /// Statement kind and source, on success.
    pub query: Option<QueryInfo>,
    /// The structural description. Empty except for `tables` when the
    /// statement is not a SELECT.
    pub analysis: QueryAnalysis,
    /// The complexity score, on success.
    pub complexity: Option<Complexity>,
    /// The parsed statement on success.
    pub ast: Option<Statement>,
    /// Diagnostics; exactly one entry on failure.
    pub errors: Vec<SqlError>,
}

/// Parses a SQL string into an AST plus extracted table and column
/// names.
#[must_use]
pub fn parse_sql(sql: &str, options: &ParseOptions) -> ParseReport {
    match parse_inner(sql, options) {
        Ok((ast, tokens)) => {
            let mut names = NameCollector::default();
            names.statement(&ast);
            ParseReport {
                success: true,
                ast: Some(ast),
                tables: names.tables,
                columns: names.columns,
                tokens,
                errors: Vec::new(),
            }
        }
        Err(error) => {
            debug!(kind = error.kind.as_str(), line = error.line, column = error.column, "parse failed");
            ParseReport {
                success: false,
                ast: None,
                tables: Vec::new(),
                columns: Vec::new(),
                tokens: None,
                errors: vec![error],
            }
        }
    }
}

/// Checks whether a SQL string parses.
#[must_use]
pub fn validate_sql(sql: &str, options: &ParseOptions) -> Validation {
    let report = parse_sql(sql, options);
    Validation {
        valid: report.success,
        errors: report.errors,
    }
}

/// Returns the table names referenced by the input, or an empty list
/// when it does not parse.
#[must_use]
pub fn extract_tables(sql: &str) -> Vec<String> {
    parse_sql(sql, &ParseOptions::default()).tables
}

/// Returns the column names referenced by the input, or an empty list
/// when it does not parse.
#[must_use]
pub fn extract_columns(sql: &str) -> Vec<String> {
    parse_sql(sql, &ParseOptions::default()).columns
}

/// Parses and analyzes a SQL string.
///
/// For non-SELECT statements the analysis carries only the target
/// table; all other fields stay empty.
#[must_use]
pub fn analyze_sql(sql: &str, options: &ParseOptions) -> AnalyzeReport {
    let report = parse_sql(sql, options);
    let Some(ast) = report.ast else {
        return AnalyzeReport {
            success: false,
            query: None,
            analysis: QueryAnalysis::default(),
            complexity: None,
            ast: None,
            errors: report.errors,
        };
    };

    let analysis = match &ast {
        Statement::Select(query) => analyzer::analyze(query),
        Statement::Insert(insert) => dml_analysis(insert.schema.clone(), &insert.table),
        Statement::Update(update) => dml_analysis(update.schema.clone(), &update.table),
        Statement::Delete(delete) => dml_analysis(delete.schema.clone(), &delete.table),
    };
    let complexity = analyzer::complexity(&analysis);

    AnalyzeReport {
        success: true,
        query: Some(QueryInfo {
            kind: String::from(ast.kind()),
            sql: String::from(sql),
        }),
        analysis,
        complexity: Some(complexity),
        ast: Some(ast),
        errors: Vec::new(),
    }
}

fn parse_inner(
    sql: &str,
    options: &ParseOptions,
) -> Result<(Statement, Option<Vec<Token>>), SqlError> {
    if sql.trim().is_empty() {
        return Err(SqlError::empty_input());
    }

    let lex_options = LexOptions {
        include_whitespace: false,
        include_comments: options.include_comments,
    };
    let tokens = Lexer::with_options(sql, lex_options).tokenize()?;
    let returned = options.include_tokens.then(|| tokens.clone());

    let mut parser = Parser::from_tokens(tokens);
    let statement = parser.parse_statement()?;
    if options.strict {
        parser.expect_eof()?;
    }
    Ok((statement, returned))
}

/// The analysis of a DML statement: target table only.
fn dml_analysis(schema: Option<String>, table: &str) -> QueryAnalysis {
    QueryAnalysis {
        tables: vec![TableSummary {
            name: String::from(table),
            alias: None,
            schema,
        }],
        ..QueryAnalysis::default()
    }
}

/// Walks a statement collecting table and column names.
///
/// Table names keep duplicates (self-joins are two references);
/// column names are de-duplicated in first-appearance order.
#[derive(Default)]
struct NameCollector {
    tables: Vec<String>,
    columns: Vec<String>,
}

impl NameCollector {
    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Select(query) => self.query(query),
            Statement::Insert(insert) => {
                self.table(&insert.table);
                for column in &insert.columns {
                    self.column(column);
                }
                for row in &insert.rows {
                    for value in row {
                        self.expr(value);
                    }
                }
            }
            Statement::Update(update) => {
                self.table(&update.table);
                for assignment in &update.assignments {
                    self.column(&assignment.column);
                    self.expr(&assignment.value);
                }
                if let Some(where_clause) = &update.where_clause {
                    self.expr(where_clause);
                }
            }
            Statement::Delete(delete) => {
                self.table(&delete.table);
                if let Some(where_clause) = &delete.where_clause {
                    self.expr(where_clause);
                }
            }
        }
    }

    fn query(&mut self, query: &Query) {
        match query {
            Query::Select(select) => self.select(select),
            Query::Union(union) => {
                self.query(&union.left);
                self.query(&union.right);
                for item in &union.order_by {
                    self.expr(&item.expr);
                }
            }
        }
    }

    fn select(&mut self, select: &SelectStatement) {
        if let Some(with) = &select.with {
            for cte in &with.ctes {
                self.query(&cte.query);
            }
        }
        for column in &select.columns {
            self.expr(&column.expr);
        }
        if let Some(from) = &select.from {
            for table in &from.tables {
                self.table_ref(table);
            }
            for join in &from.joins {
                self.table_ref(&join.table);
                if let Some(on) = &join.on {
                    self.expr(on);
                }
            }
        }
        if let Some(where_clause) = &select.where_clause {
            self.expr(where_clause);
        }
        for expr in &select.group_by {
            self.expr(expr);
        }
        if let Some(having) = &select.having {
            self.expr(having);
        }
        for item in &select.order_by {
            self.expr(&item.expr);
        }
    }

    fn table_ref(&mut self, table: &TableRef) {
        match table {
            TableRef::Table { name, .. } => self.table(name),
            TableRef::Subquery { query, .. } => self.query(query),
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Column { name, .. } => self.column(name),
            Expr::Binary { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }
            Expr::Unary { operand, .. } => self.expr(operand),
            Expr::Function(call) => {
                for arg in &call.args {
                    self.expr(arg);
                }
            }
            Expr::WindowFunction { function, over } => {
                for arg in &function.args {
                    self.expr(arg);
                }
                for expr in &over.partition_by {
                    self.expr(expr);
                }
                for item in &over.order_by {
                    self.expr(&item.expr);
                }
                if let Some(frame) = &over.frame {
                    self.frame_bound(&frame.start);
                    if let Some(end) = &frame.end {
                        self.frame_bound(end);
                    }
                }
            }
            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                if let Some(operand) = operand {
                    self.expr(operand);
                }
                for when in when_clauses {
                    self.expr(&when.condition);
                    self.expr(&when.result);
                }
                if let Some(else_clause) = else_clause {
                    self.expr(else_clause);
                }
            }
            Expr::Interval { value, .. } => self.expr(value),
            Expr::Subquery { query, .. } => self.query(query),
            Expr::ValueList(values) => {
                for value in values {
                    self.expr(value);
                }
            }
            Expr::Range { start, end } => {
                self.expr(start);
                self.expr(end);
            }
            Expr::Literal(_) | Expr::Wildcard { .. } => {}
        }
    }

    fn frame_bound(&mut self, bound: &FrameBound) {
        match bound {
            FrameBound::Offset { value, .. } | FrameBound::Interval { value, .. } => {
                self.expr(value);
            }
            FrameBound::UnboundedPreceding
            | FrameBound::UnboundedFollowing
            | FrameBound::CurrentRow => {}
        }
    }

    fn table(&mut self, name: &str) {
        self.tables.push(String::from(name));
    }

    fn column(&mut self, name: &str) {
        if !self.columns.iter().any(|existing| existing == name) {
            self.columns.push(String::from(name));
        }
    }
}
