//! Facade tests: envelopes, extraction, strict mode, and the
//! serialized tree form.

mod common;
use common::*;

use sift_sql_core::{
    analyze_sql, extract_columns, extract_tables, parse_sql, validate_sql, ParseOptions,
    SqlErrorKind, Statement, TokenKind,
};

fn options() -> ParseOptions {
    ParseOptions::default()
}

// ===================================================================
// parse_sql
// ===================================================================

#[test]
fn success_envelope_with_tables_and_columns() {
    let report = parse_sql("SELECT name, email FROM users WHERE age > 18", &options());
    assert!(report.success);
    assert!(report.errors.is_empty());
    assert!(matches!(report.ast, Some(Statement::Select(_))));
    assert_eq!(report.tables, vec!["users"]);
    assert_eq!(report.columns, vec!["name", "email", "age"]);
    assert!(report.tokens.is_none());
}

#[test]
fn failure_envelope_has_single_error_and_no_ast() {
    let report = parse_sql("SELECT FROM users", &options());
    assert!(!report.success);
    assert!(report.ast.is_none());
    assert!(report.tables.is_empty());
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn lexical_failures_surface_through_the_facade() {
    let report = parse_sql("SELECT 'abc", &options());
    assert_eq!(report.errors[0].kind, SqlErrorKind::UnterminatedString);

    let report = parse_sql("SELECT @", &options());
    assert_eq!(report.errors[0].kind, SqlErrorKind::Lexical);
    assert_eq!(report.errors[0].column, 8);
}

#[test]
fn empty_and_blank_inputs() {
    for sql in ["", "   ", "\n\t"] {
        let report = parse_sql(sql, &options());
        assert_eq!(report.errors[0].kind, SqlErrorKind::EmptyInput, "for {sql:?}");
        assert_eq!(report.errors[0].line, 1);
        assert_eq!(report.errors[0].column, 1);
    }
}

#[test]
fn strict_mode_boundary() {
    let sql = "SELECT * FROM users ;";
    assert!(parse_sql(sql, &options()).success);
    let strict = ParseOptions {
        strict: true,
        ..options()
    };
    assert!(!parse_sql(sql, &strict).success);
}

#[test]
fn include_tokens_returns_full_stream() {
    let report = parse_sql(
        "SELECT 1 -- one",
        &ParseOptions {
            include_tokens: true,
            include_comments: true,
            ..options()
        },
    );
    let tokens = report.tokens.expect("tokens");
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Comment));
    assert!(tokens.last().unwrap().is_eof());
}

#[test]
fn dialect_label_is_informational() {
    let report = parse_sql(
        "SELECT * FROM users",
        &ParseOptions {
            dialect: Some(String::from("postgres")),
            ..options()
        },
    );
    assert!(report.success);
}

// ===================================================================
// validate / extract
// ===================================================================

#[test]
fn validate_agrees_with_parse_for_all_inputs() {
    let inputs = [
        "SELECT * FROM users",
        "SELECT * FROM",
        "INSERT INTO t VALUES (1)",
        "DELETE users",
        "",
        "WITH a AS (SELECT 1) SELECT * FROM a",
        "SELECT 'unterminated",
    ];
    for sql in inputs {
        assert_eq!(
            validate_sql(sql, &options()).valid,
            parse_sql(sql, &options()).success,
            "for {sql:?}"
        );
    }
}

#[test]
fn extracted_tables_appear_verbatim_in_source() {
    let sql = "SELECT u.id FROM users u \
               JOIN orders o ON u.id = o.user_id \
               WHERE o.total > (SELECT AVG(total) FROM orders)";
    let tables = extract_tables(sql);
    assert_eq!(tables, vec!["users", "orders", "orders"]);
    for table in &tables {
        assert!(sql.contains(table.as_str()));
    }
}

#[test]
fn extraction_covers_dml_targets() {
    assert_eq!(extract_tables("DELETE FROM sessions WHERE id = 1"), vec!["sessions"]);
    assert_eq!(
        extract_tables("INSERT INTO logs (msg) VALUES ('x')"),
        vec!["logs"]
    );
    assert_eq!(
        extract_columns("UPDATE users SET name = 'x' WHERE id = 1"),
        vec!["name", "id"]
    );
}

#[test]
fn extraction_is_empty_on_failure() {
    assert!(extract_tables("SELECT * FROM").is_empty());
    assert!(extract_columns("garbage input").is_empty());
}

// ===================================================================
// analyze_sql
// ===================================================================

#[test]
fn analyze_select_end_to_end() {
    let report = analyze_sql(
        "SELECT u.name, COUNT(o.id) as order_count FROM users u \
         LEFT JOIN orders o ON u.id = o.user_id GROUP BY u.id, u.name \
         HAVING COUNT(o.id) > 5 ORDER BY order_count DESC LIMIT 10",
        &options(),
    );
    assert!(report.success);
    let query = report.query.expect("query info");
    assert_eq!(query.kind, "SELECT");

    assert!(!report.analysis.joins.is_empty());
    assert!(report.analysis.fields.iter().any(|f| f.aggregate));
    let tables: Vec<&str> = report
        .analysis
        .tables
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(tables, vec!["users", "orders"]);

    let complexity = report.complexity.expect("complexity");
    assert!(complexity.score > 0);
}

#[test]
fn analyze_insert_populates_tables_only() {
    let report = analyze_sql("INSERT INTO users (name) VALUES ('x')", &options());
    assert!(report.success);
    assert_eq!(report.query.unwrap().kind, "INSERT");
    assert_eq!(report.analysis.tables[0].name, "users");
    assert!(report.analysis.fields.is_empty());
    assert!(report.analysis.conditions.is_empty());
    assert!(report.analysis.joins.is_empty());
}

#[test]
fn analyze_failure_envelope() {
    let report = analyze_sql("SELECT * FROM WHERE", &options());
    assert!(!report.success);
    assert!(report.query.is_none());
    assert!(report.ast.is_none());
    assert_eq!(report.errors.len(), 1);
}

// ===================================================================
// Serialized tree form
// ===================================================================

#[test]
fn ast_serialization_is_stable_across_parses() {
    let sql = "SELECT u.name, COUNT(*) FROM users u WHERE age BETWEEN 18 AND 65 ORDER BY name";
    let first = serde_json::to_value(parse(sql)).unwrap();
    let second = serde_json::to_value(parse(sql)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn ast_tree_form_carries_variant_tags() {
    let value = serde_json::to_value(parse("SELECT * FROM users")).unwrap();
    let rendered = value.to_string();
    assert!(rendered.contains("Select"), "missing tag in {rendered}");
    assert!(rendered.contains("users"), "missing table in {rendered}");
}

#[test]
fn error_serialization_includes_kind_and_position() {
    let report = parse_sql("SELECT * FROM", &options());
    let value = serde_json::to_value(&report.errors[0]).unwrap();
    assert_eq!(value["kind"], "UnexpectedEnd");
    assert_eq!(value["line"], 1);
    assert_eq!(value["column"], 14);
}
