//! Parser tests for INSERT, UPDATE, and DELETE.

mod common;
use common::*;

use sift_sql_core::ast::{BinaryOp, Expr, Literal};

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_multiple_rows() {
    let insert = parse_insert(
        "INSERT INTO users (name, email) VALUES ('John','j@x'), ('Jane','k@x')",
    );
    assert_eq!(insert.table, "users");
    assert!(insert.schema.is_none());
    assert_eq!(insert.columns, vec!["name", "email"]);
    assert_eq!(insert.rows.len(), 2);
    assert_eq!(insert.rows[0].len(), 2);
    assert_eq!(insert.rows[1].len(), 2);
    assert_eq!(insert.rows[0][0], Expr::string("John"));
}

#[test]
fn insert_without_column_list() {
    let insert = parse_insert("INSERT INTO logs VALUES (1, 'boot', NULL)");
    assert!(insert.columns.is_empty());
    assert_eq!(insert.rows[0].len(), 3);
    assert_eq!(insert.rows[0][2], Expr::Literal(Literal::Null));
}

#[test]
fn insert_schema_qualified() {
    let insert = parse_insert("INSERT INTO audit.events (kind) VALUES ('login')");
    assert_eq!(insert.schema.as_deref(), Some("audit"));
    assert_eq!(insert.table, "events");
}

#[test]
fn insert_with_expression_values() {
    let insert = parse_insert("INSERT INTO totals (amount) VALUES (price * quantity + 1)");
    assert!(matches!(
        insert.rows[0][0],
        Expr::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

#[test]
fn insert_requires_values() {
    let err = parse_err("INSERT INTO users (name)");
    let ctx = err.context;
    assert!(ctx.is_none() || ctx.unwrap().expected == "VALUES");
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_with_assignments_and_where() {
    let update = parse_update("UPDATE users SET name = 'J', age = 3 WHERE id = 1");
    assert_eq!(update.table, "users");
    assert_eq!(update.assignments.len(), 2);
    assert_eq!(update.assignments[0].column, "name");
    assert_eq!(update.assignments[0].value, Expr::string("J"));
    assert_eq!(update.assignments[1].column, "age");
    assert_eq!(update.assignments[1].value, Expr::integer(3));

    let Some(Expr::Binary {
        left, op, right, ..
    }) = update.where_clause
    else {
        panic!("expected binary WHERE");
    };
    assert_eq!(op, BinaryOp::Eq);
    assert_eq!(*left, Expr::column("id"));
    assert_eq!(*right, Expr::integer(1));
}

#[test]
fn update_without_where() {
    let update = parse_update("UPDATE counters SET value = value + 1");
    assert!(update.where_clause.is_none());
    assert!(matches!(
        update.assignments[0].value,
        Expr::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

#[test]
fn update_requires_assignment() {
    let err = parse_err("UPDATE users SET");
    assert_eq!(err.kind, sift_sql_core::SqlErrorKind::UnexpectedEnd);
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_with_where() {
    let delete = parse_delete("DELETE FROM users WHERE id = 1");
    assert_eq!(delete.table, "users");
    assert!(delete.where_clause.is_some());
}

#[test]
fn delete_without_where() {
    let delete = parse_delete("DELETE FROM sessions");
    assert!(delete.where_clause.is_none());
}

#[test]
fn delete_schema_qualified() {
    let delete = parse_delete("DELETE FROM app.sessions WHERE expired = true");
    assert_eq!(delete.schema.as_deref(), Some("app"));
    assert_eq!(delete.table, "sessions");
}

#[test]
fn delete_requires_from() {
    let err = parse_err("DELETE users");
    let ctx = err.context.expect("context");
    assert_eq!(ctx.expected, "FROM");
}

#[test]
fn reparsing_dml_is_stable() {
    parse_twice("INSERT INTO users (name, email) VALUES ('John','j@x'), ('Jane','k@x')");
    parse_twice("UPDATE users SET name = 'J', age = 3 WHERE id = 1");
    parse_twice("DELETE FROM users WHERE id IN (SELECT id FROM banned)");
}
