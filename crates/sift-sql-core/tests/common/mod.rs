#![allow(dead_code)]

use sift_sql_core::ast::{
    DeleteStatement, InsertStatement, Query, SelectStatement, Statement, UpdateStatement,
};
use sift_sql_core::{Parser, SqlError};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .and_then(|mut parser| parser.parse_statement())
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> SqlError {
    match Parser::new(sql) {
        Ok(mut parser) => parser
            .parse_statement()
            .expect_err(&format!("Expected parse error for: {sql}")),
        Err(error) => error,
    }
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Select(query) => query,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse_query(sql) {
        Query::Select(select) => *select,
        Query::Union(union) => panic!("Expected plain SELECT, got union {union:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(insert) => insert,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(update) => update,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(delete) => delete,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

/// Parses twice and requires structurally equal ASTs.
pub fn parse_twice(sql: &str) {
    let first = parse(sql);
    let second = parse(sql);
    assert_eq!(first, second, "Re-parsing diverged for: {sql}");
}
