//! Parser tests for window functions: OVER clauses and frame
//! specifications.

mod common;
use common::*;

use sift_sql_core::ast::{
    Expr, FrameBound, FrameDirection, FrameUnits, IntervalUnit, OrderDirection,
};

fn window(sql: &str) -> (sift_sql_core::ast::FunctionCall, sift_sql_core::ast::OverClause) {
    let select = parse_select(sql);
    match select.columns.into_iter().next().unwrap().expr {
        Expr::WindowFunction { function, over } => (function, over),
        other => panic!("expected window function, got {other:?}"),
    }
}

#[test]
fn row_number_with_partition_and_order() {
    let (function, over) = window(
        "SELECT ROW_NUMBER() OVER (PARTITION BY dept ORDER BY salary DESC) FROM employees",
    );
    assert_eq!(function.name, "ROW_NUMBER");
    assert!(function.args.is_empty());
    assert_eq!(over.partition_by, vec![Expr::column("dept")]);
    assert_eq!(over.order_by.len(), 1);
    assert_eq!(over.order_by[0].direction, OrderDirection::Desc);
    assert!(over.frame.is_none());
}

#[test]
fn empty_over_clause() {
    let (function, over) = window("SELECT SUM(total) OVER () FROM orders");
    assert_eq!(function.name, "SUM");
    assert!(over.partition_by.is_empty());
    assert!(over.order_by.is_empty());
    assert!(over.frame.is_none());
}

#[test]
fn aggregate_without_over_stays_plain_call() {
    let select = parse_select("SELECT SUM(total) FROM orders");
    assert!(matches!(select.columns[0].expr, Expr::Function(_)));
}

#[test]
fn rows_between_unbounded_and_current_row() {
    let (_, over) = window(
        "SELECT SUM(amount) OVER (ORDER BY day ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) \
         FROM sales",
    );
    let frame = over.frame.expect("frame");
    assert_eq!(frame.units, FrameUnits::Rows);
    assert_eq!(frame.start, FrameBound::UnboundedPreceding);
    assert_eq!(frame.end, Some(FrameBound::CurrentRow));
}

#[test]
fn single_bound_frame() {
    let (_, over) =
        window("SELECT AVG(amount) OVER (ORDER BY day ROWS 3 PRECEDING) FROM sales");
    let frame = over.frame.expect("frame");
    assert_eq!(frame.units, FrameUnits::Rows);
    assert!(frame.end.is_none());
    let FrameBound::Offset { value, direction } = frame.start else {
        panic!("expected offset bound");
    };
    assert_eq!(*value, Expr::integer(3));
    assert_eq!(direction, FrameDirection::Preceding);
}

#[test]
fn range_interval_bound() {
    let (_, over) = window(
        "SELECT SUM(amount) OVER (ORDER BY day RANGE BETWEEN INTERVAL 7 DAY PRECEDING AND \
         CURRENT ROW) FROM sales",
    );
    let frame = over.frame.expect("frame");
    assert_eq!(frame.units, FrameUnits::Range);
    let FrameBound::Interval {
        value,
        unit,
        direction,
    } = frame.start
    else {
        panic!("expected interval bound");
    };
    assert_eq!(*value, Expr::integer(7));
    assert_eq!(unit, IntervalUnit::Day);
    assert_eq!(direction, FrameDirection::Preceding);
}

#[test]
fn unbounded_following_end() {
    let (_, over) = window(
        "SELECT SUM(x) OVER (ROWS BETWEEN CURRENT ROW AND UNBOUNDED FOLLOWING) FROM t",
    );
    let frame = over.frame.expect("frame");
    assert_eq!(frame.start, FrameBound::CurrentRow);
    assert_eq!(frame.end, Some(FrameBound::UnboundedFollowing));
}

#[test]
fn window_with_alias_and_other_columns() {
    let select = parse_select(
        "SELECT region, RANK() OVER (PARTITION BY region ORDER BY total) AS pos FROM sales",
    );
    assert_eq!(select.columns.len(), 2);
    assert_eq!(select.columns[1].alias.as_deref(), Some("pos"));
    assert!(matches!(
        select.columns[1].expr,
        Expr::WindowFunction { .. }
    ));
}

#[test]
fn reparsing_windows_is_stable() {
    parse_twice(
        "SELECT SUM(amount) OVER (PARTITION BY region ORDER BY day \
         ROWS BETWEEN 3 PRECEDING AND CURRENT ROW) FROM sales",
    );
}
