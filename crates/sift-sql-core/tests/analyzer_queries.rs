//! Analyzer integration tests: condition classification, field and
//! table summaries, and complexity scoring.

mod common;
use common::*;

use sift_sql_core::analyzer::{
    analyze, complexity, ComplexityLevel, ConditionKind, FieldKind,
};

fn analysis_of(sql: &str) -> sift_sql_core::QueryAnalysis {
    analyze(&parse_query(sql))
}

// ===================================================================
// Conditions
// ===================================================================

#[test]
fn classifies_mixed_where_clause() {
    let analysis = analysis_of(
        "SELECT * FROM users \
         WHERE email IS NOT NULL AND age BETWEEN 18 AND 65 AND name LIKE 'A%'",
    );
    assert_eq!(analysis.conditions.len(), 3);

    assert_eq!(analysis.conditions[0].field, "email");
    assert_eq!(analysis.conditions[0].operator, "IS NOT");
    assert_eq!(analysis.conditions[0].kind, ConditionKind::Other);

    assert_eq!(analysis.conditions[1].field, "age");
    assert_eq!(analysis.conditions[1].kind, ConditionKind::Range);

    assert_eq!(analysis.conditions[2].field, "name");
    assert_eq!(analysis.conditions[2].value, "A%");
    assert_eq!(analysis.conditions[2].kind, ConditionKind::Pattern);
}

#[test]
fn equality_and_comparison_categories() {
    let analysis =
        analysis_of("SELECT * FROM t WHERE a = 1 AND b != 2 AND c < 3 AND d >= 4");
    let kinds: Vec<ConditionKind> = analysis.conditions.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ConditionKind::Equality,
            ConditionKind::Equality,
            ConditionKind::Comparison,
            ConditionKind::Comparison,
        ]
    );
}

#[test]
fn in_list_category_and_rendered_value() {
    let analysis = analysis_of("SELECT * FROM t WHERE status IN ('a', 'b')");
    assert_eq!(analysis.conditions[0].kind, ConditionKind::List);
    assert_eq!(analysis.conditions[0].value, "(a, b)");
}

#[test]
fn conditions_descend_through_or() {
    let analysis = analysis_of("SELECT * FROM t WHERE a = 1 OR (b = 2 AND c = 3)");
    assert_eq!(analysis.conditions.len(), 3);
}

#[test]
fn qualified_fields_render_with_table() {
    let analysis = analysis_of("SELECT * FROM users u WHERE u.age > 21");
    assert_eq!(analysis.conditions[0].field, "u.age");
}

// ===================================================================
// Fields and tables
// ===================================================================

#[test]
fn field_table_and_alias_capture() {
    let analysis = analysis_of("SELECT u.name full_name, email FROM users u");
    assert_eq!(analysis.fields[0].name, "name");
    assert_eq!(analysis.fields[0].table.as_deref(), Some("u"));
    assert_eq!(analysis.fields[0].alias.as_deref(), Some("full_name"));
    assert_eq!(analysis.fields[1].table, None);
}

#[test]
fn aggregate_markers() {
    let analysis = analysis_of(
        "SELECT COUNT(*), SUM(total), GROUP_CONCAT(name), UPPER(name) FROM orders",
    );
    let aggregates: Vec<bool> = analysis.fields.iter().map(|f| f.aggregate).collect();
    assert_eq!(aggregates, vec![true, true, true, false]);
    assert!(analysis
        .fields
        .iter()
        .all(|f| f.kind == FieldKind::Function));
}

#[test]
fn tables_flattened_from_joins() {
    let analysis = analysis_of(
        "SELECT * FROM users u \
         LEFT OUTER JOIN orders o ON u.id = o.user_id \
         CROSS JOIN regions",
    );
    let names: Vec<&str> = analysis.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["users", "orders", "regions"]);

    assert_eq!(analysis.joins.len(), 2);
    assert_eq!(analysis.joins[0].kind, "LEFT OUTER");
    assert!(analysis.joins[0].condition.is_some());
    assert_eq!(analysis.joins[1].kind, "CROSS");
    assert!(analysis.joins[1].condition.is_none());
}

#[test]
fn schema_survives_into_table_summary() {
    let analysis = analysis_of("SELECT * FROM crm.accounts a");
    assert_eq!(analysis.tables[0].schema.as_deref(), Some("crm"));
    assert_eq!(analysis.tables[0].alias.as_deref(), Some("a"));
}

#[test]
fn group_order_limit_summaries() {
    let analysis = analysis_of(
        "SELECT region, COUNT(*) FROM sales GROUP BY region ORDER BY region DESC LIMIT 10 OFFSET 5",
    );
    assert_eq!(analysis.group_by, vec!["region"]);
    assert_eq!(analysis.order_by.len(), 1);
    assert_eq!(analysis.order_by[0].field, "region");
    let limit = analysis.limit.unwrap();
    assert_eq!((limit.count, limit.offset), (10, Some(5)));
}

// ===================================================================
// Complexity
// ===================================================================

#[test]
fn plain_single_table_select_is_simple() {
    for sql in [
        "SELECT * FROM users",
        "SELECT name, email FROM users",
        "SELECT name FROM users WHERE age > 18",
        "SELECT name FROM users WHERE age > 18 AND active = true",
    ] {
        let c = complexity(&analysis_of(sql));
        assert_eq!(c.level, ComplexityLevel::Simple, "for {sql}");
    }
}

#[test]
fn reporting_query_scores_each_factor() {
    let analysis = analysis_of(
        "SELECT u.name, COUNT(o.id) AS order_count FROM users u \
         LEFT JOIN orders o ON u.id = o.user_id \
         GROUP BY u.id, u.name HAVING COUNT(o.id) > 5 \
         ORDER BY order_count DESC LIMIT 10",
    );
    assert!(!analysis.joins.is_empty());
    assert!(analysis.fields.iter().any(|f| f.aggregate));

    let c = complexity(&analysis);
    // join +4, extra table +3, aggregate +2, grouping +3, ordering +2
    assert_eq!(c.score, 14);
    assert_eq!(c.level, ComplexityLevel::Medium);
    assert_eq!(c.factors.len(), 5);
}

#[test]
fn factors_name_each_contributor() {
    let c = complexity(&analysis_of(
        "SELECT COUNT(*) FROM a JOIN b ON a.id = b.a_id WHERE a.x = 1 GROUP BY a.y ORDER BY a.y",
    ));
    assert!(c.factors.iter().any(|f| f.contains("condition")));
    assert!(c.factors.iter().any(|f| f.contains("join")));
    assert!(c.factors.iter().any(|f| f.contains("aggregate")));
    assert!(c.factors.iter().any(|f| f.contains("grouped")));
    assert!(c.factors.iter().any(|f| f.contains("ordered")));
}

#[test]
fn union_analysis_uses_outer_clauses_and_first_select() {
    let analysis =
        analysis_of("SELECT id FROM a UNION ALL SELECT id FROM b ORDER BY id LIMIT 5");
    assert_eq!(analysis.tables.len(), 1);
    assert_eq!(analysis.order_by.len(), 1);
    assert_eq!(analysis.limit.unwrap().count, 5);
}
