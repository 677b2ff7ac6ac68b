//! Weighted complexity scoring over a query analysis.

use serde::Serialize;

use super::QueryAnalysis;

/// Coarse complexity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplexityLevel {
    /// Score 0–5.
    Simple,
    /// Score 6–15.
    Medium,
    /// Score above 15.
    Complex,
}

impl ComplexityLevel {
    /// Returns the level tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }

    const fn of(score: u32) -> Self {
        if score <= 5 {
            Self::Simple
        } else if score <= 15 {
            Self::Medium
        } else {
            Self::Complex
        }
    }
}

/// A complexity score with its contributing factors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Complexity {
    /// The accumulated score.
    pub score: u32,
    /// The bucket the score falls in.
    pub level: ComplexityLevel,
    /// One human-readable line per non-zero contributor.
    pub factors: Vec<String>,
}

/// Scores an analysis.
///
/// Weights: 2 per condition, 3 per table beyond the first, 4 per
/// join, 2 per aggregate field, 3 for grouping, 2 for ordering.
#[must_use]
pub fn complexity(analysis: &QueryAnalysis) -> Complexity {
    let mut score = 0u32;
    let mut factors = Vec::new();

    let conditions = analysis.conditions.len() as u32;
    if conditions > 0 {
        score += 2 * conditions;
        factors.push(format!(
            "{conditions} filter condition(s) (+{})",
            2 * conditions
        ));
    }

    let extra_tables = (analysis.tables.len() as u32).saturating_sub(1);
    if extra_tables > 0 {
        score += 3 * extra_tables;
        factors.push(format!(
            "{extra_tables} additional table(s) (+{})",
            3 * extra_tables
        ));
    }

    let joins = analysis.joins.len() as u32;
    if joins > 0 {
        score += 4 * joins;
        factors.push(format!("{joins} join(s) (+{})", 4 * joins));
    }

    let aggregates = analysis.fields.iter().filter(|f| f.aggregate).count() as u32;
    if aggregates > 0 {
        score += 2 * aggregates;
        factors.push(format!(
            "{aggregates} aggregate field(s) (+{})",
            2 * aggregates
        ));
    }

    if !analysis.group_by.is_empty() {
        score += 3;
        factors.push(String::from("grouped results (+3)"));
    }

    if !analysis.order_by.is_empty() {
        score += 2;
        factors.push(String::from("ordered results (+2)"));
    }

    Complexity {
        score,
        level: ComplexityLevel::of(score),
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::super::analyze;
    use super::*;
    use crate::ast::Statement;
    use crate::parser::Parser;

    fn score(sql: &str) -> Complexity {
        let stmt = Parser::new(sql).unwrap().parse_statement().unwrap();
        let Statement::Select(query) = stmt else {
            panic!("expected SELECT for {sql}");
        };
        complexity(&analyze(&query))
    }

    #[test]
    fn test_bare_select_scores_zero() {
        let c = score("SELECT * FROM users");
        assert_eq!(c.score, 0);
        assert_eq!(c.level, ComplexityLevel::Simple);
        assert!(c.factors.is_empty());
    }

    #[test]
    fn test_single_table_filter_stays_simple() {
        let c = score("SELECT name FROM users WHERE age > 18 AND active = true");
        assert_eq!(c.score, 4);
        assert_eq!(c.level, ComplexityLevel::Simple);
        assert_eq!(c.factors.len(), 1);
    }

    #[test]
    fn test_join_and_aggregate_reach_medium() {
        // 1 join (+4), 1 extra table (+3), 1 aggregate (+2),
        // grouping (+3), ordering (+2) = 14
        let c = score(
            "SELECT u.id, COUNT(o.id) FROM users u \
             LEFT JOIN orders o ON u.id = o.user_id \
             GROUP BY u.id ORDER BY u.id",
        );
        assert_eq!(c.score, 14);
        assert_eq!(c.level, ComplexityLevel::Medium);
    }

    #[test]
    fn test_heavy_query_is_complex() {
        let c = score(
            "SELECT a.x, COUNT(b.y), SUM(c.z) FROM a \
             JOIN b ON a.id = b.a_id \
             JOIN c ON b.id = c.b_id \
             WHERE a.x > 1 AND b.y < 2 AND c.z = 3 \
             GROUP BY a.x ORDER BY a.x",
        );
        assert!(c.score > 15);
        assert_eq!(c.level, ComplexityLevel::Complex);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ComplexityLevel::of(5), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::of(6), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::of(15), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::of(16), ComplexityLevel::Complex);
    }
}
