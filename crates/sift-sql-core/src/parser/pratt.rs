//! Pratt binding powers for the expression grammar.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the additive level; BETWEEN bounds parse here so
/// the `AND` between them is never swallowed as a logical operator.
pub const ADDITIVE_BP: u8 = 9;

/// Binding power used for the operand of prefix NOT: comparisons and
/// tighter bind into the operand, AND/OR do not.
pub const NOT_BP: u8 = 5;

/// Binding power used for the operand of unary `-` / `+`.
pub const SIGN_BP: u8 = 13;

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)`; higher binds tighter, and
/// `left_bp < right_bp` makes the operator left-associative. `None`
/// means the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        // Equality
        TokenKind::Eq | TokenKind::NotEq => Some((5, 6)),

        // Relational and containment share one level; chains such as
        // `a < b LIKE c` therefore parse left-associatively.
        TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => Some((7, 8)),
        TokenKind::Keyword(
            Keyword::Like | Keyword::Ilike | Keyword::In | Keyword::Between | Keyword::Is,
        ) => Some((7, 8)),

        // Additive
        TokenKind::Plus | TokenKind::Minus => Some((ADDITIVE_BP, ADDITIVE_BP + 1)),

        // Multiplicative and string concatenation
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent | TokenKind::Concat => {
            Some((11, 12))
        }

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::Keyword(Keyword::Like) => Some(BinaryOp::Like),
        TokenKind::Keyword(Keyword::Ilike) => Some(BinaryOp::Ilike),
        _ => None,
    }
}

/// Converts a token to a unary prefix operator.
///
/// EXISTS is excluded: its operand is a parenthesized subquery, not a
/// general expression, so the parser handles it separately.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Plus => Some(UnaryOp::Pos),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}
