//! Token types for the SQL lexer.

use serde::Serialize;

use super::{Location, Span};

/// SQL keywords.
///
/// Words that participate in grammar decisions get their own variant;
/// everything else lexes as an identifier. `TRUE`, `FALSE`, and `NULL`
/// are absent on purpose: they lex directly to literal token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    // Query structure
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Distinct,
    As,
    Union,
    All,
    With,
    Recursive,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,

    // Predicates and logic
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Ilike,
    Is,
    Exists,
    Any,

    // DML
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,

    // CASE
    Case,
    When,
    Then,
    Else,
    End,

    // Ordering
    Asc,
    Desc,

    // Window functions
    Over,
    Partition,
    Rows,
    Range,
    Unbounded,
    Preceding,
    Following,
    Current,
    Row,

    // Intervals and date parts
    Interval,
    Extract,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Date,

    // Function names with grammar/aliasing significance
    Count,
    Sum,
    Avg,
    Min,
    Max,
    GroupConcat,
    RowNumber,
    Rank,
    DenseRank,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "DISTINCT" => Some(Self::Distinct),
            "AS" => Some(Self::As),
            "UNION" => Some(Self::Union),
            "ALL" => Some(Self::All),
            "WITH" => Some(Self::With),
            "RECURSIVE" => Some(Self::Recursive),
            "JOIN" => Some(Self::Join),
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "OUTER" => Some(Self::Outer),
            "CROSS" => Some(Self::Cross),
            "ON" => Some(Self::On),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "BETWEEN" => Some(Self::Between),
            "LIKE" => Some(Self::Like),
            "ILIKE" => Some(Self::Ilike),
            "IS" => Some(Self::Is),
            "EXISTS" => Some(Self::Exists),
            "ANY" => Some(Self::Any),
            "INSERT" => Some(Self::Insert),
            "INTO" => Some(Self::Into),
            "VALUES" => Some(Self::Values),
            "UPDATE" => Some(Self::Update),
            "SET" => Some(Self::Set),
            "DELETE" => Some(Self::Delete),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "OVER" => Some(Self::Over),
            "PARTITION" => Some(Self::Partition),
            "ROWS" => Some(Self::Rows),
            "RANGE" => Some(Self::Range),
            "UNBOUNDED" => Some(Self::Unbounded),
            "PRECEDING" => Some(Self::Preceding),
            "FOLLOWING" => Some(Self::Following),
            "CURRENT" => Some(Self::Current),
            "ROW" => Some(Self::Row),
            "INTERVAL" => Some(Self::Interval),
            "EXTRACT" => Some(Self::Extract),
            "YEAR" => Some(Self::Year),
            "MONTH" => Some(Self::Month),
            "DAY" => Some(Self::Day),
            "HOUR" => Some(Self::Hour),
            "MINUTE" => Some(Self::Minute),
            "SECOND" => Some(Self::Second),
            "DATE" => Some(Self::Date),
            "COUNT" => Some(Self::Count),
            "SUM" => Some(Self::Sum),
            "AVG" => Some(Self::Avg),
            "MIN" => Some(Self::Min),
            "MAX" => Some(Self::Max),
            "GROUP_CONCAT" => Some(Self::GroupConcat),
            "ROW_NUMBER" => Some(Self::RowNumber),
            "RANK" => Some(Self::Rank),
            "DENSE_RANK" => Some(Self::DenseRank),
            _ => None,
        }
    }

    /// Returns the canonical upper-case spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::As => "AS",
            Self::Union => "UNION",
            Self::All => "ALL",
            Self::With => "WITH",
            Self::Recursive => "RECURSIVE",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::On => "ON",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
            Self::Is => "IS",
            Self::Exists => "EXISTS",
            Self::Any => "ANY",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Unbounded => "UNBOUNDED",
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
            Self::Current => "CURRENT",
            Self::Row => "ROW",
            Self::Interval => "INTERVAL",
            Self::Extract => "EXTRACT",
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Date => "DATE",
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
            Self::GroupConcat => "GROUP_CONCAT",
            Self::RowNumber => "ROW_NUMBER",
            Self::Rank => "RANK",
            Self::DenseRank => "DENSE_RANK",
        }
    }

    /// Returns true for date-part keywords (EXTRACT fields, INTERVAL units).
    #[must_use]
    pub const fn is_date_part(&self) -> bool {
        matches!(
            self,
            Self::Year | Self::Month | Self::Day | Self::Hour | Self::Minute | Self::Second
        )
    }

    /// Returns true for keywords that name functions when followed by `(`.
    #[must_use]
    pub const fn is_function_name(&self) -> bool {
        matches!(
            self,
            Self::Count
                | Self::Sum
                | Self::Avg
                | Self::Min
                | Self::Max
                | Self::GroupConcat
                | Self::RowNumber
                | Self::Rank
                | Self::DenseRank
                | Self::Date
                | Self::Extract
        )
    }

    /// Returns true for keywords that may legitimately appear as aliases.
    #[must_use]
    pub const fn is_aliasable(&self) -> bool {
        self.is_date_part()
            || matches!(
                self,
                Self::Date
                    | Self::Count
                    | Self::Sum
                    | Self::Avg
                    | Self::Min
                    | Self::Max
                    | Self::GroupConcat
                    | Self::RowNumber
                    | Self::Rank
                    | Self::DenseRank
            )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g. 42).
    Integer(i64),
    /// Float literal (e.g. 3.14, 1e10).
    Float(f64),
    /// String literal with escapes resolved.
    String(String),
    /// Boolean literal (TRUE / FALSE).
    Boolean(bool),
    /// NULL literal.
    Null,

    // Identifiers and keywords
    /// Identifier, unquoted content for quoted forms.
    Identifier(String),
    /// SQL keyword.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Trivia (emitted only when requested)
    /// A run of non-newline whitespace.
    Whitespace,
    /// A single `\n`.
    Newline,
    /// Comment content, trimmed.
    Comment,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns a short human-readable description for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(_) | Self::Float(_) => String::from("number"),
            Self::String(_) => String::from("string"),
            Self::Boolean(_) => String::from("boolean"),
            Self::Null => String::from("NULL"),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::Keyword(kw) => String::from(kw.as_str()),
            Self::Plus => String::from("'+'"),
            Self::Minus => String::from("'-'"),
            Self::Star => String::from("'*'"),
            Self::Slash => String::from("'/'"),
            Self::Percent => String::from("'%'"),
            Self::Eq => String::from("'='"),
            Self::NotEq => String::from("'!='"),
            Self::Lt => String::from("'<'"),
            Self::LtEq => String::from("'<='"),
            Self::Gt => String::from("'>'"),
            Self::GtEq => String::from("'>='"),
            Self::Concat => String::from("'||'"),
            Self::LeftParen => String::from("'('"),
            Self::RightParen => String::from("')'"),
            Self::LeftBracket => String::from("'['"),
            Self::RightBracket => String::from("']'"),
            Self::Comma => String::from("','"),
            Self::Semicolon => String::from("';'"),
            Self::Dot => String::from("'.'"),
            Self::Whitespace => String::from("whitespace"),
            Self::Newline => String::from("newline"),
            Self::Comment => String::from("comment"),
            Self::Eof => String::from("end of input"),
        }
    }

    /// Returns true for whitespace, newline, and comment tokens.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }
}

/// A token with its surface text and source position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The surface text (unescaped for strings and quoted identifiers).
    pub text: String,
    /// 1-based line/column where the token begins.
    pub location: Location,
    /// Byte offsets of the token in the input.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, text: String, location: Location, span: Span) -> Self {
        Self {
            kind,
            text,
            location,
            span,
        }
    }

    /// Returns true if this is the EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
