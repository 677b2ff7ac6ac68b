//! SQL parser implementation.

use tracing::trace;

use super::pratt::{
    infix_binding_power, token_to_binary_op, token_to_unary_op, ADDITIVE_BP, NOT_BP, SIGN_BP,
};
use crate::ast::{
    Assignment, BinaryOp, Cte, DeleteStatement, Expr, Frame, FrameBound, FrameDirection,
    FrameUnits, FromClause, FunctionCall, InsertStatement, IntervalUnit, Join, JoinType, Limit,
    Literal, OrderBy, OrderDirection, OverClause, Quantifier, Query, SelectColumn,
    SelectStatement, Statement, TableRef, UnaryOp, UnionQuery, UpdateStatement, WhenClause,
    WithClause,
};
use crate::error::SqlError;
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// SQL parser.
///
/// Works on a materialized, trivia-free token vector. Recursive
/// descent over statements, Pratt binding powers over expressions.
/// A single parse attempt yields either a statement or a diagnostic.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a parser for the given input, tokenizing it up front.
    ///
    /// # Errors
    ///
    /// Returns the lexer's diagnostic when the input cannot be
    /// tokenized.
    pub fn new(input: &str) -> Result<Self, SqlError> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Creates a parser over an existing token list. Trivia tokens
    /// are filtered out.
    #[must_use]
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        tokens.retain(|token| !token.kind.is_trivia());
        Self { tokens, pos: 0 }
    }

    /// Parses a single SQL statement.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic when the token stream is not a valid
    /// statement. Trailing tokens after the statement are not
    /// consumed; use [`Parser::expect_eof`] to reject them.
    pub fn parse_statement(&mut self) -> Result<Statement, SqlError> {
        if self.current().is_eof() {
            return Err(SqlError::empty_input());
        }
        trace!(token = %self.current().text, "parsing statement");
        match self.current().as_keyword() {
            Some(Keyword::With) => self.parse_with_query(),
            Some(Keyword::Select) => Ok(Statement::Select(self.parse_query()?)),
            Some(Keyword::Insert) => Ok(Statement::Insert(self.parse_insert_statement()?)),
            Some(Keyword::Update) => Ok(Statement::Update(self.parse_update_statement()?)),
            Some(Keyword::Delete) => Ok(Statement::Delete(self.parse_delete_statement()?)),
            _ => Err(self.unexpected("WITH, SELECT, INSERT, UPDATE, or DELETE")),
        }
    }

    /// Requires the statement to have consumed all input.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic at the first trailing token.
    pub fn expect_eof(&self) -> Result<(), SqlError> {
        if self.current().is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    // --- Statements ---

    /// Parses `WITH [RECURSIVE] name [(cols)] AS (query), … SELECT …`.
    fn parse_with_query(&mut self) -> Result<Statement, SqlError> {
        self.expect_keyword(Keyword::With)?;
        let recursive = self.eat_keyword(Keyword::Recursive);

        let mut ctes = Vec::new();
        loop {
            let name = self.expect_identifier("common table expression name")?;
            let columns = if self.eat(&TokenKind::LeftParen) {
                let cols = self.parse_identifier_list()?;
                self.expect(&TokenKind::RightParen, "')'")?;
                Some(cols)
            } else {
                None
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen, "'('")?;
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen, "')'")?;
            ctes.push(Cte {
                name,
                columns,
                query,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        if !self.check_keyword(Keyword::Select) {
            return Err(self.unexpected("SELECT"));
        }
        let mut query = self.parse_query()?;
        attach_with(
            &mut query,
            WithClause { recursive, ctes },
        );
        Ok(Statement::Select(query))
    }

    /// Parses a UNION-capable query with its trailing ORDER BY and
    /// LIMIT, which attach to the outermost node only.
    fn parse_query(&mut self) -> Result<Query, SqlError> {
        let mut query = self.parse_union_chain()?;

        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            Vec::new()
        };
        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };

        match &mut query {
            Query::Select(select) => {
                select.order_by = order_by;
                select.limit = limit;
            }
            Query::Union(union) => {
                union.order_by = order_by;
                union.limit = limit;
            }
        }
        Ok(query)
    }

    /// Parses `SELECT … [UNION [ALL] …]*` as a right-associative
    /// chain. Inner selects never carry ORDER BY or LIMIT.
    fn parse_union_chain(&mut self) -> Result<Query, SqlError> {
        let left = Query::Select(Box::new(self.parse_select_body()?));

        if !self.eat_keyword(Keyword::Union) {
            return Ok(left);
        }
        let all = self.eat_keyword(Keyword::All);
        let right = self.parse_union_chain()?;

        Ok(Query::Union(Box::new(UnionQuery {
            left,
            right,
            all,
            order_by: Vec::new(),
            limit: None,
        })))
    }

    /// Parses a SELECT body up to (not including) ORDER BY / LIMIT.
    fn parse_select_body(&mut self) -> Result<SelectStatement, SqlError> {
        self.expect_keyword(Keyword::Select)?;
        let distinct = self.eat_keyword(Keyword::Distinct);
        let columns = self.parse_select_list()?;

        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_from_clause()?)
        } else {
            None
        };
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };
        let group_by = if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(SelectStatement {
            with: None,
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by: Vec::new(),
            limit: None,
        })
    }

    /// Parses the select list: `*` or aliased expressions.
    fn parse_select_list(&mut self) -> Result<Vec<SelectColumn>, SqlError> {
        let mut columns = Vec::new();
        loop {
            if self.eat(&TokenKind::Star) {
                columns.push(SelectColumn::new(Expr::Wildcard { table: None }));
            } else {
                let expr = self.parse_expression(0)?;
                let alias = if self.eat_keyword(Keyword::As) {
                    Some(self.expect_alias_name()?)
                } else {
                    self.take_alias_name()
                };
                columns.push(SelectColumn { expr, alias });
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(columns)
    }

    /// Consumes an identifier or aliasable keyword if one is next.
    fn take_alias_name(&mut self) -> Option<String> {
        let alias = match &self.current().kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(kw) if kw.is_aliasable() => self.current().text.clone(),
            _ => return None,
        };
        self.advance();
        Some(alias)
    }

    /// Requires an identifier or aliasable keyword.
    fn expect_alias_name(&mut self) -> Result<String, SqlError> {
        match self.take_alias_name() {
            Some(alias) => Ok(alias),
            None => Err(self.unexpected("alias name")),
        }
    }

    /// Parses the FROM clause: comma-separated table references, each
    /// followed by a run of joins.
    fn parse_from_clause(&mut self) -> Result<FromClause, SqlError> {
        let mut from = FromClause::default();
        loop {
            from.tables.push(self.parse_table_ref()?);
            while self.at_join_keyword() {
                let join = self.parse_join()?;
                from.joins.push(join);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(from)
    }

    /// Parses a table reference: a parenthesized subquery or a
    /// (schema-qualified) table name, with an optional alias.
    fn parse_table_ref(&mut self) -> Result<TableRef, SqlError> {
        if self.eat(&TokenKind::LeftParen) {
            if self.check_keyword(Keyword::Select) {
                let query = self.parse_query()?;
                self.expect(&TokenKind::RightParen, "')'")?;
                let alias = self.parse_table_alias()?;
                return Ok(TableRef::Subquery {
                    query: Box::new(query),
                    alias,
                });
            }
            // Not a subquery: rewind so the opening paren is the
            // reported offender.
            self.pos -= 1;
            return Err(self.unexpected("table name or subquery"));
        }

        let first = self.expect_identifier("table name")?;
        let (schema, name) = if self.eat(&TokenKind::Dot) {
            let table = self.expect_identifier("table name")?;
            (Some(first), table)
        } else {
            (None, first)
        };
        let alias = self.parse_table_alias()?;
        Ok(TableRef::Table {
            name,
            alias,
            schema,
        })
    }

    /// Parses an optional table alias (`AS name` or a bare
    /// identifier).
    fn parse_table_alias(&mut self) -> Result<Option<String>, SqlError> {
        if self.eat_keyword(Keyword::As) {
            return self.expect_alias_name().map(Some);
        }
        if let TokenKind::Identifier(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            return Ok(Some(name));
        }
        Ok(None)
    }

    fn at_join_keyword(&self) -> bool {
        matches!(
            self.current().as_keyword(),
            Some(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
            )
        )
    }

    /// Parses one join: kind, table, and the ON condition for all
    /// non-CROSS kinds.
    fn parse_join(&mut self) -> Result<Join, SqlError> {
        let join_type = self.parse_join_type()?;
        let table = self.parse_table_ref()?;
        let on = if join_type == JoinType::Cross {
            None
        } else {
            self.expect_keyword(Keyword::On)?;
            Some(self.parse_expression(0)?)
        };
        Ok(Join {
            join_type,
            table,
            on,
        })
    }

    fn parse_join_type(&mut self) -> Result<JoinType, SqlError> {
        let join_type = match self.current().as_keyword() {
            Some(Keyword::Join) => {
                self.advance();
                JoinType::Inner
            }
            Some(Keyword::Inner) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Inner
            }
            Some(Keyword::Left) => {
                self.advance();
                let outer = self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                if outer {
                    JoinType::LeftOuter
                } else {
                    JoinType::Left
                }
            }
            Some(Keyword::Right) => {
                self.advance();
                let outer = self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                if outer {
                    JoinType::RightOuter
                } else {
                    JoinType::Right
                }
            }
            Some(Keyword::Full) => {
                self.advance();
                let outer = self.eat_keyword(Keyword::Outer);
                self.expect_keyword(Keyword::Join)?;
                if outer {
                    JoinType::FullOuter
                } else {
                    JoinType::Full
                }
            }
            Some(Keyword::Cross) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Cross
            }
            _ => return Err(self.unexpected("JOIN")),
        };
        Ok(join_type)
    }

    fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, SqlError> {
        let mut items = Vec::new();
        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.eat_keyword(Keyword::Desc) {
                OrderDirection::Desc
            } else {
                self.eat_keyword(Keyword::Asc);
                OrderDirection::Asc
            };
            items.push(OrderBy { expr, direction });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses `<count> [OFFSET <offset>]` after LIMIT.
    fn parse_limit(&mut self) -> Result<Limit, SqlError> {
        let count = self.expect_integer("row count")?;
        let offset = if self.eat_keyword(Keyword::Offset) {
            Some(self.expect_integer("offset")?)
        } else {
            None
        };
        Ok(Limit { count, offset })
    }

    /// Parses `INSERT INTO table [(cols)] VALUES (…)[, (…)]*`.
    fn parse_insert_statement(&mut self) -> Result<InsertStatement, SqlError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let (schema, table) = self.parse_table_name()?;

        let columns = if self.eat(&TokenKind::LeftParen) {
            let cols = self.parse_identifier_list()?;
            self.expect(&TokenKind::RightParen, "')'")?;
            cols
        } else {
            Vec::new()
        };

        self.expect_keyword(Keyword::Values)?;
        let mut rows = Vec::new();
        loop {
            self.expect(&TokenKind::LeftParen, "'('")?;
            let row = self.parse_expression_list()?;
            self.expect(&TokenKind::RightParen, "')'")?;
            rows.push(row);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(InsertStatement {
            schema,
            table,
            columns,
            rows,
        })
    }

    /// Parses `UPDATE table SET col = expr[, …] [WHERE expr]`.
    fn parse_update_statement(&mut self) -> Result<UpdateStatement, SqlError> {
        self.expect_keyword(Keyword::Update)?;
        let (schema, table) = self.parse_table_name()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier("column name")?;
            self.expect(&TokenKind::Eq, "'='")?;
            let value = self.parse_expression(0)?;
            assignments.push(Assignment { column, value });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(UpdateStatement {
            schema,
            table,
            assignments,
            where_clause,
        })
    }

    /// Parses `DELETE FROM table [WHERE expr]`.
    fn parse_delete_statement(&mut self) -> Result<DeleteStatement, SqlError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let (schema, table) = self.parse_table_name()?;

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(DeleteStatement {
            schema,
            table,
            where_clause,
        })
    }

    /// Parses `identifier[.identifier]` into `(schema, table)`.
    fn parse_table_name(&mut self) -> Result<(Option<String>, String), SqlError> {
        let first = self.expect_identifier("table name")?;
        if self.eat(&TokenKind::Dot) {
            let table = self.expect_identifier("table name")?;
            Ok((Some(first), table))
        } else {
            Ok((None, first))
        }
    }

    // --- Expressions ---

    /// Parses an expression with Pratt precedence climbing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, SqlError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(&self.current().kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            lhs = match self.current().as_keyword() {
                Some(Keyword::Is) => self.parse_is_suffix(lhs)?,
                Some(Keyword::In) => self.parse_in_suffix(lhs)?,
                Some(Keyword::Between) => self.parse_between_suffix(lhs, r_bp)?,
                _ => {
                    let Some(op) = token_to_binary_op(&self.current().kind) else {
                        break;
                    };
                    self.advance();
                    if op.is_comparison()
                        && matches!(
                            self.current().as_keyword(),
                            Some(Keyword::Any | Keyword::All)
                        )
                    {
                        self.parse_quantified_suffix(lhs, op)?
                    } else {
                        let rhs = self.parse_expression(r_bp)?;
                        Expr::Binary {
                            left: Box::new(lhs),
                            op,
                            quantifier: None,
                            right: Box::new(rhs),
                        }
                    }
                }
            };
        }

        Ok(lhs)
    }

    /// `IS [NOT] NULL` after an expression.
    fn parse_is_suffix(&mut self, left: Expr) -> Result<Expr, SqlError> {
        self.advance(); // IS
        let negated = self.eat_keyword(Keyword::Not);
        if !self.eat(&TokenKind::Null) {
            return Err(self.unexpected("NULL"));
        }
        Ok(Expr::Binary {
            left: Box::new(left),
            op: if negated { BinaryOp::IsNot } else { BinaryOp::Is },
            quantifier: None,
            right: Box::new(Expr::null()),
        })
    }

    /// `IN (subquery)` or `IN (value, …)` after an expression.
    fn parse_in_suffix(&mut self, left: Expr) -> Result<Expr, SqlError> {
        self.advance(); // IN
        self.expect(&TokenKind::LeftParen, "'('")?;
        let right = if self.check_keyword(Keyword::Select) {
            let query = self.parse_query()?;
            Expr::Subquery {
                query: Box::new(query),
                alias: None,
            }
        } else {
            Expr::ValueList(self.parse_expression_list()?)
        };
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(Expr::Binary {
            left: Box::new(left),
            op: BinaryOp::In,
            quantifier: None,
            right: Box::new(right),
        })
    }

    /// `BETWEEN low AND high`; bounds parse at the additive level so
    /// the separating `AND` is never consumed as a logical operator.
    fn parse_between_suffix(&mut self, left: Expr, r_bp: u8) -> Result<Expr, SqlError> {
        self.advance(); // BETWEEN
        let start = self.parse_expression(r_bp)?;
        self.expect_keyword(Keyword::And)?;
        let end = self.parse_expression(r_bp)?;
        Ok(Expr::Binary {
            left: Box::new(left),
            op: BinaryOp::Between,
            quantifier: None,
            right: Box::new(Expr::Range {
                start: Box::new(start),
                end: Box::new(end),
            }),
        })
    }

    /// `ANY`/`ALL` after a comparison operator; the right side must
    /// be a parenthesized subquery.
    fn parse_quantified_suffix(&mut self, left: Expr, op: BinaryOp) -> Result<Expr, SqlError> {
        let quantifier = if self.eat_keyword(Keyword::Any) {
            Quantifier::Any
        } else {
            self.expect_keyword(Keyword::All)?;
            Quantifier::All
        };
        self.expect(&TokenKind::LeftParen, "'('")?;
        if !self.check_keyword(Keyword::Select) {
            return Err(self.unexpected("subquery"));
        }
        let query = self.parse_query()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(Expr::Binary {
            left: Box::new(left),
            op,
            quantifier: Some(quantifier),
            right: Box::new(Expr::Subquery {
                query: Box::new(query),
                alias: None,
            }),
        })
    }

    /// Parses prefix operators and primaries.
    fn parse_prefix(&mut self) -> Result<Expr, SqlError> {
        if self.eat_keyword(Keyword::Exists) {
            self.expect(&TokenKind::LeftParen, "'('")?;
            if !self.check_keyword(Keyword::Select) {
                return Err(self.unexpected("subquery"));
            }
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen, "')'")?;
            return Ok(Expr::Unary {
                op: UnaryOp::Exists,
                operand: Box::new(Expr::Subquery {
                    query: Box::new(query),
                    alias: None,
                }),
            });
        }

        if let Some(op) = token_to_unary_op(&self.current().kind) {
            let bp = match op {
                UnaryOp::Not => NOT_BP,
                _ => SIGN_BP,
            };
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, SqlError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Integer(value) => {
                self.advance();
                Ok(Expr::Literal(Literal::Integer(value)))
            }
            TokenKind::Float(value) => {
                self.advance();
                Ok(Expr::Literal(Literal::Float(value)))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(Expr::Literal(Literal::String(value)))
            }
            TokenKind::Boolean(value) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(value)))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::null())
            }

            // Parenthesized expression or subquery.
            TokenKind::LeftParen => {
                self.advance();
                if self.check_keyword(Keyword::Select) {
                    let query = self.parse_query()?;
                    self.expect(&TokenKind::RightParen, "')'")?;
                    Ok(Expr::Subquery {
                        query: Box::new(query),
                        alias: None,
                    })
                } else {
                    let expr = self.parse_expression(0)?;
                    self.expect(&TokenKind::RightParen, "')'")?;
                    Ok(expr)
                }
            }

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval(),

            TokenKind::Keyword(Keyword::Extract) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    self.parse_extract_call(token.text)
                } else {
                    Ok(Expr::Column {
                        table: None,
                        name: token.text,
                    })
                }
            }

            // Function-name and date-part keywords double as column
            // names when no call follows.
            TokenKind::Keyword(kw) if kw.is_function_name() || kw.is_aliasable() => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    self.parse_function_call(token.text)
                } else {
                    Ok(Expr::Column {
                        table: None,
                        name: token.text,
                    })
                }
            }

            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    if name.eq_ignore_ascii_case("EXTRACT") {
                        return self.parse_extract_call(name);
                    }
                    return self.parse_function_call(name);
                }
                if self.eat(&TokenKind::Dot) {
                    if self.eat(&TokenKind::Star) {
                        return Ok(Expr::Wildcard { table: Some(name) });
                    }
                    let column = self.expect_column_name()?;
                    return Ok(Expr::Column {
                        table: Some(name),
                        name: column,
                    });
                }
                Ok(Expr::Column { table: None, name })
            }

            _ => Err(self.unexpected("expression")),
        }
    }

    /// Parses `(…)` after a function name, then an optional OVER
    /// window specification.
    fn parse_function_call(&mut self, name: String) -> Result<Expr, SqlError> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        let distinct = self.eat_keyword(Keyword::Distinct);

        let args = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else if self.eat(&TokenKind::Star) {
            vec![Expr::Wildcard { table: None }]
        } else {
            self.parse_expression_list()?
        };
        self.expect(&TokenKind::RightParen, "')'")?;

        self.finish_call(FunctionCall {
            name,
            args,
            distinct,
            extract: false,
        })
    }

    /// Parses `EXTRACT(field FROM source)` as a two-argument call.
    fn parse_extract_call(&mut self, name: String) -> Result<Expr, SqlError> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        let field = match &self.current().kind {
            TokenKind::Keyword(kw) if kw.is_date_part() => {
                let field = self.current().text.clone();
                self.advance();
                field
            }
            TokenKind::Identifier(field) => {
                let field = field.clone();
                self.advance();
                field
            }
            _ => return Err(self.unexpected("date part")),
        };
        self.expect_keyword(Keyword::From)?;
        let source = self.parse_expression(0)?;
        self.expect(&TokenKind::RightParen, "')'")?;

        self.finish_call(FunctionCall {
            name,
            args: vec![
                Expr::Column {
                    table: None,
                    name: field,
                },
                source,
            ],
            distinct: false,
            extract: true,
        })
    }

    /// Wraps a call in a window function when OVER follows.
    fn finish_call(&mut self, function: FunctionCall) -> Result<Expr, SqlError> {
        if self.eat_keyword(Keyword::Over) {
            let over = self.parse_over_clause()?;
            Ok(Expr::WindowFunction { function, over })
        } else {
            Ok(Expr::Function(function))
        }
    }

    /// Parses `CASE [operand] WHEN … THEN … [ELSE …] END`.
    fn parse_case_expression(&mut self) -> Result<Expr, SqlError> {
        self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        if !self.check_keyword(Keyword::When) {
            return Err(self.unexpected("WHEN"));
        }
        let mut when_clauses = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression(0)?;
            when_clauses.push(WhenClause { condition, result });
        }

        let else_clause = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses `INTERVAL <value> [unit]`; the unit defaults to DAY.
    fn parse_interval(&mut self) -> Result<Expr, SqlError> {
        self.expect_keyword(Keyword::Interval)?;
        let value = self.parse_primary()?;
        let unit = self.parse_interval_unit();
        Ok(Expr::Interval {
            value: Box::new(value),
            unit,
        })
    }

    /// Consumes a unit keyword or a unit-spelled identifier; leaves
    /// anything else alone and falls back to the DAY default.
    fn parse_interval_unit(&mut self) -> IntervalUnit {
        let unit = match &self.current().kind {
            TokenKind::Keyword(kw) if kw.is_date_part() => IntervalUnit::parse(kw.as_str()),
            TokenKind::Identifier(name) => IntervalUnit::parse(name),
            _ => None,
        };
        match unit {
            Some(unit) => {
                self.advance();
                unit
            }
            None => IntervalUnit::default(),
        }
    }

    /// Parses `( [PARTITION BY …] [ORDER BY …] [frame] )` after OVER.
    fn parse_over_clause(&mut self) -> Result<OverClause, SqlError> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        let mut over = OverClause::default();

        if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            over.partition_by = self.parse_expression_list()?;
        }
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            over.order_by = self.parse_order_by_list()?;
        }
        if self.check_keyword(Keyword::Rows) || self.check_keyword(Keyword::Range) {
            over.frame = Some(self.parse_frame()?);
        }

        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(over)
    }

    /// Parses `ROWS|RANGE` followed by one bound or `BETWEEN … AND …`.
    fn parse_frame(&mut self) -> Result<Frame, SqlError> {
        let units = if self.eat_keyword(Keyword::Rows) {
            FrameUnits::Rows
        } else {
            self.expect_keyword(Keyword::Range)?;
            FrameUnits::Range
        };

        if self.eat_keyword(Keyword::Between) {
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            let end = self.parse_frame_bound()?;
            Ok(Frame {
                units,
                start,
                end: Some(end),
            })
        } else {
            let start = self.parse_frame_bound()?;
            Ok(Frame {
                units,
                start,
                end: None,
            })
        }
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, SqlError> {
        if self.eat_keyword(Keyword::Unbounded) {
            if self.eat_keyword(Keyword::Preceding) {
                return Ok(FrameBound::UnboundedPreceding);
            }
            if self.eat_keyword(Keyword::Following) {
                return Ok(FrameBound::UnboundedFollowing);
            }
            return Err(self.unexpected("PRECEDING or FOLLOWING"));
        }
        if self.eat_keyword(Keyword::Current) {
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }
        if self.eat_keyword(Keyword::Interval) {
            let value = self.parse_primary()?;
            let unit = self.parse_interval_unit();
            let direction = self.parse_frame_direction()?;
            return Ok(FrameBound::Interval {
                value: Box::new(value),
                unit,
                direction,
            });
        }

        // Numeric offset; parsed below the logical level so the
        // BETWEEN frame's AND is left alone.
        let value = self.parse_expression(ADDITIVE_BP)?;
        let direction = self.parse_frame_direction()?;
        Ok(FrameBound::Offset {
            value: Box::new(value),
            direction,
        })
    }

    fn parse_frame_direction(&mut self) -> Result<FrameDirection, SqlError> {
        if self.eat_keyword(Keyword::Preceding) {
            return Ok(FrameDirection::Preceding);
        }
        if self.eat_keyword(Keyword::Following) {
            return Ok(FrameDirection::Following);
        }
        Err(self.unexpected("PRECEDING or FOLLOWING"))
    }

    // --- Lists ---

    fn parse_expression_list(&mut self) -> Result<Vec<Expr>, SqlError> {
        let mut exprs = Vec::new();
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(exprs)
    }

    fn parse_identifier_list(&mut self) -> Result<Vec<String>, SqlError> {
        let mut idents = Vec::new();
        loop {
            idents.push(self.expect_identifier("identifier")?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(idents)
    }

    /// Requires an identifier or aliasable keyword as a column name.
    fn expect_column_name(&mut self) -> Result<String, SqlError> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(kw) if kw.is_aliasable() => {
                let name = self.current().text.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("column name")),
        }
    }

    // --- Token helpers ---

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Consumes the token if it matches.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the keyword if it matches.
    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), SqlError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), SqlError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String, SqlError> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn expect_integer(&mut self, expected: &str) -> Result<i64, SqlError> {
        match self.current().kind {
            TokenKind::Integer(value) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    /// Builds the diagnostic for a requirement the current token does
    /// not meet: `UnexpectedEnd` at EOF, `UnexpectedToken` otherwise.
    fn unexpected(&self, expected: &str) -> SqlError {
        let token = self.current();
        if token.is_eof() {
            SqlError::unexpected_end(expected, token.location)
        } else {
            let actual = if token.text.is_empty() {
                token.kind.describe()
            } else {
                token.text.clone()
            };
            SqlError::unexpected_token(expected, actual, token.location)
        }
    }
}

/// Attaches a WITH clause to the first SELECT of a query.
fn attach_with(query: &mut Query, with: WithClause) {
    match query {
        Query::Select(select) => select.with = Some(with),
        Query::Union(union) => attach_with(&mut union.left, with),
    }
}
