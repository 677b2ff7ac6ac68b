//! SQL tokenizer implementation.

use crate::error::SqlError;

use super::{Keyword, Location, Span, Token, TokenKind};

/// Options controlling trivia emission.
///
/// The parser always works on a filtered stream; trivia tokens exist
/// for callers that want the raw lexical structure back.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexOptions {
    /// Emit `Whitespace` tokens and a `Newline` token per `\n`.
    pub include_whitespace: bool,
    /// Emit `Comment` tokens with trimmed content.
    pub include_comments: bool,
}

/// A lexer that tokenizes SQL input.
///
/// Positions are tracked as 1-based line/column pairs alongside byte
/// spans. The lexer never suspends: it is a pure function from input
/// and options to a token list or a single diagnostic.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column.
    column: u32,
    /// Location of the start of the current token.
    token_start: Location,
    options: LexOptions,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer with default (trivia-skipping) options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, LexOptions::default())
    }

    /// Creates a new lexer with explicit trivia options.
    #[must_use]
    pub fn with_options(input: &'a str, options: LexOptions) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            token_start: Location::default(),
            options,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Marks the start of a new token at the current position.
    fn begin_token(&mut self) {
        self.start = self.pos;
        self.token_start = Location::new(self.line, self.column);
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        let text = String::from(&self.input[self.start..self.pos]);
        self.make_token_with_text(kind, text)
    }

    /// Creates a token with explicit surface text.
    fn make_token_with_text(&self, kind: TokenKind, text: String) -> Token {
        Token::new(
            kind,
            text,
            self.token_start,
            Span::new(self.start, self.pos),
        )
    }

    /// Consumes whitespace or a comment if one starts here.
    ///
    /// Returns `Ok(Some(token))` when trivia emission is enabled for
    /// the consumed form, `Ok(None)` when something was skipped
    /// silently, and `Err` for an unterminated block comment. When
    /// nothing trivial starts here, returns `Ok(None)` and consumes
    /// nothing; callers detect progress via `pos`.
    fn consume_trivia(&mut self) -> Result<Option<Token>, SqlError> {
        self.begin_token();

        match self.peek() {
            Some('\n') => {
                self.advance();
                if self.options.include_whitespace {
                    return Ok(Some(self.make_token(TokenKind::Newline)));
                }
            }
            Some(c) if c.is_whitespace() => {
                while self.peek().is_some_and(|c| c.is_whitespace() && c != '\n') {
                    self.advance();
                }
                if self.options.include_whitespace {
                    return Ok(Some(self.make_token(TokenKind::Whitespace)));
                }
            }
            Some('-') if self.peek_next() == Some('-') => {
                self.advance();
                self.advance();
                return Ok(self.finish_line_comment());
            }
            Some('#') => {
                self.advance();
                return Ok(self.finish_line_comment());
            }
            Some('/') if self.peek_next() == Some('*') => {
                let opening = self.token_start;
                self.advance();
                self.advance();
                let content_start = self.pos;
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            let content = &self.input[content_start..self.pos - 1];
                            let trimmed = String::from(content.trim());
                            self.advance();
                            if self.options.include_comments {
                                return Ok(Some(
                                    self.make_token_with_text(TokenKind::Comment, trimmed),
                                ));
                            }
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Err(SqlError::lexical(
                                "Unterminated multi-line comment",
                                opening,
                            ));
                        }
                    }
                }
            }
            _ => {}
        }

        Ok(None)
    }

    /// Consumes the rest of a single-line comment.
    fn finish_line_comment(&mut self) -> Option<Token> {
        let content_start = self.pos;
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        if self.options.include_comments {
            let content = String::from(self.input[content_start..self.pos].trim());
            Some(self.make_token_with_text(TokenKind::Comment, content))
        } else {
            None
        }
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match text.to_ascii_uppercase().as_str() {
            "TRUE" => self.make_token(TokenKind::Boolean(true)),
            "FALSE" => self.make_token(TokenKind::Boolean(false)),
            "NULL" => self.make_token(TokenKind::Null),
            upper => match Keyword::from_str(upper) {
                Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
                None => self.make_token(TokenKind::Identifier(String::from(text))),
            },
        }
    }

    /// Scans a quoted run with backslash escapes, returning the
    /// unescaped content. `None` means the input ended first.
    fn scan_delimited(&mut self, quote: char) -> Option<String> {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => return Some(value),
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(escaped) => value.push(escaped),
                    None => return None,
                },
                Some(c) => value.push(c),
                None => return None,
            }
        }
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> Result<Token, SqlError> {
        let opening = self.token_start;
        match self.scan_delimited('\'') {
            Some(value) => Ok(self.make_token_with_text(TokenKind::String(value.clone()), value)),
            None => Err(SqlError::unterminated_string(opening)),
        }
    }

    /// Scans a quoted identifier (double-quote or backtick delimited).
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, SqlError> {
        let opening = self.token_start;
        match self.scan_delimited(quote) {
            Some(value) => {
                Ok(self.make_token_with_text(TokenKind::Identifier(value.clone()), value))
            }
            None => Err(SqlError::lexical("Unterminated quoted identifier", opening)),
        }
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Result<Token, SqlError> {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // A dot joins the number only when a digit follows it.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(SqlError::lexical(
                    "Malformed exponent in numeric literal",
                    self.token_start,
                ));
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[self.start..self.pos];
        if is_float {
            match text.parse::<f64>() {
                Ok(value) => Ok(self.make_token(TokenKind::Float(value))),
                Err(_) => Err(SqlError::lexical(
                    format!("Invalid numeric literal: {text}"),
                    self.token_start,
                )),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Ok(self.make_token(TokenKind::Integer(value))),
                Err(_) => Err(SqlError::lexical(
                    format!("Invalid numeric literal: {text}"),
                    self.token_start,
                )),
            }
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a diagnostic for unterminated strings, quoted
    /// identifiers, or block comments, malformed numbers, and
    /// characters outside the SQL alphabet.
    pub fn next_token(&mut self) -> Result<Token, SqlError> {
        // Trivia first; emit it when requested.
        loop {
            let before = self.pos;
            if let Some(trivia) = self.consume_trivia()? {
                return Ok(trivia);
            }
            if self.pos == before {
                break;
            }
        }

        self.begin_token();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(self.make_token(TokenKind::Eof)),
        };

        match c {
            '\'' => self.scan_string(),
            '"' | '`' => self.scan_quoted_identifier(c),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_identifier()),
            _ => {
                self.advance();
                match c {
                    '(' => Ok(self.make_token(TokenKind::LeftParen)),
                    ')' => Ok(self.make_token(TokenKind::RightParen)),
                    '[' => Ok(self.make_token(TokenKind::LeftBracket)),
                    ']' => Ok(self.make_token(TokenKind::RightBracket)),
                    ',' => Ok(self.make_token(TokenKind::Comma)),
                    ';' => Ok(self.make_token(TokenKind::Semicolon)),
                    '.' => Ok(self.make_token(TokenKind::Dot)),
                    '+' => Ok(self.make_token(TokenKind::Plus)),
                    '-' => Ok(self.make_token(TokenKind::Minus)),
                    '*' => Ok(self.make_token(TokenKind::Star)),
                    '/' => Ok(self.make_token(TokenKind::Slash)),
                    '%' => Ok(self.make_token(TokenKind::Percent)),
                    '=' => Ok(self.make_token(TokenKind::Eq)),
                    '<' => {
                        if self.peek() == Some('=') {
                            self.advance();
                            Ok(self.make_token(TokenKind::LtEq))
                        } else if self.peek() == Some('>') {
                            self.advance();
                            Ok(self.make_token(TokenKind::NotEq))
                        } else {
                            Ok(self.make_token(TokenKind::Lt))
                        }
                    }
                    '>' => {
                        if self.peek() == Some('=') {
                            self.advance();
                            Ok(self.make_token(TokenKind::GtEq))
                        } else {
                            Ok(self.make_token(TokenKind::Gt))
                        }
                    }
                    '!' => {
                        if self.peek() == Some('=') {
                            self.advance();
                            Ok(self.make_token(TokenKind::NotEq))
                        } else {
                            Err(SqlError::lexical(
                                "Unexpected character: !",
                                self.token_start,
                            ))
                        }
                    }
                    '|' => {
                        if self.peek() == Some('|') {
                            self.advance();
                            Ok(self.make_token(TokenKind::Concat))
                        } else {
                            Err(SqlError::lexical(
                                "Unexpected character: |",
                                self.token_start,
                            ))
                        }
                    }
                    other => Err(SqlError::lexical(
                        format!("Unexpected character: {other}"),
                        self.token_start,
                    )),
                }
            }
        }
    }

    /// Tokenizes the entire input.
    ///
    /// The returned list is non-empty and ends in exactly one EOF
    /// token.
    ///
    /// # Errors
    ///
    /// Returns the first lexical diagnostic encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, SqlError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqlErrorKind;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().expect("lexing should succeed")
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(input: &str) -> SqlError {
        Lexer::new(input)
            .tokenize()
            .expect_err("lexing should fail")
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].location, Location::new(1, 1));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("select FROM wHeRe"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_boolean_and_null_literals() {
        assert_eq!(
            token_kinds("TRUE false NULL"),
            vec![
                TokenKind::Boolean(true),
                TokenKind::Boolean(false),
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_column_tracking() {
        let tokens = tokenize("SELECT\n  id");
        assert_eq!(tokens[0].location, Location::new(1, 1));
        assert_eq!(tokens[1].location, Location::new(2, 3));
        assert_eq!(tokens[1].span, Span::new(9, 11));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r"'a\nb\t\'c\q'");
        assert_eq!(
            tokens[0].kind,
            TokenKind::String(String::from("a\nb\t'cq"))
        );
    }

    #[test]
    fn test_unterminated_string_points_at_opening_quote() {
        let err = lex_err("SELECT 'abc");
        assert_eq!(err.kind, SqlErrorKind::UnterminatedString);
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds("\"column name\" `another`"),
            vec![
                TokenKind::Identifier(String::from("column name")),
                TokenKind::Identifier(String::from("another")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.14 1e10 2.5e-3"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(3.14),
                TokenKind::Float(1e10),
                TokenKind::Float(2.5e-3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dot_not_part_of_number_without_digit() {
        assert_eq!(
            token_kinds("1.e 42.x"),
            vec![
                TokenKind::Integer(1),
                TokenKind::Dot,
                TokenKind::Identifier(String::from("e")),
                TokenKind::Integer(42),
                TokenKind::Dot,
                TokenKind::Identifier(String::from("x")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_leading_dot_is_punctuation() {
        assert_eq!(
            token_kinds(".5"),
            vec![TokenKind::Dot, TokenKind::Integer(5), TokenKind::Eof]
        );
    }

    #[test]
    fn test_malformed_exponent() {
        let err = lex_err("SELECT 1e+");
        assert_eq!(err.kind, SqlErrorKind::Lexical);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("= != <> < <= > >= + - * / % ||"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Concat,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bare_bang_is_lexical_error() {
        let err = lex_err("a ! b");
        assert_eq!(err.kind, SqlErrorKind::Lexical);
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_unexpected_character_position() {
        let err = lex_err("SELECT @");
        assert_eq!(err.kind, SqlErrorKind::Lexical);
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn test_comments_skipped_by_default() {
        assert_eq!(
            token_kinds("SELECT -- trailing\n# hash line\n/* block */ FROM"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_emitted_on_request() {
        let options = LexOptions {
            include_comments: true,
            ..LexOptions::default()
        };
        let tokens = Lexer::with_options("SELECT -- note \n1", options)
            .tokenize()
            .unwrap();
        let comment = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Comment)
            .expect("comment token");
        assert_eq!(comment.text, "note");
    }

    #[test]
    fn test_whitespace_emitted_on_request() {
        let options = LexOptions {
            include_whitespace: true,
            ..LexOptions::default()
        };
        let kinds: Vec<TokenKind> = Lexer::with_options("a \nb", options)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier(String::from("a")),
                TokenKind::Whitespace,
                TokenKind::Newline,
                TokenKind::Identifier(String::from("b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex_err("SELECT /* never closed");
        assert_eq!(err.kind, SqlErrorKind::Lexical);
        assert_eq!((err.line, err.column), (1, 8));
    }

    #[test]
    fn test_spans_non_decreasing() {
        let tokens = tokenize("SELECT id, name FROM users WHERE age > 18");
        for pair in tokens.windows(2) {
            assert!(pair[0].span.start <= pair[1].span.start);
        }
    }
}
