//! Terminal matchers for the MiniQuery grammar.
//!
//! The grammar is scannerless: the parser drives a [`Lexer`] cursor over
//! the raw text and asks it to match one terminal at a time. Every matcher
//! either consumes input and succeeds, or leaves the cursor where it was and
//! fails. Failures are recorded so a syntax error can point at the furthest
//! offset any alternative reached.

use std::fmt;

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Translates a byte offset in `input` into a line and column.
    ///
    /// `\n`, `\r` and `\r\n` each end one line.
    pub fn locate(input: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        let mut chars = input[..offset.min(input.len())].chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    line += 1;
                    column = 1;
                }
                '\n' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }

        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Shape of a numeric literal matched by [`Lexer::read_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Float,
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    rules: Vec<&'static str>,
    furthest: Option<usize>,
    furthest_rule: &'static str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            rules: Vec::new(),
            furthest: None,
            furthest_rule: "Grammar",
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor back to a previously saved position.
    pub fn reset(&mut self, position: usize) {
        self.position = position;
    }

    pub fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    // Failure tracking

    /// Marks entry into a named grammar rule.
    pub fn enter(&mut self, rule: &'static str) {
        self.rules.push(rule);
    }

    pub fn leave(&mut self) {
        self.rules.pop();
    }

    /// Records a failed match at the cursor and returns `false`.
    ///
    /// The first failure at a new furthest offset wins, together with the
    /// innermost rule active at that moment.
    pub fn fail(&mut self) -> bool {
        if self.furthest.is_none_or(|furthest| self.position > furthest) {
            self.furthest = Some(self.position);
            self.furthest_rule = self.rules.last().copied().unwrap_or("Grammar");
        }
        false
    }

    /// The furthest offset any failed match reached, and the rule active there.
    pub fn furthest(&self) -> (usize, &'static str) {
        (self.furthest.unwrap_or(self.position), self.furthest_rule)
    }

    /// A short excerpt of the input starting at `offset`, for error messages.
    pub fn snippet(&self, offset: usize) -> String {
        let rest = self.input.get(offset..).unwrap_or("");
        let token: String = rest
            .chars()
            .take_while(|c| !c.is_whitespace())
            .take(16)
            .collect();
        if token.is_empty() && rest.is_empty() {
            "end of input".to_string()
        } else if token.is_empty() {
            rest.chars().take(1).collect()
        } else {
            token
        }
    }

    // Terminals

    /// Matches `text` exactly.
    pub fn literal(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.position += text.len();
            true
        } else {
            self.fail()
        }
    }

    /// Matches a word ignoring ASCII case. The next character must not
    /// continue an identifier.
    pub fn keyword(&mut self, word: &str) -> bool {
        let rest = self.rest();
        let matched = rest
            .get(..word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word));
        self.finish_word(matched, word.len())
    }

    /// Matches a word with its exact case. The next character must not
    /// continue an identifier.
    pub fn exact_keyword(&mut self, word: &str) -> bool {
        let matched = self.rest().starts_with(word);
        self.finish_word(matched, word.len())
    }

    fn finish_word(&mut self, matched: bool, len: usize) -> bool {
        if !matched {
            return self.fail();
        }
        let bounded = !self.rest()[len..].starts_with(is_identifier_char);
        if !bounded {
            return self.fail();
        }
        self.position += len;
        true
    }

    /// `_`: any run of whitespace and comments, possibly empty.
    pub fn skip_whitespace(&mut self) {
        while self.skip_space_or_comment() {}
    }

    /// `__`: a non-empty run of whitespace and comments.
    pub fn require_whitespace(&mut self) -> bool {
        if !self.skip_space_or_comment() {
            return self.fail();
        }
        self.skip_whitespace();
        true
    }

    fn skip_space_or_comment(&mut self) -> bool {
        match self.current_char() {
            Some(' ' | '\t' | '\n') => {
                self.advance();
                true
            }
            Some('\r') => {
                self.advance();
                if self.current_char() == Some('\n') {
                    self.advance();
                }
                true
            }
            Some('-') if self.peek_char(1) == Some('-') => {
                self.skip_comment();
                true
            }
            Some('/') if self.peek_char(1) == Some('/') => {
                self.skip_comment();
                true
            }
            _ => false,
        }
    }

    /// Consumes a comment through the end of its line, or end of input.
    fn skip_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
        }
    }

    /// `[A-Za-z][A-Za-z0-9_]*`, except the bare word `not` in any case.
    pub fn read_identifier(&mut self) -> Option<&'a str> {
        let start = self.position;

        match self.current_char() {
            Some(ch) if ch.is_ascii_alphabetic() => self.advance(),
            _ => {
                self.fail();
                return None;
            }
        }
        while self.current_char().is_some_and(is_identifier_char) {
            self.advance();
        }

        let ident = &self.input[start..self.position];
        if ident.eq_ignore_ascii_case("not") {
            self.position = start;
            self.fail();
            return None;
        }
        Some(ident)
    }

    /// A single- or double-quoted string. Returns the content between the
    /// quotes verbatim; there are no escape sequences.
    pub fn read_string(&mut self) -> Option<&'a str> {
        let start = self.position;
        let quote = match self.current_char() {
            Some(q @ ('\'' | '"')) => q,
            _ => {
                self.fail();
                return None;
            }
        };
        self.advance();

        let content_start = self.position;
        match self.rest().find(quote) {
            Some(len) => {
                self.position += len;
                let content = &self.input[content_start..self.position];
                self.advance();
                Some(content)
            }
            None => {
                // Unterminated: report the failure at end of input.
                self.position = self.input.len();
                self.fail();
                self.position = start;
                None
            }
        }
    }

    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?`
    ///
    /// A fraction is only taken when a digit follows the dot.
    pub fn read_number(&mut self) -> Option<(&'a str, NumberKind)> {
        let start = self.position;

        if self.current_char() == Some('-') {
            self.advance();
        }

        match self.current_char() {
            Some('0') => self.advance(),
            Some('1'..='9') => {
                while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
            _ => {
                self.fail();
                self.position = start;
                return None;
            }
        }

        let mut kind = NumberKind::Integer;
        if self.current_char() == Some('.') && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
        {
            kind = NumberKind::Float;
            self.advance();
            while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        Some((&self.input[start..self.position], kind))
    }

    /// Matches end of input.
    pub fn eof(&mut self) -> bool {
        if self.is_eof() { true } else { self.fail() }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("AND or Between");
    assert!(lexer.keyword("and"));
    lexer.skip_whitespace();
    assert!(lexer.keyword("or"));
    lexer.skip_whitespace();
    assert!(lexer.keyword("between"));
    assert!(lexer.eof());
}

#[test]
fn test_keyword_boundary() {
    let mut lexer = Lexer::new("nullable");
    assert!(!lexer.exact_keyword("null"));
    assert_eq!(lexer.position(), 0);
    assert_eq!(lexer.read_identifier(), Some("nullable"));
}

#[test]
fn test_comments_are_whitespace() {
    let mut lexer = Lexer::new("  -- first\n// second\r\n\tx");
    lexer.skip_whitespace();
    assert_eq!(lexer.read_identifier(), Some("x"));
}

#[test]
fn test_position_locate() {
    let input = "a = 1\r\nand b = 2\nor c";
    assert_eq!(Position::locate(input, 0), Position { line: 1, column: 1 });
    assert_eq!(Position::locate(input, 7), Position { line: 2, column: 1 });
    assert_eq!(Position::locate(input, 11), Position { line: 2, column: 5 });
    assert_eq!(Position::locate(input, input.len()), Position { line: 3, column: 5 });
}
