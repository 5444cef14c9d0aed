//! Ordered-choice, backtracking parser.
//!
//! Each grammar rule is a method returning `true` when it matched. Choices
//! try their alternatives in order and commit to the first that matches;
//! a failed alternative restores both the input position and the tree
//! builder to where they were before it started.
//!
//! ```text
//! Grammar             <- _ Expression _ EndOfFile
//! Expression          <- LogicExpression
//! LogicExpression     <- NotExpression (Logic NotExpression)*
//! NotExpression       <- CompareExpression / _ 'not' _ CompareExpression
//! CompareExpression   <- CompareInExpression (Compare CompareInExpression)*
//! CompareInExpression <- PredicateExpression (_ ('in' / 'not' __ 'in') _ Array)?
//! PredicateExpression <- BetweenExpression Match?
//! BetweenExpression   <- PrimaryExpression (_ ('not' __)? 'between' _
//!                          (Value _ 'and' _ Value / '[' _ Value _ ',' _ Value _ ']'))?
//! PrimaryExpression   <- '(' _ Expression _ ')' / Value / Identifier ArgumentList / Reference
//! ArgumentList        <- '(' _ (Argument (_ ',' _ Argument)* _ ','?)? _ ')'
//! Reference           <- Identifier ('.' Identifier)* ('->' Identifier)*
//! Value               <- Literal / Array
//! Array               <- '[' _ (Literal (_ ',' _ Literal)* _ ','?)? _ ']' / same with '(' ')'
//! Literal             <- Null / Boolean / String / Number
//! ```

use crate::ast::{Accessor, Node};
use crate::builder::{Checkpoint, TreeBuilder};
use crate::error::{ParseError, SemanticError};
use crate::lexer::{Lexer, NumberKind, Position};

// Alternatives are listed in the order they are tried.

const COMPARE_SYMBOLS: &[&str] = &[">=", "<=", "==", "<>", "!=", "<", "=", ">"];

const COMPARE_WORDS: &[&[&str]] = &[
    &["gte"],
    &["gt"],
    &["lte"],
    &["lt"],
    &["neq"],
    &["eq"],
    &["like"],
    &["not", "like"],
];

const LOGIC_WORDS: &[&[&str]] = &[&["and"], &["or"]];

const LOGIC_SYMBOLS: &[&str] = &["&&", "||"];

const IN_WORDS: &[&[&str]] = &[&["in"], &["not", "in"]];

const BETWEEN_WORDS: &[&[&str]] = &[&["not", "between"], &["between"]];

const MATCH_WORDS: &[&[&str]] = &[
    &["isnull"],
    &["notnull"],
    &["is", "not", "null"],
    &["is", "not", "true"],
    &["is", "not", "false"],
    &["is", "null"],
    &["is", "true"],
    &["is", "false"],
    &["not", "null"],
];

const BOOLEANS: &[&str] = &["true", "TRUE", "false", "FALSE"];

/// Deepest accepted nesting of parentheses and argument lists.
///
/// Each level costs a dozen rule frames on the call stack, so input nested
/// past this fails with [`ParseError::TooDeep`] instead.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy)]
struct State {
    position: usize,
    builder: Checkpoint,
}

/// Parses one query.
///
/// # Examples
///
/// ```
/// use miniquery::{Node, Parser};
///
/// let mut parser = Parser::new("age between 10 and 20");
/// let root = parser.parse().unwrap();
/// assert!(matches!(root, Node::Between { .. }));
/// ```
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    builder: TreeBuilder,
    depth: usize,
    /// Offset where [`MAX_DEPTH`] was exceeded. Once set, every rule fails.
    too_deep: Option<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            builder: TreeBuilder::new(),
            depth: 0,
            too_deep: None,
        }
    }

    /// Parses the whole input into a tree.
    ///
    /// The input must be consumed completely; trailing text is a syntax
    /// error. When the text matches but building the tree records semantic
    /// errors, the first one is returned and all of them remain available
    /// through [`Parser::semantic_errors`].
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let input = self.lexer.input();
        self.lexer = Lexer::new(input);
        self.builder = TreeBuilder::new();
        self.depth = 0;
        self.too_deep = None;

        log::debug!("parsing {:?}", input);

        let matched = self.grammar();

        if let Some(offset) = self.too_deep {
            let error = ParseError::TooDeep {
                limit: MAX_DEPTH,
                offset,
                position: Position::locate(input, offset),
            };
            log::debug!("{}", error);
            return Err(error);
        }

        if !matched {
            let (offset, rule) = self.lexer.furthest();
            let error = ParseError::Syntax {
                offset,
                position: Position::locate(input, offset),
                rule,
                near: self.lexer.snippet(offset),
            };
            log::debug!("{}", error);
            return Err(error);
        }

        let root = self.builder.finish()?;
        log::debug!("parsed {} node", root.kind());
        Ok(root)
    }

    /// Semantic errors recorded by the last [`Parser::parse`] call.
    pub fn semantic_errors(&self) -> &[SemanticError] {
        self.builder.errors()
    }

    // Engine

    fn save(&self) -> State {
        State {
            position: self.lexer.position(),
            builder: self.builder.checkpoint(),
        }
    }

    fn restore(&mut self, state: State) {
        self.lexer.reset(state.position);
        self.builder.rewind(state.builder);
    }

    /// Runs a named rule, restoring all state if it fails.
    fn rule(&mut self, name: &'static str, body: impl FnOnce(&mut Self) -> bool) -> bool {
        if self.too_deep.is_some() {
            return false;
        }
        let start = self.save();
        self.lexer.enter(name);
        let matched = body(self);
        self.lexer.leave();
        if !matched {
            self.restore(start);
        }
        matched
    }

    /// Tries one alternative, restoring all state if it fails.
    fn attempt(&mut self, body: impl FnOnce(&mut Self) -> bool) -> bool {
        let start = self.save();
        let matched = body(self);
        if !matched {
            self.restore(start);
        }
        matched
    }

    /// Runs `body` one nesting level deeper.
    fn nested(&mut self, body: impl FnOnce(&mut Self) -> bool) -> bool {
        if self.depth == MAX_DEPTH {
            self.too_deep.get_or_insert(self.lexer.position());
            return false;
        }
        self.depth += 1;
        let matched = body(self);
        self.depth -= 1;
        matched
    }

    /// `e?`
    fn optional(&mut self, body: impl FnOnce(&mut Self) -> bool) -> bool {
        self.attempt(body);
        true
    }

    /// `e*`
    fn repeat(&mut self, mut body: impl FnMut(&mut Self) -> bool) {
        loop {
            let before = self.lexer.position();
            if !self.attempt(&mut body) || self.lexer.position() == before {
                break;
            }
        }
    }

    /// `(e (_ ',' _ e)* _ ','?)?`
    fn comma_list(&mut self, element: fn(&mut Self) -> bool) {
        self.optional(|p| {
            if !element(p) {
                return false;
            }
            p.repeat(|p| p.ws() && p.lexer.literal(",") && p.ws() && element(p));
            p.ws();
            p.optional(|p| p.lexer.literal(","));
            true
        });
    }

    /// `_`
    fn ws(&mut self) -> bool {
        self.lexer.skip_whitespace();
        true
    }

    fn reduce(&mut self, action: fn(&mut TreeBuilder)) -> bool {
        action(&mut self.builder);
        true
    }

    /// Matches a sequence of keywords separated by whitespace and returns
    /// them joined by single spaces.
    fn phrase(&mut self, words: &[&str]) -> Option<String> {
        let start = self.save();
        let mut matched = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            if i > 0 && !self.lexer.require_whitespace() {
                self.restore(start);
                return None;
            }
            let from = self.lexer.position();
            if !self.lexer.keyword(word) {
                self.restore(start);
                return None;
            }
            matched.push(&self.lexer.input()[from..self.lexer.position()]);
        }

        Some(matched.join(" "))
    }

    fn first_phrase(&mut self, phrases: &[&[&str]]) -> Option<String> {
        phrases.iter().find_map(|words| self.phrase(words))
    }

    fn first_symbol(&mut self, symbols: &[&'static str]) -> Option<&'static str> {
        symbols.iter().copied().find(|s| self.lexer.literal(s))
    }

    // Grammar

    fn grammar(&mut self) -> bool {
        self.rule("Grammar", |p| {
            p.ws() && p.expression() && p.ws() && p.lexer.eof()
        })
    }

    fn expression(&mut self) -> bool {
        self.rule("Expression", Self::logic_expression)
    }

    fn logic_expression(&mut self) -> bool {
        self.rule("LogicExpression", |p| {
            if !p.not_expression() {
                return false;
            }
            p.repeat(|p| p.logic() && p.not_expression() && p.reduce(TreeBuilder::pop_logic));
            true
        })
    }

    fn not_expression(&mut self) -> bool {
        self.rule("NotExpression", |p| {
            p.compare_expression()
                || p.attempt(|p| {
                    p.ws()
                        && p.lexer.keyword("not")
                        && p.ws()
                        && p.compare_expression()
                        && p.reduce(TreeBuilder::pop_not)
                })
        })
    }

    fn compare_expression(&mut self) -> bool {
        self.rule("CompareExpression", |p| {
            if !p.compare_in_expression() {
                return false;
            }
            p.repeat(|p| {
                p.compare() && p.compare_in_expression() && p.reduce(TreeBuilder::pop_compare)
            });
            true
        })
    }

    fn compare_in_expression(&mut self) -> bool {
        self.rule("CompareInExpression", |p| {
            if !p.predicate_expression() {
                return false;
            }
            p.optional(|p| {
                p.ws();
                let Some(op) = p.first_phrase(IN_WORDS) else {
                    return false;
                };
                p.builder.add_operation(&op);
                p.ws() && p.array() && p.reduce(TreeBuilder::pop_compare)
            });
            true
        })
    }

    fn predicate_expression(&mut self) -> bool {
        self.rule("PredicateExpression", |p| {
            if !p.between_expression() {
                return false;
            }
            p.optional(|p| p.match_suffix() && p.reduce(TreeBuilder::pop_predicate));
            true
        })
    }

    fn between_expression(&mut self) -> bool {
        self.rule("BetweenExpression", |p| {
            if !p.primary_expression() {
                return false;
            }
            p.optional(|p| {
                p.ws();
                let Some(op) = p.first_phrase(BETWEEN_WORDS) else {
                    return false;
                };
                p.builder.add_operation(&op);
                p.ws();

                let bounds = p.attempt(|p| {
                    p.value() && p.ws() && p.lexer.keyword("and") && p.ws() && p.value()
                }) || p.attempt(|p| {
                    p.lexer.literal("[")
                        && p.ws()
                        && p.value()
                        && p.ws()
                        && p.lexer.literal(",")
                        && p.ws()
                        && p.value()
                        && p.ws()
                        && p.lexer.literal("]")
                });
                bounds && p.reduce(TreeBuilder::pop_between)
            });
            true
        })
    }

    fn primary_expression(&mut self) -> bool {
        self.rule("PrimaryExpression", |p| {
            p.attempt(|p| {
                p.lexer.literal("(")
                    && p.ws()
                    && p.nested(Self::expression)
                    && p.ws()
                    && p.lexer.literal(")")
                    && p.reduce(TreeBuilder::pop_parentheses)
            }) || p.value()
                || p.attempt(|p| {
                    p.identifier() && p.argument_list() && p.reduce(TreeBuilder::pop_function)
                })
                || p.reference()
        })
    }

    fn argument_list(&mut self) -> bool {
        self.rule("ArgumentList", |p| {
            if !p.lexer.literal("(") {
                return false;
            }
            p.ws();
            p.builder.mark();
            p.nested(|p| {
                p.comma_list(Self::argument);
                true
            }) && p.ws()
                && p.lexer.literal(")")
                && p.reduce(TreeBuilder::pop_arguments)
        })
    }

    fn argument(&mut self) -> bool {
        self.rule("Argument", Self::expression)
    }

    fn reference(&mut self) -> bool {
        self.rule("Reference", |p| {
            p.builder.mark();
            if !p.identifier() {
                return false;
            }

            let mut accessors = Vec::new();
            while p.attempt(|p| p.lexer.literal(".") && p.identifier()) {
                accessors.push(Accessor::Dot);
            }
            while p.attempt(|p| p.lexer.literal("->") && p.identifier()) {
                accessors.push(Accessor::Arrow);
            }

            p.builder.pop_reference(&accessors);
            true
        })
    }

    fn identifier(&mut self) -> bool {
        self.rule("Identifier", |p| match p.lexer.read_identifier() {
            Some(name) => {
                p.builder.add_name(name);
                true
            }
            None => false,
        })
    }

    fn compare(&mut self) -> bool {
        self.rule("Compare", |p| {
            p.ws();
            let op = match p.first_symbol(COMPARE_SYMBOLS) {
                Some(symbol) => symbol.to_string(),
                None => match p.first_phrase(COMPARE_WORDS) {
                    Some(words) => words,
                    None => return false,
                },
            };
            p.builder.add_operation(&op);
            p.ws()
        })
    }

    fn logic(&mut self) -> bool {
        self.rule("Logic", |p| {
            p.ws();
            let op = match p.first_phrase(LOGIC_WORDS) {
                Some(words) => words,
                None => match p.first_symbol(LOGIC_SYMBOLS) {
                    Some(symbol) => symbol.to_string(),
                    None => return false,
                },
            };
            p.builder.add_operation(&op);
            p.ws()
        })
    }

    /// Postfix `is null` style suffix. Needs whitespace before it.
    fn match_suffix(&mut self) -> bool {
        self.rule("Match", |p| {
            if !p.lexer.require_whitespace() {
                return false;
            }
            let Some(op) = p.first_phrase(MATCH_WORDS) else {
                return false;
            };
            p.builder.add_operation(&op);
            p.ws()
        })
    }

    fn value(&mut self) -> bool {
        self.rule("Value", |p| p.literal() || p.array())
    }

    fn array(&mut self) -> bool {
        self.rule("Array", |p| p.bracketed("[", "]") || p.bracketed("(", ")"))
    }

    fn bracketed(&mut self, open: &str, close: &str) -> bool {
        self.attempt(|p| {
            if !p.lexer.literal(open) {
                return false;
            }
            p.builder.mark();
            p.ws();
            p.comma_list(Self::literal);
            p.ws() && p.lexer.literal(close) && p.reduce(TreeBuilder::pop_array)
        })
    }

    fn literal(&mut self) -> bool {
        self.rule("Literal", |p| p.null() || p.boolean() || p.string() || p.number())
    }

    fn null(&mut self) -> bool {
        if self.lexer.exact_keyword("null") || self.lexer.exact_keyword("NULL") {
            self.builder.add_null();
            true
        } else {
            false
        }
    }

    fn boolean(&mut self) -> bool {
        match BOOLEANS.iter().copied().find(|b| self.lexer.exact_keyword(b)) {
            Some(text) => {
                self.builder.add_boolean(text);
                true
            }
            None => false,
        }
    }

    fn string(&mut self) -> bool {
        match self.lexer.read_string() {
            Some(content) => {
                self.builder.add_string(content);
                true
            }
            None => false,
        }
    }

    fn number(&mut self) -> bool {
        match self.lexer.read_number() {
            Some((text, NumberKind::Float)) => {
                self.builder.add_float(text);
                true
            }
            Some((text, NumberKind::Integer)) => {
                self.builder.add_integer(text);
                true
            }
            None => false,
        }
    }
}
