use std::collections::HashMap;
use lazy_static::lazy_static;
use log::{debug, trace};
use crate::interpreter::ast::{Block, Expr, InfixOperator, PrefixOperator, Program, Stmt};
use crate::interpreter::error::ParseError;
use crate::interpreter::lexer::{Lexer, Token, TokenType};


#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < >
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // reserved for call expressions
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PrefixRule {
    Identifier,
    Integer,
    Boolean,
    Operator,
    Grouped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InfixRule {
    Operator,
}

lazy_static! {
    static ref PRECEDENCES: HashMap<TokenType, Precedence> = HashMap::from([
        (TokenType::Equal, Precedence::Equals),
        (TokenType::NotEqual, Precedence::Equals),
        (TokenType::Less, Precedence::LessGreater),
        (TokenType::Greater, Precedence::LessGreater),
        (TokenType::Plus, Precedence::Sum),
        (TokenType::Minus, Precedence::Sum),
        (TokenType::Multiply, Precedence::Product),
        (TokenType::Divide, Precedence::Product),
        (TokenType::ParenthesisLeft, Precedence::Call),
    ]);

    static ref PREFIX_RULES: HashMap<TokenType, PrefixRule> = HashMap::from([
        (TokenType::Identifier, PrefixRule::Identifier),
        (TokenType::Int, PrefixRule::Integer),
        (TokenType::True, PrefixRule::Boolean),
        (TokenType::False, PrefixRule::Boolean),
        (TokenType::Not, PrefixRule::Operator),
        (TokenType::Minus, PrefixRule::Operator),
        (TokenType::ParenthesisLeft, PrefixRule::Grouped),
    ]);

    // `(` has a precedence but no infix rule until call expressions exist
    static ref INFIX_RULES: HashMap<TokenType, InfixRule> = HashMap::from([
        (TokenType::Plus, InfixRule::Operator),
        (TokenType::Minus, InfixRule::Operator),
        (TokenType::Multiply, InfixRule::Operator),
        (TokenType::Divide, InfixRule::Operator),
        (TokenType::Less, InfixRule::Operator),
        (TokenType::Greater, InfixRule::Operator),
        (TokenType::Equal, InfixRule::Operator),
        (TokenType::NotEqual, InfixRule::Operator),
    ]);
}

fn precedence_of(token_type: TokenType) -> Precedence {
    PRECEDENCES.get(&token_type).copied().unwrap_or(Precedence::Lowest)
}

/// Pratt parser over a two-token window (`current` and `next`).
///
/// Every statement parser starts with `current` on the first token of the statement and leaves it
/// on the statement's last token.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token, next: Token,

    errors: Vec<ParseError>,
}

impl<'source> Parser<'source> {
    pub fn new(lexer: Lexer<'source>) -> Parser<'source> {
        let mut parser = Parser {
            lexer,
            current: Token::empty(), next: Token::empty(),
            errors: Vec::new(),
        };

        parser.consume();
        parser.consume();
        parser
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    // Statement parsing

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.is_eof() {
            if let Some(stmt) = self.parse_statement() {
                trace!("Parsed statement: {}", stmt);
                statements.push(stmt);
            }

            self.consume();
        }

        debug!("Parsed {} statements with {} errors", statements.len(), self.errors.len());
        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current.token_type() {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            TokenType::If => self.parse_if_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        if !self.expect_next(TokenType::Identifier) {
            self.synchronize();
            return None;
        }

        let name = self.current.source().to_owned();

        if !self.expect_next(TokenType::Assign) {
            self.synchronize();
            return None;
        }

        self.consume();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_statement_end();

        Some(Stmt::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        if self.check_next(TokenType::Semicolon) || self.check_next(TokenType::BracketRight) || self.check_next(TokenType::Eof) {
            self.skip_statement_end();
            return Some(Stmt::Return { value: None });
        }

        self.consume();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_statement_end();

        Some(Stmt::Return { value: Some(value) })
    }

    fn parse_if_statement(&mut self) -> Option<Stmt> {
        if !self.expect_next(TokenType::ParenthesisLeft) {
            return None;
        }

        self.consume();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_next(TokenType::ParenthesisRight) || !self.expect_next(TokenType::BracketLeft) {
            return None;
        }

        let consequence = self.parse_block()?;

        let alternative = if self.check_next(TokenType::Else) {
            self.consume();

            if !self.expect_next(TokenType::BracketLeft) {
                return None;
            }

            Some(self.parse_block()?)
        } else {
            None
        };

        self.skip_statement_end();
        Some(Stmt::If { condition, consequence, alternative })
    }

    fn parse_block(&mut self) -> Option<Block> {
        let mut statements = Vec::new();
        self.consume();

        while !self.check(TokenType::BracketRight) {
            if self.is_eof() {
                self.errors.push(ParseError::ExpectedToken {
                    pos: *self.current.start(),
                    expected: TokenType::BracketRight,
                    got: TokenType::Eof,
                });
                return None;
            }

            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }

            self.consume();
        }

        Some(Block { statements })
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_statement_end();

        Some(Stmt::Expression(expr))
    }

    // Expression parsing

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = match PREFIX_RULES.get(&self.current.token_type()) {
            Some(rule) => self.apply_prefix_rule(*rule)?,
            None => {
                self.errors.push(ParseError::NoPrefixRule {
                    pos: *self.current.start(),
                    token_type: self.current.token_type(),
                });
                return None;
            },
        };

        while !self.check_next(TokenType::Semicolon) && precedence < precedence_of(self.next.token_type()) {
            let rule = match INFIX_RULES.get(&self.next.token_type()) {
                Some(rule) => *rule,
                None => return Some(left),
            };

            self.consume();
            left = self.apply_infix_rule(rule, left)?;
        }

        Some(left)
    }

    fn apply_prefix_rule(&mut self, rule: PrefixRule) -> Option<Expr> {
        match rule {
            PrefixRule::Identifier => Some(Expr::Identifier(self.current.source().to_owned())),
            PrefixRule::Integer => self.parse_integer(),
            PrefixRule::Boolean => Some(Expr::Boolean(self.check(TokenType::True))),
            PrefixRule::Operator => {
                let operator = PrefixOperator::from_token_type(self.current.token_type())?;
                self.consume();

                let right = self.parse_expression(Precedence::Prefix)?;
                Some(Expr::Prefix { operator, right: Box::new(right) })
            },
            PrefixRule::Grouped => {
                self.consume();
                let expr = self.parse_expression(Precedence::Lowest)?;

                if !self.expect_next(TokenType::ParenthesisRight) {
                    return None;
                }

                Some(expr)
            },
        }
    }

    fn apply_infix_rule(&mut self, rule: InfixRule, left: Expr) -> Option<Expr> {
        match rule {
            InfixRule::Operator => {
                let operator = InfixOperator::from_token_type(self.current.token_type())?;
                let precedence = precedence_of(self.current.token_type());
                self.consume();

                let right = self.parse_expression(precedence)?;
                Some(Expr::Infix { left: Box::new(left), operator, right: Box::new(right) })
            },
        }
    }

    fn parse_integer(&mut self) -> Option<Expr> {
        match self.current.source().parse::<i64>() {
            Ok(value) => Some(Expr::Integer(value)),
            Err(_) => {
                self.errors.push(ParseError::InvalidInteger {
                    pos: *self.current.start(),
                    literal: self.current.source().to_owned(),
                });
                None
            },
        }
    }

    // Token handling

    fn consume(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next); // self.next gets replaced below
        self.next = self.lexer.next_token();
    }

    fn expect_next(&mut self, token_type: TokenType) -> bool {
        if self.check_next(token_type) {
            self.consume();
            return true;
        }

        self.errors.push(ParseError::ExpectedToken {
            pos: *self.next.start(),
            expected: token_type,
            got: self.next.token_type(),
        });
        false
    }

    #[inline]
    fn skip_statement_end(&mut self) {
        if self.check_next(TokenType::Semicolon) {
            self.consume();
        }
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type() == token_type
    }

    #[inline]
    fn check_next(&self, token_type: TokenType) -> bool {
        self.next.token_type() == token_type
    }

    fn is_eof(&self) -> bool {
        self.current.token_type() == TokenType::Eof
    }

    // Error handling

    /// Skips the rest of a malformed statement, stopping on its `;` or before a closing `}`.
    fn synchronize(&mut self) {
        while !self.check(TokenType::Semicolon) && !self.is_eof() {
            if self.check_next(TokenType::BracketRight) {
                return;
            }

            self.consume();
        }
    }
}
