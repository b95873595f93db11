use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::Chars;
use lazy_static::lazy_static;
use strum::IntoStaticStr;
use crate::util;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 1)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {} column {}]", self.line, self.column)
    }
}

/// Names are the ones diagnostics print, e.g. `expected next token to be IDENTIFIER, got = instead`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum TokenType {
    #[strum(serialize = "ILLEGAL")] Illegal,
    #[strum(serialize = "EOF")] Eof,

    #[strum(serialize = "IDENTIFIER")] Identifier,
    #[strum(serialize = "INT")] Int,

    #[strum(serialize = "=")] Assign,
    #[strum(serialize = "+")] Plus,
    #[strum(serialize = "-")] Minus,
    #[strum(serialize = "!")] Not,
    #[strum(serialize = "*")] Multiply,
    #[strum(serialize = "/")] Divide,

    #[strum(serialize = "<")] Less,
    #[strum(serialize = ">")] Greater,
    #[strum(serialize = "==")] Equal,
    #[strum(serialize = "!=")] NotEqual,

    #[strum(serialize = ",")] Comma,
    #[strum(serialize = ";")] Semicolon,
    #[strum(serialize = "(")] ParenthesisLeft,
    #[strum(serialize = ")")] ParenthesisRight,
    #[strum(serialize = "{")] BracketLeft,
    #[strum(serialize = "}")] BracketRight,

    // Keywords
    #[strum(serialize = "FUNCTION")] Function,
    #[strum(serialize = "LET")] Let,
    #[strum(serialize = "IF")] If,
    #[strum(serialize = "ELSE")] Else,
    #[strum(serialize = "TRUE")] True,
    #[strum(serialize = "FALSE")] False,
    #[strum(serialize = "RETURN")] Return,
}

impl TokenType {
    /// Surface spelling of a keyword token type.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            TokenType::Function => Some("karya"),
            TokenType::Let => Some("manau"),
            TokenType::If => Some("yadi"),
            TokenType::Else => Some("natra"),
            TokenType::True => Some("satya"),
            TokenType::False => Some("jhuth"),
            TokenType::Return => Some("firta"),
            _ => None,
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = [
        TokenType::Function, TokenType::Let,
        TokenType::If, TokenType::Else,
        TokenType::True, TokenType::False,
        TokenType::Return,
    ].into_iter().filter_map(|token_type| token_type.keyword().map(|keyword| (keyword, token_type))).collect();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
    start: TokenPos, end: TokenPos,
}

impl Token {
    pub fn empty() -> Token {
        Token {
            token_type: TokenType::Eof,
            source: String::new(),
            start: TokenPos::begin(), end: TokenPos::begin(),
        }
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn end(&self) -> &TokenPos { &self.end }
}

/// Pull-based tokenizer. Once the input is exhausted every call yields an `EOF` token.
pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start_index = self.current_index;
        self.start_pos = self.current_pos;

        let c = match self.consume() {
            Some(c) => c,
            None => return self.make_token(TokenType::Eof),
        };

        match c {
            '(' => self.make_token(TokenType::ParenthesisLeft),
            ')' => self.make_token(TokenType::ParenthesisRight),
            '{' => self.make_token(TokenType::BracketLeft),
            '}' => self.make_token(TokenType::BracketRight),
            ',' => self.make_token(TokenType::Comma),
            ';' => self.make_token(TokenType::Semicolon),

            '+' => self.make_token(TokenType::Plus),
            '-' => self.make_token(TokenType::Minus),
            '*' => self.make_token(TokenType::Multiply),
            '/' => self.make_token(TokenType::Divide),
            '<' => self.make_token(TokenType::Less),
            '>' => self.make_token(TokenType::Greater),

            '=' => if self.expect('=') { self.make_token(TokenType::Equal) } else {
                self.make_token(TokenType::Assign)
            },
            '!' => if self.expect('=') { self.make_token(TokenType::NotEqual) } else {
                self.make_token(TokenType::Not)
            },

            c if util::is_numeric(c) => self.scan_number(),
            c if util::is_alphabetic(c) => self.scan_identifier(),

            _ => self.make_token(TokenType::Illegal),
        }
    }

    fn scan_number(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_numeric(c) {
                break;
            }

            let _ = self.consume();
        }

        self.make_token(TokenType::Int)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphabetic(c) {
                break;
            }

            let _ = self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        let token_type = KEYWORDS.get(name).copied().unwrap_or(TokenType::Identifier);

        self.make_token(token_type)
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            source: self.input[self.start_index..self.current_index].to_owned(),

            start: self.start_pos, end: self.current_pos,
        }
    }

    fn consume(&mut self) -> Option<char> {
        self.peek_1.take().or_else(|| self.chars.next()).map(|c| {
            self.current_index += c.len_utf8();

            if c == '\n' {
                self.current_pos.line += 1;
                self.current_pos.column = 1;
            } else {
                self.current_pos.column += 1;
            }

            c
        })
    }

    fn peek(&mut self) -> Option<char> {
        if self.peek_1.is_none() {
            self.peek_1 = self.chars.next();
        }

        self.peek_1
    }

    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            let _ = self.consume();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !util::is_whitespace(c) {
                return;
            }

            let _ = self.consume();
        }
    }
}
