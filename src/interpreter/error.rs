use thiserror::Error;
use crate::interpreter::ast::{InfixOperator, PrefixOperator};
use crate::interpreter::lexer::{TokenPos, TokenType};
use crate::interpreter::object::ObjectType;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    ExpectedToken {
        pos: TokenPos,
        expected: TokenType,
        got: TokenType,
    },

    #[error("no prefix parse function for {token_type}")]
    NoPrefixRule {
        pos: TokenPos,
        token_type: TokenType,
    },

    #[error("could not parse \"{literal}\" as integer")]
    InvalidInteger {
        pos: TokenPos,
        literal: String,
    },
}

impl ParseError {
    pub fn pos(&self) -> TokenPos {
        match self {
            ParseError::ExpectedToken { pos, .. } => *pos,
            ParseError::NoPrefixRule { pos, .. } => *pos,
            ParseError::InvalidInteger { pos, .. } => *pos,
        }
    }
}

/// Failure carried through evaluation inside [`Object::Error`](crate::interpreter::object::Object::Error).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: ObjectType,
    },

    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: InfixOperator,
        right: ObjectType,
    },

    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),

    #[error("division by zero")]
    DivisionByZero,
}
